//! linctl - A command-line client for the Linear issue tracker.
//!
//! This library provides the core functionality for the `lin` CLI tool,
//! including the GraphQL API client, issue CRUD plumbing, and the issue
//! dependency tree engine.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod output;
pub mod tree;

/// Library-level error type for linctl operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] api::ApiError),

    #[error("Config error: {0}")]
    Config(String),

    #[error(
        "No API key configured: run `lin auth login` or set the LINEAR_API_KEY environment variable"
    )]
    MissingApiKey,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for linctl operations.
pub type Result<T> = std::result::Result<T, Error>;
