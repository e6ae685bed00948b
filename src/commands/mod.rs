//! Command implementations for the lin CLI.
//!
//! Each submodule holds the business logic for one subcommand group.
//! Commands receive a [`Context`] carrying the loaded config and the
//! global flags, build an API client from it, and print their own
//! output; errors propagate to `main` for uniform reporting.

pub mod auth;
pub mod comment;
pub mod config;
pub mod issue;
pub mod label;
pub mod team;
pub mod tree;
pub mod user;

use crate::Result;
use crate::api::Client;
use crate::config::Config;

/// Shared state handed to every command.
pub struct Context {
    pub config: Config,

    /// Global `--plaintext` flag: suppress ANSI colors
    pub plaintext: bool,

    /// Global `--api-key` flag: overrides env and config file
    pub api_key_override: Option<String>,
}

impl Context {
    pub fn new(config: Config, plaintext: bool, api_key_override: Option<String>) -> Self {
        Self {
            config,
            plaintext,
            api_key_override,
        }
    }

    /// Build an API client using the configured endpoint and the
    /// resolved API key (flag > env > config file).
    pub fn client(&self) -> Result<Client> {
        let api_key = match &self.api_key_override {
            Some(key) => key.clone(),
            None => self.config.api_key()?,
        };
        Ok(Client::new(self.config.api_url(), api_key))
    }

    /// Whether output should be colored.
    pub fn colors(&self) -> bool {
        !self.plaintext && console::colors_enabled()
    }

    /// Team key to use when a command's `--team` flag is omitted.
    pub fn team_or_default(&self, team: Option<String>) -> Result<String> {
        team.or_else(|| self.config.default_team.clone())
            .ok_or_else(|| {
                crate::Error::InvalidInput(
                    "no team specified: pass --team or set default-team via `lin config set`"
                        .to_string(),
                )
            })
    }
}
