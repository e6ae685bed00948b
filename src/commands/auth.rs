//! Authentication commands.

use std::io::{BufRead, Write};

use super::Context;
use crate::api::Client;
use crate::config::{API_KEY_ENV, config_file};
use crate::{Error, Result};

/// `lin auth login`
///
/// Validates the key against the API before persisting it, so a typo'd
/// key never lands in the config file.
pub fn login(ctx: &Context, key: Option<String>) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => prompt_for_key()?,
    };
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(Error::InvalidInput("API key must not be empty".to_string()));
    }

    let client = Client::new(ctx.config.api_url(), key.clone());
    let viewer = client.viewer()?;

    let mut config = ctx.config.clone();
    config.api_key = Some(key);
    config.save()?;

    println!(
        "Authenticated as {}{}",
        viewer.name,
        viewer
            .email
            .as_deref()
            .map(|e| format!(" ({})", e))
            .unwrap_or_default()
    );
    println!("API key saved to {}", config_file()?.display());

    Ok(())
}

/// `lin auth status`
pub fn status(ctx: &Context) -> Result<()> {
    let source = key_source(ctx)?;
    let client = ctx.client()?;
    let viewer = client.viewer()?;

    println!(
        "Authenticated as {}{}",
        viewer.name,
        viewer
            .email
            .as_deref()
            .map(|e| format!(" ({})", e))
            .unwrap_or_default()
    );
    println!("API key source: {}", source);

    Ok(())
}

fn key_source(ctx: &Context) -> Result<&'static str> {
    if ctx.api_key_override.is_some() {
        return Ok("--api-key flag");
    }
    if std::env::var(API_KEY_ENV).is_ok_and(|v| !v.trim().is_empty()) {
        return Ok("environment variable");
    }
    if ctx.config.api_key.is_some() {
        return Ok("config file");
    }
    Err(Error::MissingApiKey)
}

fn prompt_for_key() -> Result<String> {
    eprint!("Linear API key: ");
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}
