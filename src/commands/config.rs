//! Configuration commands.

use super::Context;
use crate::Result;

/// `lin config get`
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    println!("{}", ctx.config.get(key)?);
    Ok(())
}

/// `lin config set`
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = ctx.config.clone();
    config.set(key, value)?;
    config.save()?;
    println!("{} = {}", key, config.get(key)?);
    Ok(())
}

/// `lin config list`
pub fn list(ctx: &Context) -> Result<()> {
    for (key, value) in ctx.config.list() {
        println!("{} = {}", key, value);
    }
    Ok(())
}
