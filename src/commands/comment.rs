//! Comment commands.

use super::Context;
use crate::Result;
use crate::output;

/// `lin comment list`
pub fn list(ctx: &Context, issue: &str) -> Result<()> {
    let client = ctx.client()?;
    let comments = client.comments(issue)?;

    if comments.is_empty() {
        println!("No comments on {}", issue);
        return Ok(());
    }

    for (i, comment) in comments.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let author = comment
            .user
            .as_ref()
            .map(|u| u.display_name.as_deref().unwrap_or(&u.name))
            .unwrap_or("(unknown)");
        let when = comment
            .created_at
            .as_deref()
            .map(output::format_timestamp)
            .unwrap_or_default();
        println!("-- {} ({})", author, when);
        println!("{}", comment.body.trim_end());
    }

    Ok(())
}

/// `lin comment add`
pub fn add(ctx: &Context, issue: &str, body: &str) -> Result<()> {
    let client = ctx.client()?;

    // The mutation wants the remote id, not the human identifier
    let resolved = client.issue(issue)?;
    client.create_comment(&resolved.id, body)?;

    println!("Commented on {}", resolved.identifier);
    Ok(())
}
