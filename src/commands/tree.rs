//! The `lin tree` command: issue dependency tree rendering.

use super::Context;
use crate::Result;
use crate::output;
use crate::tree::TreeWalker;

/// Fetch the root issue and render its dependency tree.
///
/// Only this initial fetch is fatal; fetch failures during expansion
/// degrade the affected branch to a leaf inside the walker.
pub fn run(ctx: &Context, issue: &str, depth: usize, json: bool) -> Result<()> {
    let client = ctx.client()?;
    let root = client.issue(issue)?;

    let walker = TreeWalker::new(&client, depth);
    if json {
        let tree = walker.build(&root);
        println!("{}", output::to_json(&tree)?);
    } else {
        // The rendered text already carries its trailing newline
        print!("{}", walker.render_text(&root, ctx.colors()));
    }

    Ok(())
}
