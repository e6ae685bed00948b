//! Team commands.

use super::Context;
use crate::Result;
use crate::output;

/// `lin team list`
pub fn list(ctx: &Context, json: bool) -> Result<()> {
    let client = ctx.client()?;
    let teams = client.teams()?;

    if json {
        println!("{}", output::to_json(&teams)?);
        return Ok(());
    }

    let rows: Vec<Vec<String>> = teams
        .iter()
        .map(|team| vec![team.key.clone(), team.name.clone()])
        .collect();
    print!("{}", output::table(&["KEY", "NAME"], &rows));

    Ok(())
}
