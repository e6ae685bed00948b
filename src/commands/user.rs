//! User commands.

use super::Context;
use crate::Result;
use crate::output;

/// `lin user list`
pub fn list(ctx: &Context, json: bool) -> Result<()> {
    let client = ctx.client()?;
    let users = client.users()?;

    if json {
        println!("{}", output::to_json(&users)?);
        return Ok(());
    }

    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|user| {
            vec![
                user.display_name.clone().unwrap_or_default(),
                user.name.clone(),
                user.email.clone().unwrap_or_default(),
            ]
        })
        .collect();
    print!("{}", output::table(&["HANDLE", "NAME", "EMAIL"], &rows));

    Ok(())
}
