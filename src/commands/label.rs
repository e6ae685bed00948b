//! Label commands.

use super::Context;
use crate::Result;
use crate::output;

/// `lin label list`
pub fn list(ctx: &Context, json: bool) -> Result<()> {
    let client = ctx.client()?;
    let labels = client.labels()?;

    if json {
        println!("{}", output::to_json(&labels)?);
        return Ok(());
    }

    let rows: Vec<Vec<String>> = labels
        .iter()
        .map(|label| {
            vec![
                label.name.clone(),
                label.color.clone().unwrap_or_default(),
            ]
        })
        .collect();
    print!("{}", output::table(&["NAME", "COLOR"], &rows));

    Ok(())
}
