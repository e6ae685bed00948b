//! Human-readable output helpers.
//!
//! Tables are rendered without ANSI codes (styled cells would break
//! column alignment); colors are applied to standalone fields like
//! identifiers and states in detail views and the tree renderer.

use console::Style;

/// Style used for issue identifiers.
pub fn identifier_style() -> Style {
    Style::new().cyan()
}

/// State-dependent hue, keyed off the state category when known.
pub fn state_style(state_type: Option<&str>) -> Style {
    match state_type {
        Some("completed") => Style::new().green(),
        Some("started") => Style::new().yellow(),
        Some("canceled") => Style::new().red(),
        Some("backlog") | Some("unstarted") => Style::new().blue(),
        _ => Style::new(),
    }
}

/// Apply a style, forcing ANSI output regardless of TTY detection.
///
/// Callers decide whether colors are wanted at all (global `--plaintext`
/// plus TTY detection); once they are, styling must not silently turn
/// itself off again.
pub fn paint(text: &str, style: Style, colors: bool) -> String {
    if colors {
        style.force_styling(true).apply_to(text).to_string()
    } else {
        text.to_string()
    }
}

/// Render rows as a fixed-width table with a header line.
///
/// Column widths fit the widest cell; columns are separated by two
/// spaces and the last column is not padded.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(columns) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers.iter().map(|h| h.to_string()), &widths);
    for row in rows {
        push_row(&mut out, row.iter().cloned(), &widths);
    }
    out
}

fn push_row(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let cells: Vec<String> = cells.collect();
    let last = cells.len().saturating_sub(1);
    for (i, cell) in cells.iter().enumerate() {
        if i == last {
            out.push_str(cell);
        } else {
            out.push_str(&format!("{:<width$}  ", cell, width = widths[i]));
        }
    }
    out.push('\n');
}

/// Serialize a value as pretty JSON for `--json` output.
pub fn to_json<T: serde::Serialize>(value: &T) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Format an ISO 8601 timestamp for display, falling back to the raw
/// string when it does not parse.
pub fn format_timestamp(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}
