//! Issue CRUD commands.

use super::Context;
use crate::api::{IssueCreateInput, IssueFilter, IssueUpdateInput};
use crate::models::Issue;
use crate::output::{self, identifier_style, paint, state_style};
use crate::{Error, Result};

/// `lin issue list`
pub fn list(
    ctx: &Context,
    team: Option<String>,
    assignee: Option<String>,
    state: Option<String>,
    limit: usize,
    json: bool,
) -> Result<()> {
    let client = ctx.client()?;

    // Unlike create, listing without a team is fine: fall back to the
    // configured default only when one exists
    let filter = IssueFilter {
        team: team.or_else(|| ctx.config.default_team.clone()),
        assignee,
        state,
        limit,
    };
    let issues = client.issues(&filter)?;

    if json {
        println!("{}", output::to_json(&issues)?);
        return Ok(());
    }

    if issues.is_empty() {
        println!("No issues found");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = issues
        .iter()
        .map(|issue| {
            vec![
                issue.identifier.clone(),
                issue.state_name().unwrap_or("-").to_string(),
                issue.priority_label().to_string(),
                assignee_name(issue).unwrap_or("-").to_string(),
                issue.title.clone(),
            ]
        })
        .collect();
    print!(
        "{}",
        output::table(&["ID", "STATE", "PRIORITY", "ASSIGNEE", "TITLE"], &rows)
    );

    Ok(())
}

/// `lin issue view`
pub fn view(ctx: &Context, id: &str, json: bool) -> Result<()> {
    let client = ctx.client()?;
    let issue = client.issue(id)?;

    if json {
        println!("{}", output::to_json(&issue)?);
        return Ok(());
    }

    let colors = ctx.colors();
    println!(
        "{}  {}",
        paint(&issue.identifier, identifier_style(), colors),
        issue.title
    );

    if let Some(state) = &issue.state {
        println!(
            "State:     {}",
            paint(&state.name, state_style(state.state_type.as_deref()), colors)
        );
    }
    println!("Priority:  {}", issue.priority_label());
    if let Some(assignee) = assignee_name(&issue) {
        println!("Assignee:  {}", assignee);
    }
    if let Some(team) = &issue.team {
        println!("Team:      {} ({})", team.name, team.key);
    }
    if let Some(labels) = &issue.labels {
        if !labels.nodes.is_empty() {
            let names: Vec<&str> = labels.nodes.iter().map(|l| l.name.as_str()).collect();
            println!("Labels:    {}", names.join(", "));
        }
    }
    if let Some(url) = &issue.url {
        println!("URL:       {}", url);
    }
    if let Some(updated) = &issue.updated_at {
        println!("Updated:   {}", output::format_timestamp(updated));
    }
    if let Some(description) = &issue.description {
        if !description.trim().is_empty() {
            println!();
            println!("{}", description.trim_end());
        }
    }

    Ok(())
}

/// `lin issue create`
pub fn create(
    ctx: &Context,
    title: String,
    team: Option<String>,
    description: Option<String>,
    priority: Option<i64>,
    assignee: Option<String>,
    labels: Vec<String>,
) -> Result<()> {
    validate_priority(priority)?;

    let client = ctx.client()?;
    let team_key = ctx.team_or_default(team)?;
    let team = client.team_by_key(&team_key)?;

    let assignee_id = match assignee {
        Some(name) => Some(client.user_by_name(&name)?.id),
        None => None,
    };

    let label_ids = if labels.is_empty() {
        Vec::new()
    } else {
        let known = client.labels()?;
        labels
            .iter()
            .map(|name| {
                known
                    .iter()
                    .find(|l| l.name.eq_ignore_ascii_case(name))
                    .map(|l| l.id.clone())
                    .ok_or_else(|| Error::NotFound(format!("label {}", name)))
            })
            .collect::<Result<Vec<String>>>()?
    };

    let input = IssueCreateInput {
        team_id: team.id,
        title,
        description,
        priority,
        assignee_id,
        label_ids,
    };
    let issue = client.create_issue(&input)?;

    println!("Created {}: {}", issue.identifier, issue.title);
    if let Some(url) = &issue.url {
        println!("{}", url);
    }

    Ok(())
}

/// `lin issue update`
#[allow(clippy::too_many_arguments)]
pub fn update(
    ctx: &Context,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    priority: Option<i64>,
    state: Option<String>,
    assignee: Option<String>,
) -> Result<()> {
    if title.is_none()
        && description.is_none()
        && priority.is_none()
        && state.is_none()
        && assignee.is_none()
    {
        return Err(Error::InvalidInput("nothing to update".to_string()));
    }
    validate_priority(priority)?;

    let client = ctx.client()?;
    let issue = client.issue(id)?;

    let state_id = match state {
        Some(name) => {
            let team = issue
                .team
                .as_ref()
                .ok_or_else(|| Error::InvalidInput(format!("issue {} has no team", id)))?;
            client.state_by_name(&team.id, &name)?.id
        }
        None => None,
    };
    let assignee_id = match assignee {
        Some(name) => Some(client.user_by_name(&name)?.id),
        None => None,
    };

    let input = IssueUpdateInput {
        title,
        description,
        priority,
        state_id,
        assignee_id,
    };
    let updated = client.update_issue(&issue.id, &input)?;

    println!(
        "Updated {}: {} ({})",
        updated.identifier,
        updated.title,
        updated.state_name().unwrap_or("-")
    );

    Ok(())
}

/// `lin issue archive`
pub fn archive(ctx: &Context, id: &str) -> Result<()> {
    let client = ctx.client()?;
    let issue = client.issue(id)?;
    client.archive_issue(&issue.id)?;
    println!("Archived {}", issue.identifier);
    Ok(())
}

fn assignee_name(issue: &Issue) -> Option<&str> {
    issue
        .assignee
        .as_ref()
        .map(|u| u.display_name.as_deref().unwrap_or(&u.name))
}

fn validate_priority(priority: Option<i64>) -> Result<()> {
    match priority {
        Some(p) if !(0..=4).contains(&p) => Err(Error::InvalidInput(format!(
            "priority must be 0-4, got {}",
            p
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_priority_bounds() {
        assert!(validate_priority(None).is_ok());
        assert!(validate_priority(Some(0)).is_ok());
        assert!(validate_priority(Some(4)).is_ok());
        assert!(validate_priority(Some(5)).is_err());
        assert!(validate_priority(Some(-1)).is_err());
    }
}
