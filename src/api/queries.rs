//! GraphQL documents sent to the Linear API.
//!
//! Each constant is a complete query or mutation; variables are supplied
//! as JSON by the client methods in the parent module.

/// Fields selected for shallow issue references. Stubs never select
/// their own parent/children/relations; expanding one requires a full
/// fetch by identifier.
const STUB_FIELDS: &str = "id identifier title state { name type }";

/// Current authenticated user.
pub const VIEWER: &str = "\
query Viewer {
  viewer { id name displayName email }
}";

/// Full issue snapshot including its tree edges, looked up by id or
/// human-facing identifier.
pub fn issue() -> String {
    format!(
        "\
query Issue($id: String!) {{
  issue(id: $id) {{
    id identifier title description priority url createdAt updatedAt
    state {{ id name type color }}
    assignee {{ id name displayName email }}
    team {{ id key name }}
    labels {{ nodes {{ id name color }} }}
    parent {{ {stub} }}
    children {{ nodes {{ {stub} }} }}
    relations {{ nodes {{ type relatedIssue {{ {stub} }} }} }}
  }}
}}",
        stub = STUB_FIELDS
    )
}

/// Filtered issue listing.
pub const ISSUES: &str = "\
query Issues($first: Int!, $filter: IssueFilter) {
  issues(first: $first, filter: $filter) {
    nodes {
      id identifier title priority updatedAt
      state { name type }
      assignee { id name displayName }
      team { id key name }
    }
    pageInfo { hasNextPage endCursor }
  }
}";

/// Create an issue.
pub const ISSUE_CREATE: &str = "\
mutation IssueCreate($input: IssueCreateInput!) {
  issueCreate(input: $input) {
    success
    issue { id identifier title url state { name type } }
  }
}";

/// Update an issue.
pub const ISSUE_UPDATE: &str = "\
mutation IssueUpdate($id: String!, $input: IssueUpdateInput!) {
  issueUpdate(id: $id, input: $input) {
    success
    issue { id identifier title url state { name type } }
  }
}";

/// Archive an issue.
pub const ISSUE_ARCHIVE: &str = "\
mutation IssueArchive($id: String!) {
  issueArchive(id: $id) { success }
}";

/// All teams in the workspace.
pub const TEAMS: &str = "\
query Teams {
  teams { nodes { id key name } }
}";

/// All workspace members.
pub const USERS: &str = "\
query Users {
  users { nodes { id name displayName email } }
}";

/// All issue labels.
pub const LABELS: &str = "\
query Labels {
  issueLabels { nodes { id name color } }
}";

/// Workflow states for a team, used to resolve a state name to its id.
pub const TEAM_STATES: &str = "\
query TeamStates($teamId: String!) {
  team(id: $teamId) {
    states { nodes { id name type } }
  }
}";

/// Comments on an issue, newest last.
pub const ISSUE_COMMENTS: &str = "\
query IssueComments($id: String!) {
  issue(id: $id) {
    id identifier
    comments { nodes { id body createdAt user { id name displayName } } }
  }
}";

/// Add a comment to an issue.
pub const COMMENT_CREATE: &str = "\
mutation CommentCreate($input: CommentCreateInput!) {
  commentCreate(input: $input) {
    success
    comment { id body createdAt }
  }
}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_query_selects_tree_edges() {
        let query = issue();
        assert!(query.contains("parent { id identifier title"));
        assert!(query.contains("children { nodes {"));
        assert!(query.contains("relations { nodes { type relatedIssue"));
    }

    #[test]
    fn test_stub_fields_stay_shallow() {
        // Stubs must not select nested edges of their own
        assert!(!STUB_FIELDS.contains("parent"));
        assert!(!STUB_FIELDS.contains("children"));
        assert!(!STUB_FIELDS.contains("relations"));
    }
}
