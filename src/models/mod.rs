//! Data models for the Linear GraphQL API.
//!
//! This module defines the wire-level data structures:
//! - `Issue` - A tracked unit of work, including its tree edges
//! - `IssueStub` - Shallow reference to an issue (no nested edges)
//! - `IssueRelation` - A typed relationship between two issues
//! - `WorkflowState` - Issue status (e.g. "Todo", "In Progress")
//! - `Team`, `User`, `Label`, `Comment` - Supporting entities
//!
//! All structs deserialize directly from GraphQL response payloads, so
//! field names follow the API's camelCase convention via serde renames.

use serde::{Deserialize, Serialize};

/// A workflow state attached to an issue (e.g. "Todo", "Done").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    /// Remote id; only selected where a mutation needs it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// State display name
    pub name: String,

    /// State category: "backlog", "unstarted", "started", "completed", "canceled"
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub state_type: Option<String>,

    /// Hex color assigned in the workspace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A shallow reference to an issue.
///
/// Stubs appear inside a fetched issue's `parent`, `children`, and
/// `relations` fields. They never carry nested edges of their own; a
/// full fetch by `identifier` is required to expand one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueStub {
    /// Opaque remote-assigned id (stable, used as the cycle-detection key)
    pub id: String,

    /// Human-facing short code (e.g. "LIN-123"), used for re-fetching
    pub identifier: String,

    /// Issue title
    pub title: String,

    /// Current workflow state, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<WorkflowState>,
}

impl IssueStub {
    /// The state's display name, if the issue has a state.
    pub fn state_name(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.name.as_str())
    }
}

/// A typed relationship record between two issues.
///
/// `related_issue` is optional: the API can return relation records
/// whose target has since been deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRelation {
    /// Raw relation type string (e.g. "blocks", "blocked", "duplicate")
    #[serde(rename = "type")]
    pub relation_type: String,

    /// The issue on the other end of the relation
    #[serde(rename = "relatedIssue", default)]
    pub related_issue: Option<IssueStub>,
}

/// A unit of tracked work.
///
/// List queries only select the flat fields; `parent`, `children`, and
/// `relations` default to empty unless the tree query populated them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Opaque remote-assigned id
    pub id: String,

    /// Human-facing short code (e.g. "LIN-123")
    pub identifier: String,

    /// Issue title
    pub title: String,

    /// Markdown description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Current workflow state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<WorkflowState>,

    /// Priority (0 = none, 1 = urgent .. 4 = low)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    /// Assigned user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,

    /// Owning team
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,

    /// Attached labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Connection<Label>>,

    /// Web URL of the issue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Creation timestamp (ISO 8601)
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Last update timestamp (ISO 8601)
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Parent issue stub, if this is a sub-issue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<IssueStub>,

    /// Direct sub-issue stubs, in API order
    #[serde(default, skip_serializing_if = "Connection::is_empty")]
    pub children: Connection<IssueStub>,

    /// Typed relations to other issues, in API order
    #[serde(default, skip_serializing_if = "Connection::is_empty")]
    pub relations: Connection<IssueRelation>,
}

impl Issue {
    /// The state's display name, if the issue has a state.
    pub fn state_name(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.name.as_str())
    }

    /// Human label for the numeric priority field.
    pub fn priority_label(&self) -> &'static str {
        match self.priority {
            Some(1) => "Urgent",
            Some(2) => "High",
            Some(3) => "Medium",
            Some(4) => "Low",
            _ => "None",
        }
    }

    /// Shallow stub view of this issue (drops all nested edges).
    pub fn as_stub(&self) -> IssueStub {
        IssueStub {
            id: self.id.clone(),
            identifier: self.identifier.clone(),
            title: self.title.clone(),
            state: self.state.clone(),
        }
    }
}

/// A GraphQL connection wrapper (`{ nodes: [...] }`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Connection<T> {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// Derived Default would demand T: Default; an empty connection never
// needs one
impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// A team (issues are namespaced by team key, e.g. "LIN").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: String,

    /// Short key used in issue identifiers (e.g. "LIN")
    pub key: String,

    pub name: String,
}

/// A workspace member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    pub name: String,

    /// Short handle shown in the UI
    #[serde(rename = "displayName", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// An issue label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub id: String,

    pub name: String,

    /// Hex color assigned in the workspace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A comment on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,

    /// Markdown body
    pub body: String,

    /// Comment author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    /// Creation timestamp (ISO 8601)
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Cursor pagination info returned alongside list queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,

    #[serde(rename = "endCursor", default)]
    pub end_cursor: Option<String>,
}
