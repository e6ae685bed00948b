//! Linear GraphQL API client.
//!
//! All requests go through a single blocking `graphql` helper (blocking
//! is the right shape for a CLI; there is no concurrent fan-out
//! anywhere). Transport and API-level failures map onto [`ApiError`];
//! "not found" results surface as [`crate::Error::NotFound`] so commands
//! can report them uniformly.

pub mod queries;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;

use crate::models::{Comment, Connection, Issue, Label, Team, User, WorkflowState};
use crate::tree::IssueFetcher;
use crate::{Error, Result};

/// Production GraphQL endpoint.
pub const DEFAULT_API_URL: &str = "https://api.linear.app/graphql";

/// User-Agent header sent with every request.
const USER_AGENT: &str = "linctl-cli";

/// Errors that can occur while talking to the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// API key is invalid or expired (401 Unauthorized)
    #[error("Invalid or expired API key: the API returned 401 Unauthorized")]
    Unauthorized,

    /// Too many requests (429)
    #[error("Rate limited by the API: retry in a little while")]
    RateLimited,

    /// Any other non-success HTTP status
    #[error("HTTP {0}: {1}")]
    Http(u16, String),

    /// Network or other transport error
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The API processed the request but returned GraphQL errors
    #[error("API error: {0}")]
    Api(String),

    /// Failed to parse the response body
    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,

    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Unwrap the `data`/`errors` envelope of a GraphQL response.
fn into_data<T>(response: GraphQlResponse<T>) -> std::result::Result<T, ApiError> {
    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(ApiError::Api(messages.join("; ")));
    }
    response
        .data
        .ok_or_else(|| ApiError::Parse("response contained no data".to_string()))
}

/// Filters for the issue list query.
#[derive(Debug, Default)]
pub struct IssueFilter {
    /// Team key (e.g. "ENG")
    pub team: Option<String>,

    /// Assignee display name (substring, case-insensitive)
    pub assignee: Option<String>,

    /// Workflow state name (case-insensitive)
    pub state: Option<String>,

    /// Maximum number of issues to return
    pub limit: usize,
}

impl IssueFilter {
    /// Build the GraphQL `IssueFilter` variable, or `Null` when no
    /// filter is set.
    fn to_value(&self) -> Value {
        let mut filter = serde_json::Map::new();
        if let Some(team) = &self.team {
            filter.insert("team".to_string(), json!({"key": {"eq": team}}));
        }
        if let Some(assignee) = &self.assignee {
            filter.insert(
                "assignee".to_string(),
                json!({"displayName": {"containsIgnoreCase": assignee}}),
            );
        }
        if let Some(state) = &self.state {
            filter.insert("state".to_string(), json!({"name": {"eqIgnoreCase": state}}));
        }
        if filter.is_empty() {
            Value::Null
        } else {
            Value::Object(filter)
        }
    }
}

/// Fields accepted by the issue create mutation.
#[derive(Debug, Default, serde::Serialize)]
pub struct IssueCreateInput {
    #[serde(rename = "teamId")]
    pub team_id: String,

    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    #[serde(rename = "assigneeId", skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,

    #[serde(rename = "labelIds", skip_serializing_if = "Vec::is_empty")]
    pub label_ids: Vec<String>,
}

/// Fields accepted by the issue update mutation.
#[derive(Debug, Default, serde::Serialize)]
pub struct IssueUpdateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    #[serde(rename = "stateId", skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,

    #[serde(rename = "assigneeId", skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
}

/// Blocking client for the Linear GraphQL API.
pub struct Client {
    url: String,
    api_key: String,
}

impl Client {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// POST a GraphQL document and deserialize the unwrapped `data`.
    fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> std::result::Result<T, ApiError> {
        let body = json!({"query": query, "variables": variables});

        let response = ureq::post(&self.url)
            .set("Authorization", &self.api_key)
            .set("Content-Type", "application/json")
            .set("User-Agent", USER_AGENT)
            .send_json(body);

        match response {
            Ok(resp) => {
                let envelope: GraphQlResponse<T> = resp
                    .into_json()
                    .map_err(|e| ApiError::Parse(e.to_string()))?;
                into_data(envelope)
            }
            Err(ureq::Error::Status(401, _)) => Err(ApiError::Unauthorized),
            Err(ureq::Error::Status(429, _)) => Err(ApiError::RateLimited),
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                Err(ApiError::Http(code, body))
            }
            Err(e) => Err(ApiError::Transport(e.to_string())),
        }
    }

    /// The currently authenticated user.
    pub fn viewer(&self) -> Result<User> {
        #[derive(Deserialize)]
        struct Response {
            viewer: User,
        }

        let response: Response = self.graphql(queries::VIEWER, Value::Null)?;
        Ok(response.viewer)
    }

    /// Fetch a full issue snapshot (including tree edges) by id or
    /// human-facing identifier.
    pub fn issue(&self, identifier: &str) -> Result<Issue> {
        #[derive(Deserialize)]
        struct Response {
            issue: Option<Issue>,
        }

        let response: Response =
            self.graphql(&queries::issue(), json!({"id": identifier}))?;
        response
            .issue
            .ok_or_else(|| Error::NotFound(format!("issue {}", identifier)))
    }

    /// List issues matching the filter.
    pub fn issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>> {
        #[derive(Deserialize)]
        struct Response {
            issues: Connection<Issue>,
        }

        let first = if filter.limit == 0 { 50 } else { filter.limit };
        let response: Response = self.graphql(
            queries::ISSUES,
            json!({"first": first, "filter": filter.to_value()}),
        )?;
        Ok(response.issues.nodes)
    }

    /// Create an issue and return the created snapshot.
    pub fn create_issue(&self, input: &IssueCreateInput) -> Result<Issue> {
        #[derive(Deserialize)]
        struct Payload {
            success: bool,
            issue: Option<Issue>,
        }
        #[derive(Deserialize)]
        struct Response {
            #[serde(rename = "issueCreate")]
            issue_create: Payload,
        }

        let response: Response = self.graphql(
            queries::ISSUE_CREATE,
            json!({"input": serde_json::to_value(input)?}),
        )?;
        let payload = response.issue_create;
        if !payload.success {
            return Err(ApiError::Api("issue create was not successful".to_string()).into());
        }
        payload
            .issue
            .ok_or_else(|| ApiError::Parse("create returned no issue".to_string()).into())
    }

    /// Update an issue by id and return the new snapshot.
    pub fn update_issue(&self, id: &str, input: &IssueUpdateInput) -> Result<Issue> {
        #[derive(Deserialize)]
        struct Payload {
            success: bool,
            issue: Option<Issue>,
        }
        #[derive(Deserialize)]
        struct Response {
            #[serde(rename = "issueUpdate")]
            issue_update: Payload,
        }

        let response: Response = self.graphql(
            queries::ISSUE_UPDATE,
            json!({"id": id, "input": serde_json::to_value(input)?}),
        )?;
        let payload = response.issue_update;
        if !payload.success {
            return Err(ApiError::Api("issue update was not successful".to_string()).into());
        }
        payload
            .issue
            .ok_or_else(|| ApiError::Parse("update returned no issue".to_string()).into())
    }

    /// Archive an issue by id.
    pub fn archive_issue(&self, id: &str) -> Result<()> {
        #[derive(Deserialize)]
        struct Payload {
            success: bool,
        }
        #[derive(Deserialize)]
        struct Response {
            #[serde(rename = "issueArchive")]
            issue_archive: Payload,
        }

        let response: Response = self.graphql(queries::ISSUE_ARCHIVE, json!({"id": id}))?;
        if !response.issue_archive.success {
            return Err(ApiError::Api("issue archive was not successful".to_string()).into());
        }
        Ok(())
    }

    /// All teams in the workspace.
    pub fn teams(&self) -> Result<Vec<Team>> {
        #[derive(Deserialize)]
        struct Response {
            teams: Connection<Team>,
        }

        let response: Response = self.graphql(queries::TEAMS, Value::Null)?;
        Ok(response.teams.nodes)
    }

    /// All workspace members.
    pub fn users(&self) -> Result<Vec<User>> {
        #[derive(Deserialize)]
        struct Response {
            users: Connection<User>,
        }

        let response: Response = self.graphql(queries::USERS, Value::Null)?;
        Ok(response.users.nodes)
    }

    /// All issue labels.
    pub fn labels(&self) -> Result<Vec<Label>> {
        #[derive(Deserialize)]
        struct Response {
            #[serde(rename = "issueLabels")]
            issue_labels: Connection<Label>,
        }

        let response: Response = self.graphql(queries::LABELS, Value::Null)?;
        Ok(response.issue_labels.nodes)
    }

    /// Comments on an issue, by id or identifier.
    pub fn comments(&self, identifier: &str) -> Result<Vec<Comment>> {
        #[derive(Deserialize)]
        struct IssueComments {
            comments: Connection<Comment>,
        }
        #[derive(Deserialize)]
        struct Response {
            issue: Option<IssueComments>,
        }

        let response: Response =
            self.graphql(queries::ISSUE_COMMENTS, json!({"id": identifier}))?;
        let issue = response
            .issue
            .ok_or_else(|| Error::NotFound(format!("issue {}", identifier)))?;
        Ok(issue.comments.nodes)
    }

    /// Add a comment to an issue (by issue id, not identifier).
    pub fn create_comment(&self, issue_id: &str, body: &str) -> Result<Comment> {
        #[derive(Deserialize)]
        struct Payload {
            success: bool,
            comment: Option<Comment>,
        }
        #[derive(Deserialize)]
        struct Response {
            #[serde(rename = "commentCreate")]
            comment_create: Payload,
        }

        let response: Response = self.graphql(
            queries::COMMENT_CREATE,
            json!({"input": {"issueId": issue_id, "body": body}}),
        )?;
        let payload = response.comment_create;
        if !payload.success {
            return Err(ApiError::Api("comment create was not successful".to_string()).into());
        }
        payload
            .comment
            .ok_or_else(|| ApiError::Parse("create returned no comment".to_string()).into())
    }

    /// Resolve a team key (e.g. "ENG") to the team record.
    pub fn team_by_key(&self, key: &str) -> Result<Team> {
        self.teams()?
            .into_iter()
            .find(|t| t.key.eq_ignore_ascii_case(key))
            .ok_or_else(|| Error::NotFound(format!("team {}", key)))
    }

    /// Resolve a workflow state name within a team to its record.
    pub fn state_by_name(&self, team_id: &str, name: &str) -> Result<WorkflowState> {
        #[derive(Deserialize)]
        struct TeamStates {
            states: Connection<WorkflowState>,
        }
        #[derive(Deserialize)]
        struct Response {
            team: Option<TeamStates>,
        }

        let response: Response =
            self.graphql(queries::TEAM_STATES, json!({"teamId": team_id}))?;
        let team = response
            .team
            .ok_or_else(|| Error::NotFound(format!("team {}", team_id)))?;
        team.states
            .nodes
            .into_iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::NotFound(format!("workflow state {}", name)))
    }

    /// Resolve a user by name or display name (case-insensitive).
    pub fn user_by_name(&self, name: &str) -> Result<User> {
        self.users()?
            .into_iter()
            .find(|u| {
                u.name.eq_ignore_ascii_case(name)
                    || u.display_name
                        .as_deref()
                        .is_some_and(|d| d.eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| Error::NotFound(format!("user {}", name)))
    }
}

impl IssueFetcher for Client {
    fn fetch(&self, identifier: &str) -> Result<Issue> {
        self.issue(identifier)
    }
}
