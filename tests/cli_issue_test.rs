//! Integration tests for issue CRUD commands via CLI.

mod common;

use common::{MockApi, MockResponse, TestEnv, full_issue, stub};
use predicates::prelude::*;
use serde_json::{Value, json};

fn list_fixture() -> Value {
    json!({
        "issues": {
            "nodes": [
                {
                    "id": "id-1",
                    "identifier": "ENG-1",
                    "title": "Fix login",
                    "priority": 2,
                    "state": {"name": "Todo", "type": "unstarted"},
                    "assignee": {"id": "u-1", "name": "Ada Lovelace", "displayName": "ada"}
                },
                {
                    "id": "id-2",
                    "identifier": "ENG-2",
                    "title": "Ship it",
                    "priority": 0,
                    "state": {"name": "Done", "type": "completed"}
                }
            ],
            "pageInfo": {"hasNextPage": false, "endCursor": null}
        }
    })
}

#[test]
fn test_issue_list_renders_table() {
    let env = TestEnv::new();
    let api = MockApi::spawn(|query, _| {
        if query.contains("query Issues(") {
            MockResponse::data(list_fixture())
        } else {
            MockResponse::graphql_error("unexpected operation")
        }
    });

    env.lin_with_api(&api)
        .args(["--plaintext", "issue", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ID     STATE  PRIORITY  ASSIGNEE  TITLE",
        ))
        .stdout(predicate::str::contains("ENG-1  Todo   High      ada       Fix login"))
        .stdout(predicate::str::contains("ENG-2  Done   None      -         Ship it"));
}

#[test]
fn test_issue_list_filters_flow_into_query() {
    let env = TestEnv::new();
    let api = MockApi::spawn(|query, _| {
        if query.contains("query Issues(") {
            MockResponse::data(json!({"issues": {"nodes": [],
                "pageInfo": {"hasNextPage": false, "endCursor": null}}}))
        } else {
            MockResponse::graphql_error("unexpected operation")
        }
    });

    env.lin_with_api(&api)
        .args(["issue", "list", "--team", "ENG", "--state", "Todo", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));

    let calls = api.calls_to("query Issues(");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0]["first"], 5);
    assert_eq!(calls[0]["filter"]["team"]["key"]["eq"], "ENG");
    assert_eq!(calls[0]["filter"]["state"]["name"]["eqIgnoreCase"], "Todo");
}

#[test]
fn test_issue_list_json() {
    let env = TestEnv::new();
    let api = MockApi::spawn(|_, _| MockResponse::data(list_fixture()));

    let output = env
        .lin_with_api(&api)
        .args(["issue", "list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let issues: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(issues.as_array().unwrap().len(), 2);
    assert_eq!(issues[0]["identifier"], "ENG-1");
}

#[test]
fn test_issue_view_shows_details() {
    let env = TestEnv::new();
    let mut issue = full_issue(
        stub("id-1", "ENG-1", "Fix login", Some("Todo")),
        None,
        vec![],
        vec![],
    );
    issue["priority"] = json!(1);
    issue["description"] = json!("Users cannot sign in.");
    issue["url"] = json!("https://linear.app/acme/issue/ENG-1");
    issue["team"] = json!({"id": "t-1", "key": "ENG", "name": "Engineering"});

    let api = MockApi::spawn(move |query, _| {
        if query.contains("query Issue(") {
            MockResponse::data(json!({"issue": issue.clone()}))
        } else {
            MockResponse::graphql_error("unexpected operation")
        }
    });

    env.lin_with_api(&api)
        .args(["--plaintext", "issue", "view", "ENG-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ENG-1  Fix login"))
        .stdout(predicate::str::contains("State:     Todo"))
        .stdout(predicate::str::contains("Priority:  Urgent"))
        .stdout(predicate::str::contains("Team:      Engineering (ENG)"))
        .stdout(predicate::str::contains("Users cannot sign in."));
}

#[test]
fn test_issue_create_resolves_team_and_reports() {
    let env = TestEnv::new();
    let api = MockApi::spawn(|query, variables| {
        if query.contains("query Teams") {
            MockResponse::data(json!({"teams": {"nodes": [
                {"id": "t-1", "key": "ENG", "name": "Engineering"}
            ]}}))
        } else if query.contains("mutation IssueCreate") {
            assert_eq!(variables["input"]["teamId"], "t-1");
            MockResponse::data(json!({"issueCreate": {
                "success": true,
                "issue": {
                    "id": "id-9", "identifier": "ENG-9", "title": "New thing",
                    "url": "https://linear.app/acme/issue/ENG-9",
                    "state": {"name": "Todo", "type": "unstarted"}
                }
            }}))
        } else {
            MockResponse::graphql_error("unexpected operation")
        }
    });

    env.lin_with_api(&api)
        .args(["issue", "create", "New thing", "--team", "ENG"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created ENG-9: New thing"))
        .stdout(predicate::str::contains("https://linear.app/acme/issue/ENG-9"));
}

#[test]
fn test_issue_create_uses_default_team_from_config() {
    let env = TestEnv::new();
    let api = MockApi::spawn(|query, _| {
        if query.contains("query Teams") {
            MockResponse::data(json!({"teams": {"nodes": [
                {"id": "t-1", "key": "ENG", "name": "Engineering"}
            ]}}))
        } else if query.contains("mutation IssueCreate") {
            MockResponse::data(json!({"issueCreate": {
                "success": true,
                "issue": {"id": "id-9", "identifier": "ENG-9", "title": "New thing"}
            }}))
        } else {
            MockResponse::graphql_error("unexpected operation")
        }
    });

    env.lin_with_api(&api)
        .args(["config", "set", "default-team", "ENG"])
        .assert()
        .success();

    env.lin_with_api(&api)
        .args(["issue", "create", "New thing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created ENG-9"));
}

#[test]
fn test_issue_create_without_team_fails() {
    let env = TestEnv::new();
    let api = MockApi::spawn(|_, _| MockResponse::graphql_error("should not be called"));

    env.lin_with_api(&api)
        .args(["issue", "create", "New thing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no team specified"));
}

#[test]
fn test_issue_create_rejects_bad_priority() {
    let env = TestEnv::new();
    let api = MockApi::spawn(|_, _| MockResponse::graphql_error("should not be called"));

    env.lin_with_api(&api)
        .args(["issue", "create", "New thing", "--team", "ENG", "--priority", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("priority must be 0-4"));

    assert!(api.requests.lock().unwrap().is_empty());
}

#[test]
fn test_issue_update_nothing_to_update() {
    let env = TestEnv::new();
    let api = MockApi::spawn(|_, _| MockResponse::graphql_error("should not be called"));

    env.lin_with_api(&api)
        .args(["issue", "update", "ENG-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to update"));
}

#[test]
fn test_issue_update_resolves_state_name() {
    let env = TestEnv::new();
    let mut issue = full_issue(
        stub("id-1", "ENG-1", "Fix login", Some("Todo")),
        None,
        vec![],
        vec![],
    );
    issue["team"] = json!({"id": "t-1", "key": "ENG", "name": "Engineering"});

    let api = MockApi::spawn(move |query, variables| {
        if query.contains("query Issue(") {
            MockResponse::data(json!({"issue": issue.clone()}))
        } else if query.contains("query TeamStates") {
            MockResponse::data(json!({"team": {"states": {"nodes": [
                {"id": "s-1", "name": "Todo", "type": "unstarted"},
                {"id": "s-2", "name": "In Progress", "type": "started"}
            ]}}}))
        } else if query.contains("mutation IssueUpdate") {
            assert_eq!(variables["input"]["stateId"], "s-2");
            MockResponse::data(json!({"issueUpdate": {
                "success": true,
                "issue": {
                    "id": "id-1", "identifier": "ENG-1", "title": "Fix login",
                    "state": {"name": "In Progress", "type": "started"}
                }
            }}))
        } else {
            MockResponse::graphql_error("unexpected operation")
        }
    });

    env.lin_with_api(&api)
        .args(["issue", "update", "ENG-1", "--state", "in progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated ENG-1: Fix login (In Progress)"));
}

#[test]
fn test_issue_archive() {
    let env = TestEnv::new();
    let api = MockApi::spawn(|query, variables| {
        if query.contains("query Issue(") {
            MockResponse::data(json!({"issue":
                {"id": "id-1", "identifier": "ENG-1", "title": "Old"}}))
        } else if query.contains("mutation IssueArchive") {
            assert_eq!(variables["id"], "id-1");
            MockResponse::data(json!({"issueArchive": {"success": true}}))
        } else {
            MockResponse::graphql_error("unexpected operation")
        }
    });

    env.lin_with_api(&api)
        .args(["issue", "archive", "ENG-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived ENG-1"));
}

#[test]
fn test_graphql_errors_surface_to_stderr() {
    let env = TestEnv::new();
    let api = MockApi::spawn(|_, _| MockResponse::graphql_error("rate limit budget exhausted"));

    env.lin_with_api(&api)
        .args(["issue", "view", "ENG-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rate limit budget exhausted"));
}
