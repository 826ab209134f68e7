//! Tests for output module

use super::*;
use crate::auth::ApiKey;
use crate::backlog::{BacklogClient, IssueSummary, Project, Status, User};
use crate::error::Error;
use crate::types::MetadataKind;
use chrono::{FixedOffset, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Writer Tests
// ============================================================================

#[test]
fn test_export_file_names() {
    assert_eq!(
        export_file_name(MetadataKind::Projects, "space", "1"),
        "backlog_projects_space.json"
    );
    assert_eq!(
        export_file_name(MetadataKind::Users, "space", "1"),
        "backlog_users_space_1.json"
    );
    assert_eq!(
        export_file_name(MetadataKind::Statuses, "space", "1"),
        "backlog_statuses_space_1.json"
    );
}

#[test]
fn test_write_pretty_json_keeps_unicode() {
    let dir = TempDir::new().unwrap();
    let exporter = JsonExporter::new(dir.path());

    let path = exporter
        .write("out.json", &json!([{"id": 1, "name": "開発"}]))
        .unwrap();

    assert!(path.is_absolute());
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("開発"));
    assert!(raw.contains("\n        \"id\": 1"));
}

#[tokio::test]
async fn test_export_users_fetches_and_writes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/projects/55/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "userId": "sato", "name": "Sato", "roleType": 1}
        ])))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = BacklogClient::with_space_url(&server.uri(), ApiKey::new("k")).unwrap();
    let path = JsonExporter::new(dir.path())
        .export(&client, MetadataKind::Users, "space", "55")
        .await
        .unwrap();

    assert!(path.ends_with("backlog_users_space_55.json"));
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    // Raw records are kept, including fields the typed views ignore
    assert_eq!(written[0]["roleType"], 1);
}

#[tokio::test]
async fn test_export_keeps_service_field_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"id":1,"projectKey":"P","name":"Alpha","archived":false}]"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = BacklogClient::with_space_url(&server.uri(), ApiKey::new("k")).unwrap();
    let path = JsonExporter::new(dir.path())
        .export(&client, MetadataKind::Projects, "space", "")
        .await
        .unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let positions: Vec<usize> = ["\"id\"", "\"projectKey\"", "\"name\"", "\"archived\""]
        .iter()
        .map(|key| raw.find(*key).unwrap())
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[tokio::test]
async fn test_export_project_scoped_needs_project() {
    let dir = TempDir::new().unwrap();
    let client = BacklogClient::with_space_url("http://127.0.0.1:9", ApiKey::new("k")).unwrap();

    let err = JsonExporter::new(dir.path())
        .export(&client, MetadataKind::Statuses, "space", " ")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingConfigField { .. }));
}

#[tokio::test]
async fn test_export_access_denied_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/projects"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = BacklogClient::with_space_url(&server.uri(), ApiKey::new("k")).unwrap();
    let err = JsonExporter::new(dir.path())
        .export(&client, MetadataKind::Projects, "space", "")
        .await
        .unwrap_err();

    assert!(err.is_access_denied());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

// ============================================================================
// Header Tests
// ============================================================================

fn projects() -> Vec<Project> {
    serde_json::from_value(json!([
        {"id": 1, "name": "Alpha"},
        {"id": 2, "name": "Beta"}
    ]))
    .unwrap()
}

fn users() -> Vec<User> {
    serde_json::from_value(json!([
        {"id": 10, "name": "Sato"},
        {"id": 11, "name": "Suzuki"},
        {"id": 12, "name": "Tanaka"}
    ]))
    .unwrap()
}

fn statuses() -> Vec<Status> {
    serde_json::from_value(json!([
        {"id": 1, "name": "Open"},
        {"id": 2, "name": "In Progress"}
    ]))
    .unwrap()
}

#[test]
fn test_header_from_listings() {
    let header = MonitorHeader::from_listings(
        "2",
        &["12".into(), "10".into(), "99".into()],
        &["2".into()],
        &projects(),
        &users(),
        &statuses(),
    )
    .unwrap();

    assert_eq!(header.project, " - 2(Beta)");
    assert_eq!(header.users, vec![" - 10(Sato)", " - 12(Tanaka)"]);
    assert_eq!(header.statuses, vec![" - 2(In Progress)"]);
}

#[test]
fn test_header_unknown_project() {
    let err =
        MonitorHeader::from_listings("7", &[], &[], &projects(), &users(), &statuses())
            .unwrap_err();
    assert!(matches!(err, Error::NotFound { kind: "project", .. }));
}

// ============================================================================
// Renderer Tests
// ============================================================================

fn render<F>(f: F) -> String
where
    F: FnOnce(&MonitorRenderer, &mut Vec<u8>),
{
    let mut out = Vec::new();
    f(&MonitorRenderer::without_clear(), &mut out);
    String::from_utf8(out).unwrap()
}

#[test]
fn test_issue_line_converts_to_offset() {
    let issue = IssueSummary::from_value(&json!({
        "summary": "Fix login",
        "issueKey": "PRJ-1",
        "assignee": null,
        "createdUser": {"name": "Suzuki"},
        "created": "2024-03-01T20:30:00Z"
    }))
    .unwrap();
    let jst = FixedOffset::east_opt(9 * 3600).unwrap();

    let line = IssueLine::new(&issue, "https://s.backlog.jp/view/PRJ-1".into(), &jst);

    assert_eq!(line.created, "2024-03-02 05:30:00");
    assert_eq!(line.assignee, "-");
    assert_eq!(line.created_user, "Suzuki");
}

#[test]
fn test_issue_line_keeps_unparseable_time() {
    let issue = IssueSummary::from_value(&json!({
        "summary": "x",
        "issueKey": "PRJ-2",
        "created": "yesterday"
    }))
    .unwrap();
    let line = IssueLine::new(&issue, String::new(), &FixedOffset::east_opt(0).unwrap());
    assert_eq!(line.created, "yesterday");
}

#[test]
fn test_render_empty_issue_list() {
    let text = render(|r, out| r.issues(out, &[]).unwrap());
    assert_eq!(
        text,
        "\x1b[36mNo issues are currently being monitored.\x1b[0m\n"
    );
}

#[test]
fn test_render_issues() {
    let lines = vec![IssueLine {
        summary: "Fix login".into(),
        url: "https://s.backlog.jp/view/PRJ-1".into(),
        assignee: "Sato".into(),
        created_user: "Suzuki".into(),
        created: "2024-03-02 05:30:00".into(),
    }];
    let text = render(|r, out| r.issues(out, &lines).unwrap());

    assert!(text.contains("Summary: Fix login"));
    assert!(text.contains("URL: https://s.backlog.jp/view/PRJ-1"));
    assert!(text.contains("Assignee: Sato Created by: Suzuki Created: 2024-03-02 05:30:00"));
}

#[test]
fn test_render_header() {
    let header = MonitorHeader {
        project: " - 1(Alpha)".into(),
        users: vec![" - 10(Sato)".into()],
        statuses: vec![],
    };
    let now = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
    let text = render(|r, out| r.header(out, &header, &now).unwrap());

    assert!(text.contains("Last updated: 2024/05/06 07:08:09"));
    let project_at = text.find("[Project]").unwrap();
    let users_at = text.find("[Assignees]").unwrap();
    let statuses_at = text.find("[Statuses]").unwrap();
    assert!(project_at < users_at && users_at < statuses_at);
    assert!(text.contains(" - 10(Sato)"));
}

#[test]
fn test_clear_screen_only_when_enabled() {
    let mut out = Vec::new();
    MonitorRenderer::new().clear(&mut out).unwrap();
    assert_eq!(out, b"\x1b[2J\x1b[H");

    let text = render(|r, out| r.clear(out).unwrap());
    assert!(text.is_empty());
}

#[test]
fn test_render_error() {
    let text = render(|r, out| r.error(out, &Error::AccessDenied { status: 403 }).unwrap());
    assert!(text.contains("Access denied"));
}
