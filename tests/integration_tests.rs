//! Integration tests using mock HTTP server
//!
//! Tests the full flow: settings file → Backlog client → paginated fetch →
//! rendered monitor frame and exported JSON.

use backlog_monitor::engine::{MonitorEngine, PollOutcome};
use backlog_monitor::output::{JsonExporter, MonitorHeader};
use backlog_monitor::{Error, FilterSet, MetadataKind, Settings};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::new("integration-key", "space", "100");
    settings.monitor_status_ids = vec!["1".into(), "2".into()];
    settings.space_url = Some(server.uri());
    settings
}

fn issue(i: u64) -> Value {
    json!({
        "id": i,
        "issueKey": format!("PRJ-{i}"),
        "summary": format!("Issue {i}"),
        "assignee": {"id": 1, "name": "Sato"},
        "createdUser": {"id": 2, "name": "Suzuki"},
        "created": "2024-01-01T00:00:00Z"
    })
}

async fn mount_issue_pages(server: &MockServer, total: u64) {
    Mock::given(method("GET"))
        .and(path("/api/v2/issues/count"))
        .and(query_param("apiKey", "integration-key"))
        .and(query_param("projectId[]", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": total })))
        .expect(1)
        .mount(server)
        .await;

    let mut offset = 0;
    while offset < total {
        let page: Vec<Value> = (offset..total.min(offset + 100)).map(issue).collect();
        Mock::given(method("GET"))
            .and(path("/api/v2/issues"))
            .and(query_param("count", "100"))
            .and(query_param("offset", offset.to_string()))
            .and(query_param("statusId[]", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page))
            .expect(1)
            .mount(server)
            .await;
        offset += 100;
    }
}

// ============================================================================
// Paginated Fetch
// ============================================================================

#[tokio::test]
async fn test_fetch_issues_from_settings() {
    let server = MockServer::start().await;
    mount_issue_pages(&server, 250).await;

    let settings = settings_for(&server);
    let client = settings.client().unwrap();
    let issues = client.fetch_issues(&settings.filter_set()).await.unwrap();

    assert_eq!(issues.len(), 250);
    for (i, issue) in issues.iter().enumerate() {
        assert_eq!(issue["id"], i as u64);
    }
    // `expect(1)` on every mock is verified when the server drops
}

#[tokio::test]
async fn test_fetch_issues_no_matches() {
    let server = MockServer::start().await;
    mount_issue_pages(&server, 0).await;

    let client = settings_for(&server).client().unwrap();
    let issues = client
        .fetch_issues(&FilterSet::project("100"))
        .await
        .unwrap();

    assert!(issues.is_empty());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_fetch_issues_denied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/issues/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 150 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/issues"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json((0..100).map(issue).collect::<Vec<_>>()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/issues"))
        .and(query_param("offset", "100"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = settings_for(&server).client().unwrap();
    let result = client.fetch_issues(&FilterSet::project("100")).await;

    assert!(matches!(result, Err(Error::AccessDenied { .. })));
}

// ============================================================================
// Monitor Frame
// ============================================================================

#[tokio::test]
async fn test_monitor_poll_renders_every_issue() {
    let server = MockServer::start().await;
    mount_issue_pages(&server, 120).await;

    let mut settings = settings_for(&server);
    settings.utc_offset_hours = 0;
    let mut engine = MonitorEngine::from_settings(&settings).unwrap();

    let mut out = Vec::new();
    let outcome = engine
        .poll_once(&mut out, &MonitorHeader::default())
        .await
        .unwrap();

    assert_eq!(outcome, PollOutcome::Rendered { issues: 120 });
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("Summary: Issue").count(), 120);
    assert!(text.contains(&format!("URL: {}/view/PRJ-119", server.uri())));
    assert!(text.contains("Created: 2024-01-01 00:00:00"));
}

// ============================================================================
// Export
// ============================================================================

#[tokio::test]
async fn test_export_all_kinds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 100, "name": "Alpha"}])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/projects/100/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "Sato"}])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/projects/100/statuses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "未対応"}])))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let settings = settings_for(&server);
    let client = settings.client().unwrap();
    let exporter = JsonExporter::new(dir.path());

    for kind in MetadataKind::ALL {
        exporter
            .export(&client, kind, &settings.space_id, &settings.monitor_project_id)
            .await
            .unwrap();
    }

    let statuses = std::fs::read_to_string(dir.path().join("backlog_statuses_space_100.json")).unwrap();
    assert!(statuses.contains("未対応"));
    assert!(dir.path().join("backlog_projects_space.json").exists());
    assert!(dir.path().join("backlog_users_space_100.json").exists());
}

// ============================================================================
// Settings Round Trip
// ============================================================================

#[test]
fn test_settings_file_drives_filters() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{
    "api_key": "abc",
    "space_id": "space",
    "monitor_project_id": "100",
    "monitor_user_ids": [""],
    "monitor_status_ids": ["1", "2"]
}"#,
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();
    let pairs = settings.filter_set().query_pairs();

    assert!(pairs.iter().all(|(k, _)| k != "assigneeId[]"));
    assert_eq!(
        pairs.iter().filter(|(k, _)| k == "statusId[]").count(),
        2
    );
}
