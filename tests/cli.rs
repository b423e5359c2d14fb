use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::tempdir;

fn write_config(dir: &Path, tfe_url: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    fs::write(&path, format!("tfe_url: {tfe_url}\n")).expect("failed to write config");
    path
}

fn wsaudit() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("wsaudit"))
}

#[test]
fn missing_config_file_fails_before_any_network_activity() {
    wsaudit()
        .arg("--config")
        .arg("/nonexistent/config.yaml")
        .env("TFE_ADMIN_TOKEN", "test-token")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn config_without_tfe_url_is_rejected() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("config.yaml");
    fs::write(&path, "organizations:\n  - org-a\n").unwrap();

    wsaudit()
        .arg("--config")
        .arg(&path)
        .env("TFE_ADMIN_TOKEN", "test-token")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tfe_url"));
}

#[test]
fn invalid_mode_is_rejected() {
    let temp = tempdir().unwrap();
    let config = write_config(temp.path(), "https://tfe.example.com");

    wsaudit()
        .arg("--config")
        .arg(&config)
        .arg("--mode")
        .arg("bogus")
        .env("TFE_ADMIN_TOKEN", "test-token")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--mode"));
}

#[test]
fn help_lists_audit_flags() {
    wsaudit()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--config")
                .and(predicate::str::contains("--orgs"))
                .and(predicate::str::contains("--mode"))
                .and(predicate::str::contains("--max-workers")),
        );
}

/// End-to-end count-mode run against a mock TFE instance: one active org,
/// one nonexistent org. Verifies the CSV rows and the summary banner.
#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn count_mode_audit_writes_report_rows() {
    let mut server = mockito::Server::new();
    let temp = tempdir().unwrap();
    let config = write_config(temp.path(), &server.url());
    let report = temp.path().join("report.csv");

    let _acme_meta = server
        .mock("GET", "/api/v2/organizations/acme")
        .with_status(200)
        .with_body(r#"{"data": {"id": "acme", "attributes": {"created-at": "2021-06-01T00:00:00Z"}}}"#)
        .create();
    let _ghost_meta = server
        .mock("GET", "/api/v2/organizations/ghost")
        .with_status(404)
        .create();
    let _acme_workspaces = server
        .mock("GET", "/api/v2/organizations/acme/workspaces")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("page[number]".into(), "1".into()),
            mockito::Matcher::UrlEncoded("page[size]".into(), "20".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"data": [{"id": "ws-1", "attributes": {"name": "net"}}],
                "meta": {"pagination": {"total-count": 7}}}"#,
        )
        .create();
    let _ghost_workspaces = server
        .mock("GET", "/api/v2/organizations/ghost/workspaces")
        .match_query(mockito::Matcher::Any)
        .with_status(404)
        .create();

    let assert = wsaudit()
        .arg("--config")
        .arg(&config)
        .arg("--orgs")
        .arg("acme,ghost")
        .arg("--output")
        .arg(&report)
        .env("TFE_ADMIN_TOKEN", "test-token")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("WORKSPACE SUMMARY (COUNT MODE)"));
    assert!(stdout.contains("Total organizations processed: 2"));

    let csv = fs::read_to_string(&report).unwrap();
    let mut lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines.remove(0),
        "org,created_at,workspace_count,has_workspaces,error"
    );
    // completion order is nondeterministic
    assert_eq!(lines.len(), 2);
    let acme = lines.iter().find(|l| l.starts_with("acme,")).unwrap();
    assert!(acme.contains(",7,True,"));
    let ghost = lines.iter().find(|l| l.starts_with("ghost,")).unwrap();
    assert!(ghost.contains(",-1,,"));
    assert!(ghost.contains("does not exist"));
}

/// Empty-only mode against the full instance listing (no --orgs flag).
#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn empty_only_audit_discovers_orgs_via_listing() {
    let mut server = mockito::Server::new();
    let temp = tempdir().unwrap();
    let config = write_config(temp.path(), &server.url());
    let report = temp.path().join("report.csv");

    let _listing = server
        .mock("GET", "/api/v2/organizations")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"data": [
                    {"id": "acme", "attributes": {"created-at": "2021-06-01T00:00:00Z"}},
                    {"id": "globex", "attributes": {}}
                ],
                "links": {"next": null},
                "meta": {"pagination": {"total-count": 2}}}"#,
        )
        .create();
    let _acme_workspaces = server
        .mock("GET", "/api/v2/organizations/acme/workspaces")
        .match_query(mockito::Matcher::UrlEncoded("page[size]".into(), "1".into()))
        .with_status(200)
        .with_body(r#"{"data": [{"id": "ws-1", "attributes": {}}]}"#)
        .create();
    let _globex_workspaces = server
        .mock("GET", "/api/v2/organizations/globex/workspaces")
        .match_query(mockito::Matcher::UrlEncoded("page[size]".into(), "1".into()))
        .with_status(200)
        .with_body(r#"{"data": []}"#)
        .create();

    let assert = wsaudit()
        .arg("--config")
        .arg(&config)
        .arg("--mode")
        .arg("empty-only")
        .arg("--output")
        .arg(&report)
        .env("TFE_ADMIN_TOKEN", "test-token")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("WORKSPACE SUMMARY (EMPTY-ONLY MODE)"));

    let csv = fs::read_to_string(&report).unwrap();
    let mut lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.remove(0), "org,created_at,has_workspaces,error");
    assert_eq!(lines.len(), 2);
    let acme = lines.iter().find(|l| l.starts_with("acme,")).unwrap();
    assert!(acme.contains(",True,"));
    let globex = lines.iter().find(|l| l.starts_with("globex,")).unwrap();
    assert!(globex.contains(",False,"));
}

/// Rate limiting past the retry ceiling produces an error row, not a crash.
/// The retry-after header is 0 so the backoff schedule doesn't slow the
/// test down.
#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn exhausted_rate_limit_retries_yield_error_row() {
    let mut server = mockito::Server::new();
    let temp = tempdir().unwrap();
    let config = write_config(temp.path(), &server.url());
    let report = temp.path().join("report.csv");

    let _acme_meta = server
        .mock("GET", "/api/v2/organizations/acme")
        .with_status(200)
        .with_body(r#"{"data": {"id": "acme", "attributes": {}}}"#)
        .create();
    let rate_limited = server
        .mock("GET", "/api/v2/organizations/acme/workspaces")
        .match_query(mockito::Matcher::Any)
        .with_status(429)
        .with_header("retry-after", "0")
        .expect(6)
        .create();

    let assert = wsaudit()
        .arg("--config")
        .arg(&config)
        .arg("--orgs")
        .arg("acme")
        .arg("--output")
        .arg(&report)
        .env("TFE_ADMIN_TOKEN", "test-token")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Organizations with errors: 1"));

    // 6 attempts total, including the initial one
    rate_limited.assert();

    let csv = fs::read_to_string(&report).unwrap();
    let row = csv.lines().nth(1).unwrap();
    assert!(row.starts_with("acme,"));
    assert!(row.contains(",-1,,"));
    assert!(row.contains("429"));
}
