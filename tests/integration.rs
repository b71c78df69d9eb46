//! End-to-end tests for the ws-check binary
//!
//! Each test starts a local axum server standing in for the taxonomy API,
//! points the checker at it, and verifies the exit code and diagnostics.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::process::Command;

use wscheck::http::ReqwestTransport;
use wscheck::common::config::HttpConfig;
use wscheck::taxonomy::taxon_include_children;
use wscheck::{run_scenario, Error, ScenarioContext};

/// How the fake service answers a taxon request
#[derive(Clone)]
enum Reply {
    /// Echo the requested id, embedding children only when asked to
    Taxon { ott_id: Option<u64>, children: Vec<u64> },
    Status(StatusCode),
}

async fn taxon_handler(State(reply): State<Arc<Reply>>, Json(req): Json<Value>) -> (StatusCode, Json<Value>) {
    match reply.as_ref() {
        Reply::Taxon { ott_id, children } => {
            let id = ott_id.unwrap_or_else(|| req["ott_id"].as_u64().unwrap_or_default());
            let mut body = json!({
                "ot:ottId": id,
                "ot:ottTaxonName": "Barnadesia",
                "rank": "genus",
            });
            if req["include_children"] == "true" {
                body["children"] = children
                    .iter()
                    .map(|c| json!({"ot:ottId": c, "rank": "species"}))
                    .collect();
            }
            (StatusCode::OK, Json(body))
        }
        Reply::Status(code) => (*code, Json(json!({"error": "no such taxon"}))),
    }
}

/// Start the fake service and return its base URL
async fn start_server(reply: Reply) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new()
        .route("/v2/taxonomy/taxon", post(taxon_handler))
        .with_state(Arc::new(reply));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn healthy() -> Reply {
    Reply::Taxon {
        ott_id: None,
        children: vec![3885417, 503056, 639486],
    }
}

/// Run the binary against `host` with an empty config file
async fn run_checker(host: &str, extra: &[&str]) -> std::process::Output {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "").unwrap();

    Command::new(env!("CARGO_BIN_EXE_ws-check"))
        .arg("--config")
        .arg(&config)
        .arg("--host")
        .arg(host)
        .args(extra)
        .env_remove("OPENTREE_APIHOST")
        .env_remove("RUST_LOG")
        .output()
        .await
        .expect("failed to run ws-check")
}

#[tokio::test]
async fn test_passing_run_is_silent() {
    let host = start_server(healthy()).await;
    let output = run_checker(&host, &[]).await;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[tokio::test]
async fn test_wrong_id_exits_1() {
    let host = start_server(Reply::Taxon {
        ott_id: Some(515699),
        children: vec![503056],
    })
    .await;
    let output = run_checker(&host, &[]).await;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Incorrect ot:ottId"), "stderr: {stderr}");
    assert!(stderr.contains("515699"));
}

#[tokio::test]
async fn test_missing_child_exits_1() {
    let host = start_server(Reply::Taxon {
        ott_id: None,
        children: vec![1, 2, 3],
    })
    .await;
    let output = run_checker(&host, &[]).await;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Expected child not found"), "stderr: {stderr}");
}

#[tokio::test]
async fn test_not_found_status_exits_1() {
    let host = start_server(Reply::Status(StatusCode::NOT_FOUND)).await;
    let output = run_checker(&host, &[]).await;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Expected status 200"), "stderr: {stderr}");
}

#[tokio::test]
async fn test_unreachable_host_exits_1() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let output = run_checker(&format!("http://{}", addr), &[]).await;
    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
}

#[tokio::test]
async fn test_yaml_scenario_without_children_flag() {
    let host = start_server(healthy()).await;

    let dir = tempfile::tempdir().unwrap();
    let scenario: PathBuf = dir.path().join("no_children.yaml");
    std::fs::write(
        &scenario,
        r#"
name: taxon without children
request:
  path: /v2/taxonomy/taxon
  body:
    ott_id: 515698
asserts:
  - check: field_equals
    field: "ot:ottId"
    value: 515698
  - check: non_empty
    field: children
"#,
    )
    .unwrap();

    let output = run_checker(&host, &["run", scenario.to_str().unwrap()]).await;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No children returned"), "stderr: {stderr}");
}

#[tokio::test]
async fn test_list_builtin_scenarios() {
    let output = run_checker("http://127.0.0.1:1", &["list"]).await;

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("taxon_include_children"));
}

#[tokio::test]
async fn test_runner_with_reqwest_transport() {
    let host = start_server(Reply::Taxon {
        ott_id: None,
        children: vec![],
    })
    .await;
    let transport = ReqwestTransport::new(&HttpConfig::default()).unwrap();
    let ctx = ScenarioContext {
        base_url: &host,
        transport: &transport,
        verbose: false,
    };

    let result = run_scenario(&taxon_include_children(), &ctx).await.unwrap();

    assert!(!result.passed);
    assert_eq!(result.asserts_run, 3);
    assert!(matches!(result.error, Some(Error::NoEntries { .. })));
}

#[tokio::test]
async fn test_verbose_run_prints_progress() {
    let host = start_server(healthy()).await;
    let output = run_checker(&host, &["-v"]).await;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("taxon_include_children"), "stdout: {stdout}");
    assert!(stdout.contains("Check 4"));
    assert!(stdout.contains("Test Passed"));
}

#[tokio::test]
async fn test_usage_errors_exit_1() {
    let output = run_checker("http://127.0.0.1:1", &["--bogus"]).await;
    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());

    // `run` requires at least one scenario path
    let output = run_checker("http://127.0.0.1:1", &["run"]).await;
    assert_eq!(output.status.code(), Some(1));
}

#[tokio::test]
async fn test_help_exits_0() {
    let output = run_checker("http://127.0.0.1:1", &["--help"]).await;

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("ws-check"));
}
