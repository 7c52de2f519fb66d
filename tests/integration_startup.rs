#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, missing_debug_implementations, unreachable_pub)]
use navoy_demo_app::error::ServerError;
use reqwest::StatusCode;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
mod common;

const BIN: &str = env!("CARGO_BIN_EXE_navoy-demo-app");

fn server_command() -> Command {
    let mut cmd = Command::new(BIN);
    cmd.env("HOST", "127.0.0.1")
        .env("LOG_FORMAT", "json")
        .env("RUST_LOG", "info")
        .env_remove("APP_ENV")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

#[tokio::test]
async fn test_bind_occupied_port_fails() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();

    let mut config = common::get_test_config();
    config.server.port = port;

    let err = navoy_demo_app::bind(&config.server).await.unwrap_err();

    assert!(matches!(err, ServerError::Bind { port: p, .. } if p == port));
    assert!(err.to_string().contains(&format!("port {port}")));
}

#[tokio::test]
async fn test_bind_rejects_invalid_host() {
    let mut config = common::get_test_config();
    config.server.host = "not an address".to_string();

    let err = navoy_demo_app::bind(&config.server).await.unwrap_err();

    assert!(matches!(err, ServerError::InvalidAddress { .. }));
}

#[tokio::test]
async fn test_binary_exits_non_zero_on_occupied_port() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();

    let child = server_command().env("PORT", port.to_string()).spawn().unwrap();
    let output = tokio::time::timeout(Duration::from_secs(30), child.wait_with_output())
        .await
        .expect("server should exit when the port is taken")
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&format!("port {port}")), "stderr did not name the port: {stderr}");
}

#[tokio::test]
async fn test_binary_serves_and_logs_startup() {
    // Port 0 lets the OS pick; the startup log reports the real port.
    let mut child = server_command().env("PORT", "0").spawn().unwrap();
    let stdout = child.stdout.take().unwrap();
    let mut lines = BufReader::new(stdout).lines();

    let mut port = None;
    let mut hostname_logged = false;
    let read_startup = async {
        while let Some(line) = lines.next_line().await.unwrap() {
            let Ok(event) = serde_json::from_str::<serde_json::Value>(&line) else {
                continue;
            };
            let fields = &event["fields"];
            if let Some(p) = fields["port"].as_u64() {
                port = Some(u16::try_from(p).unwrap());
            }
            if fields["hostname"].is_string() {
                hostname_logged = true;
            }
            if port.is_some() && hostname_logged {
                break;
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(30), read_startup).await.expect("startup logs not seen");

    let port = port.expect("listening port was not logged");
    assert!(hostname_logged);

    let resp = reqwest::get(format!("http://127.0.0.1:{port}/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    child.kill().await.unwrap();
}

#[tokio::test]
async fn test_graceful_shutdown_stops_server() {
    let app = common::TestApp::spawn().await;

    let (status, _) = app.get_json("/health").await;
    assert_eq!(status, StatusCode::OK);

    app.shutdown_tx.send(true).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), app.server_task)
        .await
        .expect("server did not stop after shutdown was requested")
        .unwrap();
    assert!(result.is_ok());

    let after = reqwest::Client::new().get(format!("http://{}/health", app.addr)).send().await;
    assert!(after.is_err());
}
