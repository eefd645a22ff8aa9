//! Round trips against an in-process mock agent serving /v1/proc.
use assert_cmd::prelude::*;
use axum::{http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::time::Duration;

use rps::agent::AgentClient;
use rps::ps::HEADER;
use rps::{report, Error};

fn proc_json(pid: u32, user: &str, args: &[&str], name: &str) -> Value {
    json!({
        "pid": pid,
        "userName": user,
        "cpuPercent": "0.3",
        "memPercent": "1.2",
        "virtualSizeBytes": 21964,
        "residentSetBytes": 5432,
        "ttyDeviceNumber": 34817,
        "processState": "S",
        "niceness": 0,
        "memoryLocked": false,
        "sessionId": pid,
        "threadGroupId": pid,
        "numThreads": 1,
        "processGroupId": pid,
        "terminalForegroundGroupId": pid,
        "startTimeUnix": 0,
        "cpuTimeUnix": 65,
        "commandArgs": args,
        "processName": name
    })
}

async fn spawn_agent(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr.to_string()
}

async fn healthy_agent(procs: Vec<Value>) -> String {
    let body = json!({ "procs": procs });
    spawn_agent(Router::new().route("/v1/proc", get(move || async move { Json(body) }))).await
}

fn client() -> AgentClient {
    AgentClient::new(Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn fetch_decodes_table() {
    let host = healthy_agent(vec![
        proc_json(1, "root", &[], "systemd"),
        proc_json(812, "alice", &["-bash"], "bash"),
    ])
    .await;
    let table = client().fetch(&host).await.expect("fetch");
    assert_eq!(table.procs.len(), 2);
    assert_eq!(table.procs[1].user_name, "alice");
    assert_eq!(table.procs[1].command_args, vec!["-bash"]);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let host = spawn_agent(Router::new().route(
        "/v1/proc",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    ))
    .await;
    let err = client().fetch(&host).await.unwrap_err();
    assert!(matches!(err, Error::Status { .. }), "{err:?}");
    assert_eq!(err.host(), Some(host.as_str()));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn wrong_path_is_an_error() {
    let host = spawn_agent(Router::new()).await;
    let err = client().fetch(&host).await.unwrap_err();
    assert!(matches!(err, Error::Status { .. }), "{err:?}");
}

#[tokio::test]
async fn malformed_body_is_an_error() {
    let host = spawn_agent(Router::new().route(
        "/v1/proc",
        get(|| async { Json(json!({ "procs": [{ "pid": 1 }] })) }),
    ))
    .await;
    let err = client().fetch(&host).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }), "{err:?}");
    assert!(err.to_string().starts_with(&format!("invalid host = {host}, error = ")));
}

#[tokio::test]
async fn report_over_http() {
    let a = healthy_agent(vec![proc_json(1, "root", &[], "systemd")]).await;
    let b = healthy_agent(vec![proc_json(2, "administrator", &["/bin/sh", "-c", "sleep 5"], "sh")]).await;
    let hosts = vec![a, b];
    let c = client();
    let mut out = Vec::new();
    let n = report::run(&mut out, &hosts, 2, &Utc::now(), |h| {
        let c = c.clone();
        async move { c.fetch(&h).await }
    })
    .await
    .expect("report");
    assert_eq!(n, 2);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], HEADER);
    assert!(lines[1].starts_with("127.0.0.1       root          1 0.3  1.2  21964   5432 pts/1    Ss+  "));
    assert!(lines[1].ends_with("  1:05 [systemd]"));
    assert!(lines[2].contains(" adminis+      2 "));
    assert!(lines[2].ends_with(" /bin/sh -c sleep 5"));
}

#[tokio::test]
async fn binary_stops_at_failing_host() {
    let good = healthy_agent(vec![proc_json(7, "root", &["/usr/sbin/sshd", "-D"], "sshd")]).await;
    let bad = spawn_agent(Router::new().route(
        "/v1/proc",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
    ))
    .await;
    let later = healthy_agent(vec![proc_json(9, "root", &[], "cron")]).await;
    let hosts = format!("{good},{bad},{later}");
    let cfg = tempfile::tempdir().unwrap();
    let cfg_path = cfg.path().to_path_buf();

    // The agents live on this runtime, so block elsewhere while the binary runs.
    let output = tokio::task::spawn_blocking(move || {
        Command::cargo_bin("rps")
            .expect("binary exists")
            .env("XDG_CONFIG_HOME", cfg_path)
            .args(["--hosts", &hosts])
            .output()
            .expect("run rps")
    })
    .await
    .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "{stdout}");
    assert_eq!(lines[0], HEADER);
    assert!(lines[1].ends_with("/usr/sbin/sshd -D"));
    assert!(!stdout.contains("[cron]"));
    assert!(
        stderr.contains(&format!("invalid host = {bad}, error = unexpected status 503")),
        "{stderr}"
    );
}

#[tokio::test]
async fn closed_stdout_exits_quietly() {
    // Far more output than a pipe buffers, so the writer hits EPIPE.
    let procs = (1..=5000).map(|pid| proc_json(pid, "root", &[], "worker")).collect();
    let host = healthy_agent(procs).await;
    let cfg = tempfile::tempdir().unwrap();
    let cfg_path = cfg.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        let mut child = Command::cargo_bin("rps")
            .expect("binary exists")
            .env("XDG_CONFIG_HOME", cfg_path)
            .args(["--hosts", &host])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("spawn rps");
        let mut first = String::new();
        BufReader::new(child.stdout.take().expect("stdout"))
            .read_line(&mut first)
            .expect("read header");
        assert_eq!(first.trim_end(), HEADER);
        child.wait_with_output().expect("wait rps")
    })
    .await
    .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(0), "{stderr}");
    assert!(!stderr.contains("Broken pipe"), "{stderr}");
}
