//! Real child processes through `TokioProcessLauncher`.
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tempfile::tempdir;

use gulp_core::ports::SIGTERM_EXIT_CODE;
use gulp_core::{
    FixedToolConfig, LaunchSpec, LaunchedProcess, ProcessLauncherPort, RunHistoryPort, RunRequest,
    RunStatus, RunnerError,
};
use gulp_runner::{DownloadOrchestrator, TokioProcessLauncher};
use gulp_store::JsonRunStore;

const TIMEOUT: Duration = Duration::from_secs(10);

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

async fn collect(process: &mut LaunchedProcess) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(line) = process.lines.recv().await {
        lines.push(line);
    }
    lines
}

#[tokio::test]
async fn test_merges_both_streams_and_reports_exit_code() {
    let launcher = TokioProcessLauncher::new();
    let spec = LaunchSpec::new("/bin/sh")
        .arg("-c")
        .arg("echo out-line; echo err-line >&2; exit 3");

    let mut process = launcher.launch(&spec).unwrap();
    assert!(process.pid.is_some());

    let lines = tokio::time::timeout(TIMEOUT, collect(&mut process))
        .await
        .unwrap();
    assert_eq!(lines, ["out-line", "err-line"]);

    let code = tokio::time::timeout(TIMEOUT, process.exit)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(code, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_interleaved_streams_keep_emission_order() {
    let launcher = TokioProcessLauncher::new().with_line_buffer(4);
    let spec = LaunchSpec::new("/bin/sh").arg("-c").arg(
        "i=1; while [ $i -le 200 ]; do echo out-$i; echo err-$i >&2; i=$((i+1)); done",
    );
    let expected: Vec<String> = (1..=200)
        .flat_map(|i| [format!("out-{i}"), format!("err-{i}")])
        .collect();

    for _ in 0..5 {
        let mut process = launcher.launch(&spec).unwrap();
        let lines = tokio::time::timeout(TIMEOUT, collect(&mut process))
            .await
            .unwrap();
        assert_eq!(lines, expected);
    }
}

#[tokio::test]
async fn test_stdout_order_is_preserved() {
    let launcher = TokioProcessLauncher::new().with_line_buffer(2);
    let spec = LaunchSpec::new("/bin/sh")
        .arg("-c")
        .arg("for i in 1 2 3 4 5 6 7 8; do echo line-$i; done");

    let mut process = launcher.launch(&spec).unwrap();
    let lines = tokio::time::timeout(TIMEOUT, collect(&mut process))
        .await
        .unwrap();

    let expected: Vec<String> = (1..=8).map(|i| format!("line-{i}")).collect();
    assert_eq!(lines, expected);
}

#[tokio::test]
async fn test_terminate_sends_sigterm() {
    let launcher = TokioProcessLauncher::new();
    let spec = LaunchSpec::new("/bin/sh").arg("-c").arg("exec sleep 30");

    let process = launcher.launch(&spec).unwrap();
    process.terminator.terminate();
    // Repeated requests are harmless
    process.terminator.terminate();

    let code = tokio::time::timeout(TIMEOUT, process.exit)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(code, SIGTERM_EXIT_CODE);
}

#[tokio::test]
async fn test_missing_program_is_a_spawn_error() {
    let dir = tempdir().unwrap();
    let launcher = TokioProcessLauncher::new();
    let result = launcher.launch(&LaunchSpec::new(dir.path().join("absent")));
    assert!(result.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_orchestrates_a_fake_gallery_dl() {
    let dir = tempdir().unwrap();
    // Arguments: --config <cfg> --destination <dir> ... <url>
    let binary = write_script(
        dir.path(),
        "gallery-dl",
        r#"echo "[1/2] $4/site/a.jpg"
echo "[2/2] $4/site/b.jpg"
exit 0"#,
    );
    let output = dir.path().join("downloads");
    let store = Arc::new(JsonRunStore::open(dir.path().join("history.json")));

    let orchestrator = DownloadOrchestrator::new(
        Arc::new(TokioProcessLauncher::new()),
        store.clone(),
        Arc::new(FixedToolConfig::new(dir.path().join("config.json"))),
    )
    .with_candidates(vec![binary]);

    let summary = tokio::time::timeout(
        TIMEOUT,
        orchestrator.run(RunRequest::new("https://example.com/album", &output)),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(summary.file_count, 2);

    let run = store.get_run(summary.run_id).await.unwrap();
    assert_eq!(run.status(), RunStatus::Completed);
    assert_eq!(run.logs().len(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cancelling_a_fake_gallery_dl() {
    let dir = tempdir().unwrap();
    let binary = write_script(
        dir.path(),
        "gallery-dl",
        "echo \"[0/9] starting\"\nexec sleep 30",
    );
    let store = Arc::new(JsonRunStore::open(dir.path().join("history.json")));

    let orchestrator = Arc::new(
        DownloadOrchestrator::new(
            Arc::new(TokioProcessLauncher::new()),
            store.clone(),
            Arc::new(FixedToolConfig::new(dir.path().join("config.json"))),
        )
        .with_candidates(vec![binary]),
    );
    let mut progress = orchestrator.subscribe();

    let running = {
        let orchestrator = orchestrator.clone();
        let request = RunRequest::new("https://example.com/album", dir.path().join("out"));
        tokio::spawn(async move { orchestrator.run(request).await })
    };

    tokio::time::timeout(TIMEOUT, progress.wait_for(|state| state.total_count == 9))
        .await
        .unwrap()
        .unwrap();
    orchestrator.cancel().await;

    let result = tokio::time::timeout(TIMEOUT, running).await.unwrap().unwrap();
    assert!(matches!(result, Err(RunnerError::Cancelled)));

    let run = store.runs().await.remove(0);
    assert_eq!(run.status(), RunStatus::Cancelled);
}
