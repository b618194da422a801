//! Run history persistence against a real temp directory.

use std::fs;

use chrono::{Duration, Utc};
use gulp_core::{LogKind, Run, RunHistoryPort, RunStatus};
use gulp_store::{HISTORY_FORMAT_VERSION, JsonRunStore, MAX_RETAINED_RUNS, load_runs};
use serde_json::Value;
use tempfile::tempdir;

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_added_runs_survive_reopen_newest_first() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");

    let store = JsonRunStore::open(&path);
    let first = Run::new("https://example.com/first", "/out");
    let second = Run::new("https://example.com/second", "/out");
    store.add_run(first.clone()).await;
    store.add_run(second.clone()).await;

    let reopened = JsonRunStore::open(&path);
    assert_eq!(reopened.runs().await, vec![second, first]);
}

#[tokio::test]
async fn test_saved_file_uses_versioned_envelope() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data").join("history.json");

    let store = JsonRunStore::open(&path);
    store.add_run(Run::new("https://example.com/a", "/out")).await;

    let json = read_json(&path);
    assert_eq!(json["version"], HISTORY_FORMAT_VERSION);
    let run = &json["runs"][0];
    assert_eq!(run["url"], "https://example.com/a");
    assert_eq!(run["status"], "inProgress");
    assert_eq!(run["outputDirectory"], "/out");
    assert_eq!(run["fileCount"], 0);
}

#[tokio::test]
async fn test_retention_evicts_the_oldest() {
    let dir = tempdir().unwrap();
    let store = JsonRunStore::open(dir.path().join("history.json"));

    let oldest = Run::new("https://example.com/0", "/out");
    store.add_run(oldest.clone()).await;
    for i in 1..=MAX_RETAINED_RUNS {
        store
            .add_run(Run::new(format!("https://example.com/{i}"), "/out"))
            .await;
    }

    let runs = store.runs().await;
    assert_eq!(runs.len(), MAX_RETAINED_RUNS);
    assert!(runs.iter().all(|r| r.id != oldest.id));
    assert_eq!(runs[0].url, format!("https://example.com/{MAX_RETAINED_RUNS}"));
}

#[tokio::test]
async fn test_update_replaces_in_place() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    let store = JsonRunStore::open(&path);

    let older = Run::new("https://example.com/older", "/out");
    let mut run = Run::new("https://example.com/a", "/out");
    store.add_run(older).await;
    store.add_run(run.clone()).await;

    run.add_log("/out/a/1.jpg", LogKind::Download);
    run.record_file_count(1);
    assert!(run.finish(RunStatus::Completed));
    store.update_run(run.clone()).await;

    let reloaded = load_runs(&path);
    assert_eq!(reloaded[0], run);
    assert_eq!(reloaded[0].status(), RunStatus::Completed);
    assert_eq!(reloaded[0].file_count(), 1);
    assert_eq!(reloaded.len(), 2);
}

#[tokio::test]
async fn test_update_of_unknown_run_is_ignored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    let store = JsonRunStore::open(&path);

    store.update_run(Run::new("https://example.com/ghost", "/out")).await;

    assert!(store.runs().await.is_empty());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_delete_and_clear_are_persisted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    let store = JsonRunStore::open(&path);

    let keep = Run::new("https://example.com/keep", "/out");
    let drop = Run::new("https://example.com/drop", "/out");
    store.add_run(keep.clone()).await;
    store.add_run(drop.clone()).await;

    store.delete_run(drop.id).await;
    assert_eq!(load_runs(&path), vec![keep]);

    store.clear().await;
    assert!(load_runs(&path).is_empty());
    assert_eq!(read_json(&path)["runs"], Value::Array(vec![]));
}

#[tokio::test]
async fn test_legacy_array_is_migrated_on_open() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    let legacy = vec![
        Run::with_timestamp("https://example.com/new", "/out", Utc::now()),
        Run::with_timestamp("https://example.com/old", "/out", Utc::now() - Duration::days(3)),
    ];
    fs::write(&path, serde_json::to_string(&legacy).unwrap()).unwrap();

    let store = JsonRunStore::open(&path);
    assert_eq!(store.runs().await, legacy);

    let json = read_json(&path);
    assert_eq!(json["version"], HISTORY_FORMAT_VERSION);
    assert_eq!(json["runs"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_corrupt_file_opens_empty_and_is_replaced_on_next_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    fs::write(&path, "{\"version\": 1, \"runs\": [{\"broken\": true}]}").unwrap();

    let store = JsonRunStore::open(&path);
    assert!(store.runs().await.is_empty());

    store.add_run(Run::new("https://example.com/a", "/out")).await;
    assert_eq!(load_runs(&path).len(), 1);
}

#[test]
fn test_newer_format_version_is_accepted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    let runs = vec![Run::new("https://example.com/a", "/out")];
    let body = serde_json::json!({ "version": 7, "runs": runs, "extra": "ignored" });
    fs::write(&path, body.to_string()).unwrap();

    assert_eq!(load_runs(&path), runs);
}

#[test]
fn test_hyphenated_legacy_status_is_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    let run = Run::new("https://example.com/a", "/out");
    let mut value = serde_json::to_value(vec![&run]).unwrap();
    value[0]["status"] = Value::from("in-progress");
    fs::write(&path, value.to_string()).unwrap();

    let loaded = load_runs(&path);
    assert_eq!(loaded[0].status(), RunStatus::InProgress);
}
