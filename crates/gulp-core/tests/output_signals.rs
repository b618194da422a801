//! Parser behaviour over families of generated lines, and the history port's
//! provided methods over a minimal in-memory implementation.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use gulp_core::{
    LineSignal, LogKind, ProgressState, RecencyBucket, Run, RunHistoryPort, RunId, parse_line,
};

fn count_signal(signals: &[LineSignal]) -> Option<(u32, u32)> {
    signals.iter().find_map(|s| match s {
        LineSignal::Count { current, total } => Some((*current, *total)),
        _ => None,
    })
}

fn filename_signal(signals: &[LineSignal]) -> Option<&str> {
    signals.iter().find_map(|s| match s {
        LineSignal::FileCompleted { filename } => Some(filename.as_str()),
        _ => None,
    })
}

#[test]
fn test_count_signal_matches_every_positive_fraction() {
    for total in 1..=40u32 {
        for current in [0, 1, total / 2, total] {
            let line = format!("[{current}/{total}] fetching page");
            assert_eq!(
                count_signal(&parse_line(&line)),
                Some((current, total)),
                "line: {line}"
            );
        }
    }
}

#[test]
fn test_zero_total_never_yields_a_count() {
    for current in 0..20u32 {
        let line = format!("[{current}/0]");
        assert_eq!(count_signal(&parse_line(&line)), None, "line: {line}");
    }
}

#[test]
fn test_path_lines_report_the_last_segment() {
    let cases = [
        ("/home/me/Downloads/gallery-dl/site/1.jpg", "1.jpg"),
        ("downloading example.com/a/b/photo1.jpg", "photo1.jpg"),
        ("./relative/dir/clip.mp4   ", "clip.mp4"),
        ("site/album/ spaced name.png", "spaced name.png"),
    ];
    for (line, expected) in cases {
        let signals = parse_line(line);
        assert_eq!(filename_signal(&signals), Some(expected), "line: {line}");
        assert!(signals.contains(&LineSignal::Log {
            kind: LogKind::Download,
            message: line.trim().to_string(),
        }));
    }
}

#[test]
fn test_error_and_warning_lines_never_count_files() {
    for line in [
        "[downloader.http][warning] /tmp/out/a.jpg: HTTP 503",
        "[pixiv][error] /tmp/out/b.jpg could not be written",
        "OSError: [Errno 28] No space left on device: /tmp/out",
    ] {
        assert_eq!(filename_signal(&parse_line(line)), None, "line: {line}");
    }
}

#[test]
fn test_progress_replays_a_typical_session() {
    let output = [
        "[1/3] /out/site/a.jpg",
        "[2/3] /out/site/b.jpg",
        "# /out/site/c.jpg",
        "[3/3]",
    ];
    let mut state = ProgressState::default();
    for line in output {
        for signal in parse_line(line) {
            state.apply(&signal);
        }
    }
    assert_eq!(state.downloaded_count, 3);
    assert_eq!(state.total_count, 3);
    assert_eq!(state.fraction(), Some(1.0));
}

#[derive(Default)]
struct MemoryHistory {
    runs: Mutex<Vec<Run>>,
}

#[async_trait]
impl RunHistoryPort for MemoryHistory {
    async fn add_run(&self, run: Run) {
        self.runs.lock().unwrap().insert(0, run);
    }

    async fn update_run(&self, run: Run) {
        let mut runs = self.runs.lock().unwrap();
        if let Some(slot) = runs.iter_mut().find(|r| r.id == run.id) {
            *slot = run;
        }
    }

    async fn delete_run(&self, id: RunId) {
        self.runs.lock().unwrap().retain(|r| r.id != id);
    }

    async fn clear(&self) {
        self.runs.lock().unwrap().clear();
    }

    async fn runs(&self) -> Vec<Run> {
        self.runs.lock().unwrap().clone()
    }
}

#[tokio::test]
async fn test_provided_lookup_and_grouping() {
    let history = MemoryHistory::default();
    let old = Run::with_timestamp("https://a.example", "/out", Utc::now() - Duration::days(90));
    let fresh = Run::new("https://b.example", "/out");
    history.add_run(old.clone()).await;
    history.add_run(fresh.clone()).await;

    assert_eq!(history.get_run(old.id).await, Some(old.clone()));

    let groups = history.grouped_by_recency().await;
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, RecencyBucket::Today);
    assert_eq!(groups[0].1, vec![fresh]);
    assert_eq!(groups[1].0, RecencyBucket::Older);
    assert_eq!(groups[1].1, vec![old]);
}
