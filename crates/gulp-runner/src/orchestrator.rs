//! Download orchestrator.
//!
//! Drives one gallery-dl run from request to terminal status:
//!
//! 1. Validate the request and locate the binary (no run is recorded on failure)
//! 2. Record an in-progress run and reset the progress state
//! 3. Launch the process and drain its output on a dedicated task
//! 4. Map the exit code to a terminal status and persist it
//!
//! # Design Principles
//!
//! - The drain task is the only writer of the run and the progress state
//!   while the process is alive; it hands the run back when output ends
//! - Progress is published through a `watch` channel (one writer, many readers)
//! - History and notification failures never fail a run

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc, watch};
use tracing::{debug, error, info, warn};

use gulp_core::ports::{SIGKILL_EXIT_CODE, SIGTERM_EXIT_CODE};
use gulp_core::{
    CompletionNotifierPort, LaunchedProcess, LineSignal, LogKind, NoopNotifier, NoopRunEmitter,
    ProcessLauncherPort, ProcessTerminator, ProgressState, Run, RunEvent, RunEventEmitterPort,
    RunHistoryPort, RunId, RunRequest, RunStatus, RunSummary, RunnerError, ToolConfigPort,
    ensure_directory, parse_line,
};

use crate::binary::{default_candidates, resolve_binary};
use crate::invocation::build_invocation;

const STARTING_MESSAGE: &str = "Starting download...";
const CANCELLED_MESSAGE: &str = "Download cancelled by user";

/// Everything that observes a run while it is being written.
///
/// Cloned into the drain task, so it holds only shared handles.
#[derive(Clone)]
struct RunSink {
    history: Arc<dyn RunHistoryPort>,
    emitter: Arc<dyn RunEventEmitterPort>,
    progress: watch::Sender<ProgressState>,
}

impl RunSink {
    /// Append a log entry and announce it. Ignored once the run is terminal.
    fn append(&self, run: &mut Run, message: impl Into<String>, kind: LogKind) {
        let run_id = run.id;
        if let Some(entry) = run.add_log(message, kind) {
            self.emitter.emit(RunEvent::LogAppended {
                run_id,
                entry: entry.clone(),
            });
        }
    }

    fn set_downloading(&self, downloading: bool) {
        self.progress
            .send_modify(|state| state.is_downloading = downloading);
    }
}

/// Supervises gallery-dl runs and records them in the run history.
///
/// Meant to be shared behind an `Arc`: `run` suspends until the process exits
/// while `cancel`, `progress` and `subscribe` may be called concurrently.
pub struct DownloadOrchestrator {
    launcher: Arc<dyn ProcessLauncherPort>,
    tool_config: Arc<dyn ToolConfigPort>,
    notifier: Arc<dyn CompletionNotifierPort>,
    candidates: Vec<PathBuf>,
    sink: RunSink,
    active: Mutex<Option<Arc<dyn ProcessTerminator>>>,
}

impl DownloadOrchestrator {
    /// Create an orchestrator that probes the default binary locations and
    /// neither notifies nor emits events.
    pub fn new(
        launcher: Arc<dyn ProcessLauncherPort>,
        history: Arc<dyn RunHistoryPort>,
        tool_config: Arc<dyn ToolConfigPort>,
    ) -> Self {
        let (progress, _) = watch::channel(ProgressState::default());
        Self {
            launcher,
            tool_config,
            notifier: Arc::new(NoopNotifier),
            candidates: default_candidates(),
            sink: RunSink {
                history,
                emitter: Arc::new(NoopRunEmitter),
                progress,
            },
            active: Mutex::new(None),
        }
    }

    /// Replace the completion notifier.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn CompletionNotifierPort>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replace the run event emitter.
    #[must_use]
    pub fn with_emitter(mut self, emitter: Arc<dyn RunEventEmitterPort>) -> Self {
        self.sink.emitter = emitter;
        self
    }

    /// Replace the ordered list of binary locations to probe.
    #[must_use]
    pub fn with_candidates(mut self, candidates: Vec<PathBuf>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Snapshot of the current progress.
    pub fn progress(&self) -> ProgressState {
        self.sink.progress.borrow().clone()
    }

    /// Receiver that observes every progress change.
    pub fn subscribe(&self) -> watch::Receiver<ProgressState> {
        self.sink.progress.subscribe()
    }

    /// Ask the active process to terminate.
    ///
    /// Returns immediately; the outcome is reported by the pending `run`.
    /// Does nothing when no process is running.
    pub async fn cancel(&self) {
        let active = self.active.lock().await.clone();
        match active {
            Some(terminator) => {
                info!("Cancelling active download");
                terminator.terminate();
            }
            None => debug!("Cancel requested with no active download"),
        }
    }

    /// Run gallery-dl once and wait for it to finish.
    ///
    /// Returns the file count on success, `RunnerError::Cancelled` when the
    /// process was stopped by SIGTERM or SIGKILL, and `RunnerError::Process`
    /// with the last error line for any other non-zero exit.
    pub async fn run(&self, request: RunRequest) -> Result<RunSummary, RunnerError> {
        let url = request.url.trim();
        if url.is_empty() {
            return Err(RunnerError::InvalidRequest("URL cannot be empty".to_string()));
        }

        let binary = resolve_binary(&self.candidates)?;
        let config_path = self
            .tool_config
            .config_path()
            .map_err(|e| RunnerError::Config(e.to_string()))?;

        if let Err(e) = ensure_directory(&request.output_directory) {
            warn!(
                dir = %request.output_directory.display(),
                error = %e,
                "Could not create output directory; gallery-dl may fail"
            );
        }

        if self.progress().is_downloading {
            warn!("run() called while another download is active");
        }

        let mut run = Run::new(url, request.output_directory.clone());
        let run_id = run.id;
        self.sink.emitter.emit(RunEvent::RunStarted {
            run_id,
            url: run.url.clone(),
        });
        self.sink.append(&mut run, STARTING_MESSAGE, LogKind::Info);
        self.sink.history.add_run(run.clone()).await;
        self.sink.progress.send_replace(ProgressState::started(run_id));

        let spec = build_invocation(
            &binary,
            &config_path,
            &request.output_directory,
            &request.options,
            url,
        );
        debug!(%run_id, program = %spec.program.display(), args = ?spec.args_lossy(), "Launching gallery-dl");

        let LaunchedProcess {
            pid,
            lines,
            exit,
            terminator,
        } = match self.launcher.launch(&spec) {
            Ok(process) => process,
            Err(e) => {
                let reason = e.to_string();
                error!(%run_id, error = %reason, "Failed to start gallery-dl");
                let message = format!("Failed to start: {reason}");
                self.sink.append(&mut run, message, LogKind::Error);
                self.commit_terminal(&mut run, RunStatus::Failed).await;
                return Err(RunnerError::Spawn(reason));
            }
        };

        info!(%run_id, pid, url, "Download started");
        *self.active.lock().await = Some(terminator.clone());

        let drain = tokio::spawn(drain_output(run, lines, self.sink.clone()));

        let code = match exit.await {
            Ok(Ok(code)) => code,
            Ok(Err(e)) => {
                warn!(%run_id, error = %e, "Failed to wait for gallery-dl");
                -1
            }
            Err(_) => {
                warn!(%run_id, "Process supervisor ended without an exit code");
                -1
            }
        };
        self.release_active(&terminator).await;

        let mut run = match drain.await {
            Ok(run) => run,
            Err(e) => {
                error!(%run_id, error = %e, "Output drain task failed");
                self.sink.history.get_run(run_id).await.ok_or_else(|| {
                    RunnerError::Process(format!("Lost track of run {run_id}"))
                })?
            }
        };

        self.finalize(&mut run, code, &request).await
    }

    /// Clear the active slot if it still holds `terminator`.
    async fn release_active(&self, terminator: &Arc<dyn ProcessTerminator>) {
        let mut active = self.active.lock().await;
        if active
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, terminator))
        {
            *active = None;
        }
    }

    /// Resolve the run from the exit code, persist it and notify.
    async fn finalize(
        &self,
        run: &mut Run,
        code: i32,
        request: &RunRequest,
    ) -> Result<RunSummary, RunnerError> {
        let progress = self.progress();
        let file_count = progress.downloaded_count;
        run.record_file_count(file_count);

        let outcome = match code {
            0 => {
                self.sink.append(
                    run,
                    format!("Download completed: {file_count} files"),
                    LogKind::Info,
                );
                self.commit_terminal(run, RunStatus::Completed).await;
                info!(run_id = %run.id, file_count, "Download completed");
                Ok(RunSummary {
                    run_id: run.id,
                    file_count,
                })
            }
            SIGKILL_EXIT_CODE | SIGTERM_EXIT_CODE => {
                self.sink.append(run, CANCELLED_MESSAGE, LogKind::Warning);
                self.commit_terminal(run, RunStatus::Cancelled).await;
                info!(run_id = %run.id, "Download cancelled");
                Err(RunnerError::Cancelled)
            }
            code => {
                let message = progress
                    .last_error
                    .unwrap_or_else(|| format!("Download failed with exit code {code}"));
                self.sink.append(run, message.clone(), LogKind::Error);
                self.commit_terminal(run, RunStatus::Failed).await;
                warn!(run_id = %run.id, code, error = %message, "Download failed");
                Err(RunnerError::Process(message))
            }
        };

        if outcome.is_ok() && request.options.notify_on_completion {
            self.notifier.notify_completion(file_count);
        }

        outcome
    }

    async fn commit_terminal(&self, run: &mut Run, status: RunStatus) {
        if !run.finish(status) {
            warn!(run_id = %run.id, current = %run.status(), requested = %status, "Run already terminal");
        }
        self.sink.history.update_run(run.clone()).await;
        self.sink.set_downloading(false);
        self.sink.emitter.emit(RunEvent::RunFinished {
            run_id: run.id,
            status: run.status(),
            file_count: run.file_count(),
        });
    }
}

/// Consume output lines in order until the stream closes.
///
/// Each non-empty line updates the progress state, appends its log entry and
/// persists the run.
async fn drain_output(mut run: Run, mut lines: mpsc::Receiver<String>, sink: RunSink) -> Run {
    let run_id: RunId = run.id;
    while let Some(line) = lines.recv().await {
        let signals = parse_line(&line);
        if signals.is_empty() {
            continue;
        }

        sink.progress.send_modify(|state| {
            for signal in &signals {
                state.apply(signal);
            }
        });

        for signal in signals {
            if let LineSignal::Log { kind, message } = signal {
                sink.append(&mut run, message, kind);
            }
        }

        sink.history.update_run(run.clone()).await;
    }
    debug!(%run_id, "Output stream closed");
    run
}
