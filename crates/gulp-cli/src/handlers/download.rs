//! Download command handler.

use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tracing::debug;

use gulp_core::{RunHistoryPort, RunRequest, normalize_user_path};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{DownloadProgress, TerminalLogEmitter, TerminalNotifier};

/// Arguments for the download command.
pub struct DownloadArgs {
    pub url: String,
    pub output: Option<String>,
    pub no_skip_existing: bool,
    pub write_metadata: bool,
    pub no_notify: bool,
    pub quiet: bool,
}

/// Build the run request from saved preferences and command-line flags.
fn build_request(ctx: &CliContext, args: &DownloadArgs) -> Result<RunRequest, CliError> {
    let settings = ctx.settings.load();
    let mut options = settings.download_options();
    if args.no_skip_existing {
        options.skip_existing = false;
    }
    if args.write_metadata {
        options.save_metadata = true;
    }
    if args.no_notify {
        options.notify_on_completion = false;
    }

    let output = match &args.output {
        Some(raw) => normalize_user_path(raw)?,
        None => settings.effective_output_directory()?,
    };

    Ok(RunRequest::new(args.url.clone(), output).with_options(options))
}

/// Execute the download command.
///
/// Ctrl-C asks gallery-dl to stop; the command then waits for it to exit
/// and reports the run as cancelled.
pub async fn execute(ctx: &CliContext, args: DownloadArgs) -> Result<()> {
    let request = build_request(ctx, &args)?;
    let destination = request.output_directory.clone();

    let progress = Arc::new(DownloadProgress::new());
    let orchestrator = ctx
        .orchestrator()
        .with_emitter(Arc::new(TerminalLogEmitter::new(progress.clone(), args.quiet)))
        .with_notifier(Arc::new(TerminalNotifier));

    let mut updates = orchestrator.subscribe();
    let watcher = {
        let progress = progress.clone();
        tokio::spawn(async move {
            while updates.changed().await.is_ok() {
                let state = updates.borrow_and_update().clone();
                progress.update(&state);
            }
        })
    };

    let run = orchestrator.run(request);
    tokio::pin!(run);
    let result = loop {
        tokio::select! {
            result = &mut run => break result,
            _ = signal::ctrl_c() => {
                progress.println("Stopping gallery-dl...");
                orchestrator.cancel().await;
            }
        }
    };

    watcher.abort();
    progress.finish();

    let summary = match result {
        Ok(summary) => summary,
        Err(e) if e.is_cancelled() => {
            println!("Download cancelled. Files already saved were kept.");
            return Err(CliError::Cancelled.into());
        }
        Err(e) => return Err(CliError::from(e).into()),
    };
    debug!(run_id = %summary.run_id, "Download finished");
    if let Some(run) = ctx.history.get_run(summary.run_id).await {
        println!("Saved to {}", run.actual_download_directory().display());
    } else {
        println!("Saved to {}", destination.display());
    }
    Ok(())
}
