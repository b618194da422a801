//! History command handler.
//!
//! Lists, shows and prunes recorded runs.

use anyhow::Result;
use chrono::Local;

use gulp_core::{Run, RunHistoryPort, group_by_recency};

use crate::bootstrap::CliContext;
use crate::commands::HistoryCommand;
use crate::error::CliError;
use crate::presentation::{
    format_local_time, log_prefix, print_separator, short_id, truncate_string,
};

const TABLE_WIDTH: usize = 100;

/// Execute the history command.
pub async fn execute(ctx: &CliContext, command: HistoryCommand) -> Result<()> {
    match command {
        HistoryCommand::List { grouped, limit } => list(ctx, grouped, limit).await,
        HistoryCommand::Show { id } => show(ctx, &id).await,
        HistoryCommand::Delete { id } => delete(ctx, &id).await,
        HistoryCommand::Clear { force } => clear(ctx, force).await,
    }
}

/// Find the single run whose id starts with `prefix`.
pub fn find_by_prefix<'a>(runs: &'a [Run], prefix: &str) -> Result<&'a Run, CliError> {
    let prefix = prefix.trim().to_lowercase();
    if prefix.is_empty() {
        return Err(CliError::Arguments("run id cannot be empty".to_string()));
    }

    let mut matches = runs
        .iter()
        .filter(|run| run.id.to_string().starts_with(&prefix));
    match (matches.next(), matches.next()) {
        (Some(run), None) => Ok(run),
        (None, _) => Err(CliError::Arguments(format!("no run matches '{prefix}'"))),
        (Some(_), Some(_)) => Err(CliError::Arguments(format!(
            "'{prefix}' matches more than one run; use more characters"
        ))),
    }
}

async fn list(ctx: &CliContext, grouped: bool, limit: Option<usize>) -> Result<()> {
    let mut runs = ctx.history.runs().await;
    if runs.is_empty() {
        println!("No downloads recorded yet.");
        println!("Use 'gulp download <url>' to start one.");
        return Ok(());
    }
    if let Some(limit) = limit {
        runs.truncate(limit);
    }

    if grouped {
        for (bucket, runs) in group_by_recency(&runs, Local::now()) {
            println!("\n{bucket}");
            print_table(&runs);
        }
    } else {
        print_table(&runs);
    }
    Ok(())
}

fn print_table(runs: &[Run]) {
    println!(
        "{:<9} {:<17} {:<12} {:>5}  {:<20} URL",
        "ID", "Started", "Status", "Files", "Site"
    );
    print_separator(TABLE_WIDTH);
    for run in runs {
        println!(
            "{:<9} {:<17} {:<12} {:>5}  {:<20} {}",
            short_id(&run.id),
            format_local_time(&run.timestamp),
            run.status().as_str(),
            run.file_count(),
            truncate_string(&run.display_name(), 20),
            truncate_string(&run.url, 40),
        );
    }
}

async fn show(ctx: &CliContext, prefix: &str) -> Result<()> {
    let runs = ctx.history.runs().await;
    let run = find_by_prefix(&runs, prefix)?;

    println!("Run {}", run.id);
    println!("  URL:         {}", run.url);
    println!("  Site:        {}", run.display_name());
    println!("  Started:     {}", format_local_time(&run.timestamp));
    println!("  Status:      {}", run.status());
    println!("  Files:       {}", run.file_count());
    println!("  Requested:   {}", run.output_directory.display());
    println!("  Saved to:    {}", run.actual_download_directory().display());
    println!();
    println!("Log ({} entries):", run.logs().len());
    for entry in run.logs() {
        println!(
            "  {} {} {}",
            entry.timestamp.with_timezone(&Local).format("%H:%M:%S"),
            log_prefix(entry.kind),
            entry.message
        );
    }
    Ok(())
}

async fn delete(ctx: &CliContext, prefix: &str) -> Result<()> {
    let runs = ctx.history.runs().await;
    let run = find_by_prefix(&runs, prefix)?;
    ctx.history.delete_run(run.id).await;
    println!("✓ Deleted run {} ({})", short_id(&run.id), run.display_name());
    Ok(())
}

async fn clear(ctx: &CliContext, force: bool) -> Result<()> {
    let count = ctx.history.runs().await.len();
    if count == 0 {
        println!("History is already empty.");
        return Ok(());
    }
    if !force {
        println!("This removes {count} run(s) from the history.");
        println!("Re-run with --force to confirm.");
        return Ok(());
    }
    ctx.history.clear().await;
    println!("✓ Cleared {count} run(s).");
    Ok(())
}
