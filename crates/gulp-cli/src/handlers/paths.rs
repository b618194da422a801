//! Paths command handler.
//!
//! Displays resolved file locations and which gallery-dl would run.

use anyhow::Result;

use gulp_runner::resolve_binary;

use crate::bootstrap::CliContext;

/// Execute the paths command.
///
/// Prints `key = value` lines for diagnostics.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let settings = ctx.settings.load();
    println!("data_dir       = {}", ctx.data_dir().display());
    println!("history        = {}", ctx.config.history_path().display());
    println!("settings       = {}", ctx.config.settings_path().display());
    println!("gallery_config = {}", ctx.config.tool_config_path().display());
    println!(
        "output_dir     = {}",
        settings.effective_output_directory()?.display()
    );

    match resolve_binary(&ctx.config.candidates) {
        Ok(binary) => println!("gallery_dl     = {}", binary.display()),
        Err(_) => {
            println!("gallery_dl     = (not found)");
            for candidate in &ctx.config.candidates {
                println!("  searched       {}", candidate.display());
            }
        }
    }
    Ok(())
}
