//! Config command handler.
//!
//! Shows and edits the preferences that shape each download.

use anyhow::Result;

use gulp_core::{Settings, SettingsUpdate, normalize_user_path, validate_settings};

use crate::bootstrap::CliContext;
use crate::commands::ConfigCommand;
use crate::error::CliError;

/// Execute the config command.
pub fn execute(ctx: &CliContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            show(&ctx.settings.load())?;
            Ok(())
        }
        ConfigCommand::Set {
            output_dir,
            skip_existing,
            save_metadata,
            notifications,
        } => {
            if output_dir.is_none()
                && skip_existing.is_none()
                && save_metadata.is_none()
                && notifications.is_none()
            {
                println!("No settings provided. Use --help to see available options.");
                return Ok(());
            }

            let output_directory = output_dir
                .as_deref()
                .map(normalize_user_path)
                .transpose()
                .map_err(CliError::from)?;
            let update = SettingsUpdate {
                output_directory: output_directory.map(Some),
                skip_existing: skip_existing.map(Some),
                save_metadata: save_metadata.map(Some),
                show_notifications: notifications.map(Some),
            };

            let mut settings = ctx.settings.load();
            settings.merge(&update);
            validate_settings(&settings).map_err(CliError::from)?;
            ctx.settings.save(&settings).map_err(CliError::from)?;

            println!("✓ Settings updated.");
            show(&settings)?;
            Ok(())
        }
        ConfigCommand::Reset => {
            ctx.settings
                .save(&Settings::with_defaults())
                .map_err(CliError::from)?;
            println!("✓ Settings reset to defaults.");
            Ok(())
        }
    }
}

fn show(settings: &Settings) -> Result<(), CliError> {
    let options = settings.download_options();
    println!("Current settings:");
    println!(
        "  output_dir:     {}",
        settings.effective_output_directory()?.display()
    );
    println!("  skip_existing:  {}", options.skip_existing);
    println!("  save_metadata:  {}", options.save_metadata);
    println!("  notifications:  {}", options.notify_on_completion);
    Ok(())
}
