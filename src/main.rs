//! flashsniff - SPI flash bus trace decoder
//!
//! Reads a logic analyzer capture of an SPI-NOR flash bus (one sample per
//! clock edge) and prints the flash commands it contains: control commands,
//! reads, programs and erases with their address ranges, and commands cut
//! short by chip select.
//!
//! # Configuration
//!
//! Decoder options come from three places, later ones winning:
//! - built-in defaults (3-byte addresses, no address window, every record)
//! - a TOML settings file given with `--settings`
//! - individual command-line flags
//!
//! The opcode table is the built-in IS25LP128F set unless a RON command-set
//! file is named by `--commands` or by the settings file.

mod capture;
mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands, DecoderArgs};
use flashsniff_core::settings::Settings;
use flashsniff_core::{AddressWidth, CommandSet, DecoderConfig};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    match cli.command {
        Commands::Decode {
            capture,
            decoder,
            timestamps,
            progress,
        } => {
            let settings = load_settings(&decoder)?;
            let commands = load_command_set(
                cli.commands.as_deref().or(settings.commands.as_deref()),
            )?;
            commands::run_decode(
                &capture,
                settings.config,
                commands,
                commands::DecodeOptions {
                    timestamps,
                    progress,
                },
            )
        }
        Commands::ListCommands { kind } => {
            let commands = load_command_set(cli.commands.as_deref())?;
            commands::list_commands(&commands, kind);
            Ok(())
        }
    }
}

/// Load the settings file, if any, and apply command-line overrides
fn load_settings(args: &DecoderArgs) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = match &args.settings {
        Some(path) => {
            let settings = Settings::from_toml_file(path)?;
            log::info!("Loaded settings from {:?}", path);
            settings
        }
        None => Settings::default(),
    };
    apply_overrides(&mut settings.config, args)?;
    settings.config.validate()?;
    Ok(settings)
}

fn apply_overrides(
    config: &mut DecoderConfig,
    args: &DecoderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(bytes) = args.address_bytes {
        config.address_width = AddressWidth::try_from(bytes)?;
    }
    if let Some(min) = args.min_address {
        config.window.min = min;
    }
    if let Some(max) = args.max_address {
        // 0 clears a maximum set by the settings file
        config.window.max = Some(max).filter(|&max| max != 0);
    }
    if let Some(level) = args.level {
        config.level = level;
    }
    Ok(())
}

/// Load a command set from a RON file, or fall back to the built-in set
fn load_command_set(path: Option<&Path>) -> Result<CommandSet, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(format!("Command set not found: {}", path.display()).into());
            }
            let commands = CommandSet::from_ron_file(path)?;
            log::info!("Loaded {} opcodes from {}", commands.len(), path.display());
            Ok(commands)
        }
        None => {
            let commands = CommandSet::builtin();
            log::debug!("Using built-in command set ({} opcodes)", commands.len());
            Ok(commands)
        }
    }
}
