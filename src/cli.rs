//! CLI argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use flashsniff_core::OutputLevel;
use std::path::PathBuf;

/// Parse a string as a hex or decimal u32
fn parse_hex_u32(s: &str) -> Result<u32, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u32>().map_err(|e| format!("Invalid number: {}", e))
    }
}

/// Parse an output level name
fn parse_level(s: &str) -> Result<OutputLevel, String> {
    s.parse().map_err(|e| format!("{}", e))
}

/// Parse an address width in bytes
fn parse_address_bytes(s: &str) -> Result<u8, String> {
    match s.parse::<u8>() {
        Ok(n @ 1..=4) => Ok(n),
        _ => Err(format!("Invalid address width: {} (expected 1-4)", s)),
    }
}

#[derive(Parser)]
#[command(name = "flashsniff")]
#[command(author, version, about = "SPI flash bus trace decoder", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command set file (RON) to use instead of the built-in set
    #[arg(long, global = true)]
    pub commands: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Decoder options that override the settings file
#[derive(clap::Args, Debug, Clone, Default)]
pub struct DecoderArgs {
    /// Settings file (TOML format)
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Initial address width in bytes (1-4)
    #[arg(long, value_parser = parse_address_bytes)]
    pub address_bytes: Option<u8>,

    /// Drop data commands below this address (hex or decimal)
    #[arg(long, value_parser = parse_hex_u32)]
    pub min_address: Option<u32>,

    /// Drop data commands above this address (hex or decimal)
    #[arg(long, value_parser = parse_hex_u32)]
    pub max_address: Option<u32>,

    /// Records to report [everything, only-data, only-errors, only-control]
    #[arg(short, long, value_parser = parse_level)]
    pub level: Option<OutputLevel>,
}

/// Command kind filter for list-commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    /// Commands with an address phase
    Data,
    /// Commands without an address phase
    Control,
    /// Quad reads that support continuous mode
    Continuation,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a capture file
    Decode {
        /// Capture file: one `time_seconds,value` sample per clock edge
        capture: PathBuf,

        #[command(flatten)]
        decoder: DecoderArgs,

        /// Prefix each record with its start and end time
        #[arg(short, long)]
        timestamps: bool,

        /// Show a progress bar while reading the capture
        #[arg(long)]
        progress: bool,
    },

    /// List the opcodes of the active command set
    ListCommands {
        /// Only show commands of this kind
        #[arg(long, value_enum)]
        kind: Option<KindFilter>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_decode_args() {
        let cli = Cli::try_parse_from([
            "flashsniff",
            "-v",
            "decode",
            "trace.csv",
            "--min-address",
            "0x1000",
            "--level",
            "only-data",
            "--address-bytes",
            "4",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Decode {
                capture, decoder, ..
            } => {
                assert_eq!(capture, PathBuf::from("trace.csv"));
                assert_eq!(decoder.min_address, Some(0x1000));
                assert_eq!(decoder.level, Some(OutputLevel::OnlyData));
                assert_eq!(decoder.address_bytes, Some(4));
            }
            _ => panic!("expected decode"),
        }
    }

    #[test]
    fn test_reject_bad_address_width() {
        assert!(Cli::try_parse_from(["flashsniff", "decode", "t.csv", "--address-bytes", "5"]).is_err());
    }
}
