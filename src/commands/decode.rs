//! Decode command implementation

use crate::capture::CaptureReader;
use flashsniff_core::{CommandSet, Decoder, DecoderConfig, Transaction};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Output options for the decode command
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Prefix records with their start and end time
    pub timestamps: bool,
    /// Show a progress bar over the capture file
    pub progress: bool,
}

/// Create a progress bar style for reading the capture
fn create_progress_bar_style() -> Result<ProgressStyle, Box<dyn std::error::Error>> {
    Ok(ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")?
        .progress_chars("#>-"))
}

/// Format a capture-relative time in seconds
fn format_time(ns: u64) -> String {
    format!("{}.{:09}", ns / 1_000_000_000, ns % 1_000_000_000)
}

fn format_record(transaction: &Transaction, timestamps: bool) -> String {
    if timestamps {
        format!(
            "[{} - {}] {}",
            format_time(transaction.start),
            format_time(transaction.end),
            transaction
        )
    } else {
        transaction.to_string()
    }
}

/// Decode a capture file and print every reported record
pub fn run_decode(
    capture: &Path,
    config: DecoderConfig,
    commands: CommandSet,
    options: DecodeOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut decoder = Decoder::new(config, commands)?;

    let file = File::open(capture)?;
    let pb = if options.progress {
        let pb = ProgressBar::new(file.metadata()?.len());
        pb.set_style(create_progress_bar_style()?);
        Some(pb)
    } else {
        None
    };
    let input: Box<dyn Read> = match &pb {
        Some(pb) => Box::new(pb.wrap_read(file)),
        None => Box::new(file),
    };

    let emit = |transaction: Transaction| {
        let line = format_record(&transaction, options.timestamps);
        match &pb {
            Some(pb) => pb.println(line),
            None => println!("{}", line),
        }
    };

    log::info!("Decoding {}", capture.display());

    let mut samples = 0u64;
    for sample in CaptureReader::new(BufReader::new(input)) {
        samples += 1;
        if let Some(transaction) = decoder.push(sample?) {
            emit(transaction);
        }
    }
    if let Some(transaction) = decoder.finish() {
        emit(transaction);
    }

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    let stats = decoder.stats();
    log::info!(
        "{} samples, {} bursts: {} records reported, {} suppressed",
        samples,
        stats.bursts,
        stats.records,
        stats.suppressed
    );
    if stats.empty_bursts > 0 {
        log::debug!("{} bursts carried no complete byte", stats.empty_bursts);
    }
    if stats.orphan_bytes > 0 {
        log::warn!("{} bytes seen outside any burst", stats.orphan_bytes);
    }
    log::debug!(
        "Final address width {} bytes, gap threshold {} ns",
        decoder.address_width().bytes(),
        decoder.gap_threshold()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashsniff_core::{AddressWidth, TransactionKind};

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "0.000000000");
        assert_eq!(format_time(1_500), "0.000001500");
        assert_eq!(format_time(12_000_000_001), "12.000000001");
    }

    #[test]
    fn test_format_record() {
        let transaction = Transaction {
            kind: TransactionKind::Control {
                name: "Write Enable".into(),
            },
            opcode: 0x06,
            start: 1_000,
            end: 1_800,
            address_width: AddressWidth::ThreeByte,
        };
        assert_eq!(format_record(&transaction, false), "Write Enable");
        assert_eq!(
            format_record(&transaction, true),
            "[0.000001000 - 0.000001800] Write Enable"
        );
    }
}
