//! Streaming SPI flash decoder
//!
//! Data flows strictly downstream for every sample:
//!
//! ```text
//! sample -> boundary detector -> lane assembler -> (burst end) classifier -> filters
//! ```
//!
//! All state lives in one [`Decoder`], driven through `&mut self`. Only two
//! pieces of state outlive a burst on purpose: the address width (changed
//! by enter/exit 4-byte commands) and the continuous read mode flag.

mod assembler;
mod boundary;
mod classify;
mod continuous;
mod filter;
mod transaction;

pub use boundary::IDLE_GAP_NS;
pub use filter::{AddressWindow, OutputLevel};
pub use transaction::{Category, Transaction, TransactionKind};

use assembler::{Burst, BytePair, LaneAssembler};
use boundary::{Boundary, BoundaryDetector};
use continuous::ContinuousMode;

use crate::commands::CommandSet;
use crate::error::{Error, Result};
use crate::sample::Sample;
use crate::spi::AddressWidth;

/// Decoder configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Address width until an enter/exit 4-byte command is seen
    pub address_width: AddressWidth,
    /// Data records outside this window are dropped
    pub window: AddressWindow,
    /// Record categories to report
    pub level: OutputLevel,
}

impl DecoderConfig {
    /// Check the configuration for contradictions
    pub fn validate(&self) -> Result<()> {
        match self.window.max {
            Some(max) if max < self.window.min => Err(Error::InvalidAddressWindow {
                min: self.window.min,
                max,
            }),
            _ => Ok(()),
        }
    }
}

/// Running counters, for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Bursts started
    pub bursts: u64,
    /// Records returned to the caller
    pub records: u64,
    /// Records dropped by the address window or output level
    pub suppressed: u64,
    /// Bursts that ended before a full byte was clocked
    pub empty_bursts: u64,
    /// Bytes assembled while no burst was open
    pub orphan_bytes: u64,
}

/// SPI flash transaction decoder
#[derive(Debug, Clone)]
pub struct Decoder {
    config: DecoderConfig,
    commands: CommandSet,
    address_width: AddressWidth,
    boundary: BoundaryDetector,
    assembler: LaneAssembler,
    continuous: ContinuousMode,
    burst: Option<Burst>,
    stats: Stats,
}

impl Decoder {
    /// Create a decoder
    pub fn new(config: DecoderConfig, commands: CommandSet) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            commands,
            address_width: config.address_width,
            boundary: BoundaryDetector::default(),
            assembler: LaneAssembler::default(),
            continuous: ContinuousMode::default(),
            burst: None,
            stats: Stats::default(),
        })
    }

    /// Process one sample
    ///
    /// Returns the previous transaction when this sample starts a new burst
    /// and that transaction survives filtering.
    pub fn push(&mut self, sample: Sample) -> Option<Transaction> {
        let mut finished = None;

        if let Boundary::NewBurst { previous } = self.boundary.observe(&sample) {
            if let Some(end) = previous {
                finished = self.end_burst(end);
            }
            self.start_burst(sample.time_ns);
        }

        if sample.cs_asserted() {
            if let Some(pair) = self
                .assembler
                .clock(&sample, &self.commands, &mut self.continuous)
            {
                self.accept(pair);
            }
        }

        finished
    }

    /// End the burst still open at the end of a capture
    pub fn finish(&mut self) -> Option<Transaction> {
        let end = self.boundary.last_time()?;
        self.end_burst(end)
    }

    /// Current address width
    pub fn address_width(&self) -> AddressWidth {
        self.address_width
    }

    /// Returns true if the next burst will be decoded without an opcode
    pub fn is_continuous(&self) -> bool {
        self.continuous.implied().is_some()
    }

    /// Current idle-gap threshold (ns)
    pub fn gap_threshold(&self) -> u64 {
        self.boundary.threshold()
    }

    /// Diagnostic counters
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Active configuration
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Command set used for classification
    pub fn commands(&self) -> &CommandSet {
        &self.commands
    }

    fn start_burst(&mut self, time_ns: u64) {
        self.stats.bursts += 1;
        log::debug!("Burst {} started at {} ns", self.stats.bursts, time_ns);

        let mut burst = Burst::new(time_ns);
        if let Some(pair) = self.assembler.restart(&self.continuous) {
            log::debug!("Continuous mode, implied opcode 0x{:02X}", pair.mosi);
            burst.push(pair);
        }
        self.burst = Some(burst);
    }

    fn accept(&mut self, pair: BytePair) {
        match self.burst.as_mut() {
            Some(burst) => burst.push(pair),
            None => {
                if self.stats.orphan_bytes == 0 {
                    log::warn!(
                        "Byte 0x{:02X} assembled outside any burst, discarding",
                        pair.mosi
                    );
                }
                self.stats.orphan_bytes += 1;
            }
        }
    }

    fn end_burst(&mut self, end: u64) -> Option<Transaction> {
        let burst = self.burst.take()?;
        if burst.is_empty() {
            self.stats.empty_bursts += 1;
            return None;
        }

        let transaction = classify::classify(
            &burst.mosi,
            burst.start,
            end,
            &self.commands,
            &mut self.address_width,
        );
        log::debug!(
            "Burst ended at {} ns: {} bytes, {}",
            end,
            burst.mosi.len(),
            transaction
        );

        if self.config.window.accepts(&transaction)
            && self.config.level.accepts(transaction.category())
        {
            self.stats.records += 1;
            Some(transaction)
        } else {
            self.stats.suppressed += 1;
            None
        }
    }
}
