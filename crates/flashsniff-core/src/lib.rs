//! flashsniff-core - SPI-NOR bus trace decoder
//!
//! This crate turns a stream of per-clock-edge SPI bus samples into
//! SPI-NOR flash transactions: control commands, data commands with
//! resolved addresses and byte counts, and truncated (error) commands.
//! It is `no_std` compatible but needs an allocator.
//!
//! # Features
//!
//! - `std` - Enable standard library support: `std::error::Error` impls,
//!   RON command-set files and TOML settings files
//!
//! # Example
//!
//! ```ignore
//! use flashsniff_core::{CommandSet, Decoder, DecoderConfig, Sample};
//!
//! let mut decoder = Decoder::new(DecoderConfig::default(), CommandSet::builtin())?;
//! for (time_ns, raw) in capture {
//!     if let Some(transaction) = decoder.push(Sample::new(raw, time_ns)) {
//!         println!("{}", transaction);
//!     }
//! }
//! if let Some(transaction) = decoder.finish() {
//!     println!("{}", transaction);
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod commands;
pub mod decoder;
pub mod error;
pub mod sample;
#[cfg(feature = "std")]
pub mod settings;
pub mod spi;

pub use commands::{AddressModeSwitch, CommandInfo, CommandKind, CommandSet};
pub use decoder::{
    AddressWindow, Category, Decoder, DecoderConfig, OutputLevel, Stats, Transaction,
    TransactionKind,
};
pub use error::{Error, Result};
pub use sample::{Lanes, Sample};
pub use spi::AddressWidth;
