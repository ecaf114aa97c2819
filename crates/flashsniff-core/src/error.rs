//! Error types for flashsniff-core
//!
//! Decoding itself never fails: malformed bursts become `Error` records.
//! The errors here cover configuration that cannot be decoded with.

use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Address width outside 1..=4 bytes
    InvalidAddressWidth(u8),
    /// Maximum address filter is below the minimum
    InvalidAddressWindow {
        /// Configured minimum address
        min: u32,
        /// Configured maximum address
        max: u32,
    },
    /// Output level name not recognised
    InvalidOutputLevel,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddressWidth(n) => {
                write!(f, "invalid address width: {} bytes (expected 1-4)", n)
            }
            Self::InvalidAddressWindow { min, max } => write!(
                f,
                "invalid address window: max 0x{:08X} is below min 0x{:08X}",
                max, min
            ),
            Self::InvalidOutputLevel => write!(
                f,
                "invalid output level (expected everything, only-data, only-errors or only-control)"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
