//! SPI-NOR protocol vocabulary
//!
//! Address widths and the standard opcodes the built-in command set
//! classifies.

mod address;
pub mod opcodes;

pub use address::AddressWidth;
