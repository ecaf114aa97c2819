//! CLI command implementations
//!
//! `decode` streams a capture through the decoder and prints the records.
//! `list-commands` prints the active opcode table.

mod decode;
mod list;

pub use decode::{run_decode, DecodeOptions};
pub use list::list_commands;
