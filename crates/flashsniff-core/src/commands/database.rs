//! Command sets loaded from RON files
//!
//! ```ron
//! (
//!     name: Some("IS25LP128F"),
//!     commands: [
//!         (opcode: 0x03, name: "Read", kind: Data),
//!         (opcode: 0xEB, name: "Quad Read", kind: Data, dummy_clocks: Some(4), header_adjust: 2),
//!         (opcode: 0xB7, name: "Enable 4 Byte Address", kind: Control, address_mode: Some(Enter4Byte)),
//!     ],
//! )
//! ```

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use std::fs;
use std::io;
use std::path::Path;

use super::{AddressModeSwitch, CommandInfo, CommandKind, CommandSet};

/// Error type for command set loading
#[derive(Debug)]
pub enum CommandDbError {
    /// I/O error reading files
    Io(io::Error),
    /// RON parsing error
    Parse(ron::error::SpannedError),
    /// Validation error
    Validation(String),
}

impl From<io::Error> for CommandDbError {
    fn from(e: io::Error) -> Self {
        CommandDbError::Io(e)
    }
}

impl From<ron::error::SpannedError> for CommandDbError {
    fn from(e: ron::error::SpannedError) -> Self {
        CommandDbError::Parse(e)
    }
}

impl std::fmt::Display for CommandDbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandDbError::Io(e) => write!(f, "I/O error: {}", e),
            CommandDbError::Parse(e) => write!(f, "Parse error: {}", e),
            CommandDbError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for CommandDbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandDbError::Io(e) => Some(e),
            CommandDbError::Parse(e) => Some(e),
            CommandDbError::Validation(_) => None,
        }
    }
}

// ============================================================================
// RON deserialization types (intermediate format)
// ============================================================================

/// Single command definition in RON format
#[derive(Debug, Clone, serde::Deserialize)]
struct CommandDef {
    opcode: u8,
    name: String,
    kind: CommandKind,
    #[serde(default)]
    dummy_clocks: Option<u8>,
    #[serde(default)]
    header_adjust: u8,
    #[serde(default)]
    address_mode: Option<AddressModeSwitch>,
}

/// Command set file
#[derive(Debug, Clone, serde::Deserialize)]
struct CommandSetDef {
    #[serde(default)]
    name: Option<String>,
    commands: Vec<CommandDef>,
}

impl CommandDef {
    fn validate(&self) -> Result<(), CommandDbError> {
        if self.kind == CommandKind::Control && self.dummy_clocks.is_some() {
            return Err(CommandDbError::Validation(std::format!(
                "0x{:02X} ({}): dummy_clocks is only valid on data commands",
                self.opcode, self.name
            )));
        }
        if self.kind == CommandKind::Data && self.address_mode.is_some() {
            return Err(CommandDbError::Validation(std::format!(
                "0x{:02X} ({}): address_mode is only valid on control commands",
                self.opcode, self.name
            )));
        }
        Ok(())
    }
}

impl From<CommandDef> for CommandInfo {
    fn from(def: CommandDef) -> Self {
        CommandInfo {
            opcode: def.opcode,
            name: Cow::Owned(def.name),
            kind: def.kind,
            dummy_clocks: def.dummy_clocks,
            header_adjust: def.header_adjust,
            address_mode: def.address_mode,
        }
    }
}

impl CommandSet {
    /// Load a command set from a RON file
    pub fn from_ron_file(path: &Path) -> Result<Self, CommandDbError> {
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    /// Parse a command set from a RON string
    pub fn from_ron_str(content: &str) -> Result<Self, CommandDbError> {
        let def: CommandSetDef = ron::from_str(content)?;
        let mut set = CommandSet::new();

        for command in def.commands {
            command.validate()?;
            let opcode = command.opcode;
            if set.insert(command.into()).is_some() {
                return Err(CommandDbError::Validation(std::format!(
                    "opcode 0x{:02X} defined more than once",
                    opcode
                )));
            }
        }

        log::debug!(
            "Loaded command set {} ({} opcodes)",
            def.name.as_deref().unwrap_or("<unnamed>"),
            set.len()
        );
        Ok(set)
    }
}
