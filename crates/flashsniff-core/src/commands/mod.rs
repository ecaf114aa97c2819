//! Command tables
//!
//! A [`CommandSet`] maps opcodes to what the decoder needs to classify a
//! burst: whether the command carries an address and data, its mnemonic,
//! how many dummy clocks follow the mode byte of a continuous quad read,
//! and how many extra header bytes precede the payload.
//!
//! The state machine only ever consults the table, so supporting another
//! flash part is a matter of building (or loading) a different set.

#[cfg(feature = "std")]
mod database;

#[cfg(feature = "std")]
pub use database::CommandDbError;

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;

use crate::spi::opcodes;

/// Classification category of an opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Deserialize))]
pub enum CommandKind {
    /// Opcode followed by an address and optional payload
    Data,
    /// Opcode with no address phase
    Control,
}

/// Address-width change caused by a control command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Deserialize))]
pub enum AddressModeSwitch {
    /// Switch to 4-byte addresses
    Enter4Byte,
    /// Switch back to 3-byte addresses
    Exit4Byte,
}

/// Descriptor for a single opcode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    /// Opcode byte
    pub opcode: u8,
    /// Mnemonic shown in decoded records
    pub name: Cow<'static, str>,
    /// Data or control
    pub kind: CommandKind,
    /// Dummy clocks after the mode byte, for continuation (quad) reads
    ///
    /// `Some` marks the opcode as a continuation opcode: the decoder switches
    /// to quad-lane packing right after it.
    pub dummy_clocks: Option<u8>,
    /// Extra non-payload bytes beyond opcode and address
    pub header_adjust: u8,
    /// Address-width change applied when this command completes
    pub address_mode: Option<AddressModeSwitch>,
}

impl CommandInfo {
    /// Describe a data command
    pub fn data(opcode: u8, name: &'static str) -> Self {
        Self {
            opcode,
            name: Cow::Borrowed(name),
            kind: CommandKind::Data,
            dummy_clocks: None,
            header_adjust: 0,
            address_mode: None,
        }
    }

    /// Describe a control command
    pub fn control(opcode: u8, name: &'static str) -> Self {
        Self {
            opcode,
            name: Cow::Borrowed(name),
            kind: CommandKind::Control,
            dummy_clocks: None,
            header_adjust: 0,
            address_mode: None,
        }
    }

    /// Mark as a continuation opcode with the given dummy clock count
    pub fn with_dummy_clocks(mut self, clocks: u8) -> Self {
        self.dummy_clocks = Some(clocks);
        self
    }

    /// Set the number of extra header bytes
    pub fn with_header_adjust(mut self, bytes: u8) -> Self {
        self.header_adjust = bytes;
        self
    }

    /// Set the address-width change applied on completion
    pub fn with_address_mode(mut self, switch: AddressModeSwitch) -> Self {
        self.address_mode = Some(switch);
        self
    }

    /// Returns true if the decoder switches to quad lanes after this opcode
    pub fn is_continuation(&self) -> bool {
        self.dummy_clocks.is_some()
    }
}

/// Opcode lookup table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSet {
    slots: Vec<Option<CommandInfo>>,
}

impl Default for CommandSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CommandSet {
    /// Create an empty command set
    pub fn new() -> Self {
        Self {
            slots: vec![None; 256],
        }
    }

    /// Standard SPI-NOR commands plus the IS25LP128F extensions
    pub fn builtin() -> Self {
        use AddressModeSwitch::{Enter4Byte, Exit4Byte};

        let mut set = Self::new();
        let commands = [
            // Data commands
            CommandInfo::data(opcodes::READ, "Read"),
            CommandInfo::data(opcodes::FAST_READ, "Fast Read").with_header_adjust(1),
            CommandInfo::data(opcodes::RDSFDP_DATA, "Read SFDP"),
            CommandInfo::data(opcodes::QOR, "Quad-Output Fast Read").with_dummy_clocks(8),
            CommandInfo::data(opcodes::RDID_MIO, "Read JEDEC ID"),
            CommandInfo::data(opcodes::RDID, "Read JEDEC ID"),
            CommandInfo::data(opcodes::QWR, "Quad Word Read").with_dummy_clocks(2),
            CommandInfo::data(opcodes::QIOR, "Quad Read")
                .with_dummy_clocks(4)
                .with_header_adjust(2),
            CommandInfo::data(opcodes::PP, "Page Program"),
            CommandInfo::data(opcodes::QPP, "Quad Page Program"),
            CommandInfo::data(opcodes::PP_4B, "4-byte PAGE PROGRAM"),
            CommandInfo::data(opcodes::READ_4B, "4-byte READ"),
            CommandInfo::data(opcodes::QPP_4B, "4-byte QUAD INPUT PAGE PROGRAM"),
            CommandInfo::data(opcodes::BE_5C, "4-byte BLOCK ERASE 32KB"),
            CommandInfo::data(opcodes::BE_D8, "4-byte BLOCK ERASE 64KB"),
            CommandInfo::data(opcodes::SE_20, "4-byte SECTOR ERASE 4KB"),
            CommandInfo::data(opcodes::WRDYB_4B, "4-byte WRITE DYB REGISTER"),
            CommandInfo::data(opcodes::PGPPB_4B, "4-byte PROGRAM PPB"),
            // Control commands
            CommandInfo::control(opcodes::WRSR, "Write Status Register 1"),
            CommandInfo::control(opcodes::WREN, "Write Enable"),
            CommandInfo::control(opcodes::WRDI, "Write Disable"),
            CommandInfo::control(opcodes::RDSR, "Read Status Register"),
            CommandInfo::control(opcodes::RDSR2, "Read Status Register 2"),
            CommandInfo::control(opcodes::RDSFDP, "Read SFDP Mode"),
            CommandInfo::control(opcodes::SUSPEND, "Program Suspend"),
            CommandInfo::control(opcodes::RES, "Release Power-down / Device ID"),
            CommandInfo::control(opcodes::EN4B, "Enable 4 Byte Address")
                .with_address_mode(Enter4Byte),
            CommandInfo::control(opcodes::EX4B, "Exit 4 Byte Address")
                .with_address_mode(Exit4Byte),
            CommandInfo::control(opcodes::RDERP, "Read Extended Read Parameters"),
            CommandInfo::control(opcodes::SRP, "Set Read Parameters"),
            CommandInfo::control(opcodes::RDRP, "Read Read Parameters"),
        ];
        for info in commands {
            set.insert(info);
        }
        set
    }

    /// Insert a command, returning the entry it replaced
    pub fn insert(&mut self, info: CommandInfo) -> Option<CommandInfo> {
        let slot = usize::from(info.opcode);
        self.slots[slot].replace(info)
    }

    /// Remove a command
    pub fn remove(&mut self, opcode: u8) -> Option<CommandInfo> {
        self.slots[usize::from(opcode)].take()
    }

    /// Look up an opcode
    pub fn get(&self, opcode: u8) -> Option<&CommandInfo> {
        self.slots[usize::from(opcode)].as_ref()
    }

    /// Dummy clocks if `opcode` is a continuation opcode
    pub fn dummy_clocks(&self, opcode: u8) -> Option<u8> {
        self.get(opcode).and_then(|info| info.dummy_clocks)
    }

    /// Overlay every command of `other` onto this set
    pub fn extend(&mut self, other: CommandSet) {
        for info in other.slots.into_iter().flatten() {
            self.insert(info);
        }
    }

    /// Iterate over all commands in opcode order
    pub fn iter(&self) -> impl Iterator<Item = &CommandInfo> {
        self.slots.iter().flatten()
    }

    /// Number of opcodes in the set
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
