//! Decoded transaction records

use alloc::borrow::Cow;
use core::fmt;

use crate::spi::AddressWidth;

/// Record category, used by output filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Truncated data command
    Error,
    /// Command without address phase
    Control,
    /// Command with address and payload
    Data,
}

/// What a burst decoded to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    /// Data opcode whose burst ended before the address was complete
    Error,
    /// Control command, or an opcode missing from the command set
    Control {
        /// Mnemonic, or the raw opcode as `0x..` hex
        name: Cow<'static, str>,
    },
    /// Data command
    Data {
        /// Mnemonic
        name: Cow<'static, str>,
        /// Start address
        address: u32,
        /// Start address plus payload length
        end_address: u64,
        /// Payload bytes after the command header
        num_bytes: usize,
    },
}

impl TransactionKind {
    /// Category of this record
    pub fn category(&self) -> Category {
        match self {
            Self::Error => Category::Error,
            Self::Control { .. } => Category::Control,
            Self::Data { .. } => Category::Data,
        }
    }
}

/// One decoded SPI flash transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Classification result
    pub kind: TransactionKind,
    /// First host-to-device byte of the burst
    pub opcode: u8,
    /// Timestamp of the first sample of the burst (ns)
    pub start: u64,
    /// Timestamp of the last sample before the burst ended (ns)
    pub end: u64,
    /// Address width in force when the burst was classified
    pub address_width: AddressWidth,
}

impl Transaction {
    /// Category of this record
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Start address, for data records
    pub fn address(&self) -> Option<u32> {
        match self.kind {
            TransactionKind::Data { address, .. } => Some(address),
            _ => None,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TransactionKind::Error => write!(f, "Error!"),
            TransactionKind::Control { name } => write!(f, "{}", name),
            TransactionKind::Data {
                name,
                address,
                end_address,
                num_bytes,
            } => {
                let width = self.address_width.hex_digits();
                write!(
                    f,
                    "{} 0x{:0width$x} - 0x{:0width$x} ({} data bytes)",
                    name,
                    address,
                    end_address,
                    num_bytes,
                    width = width
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn record(kind: TransactionKind, address_width: AddressWidth) -> Transaction {
        Transaction {
            kind,
            opcode: 0,
            start: 0,
            end: 0,
            address_width,
        }
    }

    #[test]
    fn test_display_data() {
        let t = record(
            TransactionKind::Data {
                name: Cow::Borrowed("Read"),
                address: 0x2000,
                end_address: 0x2010,
                num_bytes: 16,
            },
            AddressWidth::ThreeByte,
        );
        assert_eq!(t.to_string(), "Read 0x002000 - 0x002010 (16 data bytes)");
    }

    #[test]
    fn test_display_four_byte_address() {
        let t = record(
            TransactionKind::Data {
                name: Cow::Borrowed("4-byte READ"),
                address: 0x0010_0000,
                end_address: 0x0010_0004,
                num_bytes: 4,
            },
            AddressWidth::FourByte,
        );
        assert_eq!(t.to_string(), "4-byte READ 0x00100000 - 0x00100004 (4 data bytes)");
    }

    #[test]
    fn test_display_control_and_error() {
        let control = record(
            TransactionKind::Control {
                name: Cow::Borrowed("Write Enable"),
            },
            AddressWidth::ThreeByte,
        );
        assert_eq!(control.to_string(), "Write Enable");
        assert_eq!(control.category(), Category::Control);
        assert_eq!(control.address(), None);

        let error = record(TransactionKind::Error, AddressWidth::ThreeByte);
        assert_eq!(error.to_string(), "Error!");
        assert_eq!(error.category(), Category::Error);
    }
}
