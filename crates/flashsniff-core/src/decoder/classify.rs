//! Burst classification
//!
//! Turns the host-to-device bytes of a finished burst into a transaction.
//! The header of a data command is counted as address width plus two, plus
//! the opcode's table adjustment; whatever follows is payload.

use alloc::borrow::Cow;
use alloc::format;

use super::transaction::{Transaction, TransactionKind};
use crate::commands::{AddressModeSwitch, CommandKind, CommandSet};
use crate::spi::AddressWidth;

/// Bytes of a data command header beyond the address
const BASE_HEADER: usize = 2;

/// Classify a finished burst
///
/// `mosi` must be non-empty. Control commands carrying an address-mode
/// switch update `width` for subsequent bursts.
pub(crate) fn classify(
    mosi: &[u8],
    start: u64,
    end: u64,
    commands: &CommandSet,
    width: &mut AddressWidth,
) -> Transaction {
    let opcode = mosi[0];
    let address_width = *width;

    let kind = match commands.get(opcode) {
        Some(info) if info.kind == CommandKind::Data => {
            match address_width.decode(&mosi[1..]) {
                None => {
                    log::debug!(
                        "Truncated {} (0x{:02X}): {} bytes",
                        info.name,
                        opcode,
                        mosi.len()
                    );
                    TransactionKind::Error
                }
                Some(address) => {
                    let header =
                        address_width.bytes() + BASE_HEADER + usize::from(info.header_adjust);
                    let num_bytes = mosi.len().saturating_sub(header);
                    TransactionKind::Data {
                        name: info.name.clone(),
                        address,
                        end_address: u64::from(address) + num_bytes as u64,
                        num_bytes,
                    }
                }
            }
        }
        Some(info) => {
            match info.address_mode {
                Some(AddressModeSwitch::Enter4Byte) => *width = AddressWidth::FourByte,
                Some(AddressModeSwitch::Exit4Byte) => *width = AddressWidth::ThreeByte,
                None => {}
            }
            if *width != address_width {
                log::debug!("Address width now {} bytes", width.bytes());
            }
            TransactionKind::Control {
                name: info.name.clone(),
            }
        }
        None => TransactionKind::Control {
            name: Cow::Owned(format!("0x{:X}", opcode)),
        },
    };

    Transaction {
        kind,
        opcode,
        start,
        end,
        address_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::Category;

    fn run(mosi: &[u8], width: &mut AddressWidth) -> Transaction {
        classify(mosi, 10, 20, &CommandSet::builtin(), width)
    }

    #[test]
    fn test_read() {
        let mut width = AddressWidth::ThreeByte;
        let mut mosi = [0u8; 12];
        mosi[..4].copy_from_slice(&[0x03, 0x00, 0x20, 0x00]);
        let t = run(&mosi, &mut width);
        assert_eq!(
            t.kind,
            TransactionKind::Data {
                name: Cow::Borrowed("Read"),
                address: 0x2000,
                end_address: 0x2007,
                num_bytes: 7,
            }
        );
        assert_eq!((t.start, t.end), (10, 20));
    }

    #[test]
    fn test_truncated_read() {
        let mut width = AddressWidth::ThreeByte;
        let t = run(&[0x03, 0x00, 0x20], &mut width);
        assert_eq!(t.kind, TransactionKind::Error);
        assert_eq!(t.opcode, 0x03);

        // Opcode plus full address is not truncated
        let t = run(&[0x03, 0x00, 0x20, 0x00], &mut width);
        assert_eq!(t.category(), Category::Data);
    }

    #[test]
    fn test_header_adjustments() {
        let mut width = AddressWidth::ThreeByte;
        let payload = 5;

        let mut fast_read = [0u8; 3 + 2 + 1 + 5];
        fast_read[0] = 0x0B;
        let t = run(&fast_read, &mut width);
        assert!(matches!(t.kind, TransactionKind::Data { num_bytes, .. } if num_bytes == payload));

        let mut quad_read = [0u8; 3 + 2 + 2 + 5];
        quad_read[0] = 0xEB;
        let t = run(&quad_read, &mut width);
        assert!(matches!(t.kind, TransactionKind::Data { num_bytes, .. } if num_bytes == payload));
    }

    #[test]
    fn test_address_mode_switch() {
        let mut width = AddressWidth::ThreeByte;
        let t = run(&[0xB7], &mut width);
        assert_eq!(
            t.kind,
            TransactionKind::Control {
                name: Cow::Borrowed("Enable 4 Byte Address")
            }
        );
        assert_eq!(t.address_width, AddressWidth::ThreeByte);
        assert_eq!(width, AddressWidth::FourByte);

        let t = run(&[0x13, 0x00, 0x10, 0x00, 0x00, 0xAA, 0xBB], &mut width);
        assert_eq!(t.address(), Some(0x0010_0000));
        assert_eq!(t.address_width, AddressWidth::FourByte);

        run(&[0xE9], &mut width);
        assert_eq!(width, AddressWidth::ThreeByte);
    }

    #[test]
    fn test_unknown_opcode() {
        let mut width = AddressWidth::ThreeByte;
        let t = run(&[0x0A, 0x11], &mut width);
        assert_eq!(t.kind, TransactionKind::Control { name: "0xA".into() });
        let t = run(&[0xFF], &mut width);
        assert_eq!(t.kind, TransactionKind::Control { name: "0xFF".into() });
        assert_eq!(width, AddressWidth::ThreeByte);
    }

    #[test]
    fn test_short_payload_saturates() {
        let mut width = AddressWidth::ThreeByte;
        let t = run(&[0x0B, 0x00, 0x00, 0x10], &mut width);
        assert_eq!(
            t.kind,
            TransactionKind::Data {
                name: Cow::Borrowed("Fast Read"),
                address: 0x10,
                end_address: 0x10,
                num_bytes: 0,
            }
        );
    }
}
