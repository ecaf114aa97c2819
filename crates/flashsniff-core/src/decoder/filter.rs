//! Record filtering
//!
//! Applied after classification: an address window for data records and
//! an output level selecting which categories are reported at all.

use core::fmt;
use core::str::FromStr;

use super::transaction::{Category, Transaction};
use crate::error::Error;

/// Address range for data records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressWindow {
    /// Lowest reported address (0 disables the lower bound)
    pub min: u32,
    /// Highest reported address
    pub max: Option<u32>,
}

impl AddressWindow {
    /// Returns true if a data record at `address` is reported
    pub fn contains(&self, address: u32) -> bool {
        if self.min > 0 && address < self.min {
            return false;
        }
        !matches!(self.max, Some(max) if address > max)
    }

    /// Returns true if the transaction passes the window
    ///
    /// Only data records have an address; everything else passes.
    pub fn accepts(&self, transaction: &Transaction) -> bool {
        transaction.address().map_or(true, |addr| self.contains(addr))
    }
}

/// Which record categories are reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputLevel {
    /// All records
    #[default]
    Everything,
    /// Data and error records
    OnlyData,
    /// Error records
    OnlyErrors,
    /// Control records
    OnlyControl,
}

impl OutputLevel {
    /// All levels, in display order
    pub const ALL: [OutputLevel; 4] = [
        Self::Everything,
        Self::OnlyData,
        Self::OnlyErrors,
        Self::OnlyControl,
    ];

    /// Name used in settings files and on the command line
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Everything => "everything",
            Self::OnlyData => "only-data",
            Self::OnlyErrors => "only-errors",
            Self::OnlyControl => "only-control",
        }
    }

    /// Returns true if records of `category` are reported
    pub fn accepts(&self, category: Category) -> bool {
        match self {
            Self::Everything => true,
            Self::OnlyData => category != Category::Control,
            Self::OnlyErrors => category == Category::Error,
            Self::OnlyControl => category == Category::Control,
        }
    }
}

impl FromStr for OutputLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| name_matches(level.name(), s))
            .ok_or(Error::InvalidOutputLevel)
    }
}

/// Case-insensitive match that also accepts `_` or ` ` for `-`
fn name_matches(name: &str, input: &str) -> bool {
    name.len() == input.len()
        && name.bytes().zip(input.bytes()).all(|(a, b)| {
            a.eq_ignore_ascii_case(&b) || (a == b'-' && (b == b'_' || b == b' '))
        })
}

impl fmt::Display for OutputLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::TransactionKind;
    use crate::spi::AddressWidth;
    use alloc::vec::Vec;

    fn record(kind: TransactionKind) -> Transaction {
        Transaction {
            kind,
            opcode: 0,
            start: 0,
            end: 0,
            address_width: AddressWidth::ThreeByte,
        }
    }

    fn data(address: u32) -> Transaction {
        record(TransactionKind::Data {
            name: "Read".into(),
            address,
            end_address: u64::from(address),
            num_bytes: 0,
        })
    }

    #[test]
    fn test_window_min_only() {
        let window = AddressWindow {
            min: 0x1000,
            max: None,
        };
        assert!(!window.contains(0x0500));
        assert!(window.contains(0x1000));
        assert!(window.contains(0xFFFF_FFFF));
    }

    #[test]
    fn test_window_min_and_max() {
        let window = AddressWindow {
            min: 0x1000,
            max: Some(0x2000),
        };
        assert!(window.contains(0x2000));
        assert!(!window.contains(0x2001));
        assert!(AddressWindow::default().contains(0));
    }

    #[test]
    fn test_window_ignores_non_data() {
        let window = AddressWindow {
            min: 0x1000,
            max: Some(0x1000),
        };
        assert!(window.accepts(&record(TransactionKind::Error)));
        assert!(window.accepts(&record(TransactionKind::Control {
            name: "Write Enable".into()
        })));
        assert!(!window.accepts(&data(0)));
    }

    #[test]
    fn test_level_predicate() {
        assert!(OutputLevel::Everything.accepts(Category::Control));
        assert!(OutputLevel::OnlyData.accepts(Category::Data));
        assert!(OutputLevel::OnlyData.accepts(Category::Error));
        assert!(!OutputLevel::OnlyData.accepts(Category::Control));
        assert!(OutputLevel::OnlyErrors.accepts(Category::Error));
        assert!(!OutputLevel::OnlyErrors.accepts(Category::Data));
        assert!(OutputLevel::OnlyControl.accepts(Category::Control));
        assert!(!OutputLevel::OnlyControl.accepts(Category::Error));
    }

    #[test]
    fn test_level_filter_idempotent() {
        let records = [
            record(TransactionKind::Error),
            data(0x100),
            record(TransactionKind::Control {
                name: "Write Enable".into(),
            }),
            data(0x200),
        ];
        for level in OutputLevel::ALL {
            let once: Vec<&Transaction> = records
                .iter()
                .filter(|t| level.accepts(t.category()))
                .collect();
            let twice: Vec<&Transaction> = once
                .iter()
                .copied()
                .filter(|t| level.accepts(t.category()))
                .collect();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("only-data".parse::<OutputLevel>(), Ok(OutputLevel::OnlyData));
        assert_eq!("Only Errors".parse::<OutputLevel>(), Ok(OutputLevel::OnlyErrors));
        assert_eq!("only_control".parse::<OutputLevel>(), Ok(OutputLevel::OnlyControl));
        assert_eq!("EVERYTHING".parse::<OutputLevel>(), Ok(OutputLevel::Everything));
        assert_eq!("some".parse::<OutputLevel>(), Err(Error::InvalidOutputLevel));
    }
}
