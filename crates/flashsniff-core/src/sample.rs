//! Bus samples
//!
//! A sample is one multiplexed observation of the bus taken on a clock
//! edge: chip select in bit 15, the four IO lanes in bits 0-3.

use bitflags::bitflags;

bitflags! {
    /// Signal levels captured on one clock edge
    ///
    /// In single-lane mode IO0 is MOSI (host to device) and IO1 is MISO
    /// (device to host). In quad mode IO0-IO3 carry one nibble, IO3 being
    /// the most significant bit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Lanes: u16 {
        /// IO0 / MOSI
        const IO0 = 1 << 0;
        /// IO1 / MISO
        const IO1 = 1 << 1;
        /// IO2 / WP#
        const IO2 = 1 << 2;
        /// IO3 / HOLD#
        const IO3 = 1 << 3;
        /// Chip select level (active low)
        const CS  = 1 << 15;
    }
}

/// One captured clock edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// Signal levels
    pub lanes: Lanes,
    /// Capture timestamp in nanoseconds
    pub time_ns: u64,
}

impl Sample {
    /// Create a sample from a raw multiplexed value
    ///
    /// Bits with no named lane are kept but ignored by the decoder.
    pub const fn new(raw: u16, time_ns: u64) -> Self {
        Self {
            lanes: Lanes::from_bits_retain(raw),
            time_ns,
        }
    }

    /// Returns true if chip select is asserted (driven low)
    pub const fn cs_asserted(&self) -> bool {
        !self.lanes.contains(Lanes::CS)
    }

    /// Host-out bit (IO0)
    pub const fn mosi(&self) -> u8 {
        (self.lanes.bits() & 1) as u8
    }

    /// Device-in bit (IO1)
    pub const fn miso(&self) -> u8 {
        ((self.lanes.bits() >> 1) & 1) as u8
    }

    /// All four IO lanes as a nibble
    pub const fn nibble(&self) -> u8 {
        (self.lanes.bits() & 0x0F) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_extraction() {
        let sample = Sample::new(0x000B, 0);
        assert!(sample.cs_asserted());
        assert_eq!(sample.mosi(), 1);
        assert_eq!(sample.miso(), 1);
        assert_eq!(sample.nibble(), 0xB);
    }

    #[test]
    fn test_chip_select_deasserted() {
        let sample = Sample::new(0x8000, 10);
        assert!(!sample.cs_asserted());
        assert_eq!(sample.nibble(), 0);
    }

    #[test]
    fn test_unnamed_bits_ignored() {
        let sample = Sample::new(0x0130, 0);
        assert!(sample.cs_asserted());
        assert_eq!(sample.nibble(), 0);
    }
}
