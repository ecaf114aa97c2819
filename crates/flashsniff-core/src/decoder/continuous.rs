//! Continuous read mode tracking
//!
//! Quad reads carry a mode byte right after the address. When its upper
//! nibble is `0xA`, the flash stays in continuous mode and the next burst
//! omits the opcode byte entirely, so the decoder has to supply it.

use crate::spi::opcodes::CONTINUOUS_MODE_BITS;

/// Opcode implied for the next burst
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Continuation {
    /// Opcode of the read that entered continuous mode
    pub opcode: u8,
    /// Its dummy clock count
    pub dummy_clocks: u8,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ContinuousMode {
    implied: Option<Continuation>,
}

impl ContinuousMode {
    /// Record the mode byte of a continuation read
    pub(crate) fn observe_mode_byte(&mut self, opcode: u8, dummy_clocks: u8, mode: u8) {
        let continuous = mode & 0xF0 == CONTINUOUS_MODE_BITS;
        if continuous != self.implied.is_some() {
            log::debug!(
                "Continuous read mode {} (opcode 0x{:02X}, mode byte 0x{:02X})",
                if continuous { "entered" } else { "left" },
                opcode,
                mode
            );
        }
        self.implied = continuous.then_some(Continuation {
            opcode,
            dummy_clocks,
        });
    }

    /// Opcode the next burst starts with, if continuous mode is active
    pub(crate) fn implied(&self) -> Option<Continuation> {
        self.implied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_byte_upper_nibble() {
        let mut mode = ContinuousMode::default();
        assert_eq!(mode.implied(), None);

        mode.observe_mode_byte(0xEB, 4, 0xA5);
        assert_eq!(
            mode.implied(),
            Some(Continuation {
                opcode: 0xEB,
                dummy_clocks: 4
            })
        );

        mode.observe_mode_byte(0xEB, 4, 0x5A);
        assert_eq!(mode.implied(), None);

        mode.observe_mode_byte(0x6B, 8, 0xAF);
        assert_eq!(mode.implied().map(|c| c.opcode), Some(0x6B));

        mode.observe_mode_byte(0x6B, 8, 0xFF);
        assert_eq!(mode.implied(), None);
    }
}
