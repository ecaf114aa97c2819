//! Lane assembly
//!
//! Packs per-edge lane bits into bytes. Every burst starts single-lane
//! (IO0 host to device, IO1 device to host, MSB first). Once the opcode is
//! known to be a continuation opcode, packing switches to quad lanes from
//! edge 8 on: two edges per byte, IO3 first.
//!
//! Quad bytes at or before the mode byte and inside the dummy window are
//! host-to-device; bytes after the dummy window are device-to-host. Each
//! flushed byte lands in both sequences (zero on the idle side) so their
//! lengths always match.

use alloc::vec::Vec;

use super::continuous::ContinuousMode;
use crate::commands::CommandSet;
use crate::sample::Sample;

/// Edge at which a continuation opcode switches to quad lanes
pub(crate) const QUAD_START_EDGE: u64 = 8;

/// Edge on which the mode byte of a quad read completes
pub(crate) const MODE_BYTE_EDGE: u64 = 15;

/// One byte in each direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BytePair {
    pub mosi: u8,
    pub miso: u8,
}

/// Packing phase, with the edge counter since burst start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    /// Single lane, first byte not yet complete
    AwaitingOpcode { edge: u64 },
    /// Single lane after a regular opcode
    SingleLane { edge: u64 },
    /// Quad lanes after a continuation opcode
    QuadLane {
        edge: u64,
        opcode: u8,
        dummy_clocks: u8,
    },
}

/// Bytes accumulated for the open burst
#[derive(Debug, Clone)]
pub(crate) struct Burst {
    pub start: u64,
    pub mosi: Vec<u8>,
    pub miso: Vec<u8>,
}

impl Burst {
    pub(crate) fn new(start: u64) -> Self {
        Self {
            start,
            mosi: Vec::new(),
            miso: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, pair: BytePair) {
        self.mosi.push(pair.mosi);
        self.miso.push(pair.miso);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.mosi.is_empty() || self.miso.is_empty()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LaneAssembler {
    phase: Phase,
    shift_out: u8,
    shift_in: u8,
    nibbles: u8,
}

impl Default for LaneAssembler {
    fn default() -> Self {
        Self {
            phase: Phase::AwaitingOpcode { edge: 0 },
            shift_out: 0,
            shift_in: 0,
            nibbles: 0,
        }
    }
}

impl LaneAssembler {
    /// Reset for a new burst
    ///
    /// In continuous mode the opcode is not on the wire: packing resumes in
    /// quad mode right after it and the implied opcode is returned as the
    /// burst's first byte.
    pub(crate) fn restart(&mut self, continuous: &ContinuousMode) -> Option<BytePair> {
        match continuous.implied() {
            Some(c) => {
                self.phase = Phase::QuadLane {
                    edge: QUAD_START_EDGE,
                    opcode: c.opcode,
                    dummy_clocks: c.dummy_clocks,
                };
                Some(BytePair {
                    mosi: c.opcode,
                    miso: 0,
                })
            }
            None => {
                self.phase = Phase::AwaitingOpcode { edge: 0 };
                self.shift_out = 0;
                self.shift_in = 0;
                None
            }
        }
    }

    /// Clock in one active sample, returning a byte pair when one completes
    pub(crate) fn clock(
        &mut self,
        sample: &Sample,
        commands: &CommandSet,
        continuous: &mut ContinuousMode,
    ) -> Option<BytePair> {
        match self.phase {
            Phase::AwaitingOpcode { edge } => {
                self.shift_single(sample);
                if edge % 8 != 7 {
                    self.phase = Phase::AwaitingOpcode { edge: edge + 1 };
                    return None;
                }
                let opcode = self.shift_out;
                self.phase = match commands.dummy_clocks(opcode) {
                    Some(dummy_clocks) => Phase::QuadLane {
                        edge: edge + 1,
                        opcode,
                        dummy_clocks,
                    },
                    None => Phase::SingleLane { edge: edge + 1 },
                };
                Some(self.take_single())
            }
            Phase::SingleLane { edge } => {
                self.shift_single(sample);
                self.phase = Phase::SingleLane { edge: edge + 1 };
                (edge % 8 == 7).then(|| self.take_single())
            }
            Phase::QuadLane {
                edge,
                opcode,
                dummy_clocks,
            } => {
                self.nibbles = (self.nibbles << 4) | sample.nibble();
                self.phase = Phase::QuadLane {
                    edge: edge + 1,
                    opcode,
                    dummy_clocks,
                };
                if edge % 2 == 0 {
                    return None;
                }

                let byte = core::mem::take(&mut self.nibbles);
                if edge == MODE_BYTE_EDGE {
                    continuous.observe_mode_byte(opcode, dummy_clocks, byte);
                }
                let pair = if edge > MODE_BYTE_EDGE + u64::from(dummy_clocks) {
                    BytePair { mosi: 0, miso: byte }
                } else {
                    BytePair { mosi: byte, miso: 0 }
                };
                Some(pair)
            }
        }
    }

    fn shift_single(&mut self, sample: &Sample) {
        self.shift_out = (self.shift_out << 1) | sample.mosi();
        self.shift_in = (self.shift_in << 1) | sample.miso();
    }

    fn take_single(&mut self) -> BytePair {
        let pair = BytePair {
            mosi: self.shift_out,
            miso: self.shift_in,
        };
        log::trace!("byte mosi=0x{:02X} miso=0x{:02X}", pair.mosi, pair.miso);
        self.shift_out = 0;
        self.shift_in = 0;
        pair
    }

    #[cfg(test)]
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }
}
