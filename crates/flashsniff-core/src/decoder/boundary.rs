//! Burst boundary detection
//!
//! Samples only arrive on clock edges, so an idle bus shows up as a gap
//! between consecutive sample timestamps. A burst starts on the first
//! asserted-CS sample after a gap wider than four times the fastest edge
//! spacing seen so far. Chip select alone is not enough: in continuous read
//! mode consecutive bursts may be captured with CS low on both sides of the
//! gap.

use crate::sample::Sample;

/// Initial gap threshold: anything slower than 2 ms counts as idle
pub const IDLE_GAP_NS: u64 = 2_000_000;

/// Outcome of observing one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Boundary {
    /// Sample belongs to the current burst (or to no burst)
    Within,
    /// Sample starts a new burst
    NewBurst {
        /// Timestamp of the sample before this one, if any
        previous: Option<u64>,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct BoundaryDetector {
    last_time: Option<u64>,
    threshold: u64,
}

impl Default for BoundaryDetector {
    fn default() -> Self {
        Self {
            last_time: None,
            threshold: IDLE_GAP_NS,
        }
    }
}

impl BoundaryDetector {
    /// Feed one sample
    ///
    /// The threshold only ever tightens, tracking the real clock rate.
    pub(crate) fn observe(&mut self, sample: &Sample) -> Boundary {
        // The very first sample comes out of an idle bus
        let gap = match self.last_time {
            Some(last) => sample.time_ns.saturating_sub(last),
            None => u64::MAX,
        };
        self.threshold = self.threshold.min(gap.saturating_mul(4));

        let previous = self.last_time.replace(sample.time_ns);
        if gap > self.threshold && sample.cs_asserted() {
            Boundary::NewBurst { previous }
        } else {
            Boundary::Within
        }
    }

    /// Timestamp of the most recent sample
    pub(crate) fn last_time(&self) -> Option<u64> {
        self.last_time
    }

    /// Current idle-gap threshold (ns)
    pub(crate) fn threshold(&self) -> u64 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CS_HIGH: u16 = 0x8000;

    #[test]
    fn test_first_sample_starts_burst() {
        let mut det = BoundaryDetector::default();
        assert_eq!(
            det.observe(&Sample::new(0, 1_000)),
            Boundary::NewBurst { previous: None }
        );
        assert_eq!(det.threshold(), IDLE_GAP_NS);
    }

    #[test]
    fn test_first_sample_with_cs_high() {
        let mut det = BoundaryDetector::default();
        assert_eq!(det.observe(&Sample::new(CS_HIGH, 0)), Boundary::Within);
        assert_eq!(det.last_time(), Some(0));
    }

    #[test]
    fn test_threshold_tracks_clock() {
        let mut det = BoundaryDetector::default();
        det.observe(&Sample::new(0, 0));
        // 100 ns clock period
        for i in 1..16 {
            assert_eq!(det.observe(&Sample::new(0, i * 100)), Boundary::Within);
        }
        assert_eq!(det.threshold(), 400);

        // 300 ns is slow but not idle
        assert_eq!(det.observe(&Sample::new(0, 1_800)), Boundary::Within);
        // 10 us is idle
        assert_eq!(
            det.observe(&Sample::new(0, 11_800)),
            Boundary::NewBurst {
                previous: Some(1_800)
            }
        );
        assert_eq!(det.threshold(), 400);
    }

    #[test]
    fn test_gap_with_cs_high_is_not_a_burst() {
        let mut det = BoundaryDetector::default();
        det.observe(&Sample::new(0, 0));
        det.observe(&Sample::new(0, 100));
        assert_eq!(det.observe(&Sample::new(CS_HIGH, 50_000)), Boundary::Within);
        // Next edge follows quickly, so no burst either
        assert_eq!(det.observe(&Sample::new(0, 50_100)), Boundary::Within);
    }

    #[test]
    fn test_threshold_never_loosens() {
        let mut det = BoundaryDetector::default();
        det.observe(&Sample::new(0, 0));
        det.observe(&Sample::new(0, 10));
        assert_eq!(det.threshold(), 40);
        det.observe(&Sample::new(0, 1_000_000));
        assert_eq!(det.threshold(), 40);
    }
}
