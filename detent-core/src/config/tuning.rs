//! Debounce and consensus tuning

use super::{CONSENSUS_COUNT, DEBOUNCE_DEPTH, FAST_THRESHOLD_US, VERY_FAST_THRESHOLD_US};
use crate::event::Micros;

/// Timing and consensus parameters for one encoder engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tuning {
    /// Transitions closer than this to the last accepted one are bounce (µs)
    pub fast_us: Micros,
    /// Transitions closer than this flip the two order-sensitive cells (µs)
    pub very_fast_us: Micros,
    /// Agreeing transitions required in the debounce window
    pub consensus: u8,
}

impl Tuning {
    /// Firmware defaults
    pub const DEFAULT: Self = Self {
        fast_us: FAST_THRESHOLD_US,
        very_fast_us: VERY_FAST_THRESHOLD_US,
        consensus: CONSENSUS_COUNT,
    };

    /// Tuning with no time-based suppression, consensus only
    pub const fn untimed(consensus: u8) -> Self {
        Self {
            fast_us: 0,
            very_fast_us: 0,
            consensus,
        }
    }

    /// Check that the parameters are coherent with the debounce window
    ///
    /// The very-fast threshold must not exceed the fast threshold, and the
    /// consensus must be reachable within [`DEBOUNCE_DEPTH`] transitions.
    pub fn is_valid(&self) -> bool {
        self.very_fast_us <= self.fast_us
            && self.consensus > 0
            && (self.consensus as usize) <= DEBOUNCE_DEPTH
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::DEFAULT
    }
}
