//! Transition consensus counter
//!
//! Materialized per-direction counts of the transitions currently held
//! in an encoder's debounce window. The owner observes every transition
//! it pushes into the window and unobserves every transition the window
//! evicts, so both counts always match the window contents.

use super::machine::Rotation;

/// Counts of left and right transitions in the debounce window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsensusCounter {
    left: u8,
    right: u8,
}

impl ConsensusCounter {
    /// Create a counter with both counts at zero
    pub const fn new() -> Self {
        Self { left: 0, right: 0 }
    }

    fn slot(&mut self, rotation: Rotation) -> &mut u8 {
        match rotation {
            Rotation::RotateLeft => &mut self.left,
            Rotation::RotateRight => &mut self.right,
        }
    }

    /// Count a transition entering the window
    pub fn observe(&mut self, rotation: Rotation) {
        let count = self.slot(rotation);
        *count = count.saturating_add(1);
    }

    /// Forget a transition leaving the window
    ///
    /// Returns `false` if the count was already zero, which means the
    /// counter and its window have drifted apart.
    pub fn unobserve(&mut self, rotation: Rotation) -> bool {
        let count = self.slot(rotation);
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// Current count for a direction
    pub fn count(&self, rotation: Rotation) -> u8 {
        match rotation {
            Rotation::RotateLeft => self.left,
            Rotation::RotateRight => self.right,
        }
    }

    /// Check if `rotation` has at least `threshold` agreeing transitions
    pub fn has_consensus(&self, rotation: Rotation, threshold: u8) -> bool {
        self.count(rotation) >= threshold
    }
}
