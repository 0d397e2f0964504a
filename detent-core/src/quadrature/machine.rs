//! Quadrature state machine
//!
//! Pure transition function from (mechanical state, edge) to the next
//! mechanical state and an optional decoded rotation.
//!
//! | From       | Edge      | To         | Decodes                         |
//! |------------|-----------|------------|---------------------------------|
//! | `BothDown` | LeftRise  | `LeftUp`   | nothing                         |
//! | `BothDown` | RightRise | `RightUp`  | `RotateLeft`                    |
//! | `LeftUp`   | LeftFall  | `BothDown` | `RotateLeft` (right if fast)    |
//! | `LeftUp`   | RightRise | `BothUp`   | `RotateRight` (left if fast)    |
//! | `RightUp`  | LeftRise  | `BothUp`   | `RotateLeft`                    |
//! | `RightUp`  | RightFall | `BothDown` | `RotateRight`                   |
//! | `BothUp`   | LeftFall  | `RightUp`  | `RotateRight`                   |
//! | `BothUp`   | RightFall | `LeftUp`   | nothing                         |
//!
//! Every other (state, edge) pair is invalid. The two cells that decode
//! nothing are ambiguous. The two cells leaving `LeftUp` invert their direction
//! when edges arrive faster than the very-fast threshold, where the
//! contacts are known to report their edges out of order.

use crate::event::EdgeRole;

/// Mechanical state of the encoder contacts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MechanicalState {
    /// Both contacts low
    BothDown,
    /// Left contact high, right low
    LeftUp,
    /// Right contact high, left low
    RightUp,
    /// Both contacts high
    BothUp,
    /// Not yet read from the pins
    Unknown,
}

/// Decoded rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    RotateLeft,
    RotateRight,
}

/// Result of feeding one edge to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutcome {
    /// Edge is physically possible from the current state
    Valid {
        next: MechanicalState,
        transition: Option<Rotation>,
    },
    /// Edge is inconsistent with quadrature behavior
    Invalid,
}

impl StepOutcome {
    /// Next state, if the edge was valid
    pub fn next_state(&self) -> Option<MechanicalState> {
        match self {
            StepOutcome::Valid { next, .. } => Some(*next),
            StepOutcome::Invalid => None,
        }
    }

    /// Decoded rotation, if any
    pub fn transition(&self) -> Option<Rotation> {
        match self {
            StepOutcome::Valid { transition, .. } => *transition,
            StepOutcome::Invalid => None,
        }
    }
}

impl Rotation {
    /// The opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Rotation::RotateLeft => Rotation::RotateRight,
            Rotation::RotateRight => Rotation::RotateLeft,
        }
    }
}

impl MechanicalState {
    /// Seed the state directly from the two pin levels
    ///
    /// This is the only way to leave [`MechanicalState::Unknown`].
    pub fn from_levels(left_high: bool, right_high: bool) -> Self {
        match (left_high, right_high) {
            (false, false) => MechanicalState::BothDown,
            (true, false) => MechanicalState::LeftUp,
            (false, true) => MechanicalState::RightUp,
            (true, true) => MechanicalState::BothUp,
        }
    }

    /// Check if the state has been read from the pins
    pub fn is_known(&self) -> bool {
        !matches!(self, MechanicalState::Unknown)
    }

    /// Advance by one edge
    ///
    /// `very_fast` is true when the edge arrived within the very-fast
    /// threshold of the last accepted transition. It inverts the two
    /// `LeftUp` cells only.
    ///
    /// The flip never reaches emission through
    /// [`RotaryEncoder`](crate::RotaryEncoder): a valid
    /// [`Tuning`](crate::Tuning) keeps the very-fast threshold at or below
    /// the fast one, and the engine drops any edge under the fast
    /// threshold before the debounce window sees it. Only direct callers
    /// of `step` observe it.
    ///
    /// # Panics
    ///
    /// Panics if called on [`MechanicalState::Unknown`]: the decoder was
    /// driven before its state was seeded from the pins.
    pub fn step(self, role: EdgeRole, very_fast: bool) -> StepOutcome {
        use EdgeRole::*;
        use MechanicalState::*;
        use Rotation::*;

        let flip = |rotation: Rotation| {
            if very_fast {
                rotation.opposite()
            } else {
                rotation
            }
        };

        let (next, transition) = match (self, role) {
            (Unknown, _) => panic!("quadrature state stepped before it was read from the pins"),

            (BothDown, LeftRise) => (LeftUp, None),
            (BothDown, RightRise) => (RightUp, Some(RotateLeft)),

            (LeftUp, LeftFall) => (BothDown, Some(flip(RotateLeft))),
            (LeftUp, RightRise) => (BothUp, Some(flip(RotateRight))),

            (RightUp, LeftRise) => (BothUp, Some(RotateLeft)),
            (RightUp, RightFall) => (BothDown, Some(RotateRight)),

            (BothUp, LeftFall) => (RightUp, Some(RotateRight)),
            (BothUp, RightFall) => (LeftUp, None),

            _ => return StepOutcome::Invalid,
        };

        StepOutcome::Valid { next, transition }
    }
}
