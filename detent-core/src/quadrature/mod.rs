//! Quadrature decoding
//!
//! The mechanical state of the two contacts is advanced by single edges.
//! Each legal edge may decode a [`Rotation`]; illegal edges mean an edge
//! was skipped or duplicated and the caller has to resynchronize from
//! the pins.

pub mod consensus;
pub mod machine;

pub use consensus::ConsensusCounter;
pub use machine::{MechanicalState, Rotation, StepOutcome};
