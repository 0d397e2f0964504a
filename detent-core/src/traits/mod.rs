//! Collaborator traits
//!
//! These traits define the interface between the decoding logic and the
//! hardware-specific code around it: reading pin levels when an encoder
//! has to resynchronize, and delivering confirmed rotations.

pub mod pins;
pub mod sink;

pub use pins::PinLevels;
pub use sink::RotationSink;
