//! Confirmed rotation output

use defmt::*;
use detent_core::{Rotation, RotationSink};

/// Logs `L` or `R` for each confirmed rotation
pub struct LogSink;

impl RotationSink for LogSink {
    fn emit(&mut self, rotation: Rotation) {
        match rotation {
            Rotation::RotateLeft => info!("L"),
            Rotation::RotateRight => info!("R"),
        }
    }
}
