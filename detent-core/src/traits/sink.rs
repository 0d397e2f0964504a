//! Rotation output

use crate::quadrature::Rotation;

/// Trait for the transport that receives confirmed rotations
///
/// Called synchronously from the polling loop, in decode order, once per
/// confirmed rotation. How the rotation leaves the device (HID report,
/// serial, log) is up to the implementation.
pub trait RotationSink {
    /// Deliver one confirmed rotation
    fn emit(&mut self, rotation: Rotation);
}

impl<S: RotationSink + ?Sized> RotationSink for &mut S {
    fn emit(&mut self, rotation: Rotation) {
        (**self).emit(rotation)
    }
}
