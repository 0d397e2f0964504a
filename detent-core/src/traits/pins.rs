//! Direct pin level reads

use crate::event::GpioPin;

/// Trait for reading the current level of a GPIO pin
///
/// Used to seed an encoder's mechanical state at registration and to
/// resynchronize it after an invalid edge. Implementations must read the
/// physical pin, not a cached value derived from past edges.
pub trait PinLevels {
    /// Check if the pin currently reads high (logic 1)
    fn is_high(&self, pin: GpioPin) -> bool;
}

impl<P: PinLevels + ?Sized> PinLevels for &P {
    fn is_high(&self, pin: GpioPin) -> bool {
        (**self).is_high(pin)
    }
}
