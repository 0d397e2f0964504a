//! Pin level access for encoder state refresh

use detent_core::{GpioPin, PinLevels};
use embassy_rp::pac;

/// Reads levels from the SIO input register
///
/// The edge capture tasks own the `Input` drivers, so state refresh
/// reads the bank directly instead.
pub struct SioPins;

impl PinLevels for SioPins {
    fn is_high(&self, pin: GpioPin) -> bool {
        pac::SIO.gpio_in(0).read() & (1 << pin) != 0
    }
}
