//! Timestamped GPIO edge events
//!
//! [`EdgeEvent`] is what interrupt context records: a pin, the raw edge
//! mask reported by the GPIO bank, and the capture time. Once the owning
//! encoder is known the event is resolved into an [`EncoderEvent`] which
//! names the side of the quadrature pair and the edge direction.

/// GPIO pin number
pub type GpioPin = u8;

/// Monotonic timestamp or interval in microseconds
pub type Micros = u64;

/// Raw GPIO interrupt edge mask
///
/// Bit layout follows the RP2040 `IO_BANK0` interrupt status nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeMask(u8);

impl EdgeMask {
    /// Falling edge bit (`GPIO_IRQ_EDGE_FALL`)
    pub const FALL: Self = Self(0x4);
    /// Rising edge bit (`GPIO_IRQ_EDGE_RISE`)
    pub const RISE: Self = Self(0x8);
    /// Both edges latched at once
    pub const BOTH: Self = Self(0x4 | 0x8);

    /// Build a mask from raw interrupt status bits
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Mask for the level a pin settled at after an edge
    pub const fn from_level(high: bool) -> Self {
        if high {
            Self::RISE
        } else {
            Self::FALL
        }
    }

    /// Check if the rising edge bit is set
    pub const fn is_rise(self) -> bool {
        self.0 & Self::RISE.0 != 0
    }

    /// Check if the falling edge bit is set
    pub const fn is_fall(self) -> bool {
        self.0 & Self::FALL.0 != 0
    }
}

/// Edge captured in interrupt context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeEvent {
    /// Pin that raised the interrupt
    pub pin: GpioPin,
    /// Edges reported for the pin
    pub mask: EdgeMask,
    /// Capture time (µs since boot)
    pub captured_at: Micros,
}

impl EdgeEvent {
    /// Create a new edge event
    pub const fn new(pin: GpioPin, mask: EdgeMask, captured_at: Micros) -> Self {
        Self {
            pin,
            mask,
            captured_at,
        }
    }
}

/// Which side of the quadrature pair moved, and in which direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeRole {
    LeftRise,
    LeftFall,
    RightRise,
    RightFall,
}

impl EdgeRole {
    /// Resolve a single-edge mask on one side of the pair
    ///
    /// Returns `None` unless exactly one of rise/fall is set. A mask with
    /// both bits is a glitch-filter artifact, not a real dual edge.
    pub fn resolve(is_left: bool, mask: EdgeMask) -> Option<Self> {
        match (is_left, mask.is_rise(), mask.is_fall()) {
            (true, true, false) => Some(EdgeRole::LeftRise),
            (true, false, true) => Some(EdgeRole::LeftFall),
            (false, true, false) => Some(EdgeRole::RightRise),
            (false, false, true) => Some(EdgeRole::RightFall),
            _ => None,
        }
    }
}

/// Timestamped edge resolved to its role within one encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderEvent {
    /// Edge role
    pub role: EdgeRole,
    /// Capture time (µs since boot)
    pub captured_at: Micros,
}

impl EncoderEvent {
    /// Create a new encoder event
    pub const fn new(role: EdgeRole, captured_at: Micros) -> Self {
        Self { role, captured_at }
    }
}
