//! Compile-time configuration
//!
//! There is no runtime configuration surface. Capacities are fixed by
//! the constants below; timing and consensus heuristics are bundled in
//! [`Tuning`] so an engine can be built with alternate values.

pub mod tuning;

pub use tuning::*;

/// Number of user GPIOs in RP2040 bank 0 (size of the pin table)
pub const GPIO_COUNT: usize = 30;

/// Maximum number of registered rotary encoders
pub const MAX_ENCODERS: usize = 2;

/// Capacity of the global edge queue shared with interrupt context
pub const EVENT_QUEUE_CAPACITY: usize = 2048;

/// Capacity of each encoder's pending event queue
///
/// Not an overflow limit: a full queue is decoded before more edges are
/// routed to it.
pub const ENCODER_EVENT_BUFFER_LEN: usize = 256;

/// Size of the sliding debounce window (recent decoded transitions)
pub const DEBOUNCE_DEPTH: usize = 5;

/// Agreeing transitions in the window required before a rotation is reported
pub const CONSENSUS_COUNT: u8 = 3;

/// Minimum time between accepted transitions; anything faster is bounce
pub const FAST_THRESHOLD_US: u64 = 8_000;

/// Below this interval the edge order of two quadrature cells is unreliable
pub const VERY_FAST_THRESHOLD_US: u64 = 800;
