//! Pin registry and event dispatch
//!
//! [`Decoder`] is the single top-level context constructed at startup. It
//! owns every [`RotaryEncoder`] by value together with the pin → encoder
//! lookup table, and is passed by reference into the polling loop. The
//! only state shared with interrupt context is the edge queue that
//! [`record`] pushes into.
//!
//! # Polling loop
//!
//! ```text
//! loop {
//!     decoder.drain(|| queue.pop(), &pins, &mut sink); // route every queued edge
//!     decoder.run_encoder_tasks(&pins, &mut sink);     // decode per encoder
//! }
//! ```
//!
//! Routing never overflows an encoder: when the owner's pending queue is
//! full, [`Decoder::drain`] decodes it in place before routing the next
//! edge, so the shared edge queue stays the only capacity limit.

use heapless::Vec;

use crate::buffer::EventQueue;
use crate::config::{Tuning, GPIO_COUNT, MAX_ENCODERS};
use crate::encoder::RotaryEncoder;
use crate::event::{EdgeEvent, EdgeMask, EdgeRole, EncoderEvent, GpioPin, Micros};
use crate::traits::{PinLevels, RotationSink};

/// Stable handle to a registered encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderId(u8);

impl EncoderId {
    /// Index into the decoder's encoder table
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Reasons a registration is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistrationError {
    /// Pin number outside the GPIO bank
    PinOutOfRange,
    /// Left and right pins are the same pin
    SamePin,
    /// Pin already owned by another encoder
    PinInUse,
    /// All encoder slots are taken
    CapacityExhausted,
    /// Tuning is incoherent with the debounce window
    InvalidTuning,
}

/// Counters from one polling iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollStats {
    /// Edge events taken from the shared queue
    pub events: usize,
    /// Encoders that resynchronized from their pins
    pub resyncs: usize,
}

/// Record an edge from interrupt context
///
/// # Panics
///
/// Panics if the queue is full. An overflow means the polling loop is
/// starved relative to the input rate and decoding integrity is lost.
pub fn record<const N: usize>(
    queue: &mut EventQueue<EdgeEvent, N>,
    pin: GpioPin,
    mask: EdgeMask,
    captured_at: Micros,
) {
    if !queue.push(EdgeEvent::new(pin, mask, captured_at)) {
        panic!("edge event queue overflowed");
    }
}

/// Registry of rotary encoders and their pins
#[derive(Debug, Clone)]
pub struct Decoder {
    encoders: Vec<RotaryEncoder, MAX_ENCODERS>,
    owners: [Option<EncoderId>; GPIO_COUNT],
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            encoders: Vec::new(),
            owners: [None; GPIO_COUNT],
        }
    }

    /// Register an encoder with the default tuning
    ///
    /// See [`register_with_tuning`](Self::register_with_tuning).
    pub fn register<P: PinLevels>(
        &mut self,
        pin_left: GpioPin,
        pin_right: GpioPin,
        pins: &P,
    ) -> Result<EncoderId, RegistrationError> {
        self.register_with_tuning(pin_left, pin_right, Tuning::DEFAULT, pins)
    }

    /// Register an encoder on a pin pair
    ///
    /// Both pins must be in range, distinct and unowned, and a slot must
    /// be free. On success the engine's mechanical state is seeded from
    /// `pins` and both pins map to the returned handle. A refused
    /// registration leaves the registry unchanged.
    pub fn register_with_tuning<P: PinLevels>(
        &mut self,
        pin_left: GpioPin,
        pin_right: GpioPin,
        tuning: Tuning,
        pins: &P,
    ) -> Result<EncoderId, RegistrationError> {
        if pin_left as usize >= GPIO_COUNT || pin_right as usize >= GPIO_COUNT {
            return Err(RegistrationError::PinOutOfRange);
        }
        if pin_left == pin_right {
            return Err(RegistrationError::SamePin);
        }
        if self.owners[pin_left as usize].is_some() || self.owners[pin_right as usize].is_some() {
            return Err(RegistrationError::PinInUse);
        }
        if !tuning.is_valid() {
            return Err(RegistrationError::InvalidTuning);
        }

        let id = EncoderId(self.encoders.len() as u8);
        let mut encoder = RotaryEncoder::new(pin_left, pin_right, tuning);
        encoder.refresh_state(pins);
        self.encoders
            .push(encoder)
            .map_err(|_| RegistrationError::CapacityExhausted)?;

        self.owners[pin_left as usize] = Some(id);
        self.owners[pin_right as usize] = Some(id);
        Ok(id)
    }

    /// Route one edge event to the encoder that owns its pin
    ///
    /// Returns `true` if the event was queued on an encoder. Events for
    /// unregistered pins and masks reporting both edges at once are
    /// ignored.
    ///
    /// # Panics
    ///
    /// Panics if the owning encoder's pending queue is full, or if the
    /// pin table maps a pin to an encoder that uses neither side of it.
    /// [`drain`](Self::drain) never routes into a full queue.
    pub fn dispatch(&mut self, event: EdgeEvent) -> bool {
        let Some(id) = self.owner_of(event.pin) else {
            return false;
        };
        let encoder = &mut self.encoders[id.index()];

        let is_left = if event.pin == encoder.left_pin() {
            true
        } else if event.pin == encoder.right_pin() {
            false
        } else {
            panic!(
                "pin {} mapped to encoder {} which does not use it",
                event.pin,
                id.index()
            );
        };

        let Some(role) = EdgeRole::resolve(is_left, event.mask) else {
            return false;
        };

        if !encoder.observe(EncoderEvent::new(role, event.captured_at)) {
            panic!("pending event queue of encoder {} overflowed", id.index());
        }
        true
    }

    /// Dispatch every event `next` yields until it reports empty
    ///
    /// An encoder whose pending queue is full decodes it before the next
    /// edge is routed to it; resynchronizations that happen there are
    /// counted in the returned stats.
    pub fn drain<F, P, S>(&mut self, mut next: F, pins: &P, sink: &mut S) -> PollStats
    where
        F: FnMut() -> Option<EdgeEvent>,
        P: PinLevels,
        S: RotationSink,
    {
        let mut stats = PollStats::default();
        while let Some(event) = next() {
            if let Some(id) = self.owner_of(event.pin) {
                let encoder = &mut self.encoders[id.index()];
                if encoder.is_backlogged() && encoder.handle_events(pins, sink) {
                    stats.resyncs += 1;
                }
            }
            self.dispatch(event);
            stats.events += 1;
        }
        stats
    }

    /// Let every registered encoder decode its pending events
    ///
    /// Returns the number of encoders that had to resynchronize.
    pub fn run_encoder_tasks<P, S>(&mut self, pins: &P, sink: &mut S) -> usize
    where
        P: PinLevels,
        S: RotationSink,
    {
        let mut resyncs = 0;
        for encoder in self.encoders.iter_mut() {
            if encoder.handle_events(pins, sink) {
                resyncs += 1;
            }
        }
        resyncs
    }

    /// One polling-loop iteration over a directly owned queue
    pub fn poll<P, S, const N: usize>(
        &mut self,
        queue: &mut EventQueue<EdgeEvent, N>,
        pins: &P,
        sink: &mut S,
    ) -> PollStats
    where
        P: PinLevels,
        S: RotationSink,
    {
        let mut stats = self.drain(|| queue.pop(), pins, sink);
        stats.resyncs += self.run_encoder_tasks(pins, sink);
        stats
    }

    /// Encoder that owns `pin`, if any
    pub fn owner_of(&self, pin: GpioPin) -> Option<EncoderId> {
        self.owners.get(pin as usize).copied().flatten()
    }

    /// Registered encoder by handle
    pub fn encoder(&self, id: EncoderId) -> Option<&RotaryEncoder> {
        self.encoders.get(id.index())
    }

    /// Iterate over registered encoders in registration order
    pub fn encoders(&self) -> impl Iterator<Item = &RotaryEncoder> {
        self.encoders.iter()
    }

    /// Number of registered encoders
    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    /// Check if no encoder is registered
    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }
}
