//! Rotary encoder engine
//!
//! Owns one quadrature state machine, its debounce window and consensus
//! counter, and a queue of pending edge events routed to it by the
//! dispatcher. Decoding runs only in the polling loop.
//!
//! # Event handling
//!
//! For every edge the mechanical state is advanced first and committed
//! unconditionally, so state tracking stays correct even when nothing is
//! reported. A decoded transition then has to pass three gates before it
//! can be reported:
//!
//! 1. The previous edge was not invalid (a poisoned read is skipped once).
//! 2. At least `fast_us` has passed since the last accepted transition.
//! 3. After entering the debounce window, its direction holds at least
//!    `consensus` of the window's slots.
//!
//! An invalid edge makes [`RotaryEncoder::handle_events`] flush the pending
//! queue and re-read both pins. Buffered history cannot repair a skipped
//! edge; only a fresh physical read can.

use crate::buffer::{EventQueue, OverflowRing};
use crate::config::{Tuning, DEBOUNCE_DEPTH, ENCODER_EVENT_BUFFER_LEN};
use crate::event::{EncoderEvent, GpioPin, Micros};
use crate::quadrature::{ConsensusCounter, MechanicalState, Rotation, StepOutcome};
use crate::traits::{PinLevels, RotationSink};

/// Lifecycle phase of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderPhase {
    /// Mechanical state not yet read from the pins
    Initializing,
    /// Decoding normally
    Operating,
    /// Last edge was invalid; the next valid one is not reported
    Resynchronizing,
}

/// Decoder for one two-pin mechanical rotary encoder
#[derive(Debug, Clone)]
pub struct RotaryEncoder {
    pin_left: GpioPin,
    pin_right: GpioPin,
    tuning: Tuning,
    state: MechanicalState,
    pending: EventQueue<EncoderEvent, ENCODER_EVENT_BUFFER_LEN>,
    window: OverflowRing<Rotation, DEBOUNCE_DEPTH>,
    transitions: ConsensusCounter,
    /// Capture time of the last transition that entered the window
    last_accepted: Option<Micros>,
    /// Cleared by an invalid edge, restored by the next valid one
    last_read_ok: bool,
}

impl RotaryEncoder {
    /// Create an engine for a pin pair
    ///
    /// The mechanical state starts [`MechanicalState::Unknown`]; call
    /// [`refresh_state`](Self::refresh_state) before handling events.
    pub fn new(pin_left: GpioPin, pin_right: GpioPin, tuning: Tuning) -> Self {
        Self {
            pin_left,
            pin_right,
            tuning,
            state: MechanicalState::Unknown,
            pending: EventQueue::new(),
            window: OverflowRing::new(),
            transitions: ConsensusCounter::new(),
            last_accepted: None,
            last_read_ok: true,
        }
    }

    /// Re-seed the mechanical state from the current pin levels
    pub fn refresh_state<P: PinLevels>(&mut self, pins: &P) {
        self.state = MechanicalState::from_levels(
            pins.is_high(self.pin_left),
            pins.is_high(self.pin_right),
        );
    }

    /// Queue an event for the next [`handle_events`](Self::handle_events)
    ///
    /// Returns `false` if the pending queue is full.
    pub fn observe(&mut self, event: EncoderEvent) -> bool {
        self.pending.push(event)
    }

    /// Drain the pending queue
    ///
    /// Stops at the first invalid edge, discards everything still pending
    /// and re-reads the pins. Returns `true` if that resynchronization
    /// happened.
    pub fn handle_events<P, S>(&mut self, pins: &P, sink: &mut S) -> bool
    where
        P: PinLevels,
        S: RotationSink,
    {
        while let Some(event) = self.pending.pop() {
            if !self.handle_event(event, sink) {
                self.pending.reset();
                self.refresh_state(pins);
                return true;
            }
        }
        false
    }

    /// Handle a single edge
    ///
    /// Returns `false` only for an edge that is invalid in the current
    /// mechanical state; the state is left untouched in that case. Every
    /// structurally valid edge returns `true`, whether or not a rotation
    /// was reported.
    ///
    /// # Panics
    ///
    /// Panics if the mechanical state was never seeded from the pins.
    pub fn handle_event<S: RotationSink>(&mut self, event: EncoderEvent, sink: &mut S) -> bool {
        let elapsed = self
            .last_accepted
            .map(|at| event.captured_at.saturating_sub(at));
        let within = |threshold: Micros| elapsed.is_some_and(|us| us < threshold);

        let transition = match self.state.step(event.role, within(self.tuning.very_fast_us)) {
            StepOutcome::Valid { next, transition } => {
                self.state = next;
                transition
            }
            StepOutcome::Invalid => {
                self.last_read_ok = false;
                return false;
            }
        };

        // The read right after an invalid edge is not trusted
        if !self.last_read_ok {
            self.last_read_ok = true;
            return true;
        }

        // Bounce
        if within(self.tuning.fast_us) {
            return true;
        }

        if let Some(rotation) = transition {
            self.last_accepted = Some(event.captured_at);
            if let Some(evicted) = self.window.push(rotation) {
                let consistent = self.transitions.unobserve(evicted);
                debug_assert!(consistent, "consensus counter drifted from its window");
            }
            self.transitions.observe(rotation);

            if self.transitions.has_consensus(rotation, self.tuning.consensus) {
                sink.emit(rotation);
            }
        }

        true
    }

    /// Left pin number
    pub fn left_pin(&self) -> GpioPin {
        self.pin_left
    }

    /// Right pin number
    pub fn right_pin(&self) -> GpioPin {
        self.pin_right
    }

    /// Current mechanical state
    pub fn state(&self) -> MechanicalState {
        self.state
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> EncoderPhase {
        if !self.state.is_known() {
            EncoderPhase::Initializing
        } else if !self.last_read_ok {
            EncoderPhase::Resynchronizing
        } else {
            EncoderPhase::Operating
        }
    }

    /// Number of events waiting in the pending queue
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Check if the pending queue is full and must be decoded before
    /// another event can be observed
    pub fn is_backlogged(&self) -> bool {
        self.pending.is_full()
    }

    /// Transitions of `rotation` currently in the debounce window
    pub fn transition_count(&self, rotation: Rotation) -> u8 {
        self.transitions.count(rotation)
    }

    /// Iterate over the transitions held in the debounce window
    pub fn window(&self) -> impl Iterator<Item = &Rotation> {
        self.window.iter()
    }

    /// Tuning in effect
    pub fn tuning(&self) -> Tuning {
        self.tuning
    }
}
