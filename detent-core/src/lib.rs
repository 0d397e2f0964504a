//! Board-agnostic core logic for the rotary encoder firmware
//!
//! This crate contains all decoding logic that does not depend on
//! specific hardware implementations:
//!
//! - Timestamped edge events and GPIO edge masks
//! - Bounded FIFO queue and overflow ring buffers
//! - Quadrature state machine and transition consensus counter
//! - Rotary encoder engine (debounce and consensus heuristics)
//! - Pin registry and event dispatch
//! - Compile-time tuning constants
//! - Traits for the pin reader and rotation sink collaborators
//!
//! # Data flow
//!
//! ```text
//! GPIO edge ──▶ record() ──▶ EventQueue ──▶ Decoder::drain()
//!                                                │ dispatch by pin
//!                                                ▼
//!                          RotaryEncoder pending queue ──▶ handle_events()
//!                                                │
//!                          quadrature step ──▶ debounce window ──▶ consensus
//!                                                │
//!                                                ▼
//!                                         RotationSink::emit()
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod dispatch;
pub mod encoder;
pub mod event;
pub mod quadrature;
pub mod traits;

pub use buffer::{EventQueue, OverflowRing};
pub use config::Tuning;
pub use dispatch::{record, Decoder, EncoderId, PollStats, RegistrationError};
pub use encoder::{EncoderPhase, RotaryEncoder};
pub use event::{EdgeEvent, EdgeMask, EdgeRole, EncoderEvent, GpioPin, Micros};
pub use quadrature::{ConsensusCounter, MechanicalState, Rotation, StepOutcome};
pub use traits::{PinLevels, RotationSink};
