//! Fixed-capacity ring buffers
//!
//! - [`EventQueue`] - bounded FIFO with separate read/write cursors
//! - [`OverflowRing`] - sliding window that evicts its oldest entry on insert
//!
//! Both are array-backed with capacity fixed by a const generic, so they
//! can live in `static` storage or inside an owning struct without
//! allocation.

pub mod fifo;
pub mod ring;

pub use fifo::EventQueue;
pub use ring::OverflowRing;
