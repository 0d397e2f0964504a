//! Shared state between edge capture and the polling loop
//!
//! Edge capture tasks only append to the queue, the polling loop only
//! removes from it. Both sides take the critical section for the
//! duration of a single push or pop.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use detent_core::config::EVENT_QUEUE_CAPACITY;
use detent_core::{record, EdgeEvent, EdgeMask, EventQueue, GpioPin, Micros};

/// Global edge queue type
pub type EdgeQueue = EventQueue<EdgeEvent, EVENT_QUEUE_CAPACITY>;

/// Timestamped edges waiting to be dispatched to their encoder
pub static EDGE_QUEUE: Mutex<CriticalSectionRawMutex, RefCell<EdgeQueue>> =
    Mutex::new(RefCell::new(EventQueue::new()));

/// Append a captured edge
///
/// Panics if the queue is full; edges would otherwise be lost silently.
pub fn record_edge(pin: GpioPin, mask: EdgeMask, captured_at: Micros) {
    EDGE_QUEUE.lock(|queue| record(&mut *queue.borrow_mut(), pin, mask, captured_at));
}

/// Take the oldest captured edge, if any
pub fn next_edge() -> Option<EdgeEvent> {
    EDGE_QUEUE.lock(|queue| queue.borrow_mut().pop())
}
