//! Bounded FIFO queue
//!
//! Single-producer/single-consumer ring with a write cursor, a read
//! cursor and a live length. Every operation is constant-time and total:
//! `push` on a full queue and `pop` on an empty one simply report it.
//!
//! The queue itself takes `&mut self`; sharing it between interrupt and
//! task context is done by the owner, e.g. behind a critical-section
//! mutex, so the cursors and length are only ever touched as one unit.

/// Bounded FIFO queue of `N` items
#[derive(Debug, Clone)]
pub struct EventQueue<T, const N: usize> {
    slots: [Option<T>; N],
    write_index: usize,
    read_index: usize,
    len: usize,
}

impl<T, const N: usize> EventQueue<T, N> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            slots: [const { None }; N],
            write_index: 0,
            read_index: 0,
            len: 0,
        }
    }

    /// Push an item at the write cursor
    ///
    /// Returns `false` without side effects if the queue is full.
    pub fn push(&mut self, item: T) -> bool {
        if self.len == N {
            return false;
        }
        self.slots[self.write_index] = Some(item);
        self.write_index = (self.write_index + 1) % N;
        self.len += 1;
        true
    }

    /// Remove and return the oldest item
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let item = self.slots[self.read_index].take();
        self.read_index = (self.read_index + 1) % N;
        self.len -= 1;
        item
    }

    /// Discard everything buffered
    ///
    /// Realigns the read cursor with the write cursor without looking at
    /// the discarded items. Stale slots are overwritten by later pushes.
    pub fn reset(&mut self) {
        self.read_index = self.write_index;
        self.len = 0;
    }

    /// Current occupancy
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the queue holds no items
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if the next push would fail
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Fixed capacity
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<T, const N: usize> Default for EventQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
