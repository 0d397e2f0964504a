//! Bounded overflow ring
//!
//! A sliding window over the most recent `N` pushes. Inserting always
//! succeeds and hands back whatever occupied the slot, which is how the
//! debounce window tells the consensus counter what to forget.

/// Fixed-capacity ring that evicts its oldest entry on insert
#[derive(Debug, Clone)]
pub struct OverflowRing<T, const N: usize> {
    slots: [Option<T>; N],
    head: usize,
}

impl<T, const N: usize> OverflowRing<T, N> {
    const NON_EMPTY: () = assert!(N > 0, "overflow ring needs at least one slot");

    /// Create an empty ring
    pub const fn new() -> Self {
        let () = Self::NON_EMPTY;
        Self {
            slots: [const { None }; N],
            head: 0,
        }
    }

    /// Store `item` at the head slot and advance the head
    ///
    /// Returns the evicted item: `None` for the first `N` pushes, the
    /// oldest stored item after that.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = self.slots[self.head].replace(item);
        self.head = (self.head + 1) % N;
        evicted
    }

    /// Iterate over occupied slots (storage order, not age order)
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().flatten()
    }

    /// Number of occupied slots
    pub fn occupied(&self) -> usize {
        self.iter().count()
    }

    /// Fixed capacity
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<T, const N: usize> Default for OverflowRing<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
