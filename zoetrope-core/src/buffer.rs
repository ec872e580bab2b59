//! Bounded circular queue of pixel columns.
//!
//! Written by the command protocol engine, drained by the display scheduler.
//! One slot is sacrificed so that full and empty are distinguishable without
//! a separate count: full ⇔ `(tail + 1) % N == head`.

use crate::column::{Column, BLANK_COLUMN};

/// Error returned when inserting into a full buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferFull;

/// Circular queue of `N` column slots, `N - 1` of them usable
#[derive(Debug, Clone)]
pub struct LineBuffer<const N: usize> {
    slots: [Column; N],
    /// Index of the oldest entry
    head: usize,
    /// Index of the next free slot
    tail: usize,
}

impl<const N: usize> LineBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            slots: [BLANK_COLUMN; N],
            head: 0,
            tail: 0,
        }
    }

    /// Usable capacity in columns
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Number of queued columns
    pub fn occupancy(&self) -> usize {
        (self.tail + N - self.head) % N
    }

    /// Number of columns that can still be inserted
    pub fn free_spaces(&self) -> usize {
        (self.head + N - self.tail - 1) % N
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn is_full(&self) -> bool {
        (self.tail + 1) % N == self.head
    }

    /// Append a column, failing without side effects when no slot is free.
    ///
    /// The caller must discard the rejected data; there is no retry, the
    /// protocol's free-space replies are the host's backpressure signal.
    pub fn insert(&mut self, column: &Column) -> Result<(), BufferFull> {
        if self.is_full() {
            return Err(BufferFull);
        }
        self.slots[self.tail] = *column;
        self.tail = (self.tail + 1) % N;
        Ok(())
    }

    /// Remove and return the oldest column
    pub fn pop(&mut self) -> Option<Column> {
        if self.is_empty() {
            return None;
        }
        let column = self.slots[self.head];
        self.head = (self.head + 1) % N;
        Some(column)
    }

    /// Empty the queue instantly
    pub fn clear(&mut self) {
        self.head = self.tail;
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
