//! Step counter shared between the rotation tick and the scheduler.
//!
//! Single producer (the rotation tick increments), single consumer (the
//! scheduler reads the count and subtracts whole pixels). The increment uses
//! `Release` and the read `Acquire` so a count observed by the scheduler
//! happens-after the step that produced it; normalization never resets to
//! zero, it subtracts the consumed threshold so steps arriving mid-refresh
//! are not lost.

use portable_atomic::{AtomicU32, Ordering};

/// Steps accumulated since the last pixel boundary
#[derive(Debug)]
pub struct StepCounter(AtomicU32);

impl StepCounter {
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Record one stepper step. Called from the rotation tick only.
    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::Release);
    }

    /// Steps accumulated so far
    pub fn count(&self) -> u32 {
        self.0.load(Ordering::Acquire)
    }

    /// Consume `steps` at a pixel boundary, keeping any surplus
    pub fn consume(&self, steps: u32) {
        self.0.fetch_sub(steps, Ordering::AcqRel);
    }
}

impl Default for StepCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_keeps_surplus_steps() {
        let counter = StepCounter::new();
        for _ in 0..23 {
            counter.increment();
        }
        assert_eq!(counter.count(), 23);
        counter.consume(20);
        assert_eq!(counter.count(), 3);
    }
}
