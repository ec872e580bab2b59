//! Small xorshift PRNG for the demo generator.
//!
//! Visual variety is the only requirement; no statistical or cryptographic
//! claims. Xorshift32 keeps the state to one word and has full period over
//! the nonzero u32s.

/// Xorshift32 generator
#[derive(Debug, Clone)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Seed the generator. A zero seed (the one absorbing state of
    /// xorshift) is replaced with a fixed nonzero constant.
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x6B65_7253 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    pub fn next_u8(&mut self) -> u8 {
        (self.next_u32() & 0xFF) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_does_not_stick() {
        let mut rng = XorShift32::new(0);
        assert_ne!(rng.next_u32(), 0);
        assert_ne!(rng.next_u32(), rng.next_u32());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = XorShift32::new(42);
        let mut b = XorShift32::new(42);
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }
}
