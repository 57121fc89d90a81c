//! This file contains simple helper functions and test helpers.

/// Returns a mask full of 1s, of `b` bits.
pub(crate) fn mask(b: u32) -> u64 {
    if b >= 64 {
        u64::MAX
    } else {
        (1u64 << b) - 1
    }
}

#[test]
fn test_masking() {
    assert_eq!(mask(0), 0x0);
    assert_eq!(mask(1), 0x1);
    assert_eq!(mask(8), 255);
    assert_eq!(mask(64), u64::MAX);
}

/// Xorshift pseudo-random number generator. We use this as a deterministic
/// source of bit patterns for tests.
#[cfg(test)]
pub(crate) struct XorShift {
    state: u64,
}

#[cfg(test)]
impl XorShift {
    /// Create a new generator with the default seed.
    pub fn new() -> XorShift {
        Self::with_seed(0x1337_1337)
    }

    /// Create a new generator that starts from `seed`.
    pub fn with_seed(seed: u64) -> XorShift {
        XorShift {
            // The state must not be zero.
            state: seed | 1,
        }
    }

    /// Return the next value in the sequence.
    pub fn get64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

#[test]
fn test_xorshift_balance() {
    let mut rng = XorShift::new();

    // Count the number of bits, and the number of 1s.
    let mut bits = 0;
    let mut ones = 0;

    for _ in 0..10000 {
        let mut u = rng.get64();
        for _ in 0..64 {
            bits += 1;
            ones += u & 1;
            u >>= 1;
        }
    }
    // Make sure that we have around 50% 1s and 50% zeros.
    assert!((ones as f64) < (0.55 * bits as f64));
    assert!((ones as f64) > (0.45 * bits as f64));
}

#[test]
fn test_xorshift_repetition() {
    let mut rng = XorShift::new();
    let first = rng.get64();
    let second = rng.get64();

    // Make sure that the items don't repeat themselves too frequently.
    for _ in 0..30000 {
        assert_ne!(first, rng.get64());
        assert_ne!(second, rng.get64());
    }
}
