//! # Mersenne64 Pseudorandom Engine
//!
//! A 64-bit Mersenne-Twister variant with a 312-word state vector.
//!
//! ## Determinism Guarantee
//!
//! Reseeding fully overwrites the state vector and rewinds the cursor, so
//! `reseed(v)` followed by N draws yields the same N words no matter what the
//! engine produced before. Cave noise relies on this: every noise row reseeds
//! with its absolute row index.
//!
//! ## Seeding
//!
//! The state is filled with the linear recurrence `s[i] = 69069 * s[i-1]`
//! (mod 2^64) from `s[0] = seed`. Seed `0` therefore yields an all-zero state
//! and an all-zero output stream.

use rand::{Error, RngCore, SeedableRng};

/// Number of 64-bit words in the state vector.
pub const STATE_SIZE: usize = 312;

/// Twist offset into the state vector.
pub const SHIFT_SIZE: usize = 156;

/// Multiplier of the seeding recurrence.
const SEED_MULTIPLIER: u64 = 69069;

/// Twist matrix, selected by the low bit of the combined word.
const MATRIX_A: [u64; 2] = [0x0, 0xb502_6f5a_a966_19e9];

/// Most significant bit of a state word.
const UPPER_MASK: u64 = 0x8000_0000_0000_0000;

/// Remaining 63 bits of a state word.
const LOWER_MASK: u64 = 0x7fff_ffff_ffff_ffff;

/// Tempering mask B.
const TEMPERING_MASK_B: u64 = 0x71d6_7fff_eda6_0000;

/// Tempering mask C.
const TEMPERING_MASK_C: u64 = 0xfff7_eee0_0000_0000;

/// Deterministic 64-bit generator.
///
/// # Example
///
/// ```rust
/// use cavern_procedural::Mersenne64;
///
/// let mut a = Mersenne64::new(42);
/// let mut b = Mersenne64::new(7);
/// b.reseed(42);
/// assert_eq!(a.next_word(), b.next_word());
/// ```
#[derive(Clone)]
pub struct Mersenne64 {
    /// State vector.
    state: [u64; STATE_SIZE],
    /// Next state word to temper; `STATE_SIZE` means exhausted.
    cursor: usize,
    /// Last tempered output.
    last: u64,
}

impl Mersenne64 {
    /// Creates an engine seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut engine = Self {
            state: [0; STATE_SIZE],
            cursor: STATE_SIZE,
            last: 0,
        };
        engine.reseed(seed);
        engine
    }

    /// Reinitializes the state from `seed`.
    ///
    /// The cursor is left exhausted so the next draw regenerates the vector.
    pub fn reseed(&mut self, seed: u64) {
        self.state[0] = seed;
        for i in 1..STATE_SIZE {
            self.state[i] = self.state[i - 1].wrapping_mul(SEED_MULTIPLIER);
        }
        self.cursor = STATE_SIZE;
        self.last = 0;
    }

    /// Returns the next tempered 64-bit word.
    #[inline]
    pub fn next_word(&mut self) -> u64 {
        if self.cursor >= STATE_SIZE {
            self.regenerate();
        }

        let word = temper(self.state[self.cursor]);
        self.cursor += 1;
        self.last = word;
        word
    }

    /// Little-endian bytes of the most recently produced word.
    #[inline]
    #[must_use]
    pub const fn last_bytes(&self) -> [u8; 8] {
        self.last.to_le_bytes()
    }

    /// Regenerates all `STATE_SIZE` words with the twisted feedback recurrence.
    fn regenerate(&mut self) {
        let mt = &mut self.state;

        for kk in 0..STATE_SIZE - SHIFT_SIZE {
            let y = (mt[kk] & UPPER_MASK) | (mt[kk + 1] & LOWER_MASK);
            mt[kk] = mt[kk + SHIFT_SIZE] ^ twist(y);
        }
        for kk in STATE_SIZE - SHIFT_SIZE..STATE_SIZE - 1 {
            let y = (mt[kk] & UPPER_MASK) | (mt[kk + 1] & LOWER_MASK);
            mt[kk] = mt[kk + SHIFT_SIZE - STATE_SIZE] ^ twist(y);
        }
        let y = (mt[STATE_SIZE - 1] & UPPER_MASK) | (mt[0] & LOWER_MASK);
        mt[STATE_SIZE - 1] = mt[SHIFT_SIZE - 1] ^ twist(y);

        self.cursor = 0;
    }
}

impl std::fmt::Debug for Mersenne64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mersenne64")
            .field("cursor", &self.cursor)
            .field("last", &format_args!("{:#018x}", self.last))
            .finish_non_exhaustive()
    }
}

#[inline]
const fn twist(y: u64) -> u64 {
    (y >> 1) ^ MATRIX_A[(y & 1) as usize]
}

#[inline]
const fn temper(mut y: u64) -> u64 {
    y ^= y >> 29;
    y ^= (y << 17) & TEMPERING_MASK_B;
    y ^= (y << 37) & TEMPERING_MASK_C;
    y ^= y >> 43;
    y
}

impl RngCore for Mersenne64 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next_word() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.next_word()
    }

    /// Draws whole words and truncates the last one, low byte first.
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_word().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mersenne64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
