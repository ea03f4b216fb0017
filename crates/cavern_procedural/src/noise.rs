//! # Noise Field
//!
//! Row-seeded byte field feeding the cave automaton.
//!
//! ## Row Identity
//!
//! Row `r` of a field whose top seed is `s` is produced by reseeding a
//! [`Mersenne64`] with `s + r` and drawing `ceil(width / 8)` words. The bytes
//! of a row are therefore a pure function of its absolute index on the seed
//! axis: any two fields covering the same index hold identical bytes for it.
//! This is what lets [`NoiseField::advance`] append only the new rows when
//! the seed axis moves forward.

use crate::mersenne::Mersenne64;

/// Rectangular byte field, one byte per interior cave cell.
///
/// # Example
///
/// ```rust
/// use cavern_procedural::NoiseField;
///
/// let a = NoiseField::generate(16, 10, 100);
/// let b = NoiseField::generate(16, 4, 106);
/// assert_eq!(a.row(6), b.row(0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoiseField {
    /// Bytes per row.
    width: usize,
    /// Number of rows.
    rows: usize,
    /// Absolute seed-axis index of row 0.
    top_seed: u64,
    /// Row-major bytes.
    bytes: Vec<u8>,
}

impl NoiseField {
    /// Generates `rows` rows of `width` bytes starting at seed index `top_seed`.
    #[must_use]
    pub fn generate(width: usize, rows: usize, top_seed: u64) -> Self {
        let mut bytes = vec![0; width * rows];
        fill_rows(&mut bytes, width, top_seed);

        tracing::trace!("generated noise field {}x{} at seed {}", width, rows, top_seed);

        Self {
            width,
            rows,
            top_seed,
            bytes,
        }
    }

    /// Bytes per row.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Absolute seed-axis index of row 0.
    #[inline]
    #[must_use]
    pub const fn top_seed(&self) -> u64 {
        self.top_seed
    }

    /// All bytes, row-major.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes of row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> &[u8] {
        assert!(row < self.rows, "noise row {row} out of {} rows", self.rows);
        &self.bytes[row * self.width..(row + 1) * self.width]
    }

    /// The last `rows` rows, row-major.
    ///
    /// # Panics
    ///
    /// Panics if `rows > self.rows()`.
    #[must_use]
    pub fn tail(&self, rows: usize) -> &[u8] {
        assert!(rows <= self.rows, "noise tail of {rows} exceeds {} rows", self.rows);
        &self.bytes[(self.rows - rows) * self.width..]
    }

    /// Moves the field `rows` steps forward along the seed axis.
    ///
    /// Drops the oldest `rows` rows and generates only the new tail rows.
    pub fn advance(&mut self, rows: usize) {
        let top_seed = self.top_seed.wrapping_add(rows as u64);

        if rows >= self.rows {
            fill_rows(&mut self.bytes, self.width, top_seed);
        } else {
            let kept = self.rows - rows;
            self.bytes.copy_within(rows * self.width.., 0);
            fill_rows(
                &mut self.bytes[kept * self.width..],
                self.width,
                top_seed.wrapping_add(kept as u64),
            );
        }

        self.top_seed = top_seed;
    }
}

/// Fills consecutive rows of `width` bytes, reseeding per row from `first_seed`.
fn fill_rows(bytes: &mut [u8], width: usize, first_seed: u64) {
    if width == 0 {
        return;
    }

    let mut rng = Mersenne64::new(first_seed);
    let mut seed = first_seed;
    for row in bytes.chunks_mut(width) {
        rng.reseed(seed);
        for chunk in row.chunks_mut(8) {
            rng.next_word();
            chunk.copy_from_slice(&rng.last_bytes()[..chunk.len()]);
        }
        seed = seed.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_rows() {
        let field = NoiseField::generate(8, 5, 0);
        assert_eq!(field.as_bytes().len(), 40);
        // Seed 0 zeroes the whole engine state.
        assert_eq!(field.row(0), &[0; 8]);
        assert_eq!(field.row(1), &[189, 225, 229, 129, 99, 166, 30, 232]);
        assert_eq!(field.row(4), &[67, 251, 129, 24, 121, 181, 240, 239]);
    }

    #[test]
    fn test_row_matches_engine() {
        let field = NoiseField::generate(24, 3, 42);
        let mut rng = Mersenne64::new(44);
        let mut expected = Vec::new();
        for _ in 0..3 {
            expected.extend_from_slice(&rng.next_word().to_le_bytes());
        }
        assert_eq!(field.row(2), &expected[..]);
    }

    #[test]
    fn test_row_identity_across_windows() {
        let a = NoiseField::generate(16, 20, 1000);
        let b = NoiseField::generate(16, 7, 1013);
        for r in 0..7 {
            assert_eq!(a.row(13 + r), b.row(r), "absolute row {}", 1013 + r);
        }
    }

    #[test]
    fn test_advance_matches_fresh_generation() {
        for rows in [1, 3, 9, 10, 25] {
            let mut field = NoiseField::generate(16, 10, 500);
            field.advance(rows);
            assert_eq!(field, NoiseField::generate(16, 10, 500 + rows as u64));
        }
    }

    #[test]
    fn test_tail() {
        let field = NoiseField::generate(8, 6, 3);
        assert_eq!(field.tail(2), &field.as_bytes()[32..]);
        assert!(field.tail(0).is_empty());
    }

    #[test]
    fn test_seed_wraps() {
        let field = NoiseField::generate(8, 3, u64::MAX);
        assert_eq!(field.row(1), NoiseField::generate(8, 1, 0).row(0));
    }
}
