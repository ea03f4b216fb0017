//! # Cave Automaton
//!
//! Owns the current grid, the rolling noise field, the density threshold and
//! the iteration count, and keeps them coherent under incremental edits.
//!
//! ## Update Costs
//!
//! | Operation | Work |
//! |-----------|------|
//! | `reset_density` | one threshold pass, no new randomness |
//! | `iterate(n)` | `n` automaton passes |
//! | `reseed` | full noise regeneration, grid untouched |
//! | `scroll_forward(r)` | `r` noise rows + a window of `2n + r + 4` rows |
//!
//! ## Scroll Approximation
//!
//! `scroll_forward` does not recompute the whole grid. It slides the retained
//! grid up and re-smooths only a trailing window whose own top margin is a
//! frame, not the real cave above it. Each automaton pass sees 2 cells
//! further, so after `n` passes the rows near the window seam and the rows
//! just under the top frame may differ from a full rebuild. With `n = 0` the
//! result is exact. Use `reseed` + `reset_density` + `iterate` when exactness
//! matters.
//!
//! ## Example
//!
//! ```rust
//! use cavern_procedural::{CaveAutomaton, Topology};
//!
//! let mut cave = CaveAutomaton::new(68, 40, 18, Topology::Square, 0)?;
//! cave.iterate(4);
//! cave.scroll_forward(1)?;
//! assert_eq!(cave.top_seed(), 1);
//! assert_eq!(cave.read_grid().width(), 68);
//! # Ok::<(), cavern_procedural::CaveError>(())
//! ```

use crate::config::CaveConfig;
use crate::error::{CaveError, CaveResult};
use crate::grid::{CaveGrid, Frame, FRAME_THICKNESS};
use crate::noise::NoiseField;
use crate::topology::Topology;

/// Bytes drawn from each PRNG word.
pub const WORD_BYTES: usize = 8;

/// Smallest grid height: the frame plus one interior row.
pub const MIN_HEIGHT: usize = 2 * FRAME_THICKNESS + 1;

/// Density at or above which the dominant fill is wall.
pub const WALL_DOMINANT_PERCENT: u8 = 50;

/// Largest accepted density.
pub const MAX_DENSITY_PERCENT: u8 = 100;

/// Converts a wall density percentage to the noise threshold byte.
///
/// `round(percent * 2.56)`, clamped to 255.
#[inline]
#[must_use]
pub const fn threshold_byte(percent: u8) -> u8 {
    let scaled = (percent as u32 * 256 + 50) / 100;
    if scaled > 255 {
        255
    } else {
        scaled as u8
    }
}

/// Checks the grid dimension preconditions.
///
/// # Errors
///
/// [`CaveError::InvalidWidth`] unless `width - 4` is a positive multiple of 8,
/// [`CaveError::InvalidHeight`] if `height < 5`.
pub fn validate_dimensions(width: usize, height: usize) -> CaveResult<()> {
    let frame = 2 * FRAME_THICKNESS;
    if width <= frame || (width - frame) % WORD_BYTES != 0 {
        return Err(CaveError::InvalidWidth { width });
    }
    if height < MIN_HEIGHT {
        return Err(CaveError::InvalidHeight { height });
    }
    Ok(())
}

/// Checks a density percentage.
///
/// # Errors
///
/// [`CaveError::InvalidDensity`] if `percent > 100`.
pub fn validate_density(percent: u8) -> CaveResult<()> {
    if percent > MAX_DENSITY_PERCENT {
        return Err(CaveError::InvalidDensity(percent));
    }
    Ok(())
}

/// How a forward scroll was carried out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// Retained grid slid up and a trailing window re-smoothed.
    Incremental {
        /// Height of the re-smoothed window, `2 * iterations + rows + 4`.
        span_height: usize,
        /// Bottom grid rows replaced from the window.
        spliced_rows: usize,
    },
    /// The window would have covered the grid, so the grid was rebuilt exactly.
    Rebuilt,
}

/// Cellular-automaton cave over a streamable noise field.
#[derive(Clone, Debug)]
pub struct CaveAutomaton {
    width: usize,
    height: usize,
    topology: Topology,
    density_percent: u8,
    threshold: u8,
    /// Dominant fill is wall (density at or above 50%).
    has_wall: bool,
    iterations: u32,
    grid: CaveGrid,
    /// Back buffer for smoothing passes.
    scratch: CaveGrid,
    noise: NoiseField,
    frame: Frame,
}

impl CaveAutomaton {
    /// Builds a cave and fills it from fresh noise at `density_percent`.
    ///
    /// No smoothing is applied; the grid is the raw threshold fill.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions or density are out of range. No
    /// state is created in that case.
    pub fn new(
        width: usize,
        height: usize,
        density_percent: u8,
        topology: Topology,
        seed: u64,
    ) -> CaveResult<Self> {
        validate_dimensions(width, height)?;
        validate_density(density_percent)?;

        let frame = Frame::new(width, height);
        let has_wall = density_percent >= WALL_DOMINANT_PERCENT;
        let grid = frame.template(!has_wall);
        let noise = NoiseField::generate(
            width - 2 * FRAME_THICKNESS,
            height - 2 * FRAME_THICKNESS,
            seed,
        );

        let mut cave = Self {
            width,
            height,
            topology,
            density_percent,
            threshold: threshold_byte(density_percent),
            has_wall,
            iterations: 0,
            scratch: grid.clone(),
            grid,
            noise,
            frame,
        };
        cave.fill_from_noise();

        tracing::debug!(
            "cave {}x{} {:?} at {}% (threshold {}), seed {}",
            width,
            height,
            topology,
            density_percent,
            cave.threshold,
            seed
        );

        Ok(cave)
    }

    /// Builds a cave from a configuration and applies its iteration count.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: &CaveConfig) -> CaveResult<Self> {
        let mut cave = Self::new(
            config.width,
            config.height,
            config.density_percent,
            config.topology,
            config.seed,
        )?;
        cave.iterate(config.iterations);
        Ok(cave)
    }

    /// Grid width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Neighborhood topology.
    #[inline]
    #[must_use]
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    /// Current wall density percentage.
    #[inline]
    #[must_use]
    pub const fn density_percent(&self) -> u8 {
        self.density_percent
    }

    /// Noise bytes at or below this value are wall.
    #[inline]
    #[must_use]
    pub const fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Returns true if the frame is wall (density at or above 50%).
    #[inline]
    #[must_use]
    pub const fn has_wall(&self) -> bool {
        self.has_wall
    }

    /// Smoothing passes applied since the last density reset.
    #[inline]
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Absolute seed-axis index of the first noise row.
    #[inline]
    #[must_use]
    pub const fn top_seed(&self) -> u64 {
        self.noise.top_seed()
    }

    /// The noise field backing the grid.
    #[inline]
    #[must_use]
    pub const fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Independent copy of the current grid.
    #[must_use]
    pub fn read_grid(&self) -> CaveGrid {
        self.grid.clone()
    }

    /// Height of the window `scroll_forward(rows)` would re-smooth.
    ///
    /// Saturates at `usize::MAX`, which any grid treats as a full rebuild.
    #[inline]
    #[must_use]
    pub const fn span_height(&self, rows: usize) -> usize {
        (self.iterations as usize)
            .saturating_mul(2)
            .saturating_add(rows)
            .saturating_add(2 * FRAME_THICKNESS)
    }

    /// Refills the grid from the existing noise at a new density.
    ///
    /// Draws no new randomness and resets the iteration count to 0.
    ///
    /// # Errors
    ///
    /// [`CaveError::InvalidDensity`] if `percent > 100`; the cave is unchanged.
    pub fn reset_density(&mut self, percent: u8) -> CaveResult<()> {
        validate_density(percent)?;

        let has_wall = percent >= WALL_DOMINANT_PERCENT;
        if has_wall != self.has_wall {
            self.frame.paint(&mut self.grid, !has_wall);
            self.has_wall = has_wall;
        }
        self.density_percent = percent;
        self.threshold = threshold_byte(percent);
        self.iterations = 0;
        self.fill_from_noise();

        tracing::debug!(
            "density reset to {}% (threshold {}, wall frame {})",
            percent,
            self.threshold,
            has_wall
        );
        Ok(())
    }

    /// Applies `passes` automaton passes.
    pub fn iterate(&mut self, passes: u32) {
        self.topology.smooth(&mut self.grid, &mut self.scratch, passes);
        self.iterations = self.iterations.saturating_add(passes);
    }

    /// Regenerates the whole noise field starting at `seed`.
    ///
    /// The grid and iteration count are untouched; follow with
    /// [`reset_density`](Self::reset_density) and [`iterate`](Self::iterate)
    /// for a consistent grid.
    pub fn reseed(&mut self, seed: u64) {
        self.noise = NoiseField::generate(self.noise.width(), self.noise.rows(), seed);
        tracing::debug!("noise reseeded at {}", seed);
    }

    /// Advances the seed axis by `rows` without a full recomputation.
    ///
    /// The result approximates a full rebuild at `top_seed + rows`; see the
    /// module documentation for where the two may differ.
    ///
    /// # Errors
    ///
    /// [`CaveError::EmptyScroll`] if `rows == 0`; the cave is unchanged.
    pub fn scroll_forward(&mut self, rows: usize) -> CaveResult<ScrollOutcome> {
        if rows == 0 {
            return Err(CaveError::EmptyScroll);
        }

        let span_height = self.span_height(rows);
        if span_height >= self.height {
            let seed = self.top_seed().wrapping_add(rows as u64);
            let passes = self.iterations;
            self.reseed(seed);
            self.iterations = 0;
            self.fill_from_noise();
            self.iterate(passes);

            tracing::debug!(
                "scroll by {} rebuilt: window of {} rows covers {}-row grid",
                rows,
                span_height,
                self.height
            );
            return Ok(ScrollOutcome::Rebuilt);
        }

        self.noise.advance(rows);

        // Trailing window, framed like a full grid, over the last noise rows.
        let window_frame = Frame::new(self.width, span_height);
        let mut window = window_frame.template(!self.has_wall);
        window.fill_interior(
            self.noise.tail(span_height - 2 * FRAME_THICKNESS),
            0,
            self.threshold,
        );
        let mut scratch = CaveGrid::new(self.width, span_height);
        self.topology.smooth(&mut window, &mut scratch, self.iterations);

        // Never keep rows that were the old bottom frame.
        let spliced_rows = (span_height / 2 + 1).max(rows + FRAME_THICKNESS);
        let kept = self.height - spliced_rows;
        self.grid.shift_rows_up(rows, kept);
        self.grid
            .copy_rows_from(&window, span_height - spliced_rows, kept, spliced_rows);
        self.frame.paint(&mut self.grid, !self.has_wall);

        tracing::debug!(
            "scrolled {} rows to seed {}: window {} rows, spliced {}",
            rows,
            self.top_seed(),
            span_height,
            spliced_rows
        );

        Ok(ScrollOutcome::Incremental {
            span_height,
            spliced_rows,
        })
    }

    /// Thresholds every interior cell from the noise field.
    fn fill_from_noise(&mut self) {
        debug_assert_eq!(
            self.noise.rows(),
            self.height - 2 * FRAME_THICKNESS,
            "noise field out of step with grid"
        );
        self.grid
            .fill_interior(self.noise.as_bytes(), 0, self.threshold);
    }
}
