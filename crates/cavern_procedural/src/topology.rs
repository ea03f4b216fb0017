//! # Neighborhood Topologies
//!
//! The automaton rule is the same for both topologies. An interior cell opens
//! iff
//!
//! ```text
//! adjacent_walls < adjacency_threshold  AND  nearby_walls > 2
//! ```
//!
//! Only the neighbor tables and the out-of-range convention differ:
//!
//! - **Square**: 8 Moore neighbors, threshold 5, plus the 12 cells of the four
//!   3-cell arms at distance 2. The grid frame keeps every offset in range.
//! - **Hex**: 6 neighbors of a point-up hex in triangular (offset) coordinates,
//!   threshold 4, plus 11 cells at radius 2. Offsets outside the grid count as
//!   wall.

use serde::{Deserialize, Serialize};

use crate::grid::{CaveGrid, FRAME_THICKNESS};

/// Minimum far-ring wall count (exclusive) for a cell to open.
pub const NEARBY_WALL_MINIMUM: u8 = 2;

type Offsets = &'static [(isize, isize)];

const SQUARE_ADJACENT: Offsets = &[
    (-1, -1), (0, -1), (1, -1),
    (-1, 0), (1, 0),
    (-1, 1), (0, 1), (1, 1),
];

const SQUARE_NEARBY: Offsets = &[
    (-2, -1), (-2, 0), (-2, 1),
    (2, -1), (2, 0), (2, 1),
    (-1, -2), (0, -2), (1, -2),
    (-1, 2), (0, 2), (1, 2),
];

// Top row leans left, bottom row leans right.
const HEX_ADJACENT: Offsets = &[
    (-1, -1), (0, -1),
    (-1, 0), (1, 0),
    (0, 1), (1, 1),
];

// Row spans [-2,0] [-2,2] [-2,2] [-1,2] [0,2], minus the 3x3 box.
const HEX_NEARBY: Offsets = &[
    (-2, -2), (-1, -2), (0, -2),
    (-2, -1), (2, -1),
    (-2, 0), (2, 0),
    (2, 1),
    (0, 2), (1, 2), (2, 2),
];

/// Grid topology. Fixed for the lifetime of an automaton.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// 8-neighbor Moore grid.
    #[default]
    Square,
    /// 6-neighbor point-up hexagonal grid.
    Hex,
}

impl Topology {
    /// Adjacent wall count at which a cell stays (or becomes) wall.
    #[inline]
    #[must_use]
    pub const fn adjacency_threshold(self) -> u8 {
        match self {
            Self::Square => 5,
            Self::Hex => 4,
        }
    }

    /// Offsets of the radius-1 neighborhood.
    #[inline]
    #[must_use]
    pub const fn adjacent_offsets(self) -> &'static [(isize, isize)] {
        match self {
            Self::Square => SQUARE_ADJACENT,
            Self::Hex => HEX_ADJACENT,
        }
    }

    /// Offsets of the radius-2 ring used by the far-wall test.
    #[inline]
    #[must_use]
    pub const fn nearby_offsets(self) -> &'static [(isize, isize)] {
        match self {
            Self::Square => SQUARE_NEARBY,
            Self::Hex => HEX_NEARBY,
        }
    }

    /// Number of walls among the radius-1 neighbors of interior cell `(x, y)`.
    #[inline]
    #[must_use]
    pub fn adjacent_walls(self, grid: &CaveGrid, x: usize, y: usize) -> u8 {
        self.count_walls(grid, x, y, self.adjacent_offsets())
    }

    /// Number of walls in the radius-2 ring around interior cell `(x, y)`.
    #[inline]
    #[must_use]
    pub fn nearby_walls(self, grid: &CaveGrid, x: usize, y: usize) -> u8 {
        self.count_walls(grid, x, y, self.nearby_offsets())
    }

    /// Applies the automaton rule to one interior cell.
    #[inline]
    #[must_use]
    pub fn opens(self, grid: &CaveGrid, x: usize, y: usize) -> bool {
        self.adjacent_walls(grid, x, y) < self.adjacency_threshold()
            && self.nearby_walls(grid, x, y) > NEARBY_WALL_MINIMUM
    }

    /// One automaton pass: writes the next interior of `src` into `dst`.
    ///
    /// Frame cells of `dst` are left as they are.
    ///
    /// # Panics
    ///
    /// Panics if the grids differ in size.
    pub fn step(self, src: &CaveGrid, dst: &mut CaveGrid) {
        assert!(
            src.width() == dst.width() && src.height() == dst.height(),
            "step between grids of different size"
        );

        for y in FRAME_THICKNESS..src.height() - FRAME_THICKNESS {
            for x in FRAME_THICKNESS..src.width() - FRAME_THICKNESS {
                dst.set(x, y, self.opens(src, x, y));
            }
        }
    }

    /// Applies `passes` automaton passes to `grid`, using `scratch` as the back buffer.
    ///
    /// `scratch` is resized to match `grid`; its previous contents are discarded.
    pub fn smooth(self, grid: &mut CaveGrid, scratch: &mut CaveGrid, passes: u32) {
        if passes == 0 {
            return;
        }

        // Frame cells are never written by a pass, so one copy keeps both buffers framed.
        scratch.copy_from(grid);
        for _ in 0..passes {
            self.step(grid, scratch);
            std::mem::swap(grid, scratch);
        }
    }

    #[inline]
    fn count_walls(self, grid: &CaveGrid, x: usize, y: usize, offsets: Offsets) -> u8 {
        let mut walls = 0;
        match self {
            Self::Square => {
                for &(dx, dy) in offsets {
                    if grid.is_wall(x.wrapping_add_signed(dx), y.wrapping_add_signed(dy)) {
                        walls += 1;
                    }
                }
            }
            Self::Hex => {
                for &(dx, dy) in offsets {
                    if grid.is_wall_or_outside(x as isize + dx, y as isize + dy) {
                        walls += 1;
                    }
                }
            }
        }
        walls
    }
}
