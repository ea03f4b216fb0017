//! # Streaming Tests
//!
//! Forward scrolling against full rebuilds at the new seed.
//!
//! Without smoothing a scroll is exact. With `k` passes the retained rows
//! near the top frame and the rows around the window seam may differ, and
//! nowhere else.

use cavern_procedural::{CaveAutomaton, NoiseField, ScrollOutcome, Topology};

fn rebuilt(
    width: usize,
    height: usize,
    density: u8,
    topology: Topology,
    seed: u64,
    passes: u32,
) -> CaveAutomaton {
    let mut cave = CaveAutomaton::new(width, height, density, topology, seed).unwrap();
    cave.iterate(passes);
    cave
}

/// Cells that differ between the two caves.
fn mismatches(a: &CaveAutomaton, b: &CaveAutomaton) -> Vec<(usize, usize)> {
    let (a, b) = (a.read_grid(), b.read_grid());
    let mut cells = Vec::new();
    for y in 0..a.height() {
        for x in 0..a.width() {
            if a.get(x, y) != b.get(x, y) {
                cells.push((x, y));
            }
        }
    }
    cells
}

/// Test: Overlapping noise windows agree row for row.
#[test]
fn test_noise_row_identity() {
    let long = NoiseField::generate(64, 36, 7_000);
    let mut rolling = NoiseField::generate(64, 36, 6_990);
    rolling.advance(10);
    assert_eq!(rolling, long);

    let short = NoiseField::generate(64, 5, 7_031);
    for r in 0..5 {
        assert_eq!(short.row(r), long.row(31 + r));
    }
}

/// Test: Scrolling with no smoothing equals a rebuild.
#[test]
fn test_scroll_without_passes_is_exact() {
    for topology in [Topology::Square, Topology::Hex] {
        for rows in [1, 2, 5, 10, 25, 26] {
            let mut cave = CaveAutomaton::new(20, 30, 40, topology, 77).unwrap();
            cave.scroll_forward(rows).unwrap();

            let fresh = rebuilt(20, 30, 40, topology, 77 + rows as u64, 0);
            assert_eq!(cave.top_seed(), fresh.top_seed());
            assert_eq!(
                cave.read_grid(),
                fresh.read_grid(),
                "{topology:?} scrolled {rows} rows"
            );
        }
    }
}

/// Test: Scroll after smoothing stays within the documented tolerance.
#[test]
fn test_scroll_tolerance() {
    const PASSES: u32 = 4;
    let (width, height) = (68, 40);

    for topology in [Topology::Square, Topology::Hex] {
        for density in [18, 37, 45, 55, 70] {
            for seed in [0, 1_234, 99_999] {
                let mut cave = rebuilt(width, height, density, topology, seed, PASSES);
                let outcome = cave.scroll_forward(1).unwrap();
                let span = cave.span_height(1);
                assert!(matches!(outcome, ScrollOutcome::Incremental { .. }));

                let fresh = rebuilt(width, height, density, topology, seed + 1, PASSES);
                let diff = mismatches(&cave, &fresh);
                assert!(
                    diff.len() * 10 < width * height,
                    "{topology:?} {density}% seed {seed}: {} cells differ",
                    diff.len()
                );
                for &(x, y) in &diff {
                    assert!(
                        y < 2 + 2 * PASSES as usize + 1 || y >= height - span,
                        "{topology:?} {density}% seed {seed}: ({x}, {y}) differs"
                    );
                }
            }
        }
    }
}

/// Test: Multi-row scrolls keep the same error bands.
#[test]
fn test_multi_row_scroll_tolerance() {
    for rows in [3, 8] {
        let mut cave = rebuilt(68, 40, 30, Topology::Square, 5, 2);
        let span = cave.span_height(rows);
        cave.scroll_forward(rows).unwrap();

        let fresh = rebuilt(68, 40, 30, Topology::Square, 5 + rows as u64, 2);
        for (x, y) in mismatches(&cave, &fresh) {
            assert!(y < 2 + 4 + 1 || y >= 40 - span, "({x}, {y}) after {rows} rows");
        }
    }
}

/// Test: A window as tall as the grid falls back to an exact rebuild.
#[test]
fn test_scroll_falls_back_to_rebuild() {
    let mut cave = rebuilt(28, 14, 35, Topology::Hex, 50, 5);
    assert_eq!(cave.scroll_forward(1), Ok(ScrollOutcome::Rebuilt));
    assert_eq!(cave.iterations(), 5);
    assert_eq!(
        cave.read_grid(),
        rebuilt(28, 14, 35, Topology::Hex, 51, 5).read_grid()
    );
}

/// Test: Scrolls at least as tall as the grid rebuild, however far they jump.
#[test]
fn test_oversized_scroll_rebuilds() {
    for rows in [40, usize::MAX - 3, usize::MAX] {
        let mut cave = rebuilt(68, 40, 18, Topology::Square, 10, 4);
        assert_eq!(cave.scroll_forward(rows), Ok(ScrollOutcome::Rebuilt), "{rows} rows");

        let seed = 10u64.wrapping_add(rows as u64);
        assert_eq!(cave.top_seed(), seed);
        assert_eq!(cave.iterations(), 4);
        assert_eq!(
            cave.read_grid(),
            rebuilt(68, 40, 18, Topology::Square, seed, 4).read_grid(),
            "{rows} rows"
        );
    }
}

/// Test: Scroll keeps density, passes and noise coherent for later edits.
#[test]
fn test_edits_after_scroll() {
    let mut cave = rebuilt(36, 30, 25, Topology::Square, 100, 3);
    for _ in 0..6 {
        cave.scroll_forward(1).unwrap();
    }
    assert_eq!(cave.top_seed(), 106);
    assert_eq!(cave.iterations(), 3);
    assert_eq!(cave.noise(), rebuilt(36, 30, 25, Topology::Square, 106, 0).noise());

    // A density reset only reads the noise, so it lands on the exact cave.
    cave.reset_density(25).unwrap();
    cave.iterate(3);
    assert_eq!(
        cave.read_grid(),
        rebuilt(36, 30, 25, Topology::Square, 106, 3).read_grid()
    );
}
