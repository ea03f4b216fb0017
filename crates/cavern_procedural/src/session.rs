//! # Cave Session
//!
//! Maps parameter edits onto the cheapest automaton operation that keeps the
//! grid consistent with the requested parameters.
//!
//! | Edit | Operation |
//! |------|-----------|
//! | seed `+1..=scroll_limit` | `scroll_forward` |
//! | any other seed change | `reseed` + `reset_density` + `iterate` |
//! | density | `reset_density` + `iterate` |
//! | more iterations | `iterate(delta)` |
//! | fewer iterations | `reset_density` + `iterate` |
//! | topology, size | rebuild |
//!
//! Unchanged values are no-ops.

use std::cmp::Ordering;

use crate::automaton::{CaveAutomaton, ScrollOutcome};
use crate::config::CaveConfig;
use crate::error::{CaveError, CaveResult};
use crate::grid::CaveGrid;
use crate::topology::Topology;

/// What a session edit did to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionUpdate {
    /// The value was already current.
    Unchanged,
    /// Seed stepped forward through an incremental scroll.
    Scrolled(ScrollOutcome),
    /// Noise regenerated, then refilled and smoothed.
    Reseeded,
    /// Refilled from existing noise, then smoothed.
    Refilled,
    /// Extra smoothing passes applied to the current grid.
    Iterated {
        /// Passes applied.
        passes: u32,
    },
    /// Automaton rebuilt from scratch.
    Rebuilt,
}

/// An automaton plus the parameters it currently reflects.
#[derive(Clone, Debug)]
pub struct CaveSession {
    config: CaveConfig,
    automaton: CaveAutomaton,
}

impl CaveSession {
    /// Starts a session from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: CaveConfig) -> CaveResult<Self> {
        config.validate()?;
        let automaton = CaveAutomaton::from_config(&config)?;
        Ok(Self { config, automaton })
    }

    /// The parameters the grid currently reflects.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &CaveConfig {
        &self.config
    }

    /// The underlying automaton.
    #[inline]
    #[must_use]
    pub const fn automaton(&self) -> &CaveAutomaton {
        &self.automaton
    }

    /// The current grid.
    #[must_use]
    pub fn grid(&self) -> CaveGrid {
        self.automaton.read_grid()
    }

    /// Moves to seed `seed`.
    ///
    /// Small forward steps scroll; anything else regenerates exactly.
    ///
    /// # Errors
    ///
    /// Propagates scroll failures; none occur for a forward step of at least one row.
    pub fn set_seed(&mut self, seed: u64) -> CaveResult<SessionUpdate> {
        let current = self.config.seed;
        if seed == current {
            return Ok(SessionUpdate::Unchanged);
        }

        // Only forward steps scroll; a backward edit never wraps into one.
        let forward = seed
            .checked_sub(current)
            .and_then(|step| usize::try_from(step).ok())
            .filter(|&rows| rows <= self.config.scroll_limit);
        let update = match forward {
            Some(rows) => SessionUpdate::Scrolled(self.automaton.scroll_forward(rows)?),
            None => {
                self.automaton.reseed(seed);
                self.refill()?;
                SessionUpdate::Reseeded
            }
        };

        self.config.seed = seed;
        tracing::debug!("session seed {} -> {}: {:?}", current, seed, update);
        Ok(update)
    }

    /// Changes the wall density and re-smooths.
    ///
    /// # Errors
    ///
    /// [`CaveError::InvalidDensity`] if `percent > 100`; the session is unchanged.
    pub fn set_density(&mut self, percent: u8) -> CaveResult<SessionUpdate> {
        if percent == self.config.density_percent {
            return Ok(SessionUpdate::Unchanged);
        }

        self.automaton.reset_density(percent)?;
        self.automaton.iterate(self.config.iterations);
        self.config.density_percent = percent;
        Ok(SessionUpdate::Refilled)
    }

    /// Changes the number of smoothing passes.
    ///
    /// # Errors
    ///
    /// Propagates refill failures, which cannot occur for a valid session.
    pub fn set_iterations(&mut self, iterations: u32) -> CaveResult<SessionUpdate> {
        let current = self.config.iterations;
        match iterations.cmp(&current) {
            Ordering::Equal => Ok(SessionUpdate::Unchanged),
            Ordering::Greater => {
                let passes = iterations - current;
                self.automaton.iterate(passes);
                self.config.iterations = iterations;
                Ok(SessionUpdate::Iterated { passes })
            }
            Ordering::Less => {
                self.config.iterations = iterations;
                self.refill()?;
                Ok(SessionUpdate::Refilled)
            }
        }
    }

    /// Switches topology, rebuilding the automaton.
    ///
    /// # Errors
    ///
    /// Propagates construction failures, which cannot occur for a valid session.
    pub fn set_topology(&mut self, topology: Topology) -> CaveResult<SessionUpdate> {
        if topology == self.config.topology {
            return Ok(SessionUpdate::Unchanged);
        }

        self.rebuild(CaveConfig {
            topology,
            ..self.config.clone()
        })
    }

    /// Resizes the grid, rebuilding the automaton.
    ///
    /// # Errors
    ///
    /// [`CaveError::InvalidWidth`] or [`CaveError::InvalidHeight`]; the
    /// session is unchanged.
    pub fn resize(&mut self, width: usize, height: usize) -> CaveResult<SessionUpdate> {
        if width == self.config.width && height == self.config.height {
            return Ok(SessionUpdate::Unchanged);
        }

        self.rebuild(CaveConfig {
            width,
            height,
            ..self.config.clone()
        })
    }

    /// Refills at the current density and reapplies the configured passes.
    fn refill(&mut self) -> CaveResult<()> {
        self.automaton.reset_density(self.config.density_percent)?;
        self.automaton.iterate(self.config.iterations);
        Ok(())
    }

    fn rebuild(&mut self, config: CaveConfig) -> CaveResult<SessionUpdate> {
        let automaton = CaveAutomaton::from_config(&config).map_err(|e| {
            tracing::debug!("session rebuild rejected: {}", e);
            e
        })?;
        self.automaton = automaton;
        self.config = config;
        Ok(SessionUpdate::Rebuilt)
    }
}

impl TryFrom<CaveConfig> for CaveSession {
    type Error = CaveError;

    fn try_from(config: CaveConfig) -> CaveResult<Self> {
        Self::new(config)
    }
}
