//! # CAVERN Procedural Generation
//!
//! Deterministic cellular-automaton caves over a streamable noise field.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed, density and passes always produce the same cave
//! 2. **Row-seeded**: Each noise row depends only on its absolute seed index
//! 3. **Incremental**: Density, pass count and forward seed steps reuse prior work
//! 4. **Framed**: A 2-cell border holds the dominant fill and is never smoothed
//!
//! ## Core Components
//!
//! - `Mersenne64`: 64-bit pseudorandom engine
//! - `NoiseField`: Row-seeded byte field
//! - `CaveAutomaton`: Threshold fill, smoothing and forward scroll
//! - `Topology`: Square and hex neighborhoods
//! - `CaveSession`: Maps parameter edits to automaton operations
//!
//! ## Example
//!
//! ```rust
//! use cavern_procedural::{CaveConfig, CaveSession, SessionUpdate};
//!
//! let mut session = CaveSession::new(CaveConfig::default())?;
//! assert!(matches!(session.set_seed(1)?, SessionUpdate::Scrolled(_)));
//! println!("{}", session.grid());
//! # Ok::<(), cavern_procedural::CaveError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod automaton;
pub mod config;
pub mod error;
pub mod grid;
pub mod mersenne;
pub mod noise;
pub mod session;
pub mod topology;

pub use automaton::{threshold_byte, CaveAutomaton, ScrollOutcome};
pub use config::CaveConfig;
pub use error::{CaveError, CaveResult};
pub use grid::{CaveGrid, Frame, FRAME_THICKNESS};
pub use mersenne::Mersenne64;
pub use noise::NoiseField;
pub use session::{CaveSession, SessionUpdate};
pub use topology::Topology;
