//! Simulation engine for Conway's Game of Life on bounded grids.
//!
//! The engine is synchronous, CPU-only, and free of shared state. It owns
//! two concerns:
//!
//! - [`transition`] -- the single-generation rule (B3/S23) over the Moore
//!   neighborhood, clipped at the grid edges with no wraparound.
//! - [`driver`] -- repeated application: one step, `N` steps, and
//!   "until a fixed point", plus the lazy [`Generations`] sequence they
//!   are built on.
//!
//! Argument errors and non-convergence are reported as [`EngineError`].
//!
//! [`Generations`]: driver::Generations

pub mod driver;
pub mod error;
pub mod transition;

pub use driver::{
    Generations, Stabilized, advance_by, advance_one, advance_until_stable, iteration_budget,
    step_count,
};
pub use error::EngineError;
pub use transition::next_generation;
