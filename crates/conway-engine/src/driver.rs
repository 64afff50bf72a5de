//! Iteration drivers built on [`next_generation`].
//!
//! The generation sequence `G0, G1, G2, ...` is modelled by the lazy
//! [`Generations`] iterator; nothing beyond the current grid is ever
//! held. Three queries sit on top of it:
//!
//! - [`advance_one`] -- exactly one transition.
//! - [`advance_by`] -- exactly `steps` transitions (`0` is the identity).
//! - [`advance_until_stable`] -- transitions until `G(i+1) == G(i)`.
//!
//! # Stability
//!
//! "Stable" means a period-1 fixed point: the grid produced is cell-wise
//! equal to the grid that produced it. Oscillators of higher period (a
//! blinker, for instance) never satisfy this and always exhaust the
//! iteration budget. Cycle detection is not attempted.

use core::num::NonZeroUsize;

use conway_types::Grid;

use crate::error::EngineError;
use crate::transition::next_generation;

/// Client-facing name of the step count argument.
const STEPS: &str = "steps";

/// Client-facing name of the iteration budget argument.
const MAX_ITERATIONS: &str = "maxIterations";

/// Lazy sequence of successive generations.
///
/// Yields `G1, G2, ...` for a starting grid `G0`. The iterator never
/// ends; bound it with [`Iterator::take`] or similar.
#[derive(Debug, Clone)]
pub struct Generations {
    current: Grid,
}

impl Generations {
    /// Start the sequence at `seed` (which is not itself yielded).
    pub const fn new(seed: Grid) -> Self {
        Self { current: seed }
    }

    /// The most recently produced generation (the seed before the first call).
    pub const fn current(&self) -> &Grid {
        &self.current
    }

    /// Step once in place and borrow the new generation.
    ///
    /// Unlike [`Iterator::next`] this hands out no owned copy, so a caller
    /// that only needs the last generation pays one grid per step.
    pub fn advance(&mut self) -> &Grid {
        self.current = next_generation(&self.current);
        &self.current
    }

    /// Consume the sequence, keeping the most recent generation.
    pub fn into_current(self) -> Grid {
        self.current
    }
}

impl Iterator for Generations {
    type Item = Grid;

    fn next(&mut self) -> Option<Grid> {
        Some(self.advance().clone())
    }
}

/// A fixed point and the number of transitions it took to confirm it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stabilized {
    /// The fixed-point grid.
    pub grid: Grid,
    /// Transitions applied, including the one that confirmed stability.
    pub iterations: usize,
}

/// Validate a step count.
///
/// # Errors
///
/// Returns [`EngineError::Range`] if `steps` is negative.
pub fn step_count(steps: i64) -> Result<usize, EngineError> {
    usize::try_from(steps).ok().ok_or(EngineError::Range {
        parameter: STEPS,
        requirement: "non-negative",
        value: steps,
    })
}

/// Validate an iteration budget.
///
/// # Errors
///
/// Returns [`EngineError::Range`] if `max_iterations` is zero or negative.
pub fn iteration_budget(max_iterations: i64) -> Result<NonZeroUsize, EngineError> {
    usize::try_from(max_iterations)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or(EngineError::Range {
            parameter: MAX_ITERATIONS,
            requirement: "positive",
            value: max_iterations,
        })
}

/// Apply exactly one transition.
pub fn advance_one(grid: &Grid) -> Grid {
    next_generation(grid)
}

/// Apply exactly `steps` transitions in sequence.
///
/// `steps == 0` returns a copy of the input.
///
/// # Errors
///
/// Returns [`EngineError::Range`] for a negative `steps`, before any
/// transition is computed.
pub fn advance_by(grid: &Grid, steps: i64) -> Result<Grid, EngineError> {
    let steps = step_count(steps)?;
    let mut generations = Generations::new(grid.clone());
    for _ in 0..steps {
        generations.advance();
    }
    Ok(generations.into_current())
}

/// Apply transitions until one leaves the grid unchanged.
///
/// After each transition the new grid is compared with the grid that
/// produced it; on equality that grid is returned together with the
/// number of transitions applied. A still life therefore returns after
/// exactly one iteration.
///
/// # Errors
///
/// Returns [`EngineError::Range`] if `max_iterations <= 0`, before any
/// transition is computed, and [`EngineError::NotConverged`] if the
/// budget is spent without reaching a fixed point.
pub fn advance_until_stable(grid: &Grid, max_iterations: i64) -> Result<Stabilized, EngineError> {
    let budget = iteration_budget(max_iterations)?;
    let mut previous = grid.clone();

    for iteration in 1..=budget.get() {
        let next = next_generation(&previous);
        if next == previous {
            return Ok(Stabilized {
                grid: next,
                iterations: iteration,
            });
        }
        previous = next;
    }

    Err(EngineError::NotConverged {
        max_iterations: budget.get(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn grid(picture: &[&str]) -> Grid {
        Grid::from_rows(
            picture
                .iter()
                .map(|line| line.chars().map(|c| c == '#').collect())
                .collect(),
        )
        .unwrap()
    }

    fn blinker() -> Grid {
        grid(&[".....", ".....", ".###.", ".....", "....."])
    }

    fn block() -> Grid {
        grid(&["....", ".##.", ".##.", "...."])
    }

    fn glider() -> Grid {
        grid(&[
            ".#......",
            "..#.....",
            "###.....",
            "........",
            "........",
            "........",
            "........",
            "........",
        ])
    }

    #[test]
    fn generations_are_lazy_and_ordered() {
        let vertical = next_generation(&blinker());
        let seen: Vec<Grid> = Generations::new(blinker()).take(3).collect();
        assert_eq!(seen, vec![vertical.clone(), blinker(), vertical]);
    }

    #[test]
    fn advance_in_place_matches_iterator() {
        let mut stepped = Generations::new(glider());
        let iterated: Vec<Grid> = Generations::new(glider()).take(4).collect();
        for expected in &iterated {
            assert_eq!(stepped.advance(), expected);
        }
        assert_eq!(stepped.into_current(), advance_by(&glider(), 4).unwrap());
    }

    #[test]
    fn advance_one_matches_transition() {
        assert_eq!(advance_one(&glider()), next_generation(&glider()));
    }

    #[test]
    fn zero_steps_is_identity() {
        assert_eq!(advance_by(&glider(), 0).unwrap(), glider());
    }

    #[test]
    fn steps_apply_in_sequence() {
        let by_hand = next_generation(&next_generation(&next_generation(&glider())));
        assert_eq!(advance_by(&glider(), 3).unwrap(), by_hand);
    }

    #[test]
    fn advance_by_composes() {
        let start = glider();
        for m in 0..5 {
            for n in 0..5 {
                let whole = advance_by(&start, m + n).unwrap();
                let split = advance_by(&advance_by(&start, m).unwrap(), n).unwrap();
                assert_eq!(whole, split, "m={m} n={n}");
            }
        }
    }

    #[test]
    fn negative_steps_are_rejected() {
        let err = advance_by(&glider(), -1).unwrap_err();
        assert_eq!(
            err,
            EngineError::Range {
                parameter: "steps",
                requirement: "non-negative",
                value: -1
            }
        );
        assert_eq!(err.to_string(), "steps must be non-negative, got -1");
    }

    #[test]
    fn non_positive_budget_is_rejected() {
        for bad in [0, -1, i64::MIN] {
            assert!(matches!(
                advance_until_stable(&block(), bad),
                Err(EngineError::Range {
                    parameter: "maxIterations",
                    ..
                })
            ));
        }
    }

    #[test]
    fn still_life_is_stable_after_one_iteration() {
        for budget in [1, 2, 50] {
            let result = advance_until_stable(&block(), budget).unwrap();
            assert_eq!(result.grid, block());
            assert_eq!(result.iterations, 1);
        }
    }

    #[test]
    fn dying_pattern_stabilizes_on_empty_grid() {
        let lonely = grid(&["...", ".#.", "..."]);
        let result = advance_until_stable(&lonely, 10).unwrap();
        assert_eq!(result.grid, Grid::dead(3, 3).unwrap());
        assert_eq!(result.iterations, 2);
    }

    #[test]
    fn budget_counts_transitions() {
        let lonely = grid(&["...", ".#.", "..."]);
        assert_eq!(
            advance_until_stable(&lonely, 1).unwrap_err(),
            EngineError::NotConverged { max_iterations: 1 }
        );
    }

    #[test]
    fn blinker_never_converges() {
        for budget in [1, 2, 3, 10, 101] {
            let err = advance_until_stable(&blinker(), budget).unwrap_err();
            assert_eq!(
                err,
                EngineError::NotConverged {
                    max_iterations: usize::try_from(budget).unwrap()
                }
            );
        }
    }

    #[test]
    fn empty_grid_is_its_own_fixed_point() {
        let empty = Grid::from_rows(Vec::new()).unwrap();
        let result = advance_until_stable(&empty, 1).unwrap();
        assert_eq!(result.grid, empty);
        assert_eq!(result.iterations, 1);
    }
}
