//! This module defines the small shared types used throughout the simulator:
//! head directions, the two-sided state union used by sequential composition,
//! step outcomes, and the crate error type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The default number of blank cells pre-allocated on each side of a fresh tape.
pub const DEFAULT_INIT_MARGIN: usize = 0;
/// The default blank symbol used by the command-line driver.
pub const DEFAULT_BLANK_SYMBOL: char = '_';
/// The maximum number of steps the default step budget allows before aborting.
pub const MAX_EXECUTION_STEPS: usize = 10000;

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl Direction {
    /// Returns the opposite direction. `Stay` is its own reverse.
    pub fn reverse(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Stay => Direction::Stay,
        }
    }
}

/// State of a sequentially composed machine.
///
/// `Left` carries the state of the first machine while it is still running,
/// `Right` carries the state of the second one after control was handed over.
/// Nested compositions nest `Either`s; no flattening takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Either<A, B> {
    Left(A),
    Right(B),
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The machine performed a transition and has not reached its end state.
    Continue,
    /// The machine is in its end state.
    Halt(Halt),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Halt {
    /// Reached the end state.
    Ok,

    Err(TuringMachineError),
}

/// Represents the errors a run can be aborted with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TuringMachineError {
    /// The step budget enforced by a monitor ran out.
    #[error("Step limit of {0} exceeded")]
    StepLimitExceeded(usize),
    /// A monitor aborted the run for a caller-defined reason.
    #[error("Execution aborted: {0}")]
    Aborted(String),
    /// Invalid caller input at the outer surfaces, such as an unknown program.
    #[error("Validation error: {0}")]
    ValidationError(String),
}
