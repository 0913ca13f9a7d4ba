//! This crate provides the core of a Turing Machine simulator built around a zipper tape.
//! It includes the tape itself, stateless machine descriptions with an interpreter that
//! runs them under a caller-supplied monitor, combinators for building machines from
//! scans, counted moves, and sequential composition, and a registry of demo programs.

pub mod combinators;
pub mod machine;
pub mod monitor;
pub mod programs;
pub mod tape;
pub mod types;

/// Re-exports the machine combinators and their state types.
pub use combinators::{go_until, map_n, move_n, repeat_n, sequence, CountState, ScanState};
/// Re-exports the machine description, the stepper, and the interpreter entry points.
pub use machine::{run_machine, run_machine_on, Execution, Machine, MachineRunState, RunConfig};
/// Re-exports the ready-made monitors.
pub use monitor::{no_op, step_limit, with_step_limit};
/// Re-exports `ProgramInfo` and `ProgramManager` from the programs module.
pub use programs::{Observer, ProgramInfo, ProgramManager};
/// Re-exports the tape and its constructor.
pub use tape::{tape_of, Tape};
/// Re-exports the shared types.
pub use types::{
    Direction, Either, Halt, Step, TuringMachineError, DEFAULT_BLANK_SYMBOL, DEFAULT_INIT_MARGIN,
    MAX_EXECUTION_STEPS,
};
