//! Ready-made monitors for [`run_machine`](crate::machine::run_machine).
//!
//! A monitor is any `FnMut(&MachineRunState<'_, T, S>) -> Result<(), TuringMachineError>`.
//! It runs before every step; returning an error aborts the run.

use crate::machine::MachineRunState;
use crate::types::TuringMachineError;

/// A monitor that observes nothing and never aborts.
pub fn no_op<T, S>() -> impl FnMut(&MachineRunState<'_, T, S>) -> Result<(), TuringMachineError> {
    |_| Ok(())
}

/// A monitor that aborts with `StepLimitExceeded` instead of executing step `max_steps + 1`.
pub fn step_limit<T, S>(
    max_steps: usize,
) -> impl FnMut(&MachineRunState<'_, T, S>) -> Result<(), TuringMachineError> {
    move |run| {
        if run.step >= max_steps {
            Err(TuringMachineError::StepLimitExceeded(max_steps))
        } else {
            Ok(())
        }
    }
}

/// Wraps `inner` with a step budget. The budget is checked first, so `inner` never sees the
/// configuration the run is aborted on.
pub fn with_step_limit<T, S, F>(
    max_steps: usize,
    mut inner: F,
) -> impl FnMut(&MachineRunState<'_, T, S>) -> Result<(), TuringMachineError>
where
    F: FnMut(&MachineRunState<'_, T, S>) -> Result<(), TuringMachineError>,
{
    let mut limit = step_limit::<T, S>(max_steps);

    move |run| {
        limit(run)?;
        inner(run)
    }
}
