//! This module defines the `Machine` description, the `Execution` that steps a machine over
//! a tape, and the `run_machine` interpreter that drives an execution to the end state while
//! handing every intermediate configuration to a monitor.

use log::{debug, warn};
use std::fmt;
use std::sync::Arc;

use crate::combinators::sequence;
use crate::tape::Tape;
use crate::types::{Direction, Either, Halt, Step, TuringMachineError, DEFAULT_INIT_MARGIN};

type TransitionFn<T, S> = dyn Fn(&T, &S) -> (T, Direction, S) + Send + Sync;

/// A stateless description of a Turing Machine.
///
/// A machine holds no run state: it can be cloned cheaply, shared between threads, and
/// reused by any number of independent runs.
pub struct Machine<T, S> {
    start: S,
    end: S,
    transition: Arc<TransitionFn<T, S>>,
}

impl<T, S> Machine<T, S> {
    /// Creates a machine from its start state, end state, and transition function.
    ///
    /// The transition maps the symbol under the head and the current state to the symbol to
    /// write, the direction to move, and the next state.
    pub fn new<F>(start: S, end: S, transition: F) -> Self
    where
        F: Fn(&T, &S) -> (T, Direction, S) + Send + Sync + 'static,
    {
        Self {
            start,
            end,
            transition: Arc::new(transition),
        }
    }

    /// Returns the start state.
    pub fn start(&self) -> &S {
        &self.start
    }

    /// Returns the end state.
    pub fn end(&self) -> &S {
        &self.end
    }

    /// Applies the transition function to `symbol` in `state`.
    pub fn transition(&self, symbol: &T, state: &S) -> (T, Direction, S) {
        (self.transition)(symbol, state)
    }
}

impl<T, S> Machine<T, S>
where
    T: 'static,
    S: PartialEq + Clone + Send + Sync + 'static,
{
    /// Runs `self`, then `next`. Shorthand for [`sequence`].
    pub fn then<S2>(self, next: Machine<T, S2>) -> Machine<T, Either<S, S2>>
    where
        S2: Clone + Send + Sync + 'static,
    {
        sequence(self, next)
    }
}

impl<T, S: Clone> Clone for Machine<T, S> {
    fn clone(&self) -> Self {
        Self {
            start: self.start.clone(),
            end: self.end.clone(),
            transition: Arc::clone(&self.transition),
        }
    }
}

impl<T, S: fmt::Debug> fmt::Debug for Machine<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}

/// A snapshot of a run, handed to the monitor before every step.
#[derive(Debug)]
pub struct MachineRunState<'a, T, S> {
    /// The state the next transition is computed from.
    pub current_state: &'a S,
    /// The tape the next transition reads from.
    pub tape: &'a Tape<T>,
    /// The number of steps executed so far.
    pub step: usize,
}

/// Caller-facing run configuration: the blank symbol and the number of blanks to
/// pre-allocate on each side of a fresh tape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig<T> {
    pub zero: T,
    pub init_margin: usize,
}

impl<T: Clone> RunConfig<T> {
    pub fn new(zero: T) -> Self {
        Self {
            zero,
            init_margin: DEFAULT_INIT_MARGIN,
        }
    }

    pub fn with_margin(mut self, init_margin: usize) -> Self {
        self.init_margin = init_margin;
        self
    }

    /// Builds the blank starting tape for this configuration.
    pub fn tape(&self) -> Tape<T> {
        Tape::new(self.init_margin, self.zero.clone())
    }

    /// Runs `machine` on a blank tape built from this configuration.
    pub fn run<S, F>(
        &self,
        machine: &Machine<T, S>,
        monitor: F,
    ) -> Result<Tape<T>, TuringMachineError>
    where
        S: PartialEq + Clone,
        F: FnMut(&MachineRunState<'_, T, S>) -> Result<(), TuringMachineError>,
    {
        run_machine_on(self.tape(), monitor, machine)
    }
}

/// A single run of a machine: the current state, the tape, and the step count.
pub struct Execution<'m, T, S> {
    machine: &'m Machine<T, S>,
    state: S,
    tape: Tape<T>,
    step_count: usize,
}

impl<'m, T, S> Execution<'m, T, S>
where
    T: Clone,
    S: PartialEq + Clone,
{
    /// Starts a run of `machine` on `tape` in the machine's start state.
    pub fn new(machine: &'m Machine<T, S>, tape: Tape<T>) -> Self {
        Self {
            machine,
            state: machine.start().clone(),
            tape,
            step_count: 0,
        }
    }

    /// Executes a single transition.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a transition was performed.
    /// * `Step::Halt(Halt::Ok)` if the machine is already in its end state; nothing changes.
    pub fn step(&mut self) -> Step {
        if self.is_halted() {
            return Step::Halt(Halt::Ok);
        }

        let (write, direction, next) = self.machine.transition(self.tape.middle(), &self.state);
        self.tape.write_and_move(write, direction);
        self.state = next;
        self.step_count += 1;

        Step::Continue
    }

    /// Steps until the end state is reached, calling `monitor` before every step.
    ///
    /// The first error returned by `monitor` stops the run and is reported as
    /// `Step::Halt(Halt::Err(_))`; the step it guarded is not executed. Without an error
    /// this only returns once the end state is reached, which may be never.
    pub fn run<F>(&mut self, mut monitor: F) -> Step
    where
        F: FnMut(&MachineRunState<'_, T, S>) -> Result<(), TuringMachineError>,
    {
        while !self.is_halted() {
            if let Err(e) = monitor(&self.run_state()) {
                return Step::Halt(Halt::Err(e));
            }

            self.step();
        }

        Step::Halt(Halt::Ok)
    }

    /// Checks if the run has reached the machine's end state.
    pub fn is_halted(&self) -> bool {
        self.state == *self.machine.end()
    }

    /// Returns a snapshot of the current configuration.
    pub fn run_state(&self) -> MachineRunState<'_, T, S> {
        MachineRunState {
            current_state: &self.state,
            tape: &self.tape,
            step: self.step_count,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn tape(&self) -> &Tape<T> {
        &self.tape
    }

    /// Returns the total number of steps executed.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Ends the run, returning its tape.
    pub fn into_tape(self) -> Tape<T> {
        self.tape
    }
}

/// Runs `machine` on a blank tape until it reaches its end state.
///
/// The tape starts with `init_margin` copies of `zero` on each side of the head. `monitor`
/// is called before every step, the first included. It is the only way to bound a run: an
/// error it returns aborts the run and is propagated unchanged.
pub fn run_machine<T, S, F>(
    zero: T,
    init_margin: usize,
    monitor: F,
    machine: &Machine<T, S>,
) -> Result<Tape<T>, TuringMachineError>
where
    T: Clone,
    S: PartialEq + Clone,
    F: FnMut(&MachineRunState<'_, T, S>) -> Result<(), TuringMachineError>,
{
    run_machine_on(Tape::new(init_margin, zero), monitor, machine)
}

/// Runs `machine` on `tape` until it reaches its end state. See [`run_machine`].
pub fn run_machine_on<T, S, F>(
    tape: Tape<T>,
    monitor: F,
    machine: &Machine<T, S>,
) -> Result<Tape<T>, TuringMachineError>
where
    T: Clone,
    S: PartialEq + Clone,
    F: FnMut(&MachineRunState<'_, T, S>) -> Result<(), TuringMachineError>,
{
    let mut execution = Execution::new(machine, tape);
    debug!("Starting machine run");

    match execution.run(monitor) {
        Step::Halt(Halt::Err(e)) => {
            warn!("Run aborted after {} steps: {}", execution.step_count(), e);
            Err(e)
        }
        _ => {
            debug!("Reached end state after {} steps", execution.step_count());
            Ok(execution.into_tape())
        }
    }
}
