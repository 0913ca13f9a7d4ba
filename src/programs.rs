//! A registry of named demo machines over `char` tapes, built from the combinators.

use std::fmt;

use crate::combinators::{go_until, map_n, move_n, repeat_n};
use crate::machine::{run_machine_on, Machine, MachineRunState};
use crate::monitor::with_step_limit;
use crate::tape::Tape;
use crate::types::{Direction, TuringMachineError};

/// Observes a type-erased run: the tape, the current state, and the step index.
pub type Observer<'a> =
    dyn FnMut(&Tape<char>, &dyn fmt::Debug, usize) -> Result<(), TuringMachineError> + 'a;

type Runner =
    fn(Tape<char>, usize, &mut Observer<'_>) -> Result<Tape<char>, TuringMachineError>;

struct Program {
    name: &'static str,
    description: &'static str,
    run: Runner,
}

const PROGRAMS: [Program; 6] = [
    Program {
        name: "fill",
        description: "Writes X to three cells, moving right",
        run: fill,
    },
    Program {
        name: "seek-one",
        description: "Scans right to the first 1",
        run: seek_one,
    },
    Program {
        name: "seek-blank",
        description: "Scans right to the first blank",
        run: seek_blank,
    },
    Program {
        name: "flip-8",
        description: "Inverts the bits of eight cells, moving right",
        run: flip_8,
    },
    Program {
        name: "append-mark",
        description: "Writes # on the first blank after the input",
        run: append_mark,
    },
    Program {
        name: "rewind",
        description: "Walks to the end of the input and back to its first symbol",
        run: rewind,
    },
];

fn fill(
    tape: Tape<char>,
    max_steps: usize,
    observer: &mut Observer<'_>,
) -> Result<Tape<char>, TuringMachineError> {
    drive(repeat_n(3, Direction::Right, 'X'), tape, max_steps, observer)
}

fn seek_one(
    tape: Tape<char>,
    max_steps: usize,
    observer: &mut Observer<'_>,
) -> Result<Tape<char>, TuringMachineError> {
    drive(go_until(Direction::Right, |c: &char| *c == '1'), tape, max_steps, observer)
}

fn seek_blank(
    tape: Tape<char>,
    max_steps: usize,
    observer: &mut Observer<'_>,
) -> Result<Tape<char>, TuringMachineError> {
    let blank = *tape.zero();
    drive(go_until(Direction::Right, move |c: &char| *c == blank), tape, max_steps, observer)
}

fn flip_8(
    tape: Tape<char>,
    max_steps: usize,
    observer: &mut Observer<'_>,
) -> Result<Tape<char>, TuringMachineError> {
    drive(map_n(8, Direction::Right, flip), tape, max_steps, observer)
}

fn append_mark(
    tape: Tape<char>,
    max_steps: usize,
    observer: &mut Observer<'_>,
) -> Result<Tape<char>, TuringMachineError> {
    let blank = *tape.zero();
    let machine = go_until(Direction::Right, move |c: &char| *c == blank)
        .then(repeat_n(1, Direction::Stay, '#'));

    drive(machine, tape, max_steps, observer)
}

fn rewind(
    tape: Tape<char>,
    max_steps: usize,
    observer: &mut Observer<'_>,
) -> Result<Tape<char>, TuringMachineError> {
    let blank = *tape.zero();
    let forward = Direction::Right;
    let machine = go_until(forward, move |c: &char| *c == blank)
        .then(move_n(1, forward.reverse()))
        .then(go_until(forward.reverse(), move |c: &char| *c == blank))
        .then(move_n(1, forward));

    drive(machine, tape, max_steps, observer)
}

fn flip(c: &char) -> char {
    match c {
        '0' => '1',
        '1' => '0',
        other => *other,
    }
}

fn drive<S>(
    machine: Machine<char, S>,
    tape: Tape<char>,
    max_steps: usize,
    observer: &mut Observer<'_>,
) -> Result<Tape<char>, TuringMachineError>
where
    S: PartialEq + Clone + fmt::Debug,
{
    run_machine_on(
        tape,
        with_step_limit(max_steps, |run: &MachineRunState<'_, char, S>| {
            let state: &dyn fmt::Debug = run.current_state;
            observer(run.tape, state, run.step)
        }),
        &machine,
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: &'static str,
    pub description: &'static str,
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        PROGRAMS
            .get(index)
            .map(|program| ProgramInfo {
                index,
                name: program.name,
                description: program.description,
            })
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program index {} out of range", index))
            })
    }

    /// Get information about a program by its name
    pub fn get_program_by_name(name: &str) -> Result<ProgramInfo, TuringMachineError> {
        Self::find(name).and_then(Self::get_program_info)
    }

    /// List all program names
    pub fn list_program_names() -> Vec<&'static str> {
        PROGRAMS.iter().map(|program| program.name).collect()
    }

    /// Search for programs by name
    pub fn search_programs(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();

        PROGRAMS
            .iter()
            .enumerate()
            .filter(|(_, program)| program.name.contains(&query))
            .map(|(index, _)| index)
            .collect()
    }

    /// Runs the named program on `tape`, calling `observer` before every step.
    pub fn run_program(
        name: &str,
        tape: Tape<char>,
        max_steps: usize,
        observer: &mut Observer<'_>,
    ) -> Result<Tape<char>, TuringMachineError> {
        let index = Self::find(name)?;
        (PROGRAMS[index].run)(tape, max_steps, observer)
    }

    fn find(name: &str) -> Result<usize, TuringMachineError> {
        PROGRAMS
            .iter()
            .position(|program| program.name == name)
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program '{}' not found", name))
            })
    }
}
