//! Constructors that build machines without hand-written transition functions: scanning,
//! counted writes and moves, and sequential composition.
//!
//! Every combinator owns a small state type of its own. Callers only ever need the
//! machine's `start`, `end`, and `transition`, so these types can be treated as opaque.

use crate::machine::Machine;
use crate::types::{Direction, Either};

/// State of a [`go_until`] scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanState {
    Running,
    Done,
}

/// State of a [`map_n`] machine: the number of cells still to visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountState {
    Running(i64),
    Done,
}

/// Scans in `direction` until the symbol under the head satisfies `predicate`.
///
/// Symbols are left unchanged. The scan checks the current cell first, so the head stops on
/// the first matching cell in scan order, which may be the starting cell. If no reachable
/// cell matches, the machine never halts.
pub fn go_until<T, P>(direction: Direction, predicate: P) -> Machine<T, ScanState>
where
    T: Clone + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    Machine::new(
        ScanState::Running,
        ScanState::Done,
        move |symbol: &T, state: &ScanState| match state {
            ScanState::Running if predicate(symbol) => {
                (symbol.clone(), Direction::Stay, ScanState::Done)
            }
            ScanState::Running => (symbol.clone(), direction, ScanState::Running),
            ScanState::Done => (symbol.clone(), Direction::Stay, ScanState::Done),
        },
    )
}

/// Replaces `n` consecutive cells with `f` applied to them, moving in `direction` after each.
///
/// Exactly `max(n, 0)` write-and-move steps are performed. A zero or negative `n` yields a
/// machine that starts in its end state and so performs no step at all; callers computing
/// `n` may rely on that.
pub fn map_n<T, F>(n: i64, direction: Direction, f: F) -> Machine<T, CountState>
where
    T: Clone + 'static,
    F: Fn(&T) -> T + Send + Sync + 'static,
{
    let start = if n > 0 {
        CountState::Running(n)
    } else {
        CountState::Done
    };

    Machine::new(
        start,
        CountState::Done,
        move |symbol: &T, state: &CountState| match *state {
            CountState::Running(remaining) if remaining > 0 => {
                let next = if remaining == 1 {
                    CountState::Done
                } else {
                    CountState::Running(remaining - 1)
                };
                (f(symbol), direction, next)
            }
            _ => (symbol.clone(), Direction::Stay, CountState::Done),
        },
    )
}

/// Writes `symbol` to `n` consecutive cells.
pub fn repeat_n<T>(n: i64, direction: Direction, symbol: T) -> Machine<T, CountState>
where
    T: Clone + Send + Sync + 'static,
{
    map_n(n, direction, move |_: &T| symbol.clone())
}

/// Moves `n` cells without altering them.
pub fn move_n<T>(n: i64, direction: Direction) -> Machine<T, CountState>
where
    T: Clone + 'static,
{
    map_n(n, direction, T::clone)
}

/// Runs `first` to its end state, then `second`.
///
/// The handover takes no step of its own: the step computed from `first`'s end state is
/// already `second`'s first step from its start state. When `second` starts in its end
/// state, that step is whatever its transition does there, a `Stay` for the combinators in
/// this module. The composite starts in `Left(first.start)` and ends in `Right(second.end)`.
pub fn sequence<T, S1, S2>(
    first: Machine<T, S1>,
    second: Machine<T, S2>,
) -> Machine<T, Either<S1, S2>>
where
    T: 'static,
    S1: PartialEq + Clone + Send + Sync + 'static,
    S2: Clone + Send + Sync + 'static,
{
    let start = Either::Left(first.start().clone());
    let end = Either::Right(second.end().clone());

    Machine::new(start, end, move |symbol: &T, state: &Either<S1, S2>| match state {
        Either::Left(s) if s != first.end() => {
            let (write, direction, next) = first.transition(symbol, s);
            (write, direction, Either::Left(next))
        }
        Either::Left(_) => {
            let (write, direction, next) = second.transition(symbol, second.start());
            (write, direction, Either::Right(next))
        }
        Either::Right(s) => {
            let (write, direction, next) = second.transition(symbol, s);
            (write, direction, Either::Right(next))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::{run_machine, run_machine_on, MachineRunState};
    use crate::monitor::{no_op, step_limit};
    use crate::tape::Tape;
    use crate::types::TuringMachineError;

    fn count_steps<S>(tape: Tape<char>, machine: &Machine<char, S>) -> (Tape<char>, usize)
    where
        S: PartialEq + Clone,
    {
        let mut steps = 0;
        let tape = run_machine_on(
            tape,
            |_: &MachineRunState<'_, char, S>| {
                steps += 1;
                Ok(())
            },
            machine,
        )
        .unwrap();

        (tape, steps)
    }

    #[test]
    fn test_repeat_n_fills_cells() {
        let machine = repeat_n(3, Direction::Right, 'X');
        let tape = run_machine('_', 2, no_op(), &machine).unwrap();

        // The head ends on the fourth cell from the origin.
        assert_eq!(tape.left().collect::<String>(), "XXX__");
        assert_eq!(tape.middle(), &'_');
        // Both right-hand margin cells were consumed by the three moves.
        assert_eq!(tape.right().count(), 0);
        assert_eq!(format!("{:#}", tape), "     v\n__XXX_");
    }

    #[test]
    fn test_go_until_stops_on_first_match() {
        let tape = Tape::from_parts(vec![], '0', vec!['0', '0', '1', '0'], '0');
        let machine = go_until(Direction::Right, |c: &char| *c == '1');

        let tape = run_machine_on(tape, step_limit(100), &machine).unwrap();

        assert_eq!(tape.middle(), &'1');
        assert_eq!(tape.left().collect::<String>(), "000");
        assert_eq!(tape.right().collect::<String>(), "0");
    }

    #[test]
    fn test_go_until_matching_start_cell() {
        let tape = Tape::from_parts(vec!['a'], 'b', vec![], '_');
        let machine = go_until(Direction::Left, |c: &char| *c == 'b');

        let (result, steps) = count_steps(tape.clone(), &machine);

        // One step to settle into the end state, no movement.
        assert_eq!(steps, 1);
        assert_eq!(result, tape);
    }

    #[test]
    fn test_go_until_left_into_blanks() {
        let tape = Tape::from_parts(vec!['a', 'a'], 'a', vec![], '_');
        let machine = go_until(Direction::Left, |c: &char| *c == '_');

        let tape = run_machine_on(tape, step_limit(100), &machine).unwrap();

        assert_eq!(tape.middle(), &'_');
        assert_eq!(tape.left().count(), 0);
        assert_eq!(tape.right().collect::<String>(), "aaa");
    }

    #[test]
    fn test_go_until_without_match_is_bounded_by_monitor() {
        let machine = go_until(Direction::Right, |c: &char| *c == '1');
        let result = run_machine('0', 0, step_limit(1000), &machine);

        assert_eq!(result, Err(TuringMachineError::StepLimitExceeded(1000)));
    }

    #[test]
    fn test_map_n_step_count() {
        let machine = map_n(4, Direction::Right, |c: &char| c.to_ascii_uppercase());
        let tape = Tape::with_input('_', 0, "abcdef".chars());

        let (tape, steps) = count_steps(tape, &machine);

        assert_eq!(steps, 4);
        assert_eq!(tape.left().collect::<String>(), "DCBA");
        assert_eq!(tape.middle(), &'e');
    }

    #[test]
    fn test_map_n_non_positive_is_identity() {
        for n in [0, -1, -42] {
            let machine = map_n(n, Direction::Right, |_: &char| 'z');
            let tape = Tape::with_input('_', 0, "abc".chars());

            let (result, steps) = count_steps(tape.clone(), &machine);

            assert_eq!(steps, 0, "n = {}", n);
            assert_eq!(result, tape);
        }
    }

    #[test]
    fn test_move_n_keeps_symbols() {
        let machine = move_n(2, Direction::Left);
        let tape = Tape::from_parts(vec!['b', 'a'], 'c', vec![], '_');

        let tape = run_machine_on(tape, no_op(), &machine).unwrap();

        assert_eq!(tape, Tape::from_parts(vec![], 'a', vec!['b', 'c'], '_'));
    }

    #[test]
    fn test_sequence_handover_takes_no_extra_step() {
        let machine = sequence(
            repeat_n(1, Direction::Right, 'a'),
            repeat_n(1, Direction::Right, 'b'),
        );
        let mut states = Vec::new();

        let tape = run_machine(
            '_',
            0,
            |run: &MachineRunState<'_, char, Either<CountState, CountState>>| {
                states.push(*run.current_state);
                Ok(())
            },
            &machine,
        )
        .unwrap();

        assert_eq!(
            states,
            vec![
                Either::Left(CountState::Running(1)),
                Either::Left(CountState::Done),
            ]
        );
        assert_eq!(tape.left().collect::<String>(), "ba");
    }

    #[test]
    fn test_sequence_with_empty_first_machine() {
        let machine = sequence(move_n(0, Direction::Left), repeat_n(2, Direction::Right, 'x'));

        let (tape, steps) = count_steps(Tape::new(0, '_'), &machine);

        assert_eq!(steps, 2);
        assert_eq!(tape.left().collect::<String>(), "xx");
    }

    #[test]
    fn test_sequence_with_empty_second_machine() {
        let machine = sequence(repeat_n(2, Direction::Right, 'a'), move_n(0, Direction::Left));

        let (tape, steps) = count_steps(Tape::new(0, '_'), &machine);

        // The second machine starts in its end state; the handover is a single Stay step.
        assert_eq!(steps, 3);
        assert_eq!(tape, Tape::from_parts(vec!['a', 'a'], '_', vec![], '_'));
    }

    #[test]
    fn test_sequence_nesting_is_behaviorally_associative() {
        let a = || repeat_n(2, Direction::Right, 'a');
        let b = || move_n(1, Direction::Left);
        let c = || go_until(Direction::Left, |s: &char| *s == '_');

        let left_nested = sequence(sequence(a(), b()), c());
        let right_nested = sequence(a(), sequence(b(), c()));

        let first = run_machine('_', 0, step_limit(100), &left_nested).unwrap();
        let second = run_machine('_', 0, step_limit(100), &right_nested).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, Tape::from_parts(vec![], '_', vec!['a', 'a'], '_'));
    }

    #[test]
    fn test_then_matches_sequence() {
        let chained = repeat_n(2, Direction::Right, '1')
            .then(move_n(2, Direction::Left))
            .then(repeat_n(1, Direction::Stay, '0'));

        let tape = run_machine('_', 0, no_op(), &chained).unwrap();

        assert_eq!(tape, Tape::from_parts(vec![], '0', vec!['1', '_'], '_'));
    }
}
