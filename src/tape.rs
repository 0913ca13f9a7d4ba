//! This module defines the `Tape`, an infinite bidirectional tape represented as a zipper:
//! the explored cells left of the head, the cell under the head, the explored cells right
//! of the head, and a blank symbol standing in for every cell never visited.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;

use crate::types::Direction;

const HIGHLIGHT: &str = "\x1b[30;43m";
const RESET: &str = "\x1b[0m";

/// An immutable, infinitely extendable tape.
///
/// Every operation consumes the tape and returns the next one. Both sides are stored as
/// stacks with the cell nearest to the head last, so moving is a push and a pop. The sides
/// never hold virtual blanks: cells only appear there once they were written or
/// pre-allocated as margin, and reading past them yields `zero`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tape<T> {
    left: Vec<T>,
    middle: T,
    right: Vec<T>,
    zero: T,
}

/// Builds a blank tape with `init_margin` blank cells on each side of the head.
pub fn tape_of<T: Clone>(init_margin: usize, zero: T) -> Tape<T> {
    Tape::new(init_margin, zero)
}

impl<T: Clone> Tape<T> {
    /// Creates a blank tape with `init_margin` pre-allocated blanks on each side.
    ///
    /// The margin only saves reallocations; a tape with margin 0 behaves identically.
    pub fn new(init_margin: usize, zero: T) -> Self {
        Self {
            left: vec![zero.clone(); init_margin],
            middle: zero.clone(),
            right: vec![zero.clone(); init_margin],
            zero,
        }
    }

    /// Creates a tape holding `input` with the head on its first symbol.
    ///
    /// An empty input yields the same tape as [`Tape::new`].
    pub fn with_input<I>(zero: T, init_margin: usize, input: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut input = input.into_iter();
        let mut tape = Self::new(init_margin, zero);

        if let Some(first) = input.next() {
            let rest: Vec<T> = input.collect();
            tape.middle = first;
            tape.right.extend(rest.into_iter().rev());
        }

        tape
    }

    /// Moves the head one cell to the left.
    ///
    /// Moving past the explored edge never fails: the new head cell is `zero`.
    pub fn move_left(mut self) -> Self {
        self.shift(Direction::Left);
        self
    }

    /// Moves the head one cell to the right.
    pub fn move_right(mut self) -> Self {
        self.shift(Direction::Right);
        self
    }

    /// Moves the head in `direction`. `Stay` returns the tape untouched.
    pub fn move_dir(mut self, direction: Direction) -> Self {
        self.shift(direction);
        self
    }

    /// Writes `symbol` under the head, then moves in `direction`.
    ///
    /// In-place form of `move_dir(set_middle(symbol))` for owners stepping a tape they hold
    /// by `&mut`.
    pub(crate) fn write_and_move(&mut self, symbol: T, direction: Direction) {
        self.middle = symbol;
        self.shift(direction);
    }

    fn shift(&mut self, direction: Direction) {
        let (from, to) = match direction {
            Direction::Left => (&mut self.left, &mut self.right),
            Direction::Right => (&mut self.right, &mut self.left),
            Direction::Stay => return,
        };

        let next = from.pop().unwrap_or_else(|| self.zero.clone());
        to.push(mem::replace(&mut self.middle, next));
    }
}

impl<T> Tape<T> {
    /// Assembles a tape from its parts. Both sides are given nearest-to-head first.
    pub fn from_parts<L, R>(left: L, middle: T, right: R, zero: T) -> Self
    where
        L: IntoIterator<Item = T>,
        R: IntoIterator<Item = T>,
    {
        let mut left: Vec<T> = left.into_iter().collect();
        let mut right: Vec<T> = right.into_iter().collect();
        left.reverse();
        right.reverse();

        Self {
            left,
            middle,
            right,
            zero,
        }
    }

    /// Replaces the symbol under the head.
    pub fn set_middle(mut self, value: T) -> Self {
        self.middle = value;
        self
    }

    /// Returns the symbol under the head.
    pub fn middle(&self) -> &T {
        &self.middle
    }

    /// Returns the blank symbol.
    pub fn zero(&self) -> &T {
        &self.zero
    }

    /// Returns the explored cells left of the head, nearest first.
    pub fn left(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.left.iter().rev()
    }

    /// Returns the explored cells right of the head, nearest first.
    pub fn right(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.right.iter().rev()
    }

    /// Returns every explored cell in display order together with the index of the head.
    ///
    /// ```
    /// use tur_zipper::Tape;
    ///
    /// let tape = Tape::from_parts(vec!['b', 'a'], 'c', vec!['d'], '_');
    /// let (cells, head) = tape.symbols();
    /// assert_eq!(cells, vec![&'a', &'b', &'c', &'d']);
    /// assert_eq!(head, 2);
    /// ```
    pub fn symbols(&self) -> (Vec<&T>, usize) {
        let cells = self
            .left
            .iter()
            .chain(std::iter::once(&self.middle))
            .chain(self.right.iter().rev())
            .collect();

        (cells, self.left.len())
    }
}

/// Two tapes are equal when they describe the same infinite tape: blanks pre-allocated or
/// materialized at the far ends are indistinguishable from unexplored cells.
impl<T: PartialEq> PartialEq for Tape<T> {
    fn eq(&self, other: &Self) -> bool {
        self.zero == other.zero
            && self.middle == other.middle
            && explored(&self.left, &self.zero) == explored(&other.left, &other.zero)
            && explored(&self.right, &self.zero) == explored(&other.right, &other.zero)
    }
}

impl<T: Eq> Eq for Tape<T> {}

// Sides are stored far end first.
fn explored<'a, T: PartialEq>(side: &'a [T], zero: &T) -> &'a [T] {
    let start = side
        .iter()
        .position(|symbol| symbol != zero)
        .unwrap_or(side.len());

    &side[start..]
}

/// Renders the tape as two lines: a caret above the head, then every explored cell with no
/// separators. The head cell is highlighted with ANSI colors; the alternate form (`{:#}`)
/// leaves it plain.
impl<T: fmt::Display> fmt::Display for Tape<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let left: String = self.left.iter().map(ToString::to_string).collect();
        let right: String = self.right.iter().rev().map(ToString::to_string).collect();

        writeln!(f, "{}v", " ".repeat(left.chars().count()))?;

        if f.alternate() {
            write!(f, "{}{}{}", left, self.middle, right)
        } else {
            write!(f, "{}{}{}{}{}", left, HIGHLIGHT, self.middle, RESET, right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tape<char> {
        Tape::from_parts(vec!['b', 'a'], 'c', vec!['d', 'e'], '_')
    }

    #[test]
    fn test_tape_of_margin() {
        let tape = tape_of(2, '_');

        assert_eq!(tape.middle(), &'_');
        assert_eq!(tape.left().count(), 2);
        assert_eq!(tape.right().count(), 2);
        assert!(tape.left().chain(tape.right()).all(|&c| c == '_'));
    }

    #[test]
    fn test_move_left() {
        let tape = sample().move_left();

        assert_eq!(tape.middle(), &'b');
        assert_eq!(tape.left().collect::<String>(), "a");
        assert_eq!(tape.right().collect::<String>(), "cde");
    }

    #[test]
    fn test_move_right() {
        let tape = sample().move_right();

        assert_eq!(tape.middle(), &'d');
        assert_eq!(tape.left().collect::<String>(), "cba");
        assert_eq!(tape.right().collect::<String>(), "e");
    }

    #[test]
    fn test_move_past_explored_edge() {
        let tape = tape_of(0, '_').set_middle('x').move_left().move_left();

        assert_eq!(tape.middle(), &'_');
        assert_eq!(tape.left().count(), 0);
        assert_eq!(tape.right().collect::<String>(), "_x");
    }

    #[test]
    fn test_set_middle() {
        let tape = sample().set_middle('z');

        assert_eq!(tape.middle(), &'z');
        assert_eq!(tape.left().collect::<String>(), "ba");
        assert_eq!(tape.right().collect::<String>(), "de");
    }

    #[test]
    fn test_move_dir() {
        assert_eq!(sample().move_dir(Direction::Left).middle(), &'b');
        assert_eq!(sample().move_dir(Direction::Stay).middle(), &'c');
        assert_eq!(sample().move_dir(Direction::Right).middle(), &'d');
    }

    #[test]
    fn test_with_input() {
        let tape = Tape::with_input('_', 1, "abc".chars());

        assert_eq!(tape.middle(), &'a');
        assert_eq!(tape.left().collect::<String>(), "_");
        assert_eq!(tape.right().collect::<String>(), "bc_");
    }

    #[test]
    fn test_with_empty_input() {
        assert_eq!(Tape::with_input('_', 3, "".chars()), tape_of(0, '_'));
    }

    #[test]
    fn test_equality_ignores_margin() {
        assert_eq!(tape_of(5, '0'), tape_of(0, '0'));
        assert_eq!(
            Tape::from_parts(vec!['1', '0', '0'], '1', vec![], '0'),
            Tape::from_parts(vec!['1'], '1', vec!['0'], '0'),
        );
        // Blanks between written cells are significant.
        assert_ne!(
            Tape::from_parts(vec!['0', '1'], '1', vec![], '0'),
            Tape::from_parts(vec!['1'], '1', vec![], '0'),
        );
        assert_ne!(tape_of(0, '0'), tape_of(0, '_'));
    }

    #[test]
    fn test_symbols() {
        let tape = tape_of(1, '_').set_middle('x');
        let (cells, head) = tape.symbols();

        assert_eq!(cells, vec![&'_', &'x', &'_']);
        assert_eq!(head, 1);
    }

    #[test]
    fn test_render_plain() {
        let rendered = format!("{:#}", sample());

        assert_eq!(rendered, "  v\nabcde");
    }

    #[test]
    fn test_render_highlighted() {
        let rendered = format!("{}", sample());

        assert_eq!(rendered, format!("  v\nab{}c{}de", HIGHLIGHT, RESET));
    }

    #[test]
    fn test_render_multi_char_symbols() {
        let tape = Tape::from_parts(vec![10, 2], 7, vec![3], 0);

        assert_eq!(format!("{:#}", tape), "   v\n21073");
    }

    #[test]
    fn test_tape_serialization() {
        let tape = sample();

        let json = serde_json::to_string(&tape).unwrap();
        let deserialized: Tape<char> = serde_json::from_str(&json).unwrap();

        assert_eq!(tape, deserialized);
    }
}
