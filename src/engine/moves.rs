//! Moves, paths, and slide physics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use super::state::{MAX_ROBOTS, RobotSet, SearchState, Undo};
use crate::board::{Board, Direction};
use crate::error::{IllegalMove, ParseError};
use crate::piece::Color;

/// Most moves a state can offer: four robots times four directions.
pub const MAX_MOVES: usize = MAX_ROBOTS * 4;

/// One robot sliding in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Robot that slides.
    pub color: Color,
    /// Direction of the slide.
    pub direction: Direction,
}

impl Move {
    /// Create a move.
    #[must_use]
    pub const fn new(color: Color, direction: Direction) -> Self {
        Self { color, direction }
    }

    /// Compact byte form: robot index in the high nibble, one-hot
    /// direction bit in the low nibble.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        ((self.color as u8) << 4) | self.direction.bit()
    }

    /// Decode the compact byte form.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        let Some(color) = Color::from_index(byte >> 4) else {
            return None;
        };
        let Some(direction) = Direction::from_bit(byte & 0x0F) else {
            return None;
        };
        Some(Self::new(color, direction))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.letter(), self.direction.letter())
    }
}

impl FromStr for Move {
    type Err = ParseError;

    /// Two letters: color then direction, e.g. `RN`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_uppercase();
        let mut chars = text.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(c), Some(d), None) => match (Color::from_letter(c), Direction::from_letter(d)) {
                (Some(color), Some(direction)) => Ok(Self::new(color, direction)),
                _ => Err(ParseError::Move(s.to_string())),
            },
            _ => Err(ParseError::Move(s.to_string())),
        }
    }
}

/// An ordered move sequence.
///
/// Text form is comma-separated moves (`RN,GE`); the empty path is the
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Path(Vec<Move>);

impl Path {
    /// The empty path.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Moves in order.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.0
    }

    /// Append a move.
    pub fn push(&mut self, mv: Move) {
        self.0.push(mv);
    }

    /// Remove the last move.
    pub fn pop(&mut self) -> Option<Move> {
        self.0.pop()
    }

    /// One byte per move, see [`Move::to_byte`].
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.iter().map(|mv| mv.to_byte()).collect()
    }

    /// Decode a byte sequence produced by [`Path::to_bytes`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Move`] naming the first byte that is not a
    /// valid move.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        bytes
            .iter()
            .map(|&b| Move::from_byte(b).ok_or_else(|| ParseError::Move(format!("0x{b:02x}"))))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Play every move from `state`, stopping at the first illegal one.
    ///
    /// # Errors
    ///
    /// Returns the rejected move's index and reason. `state` then reflects
    /// every move before it.
    pub fn replay(
        &self,
        board: &Board,
        state: &mut SearchState,
    ) -> Result<(), (usize, IllegalMove)> {
        for (i, &mv) in self.0.iter().enumerate() {
            apply(board, state, mv).map_err(|e| (i, e))?;
        }
        Ok(())
    }
}

impl Deref for Path {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.0
    }
}

impl From<Vec<Move>> for Path {
    fn from(moves: Vec<Move>) -> Self {
        Self(moves)
    }
}

impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.to_string()
    }
}

impl TryFrom<String> for Path {
    type Error = ParseError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mv) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{mv}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::new());
        }
        s.split(',').map(str::parse).collect::<Result<Vec<_>, _>>().map(Self)
    }
}

/// Fixed-capacity move list. Enumeration never allocates.
#[derive(Debug, Clone, Copy)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    const fn new() -> Self {
        Self {
            moves: [Move::new(Color::Red, Direction::North); MAX_MOVES],
            len: 0,
        }
    }

    fn push(&mut self, mv: Move) {
        if self.len < MAX_MOVES && !self.contains(&mv) {
            self.moves[self.len] = mv;
            self.len += 1;
        }
    }
}

impl Deref for MoveList {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.moves[..self.len]
    }
}

/// Where the `color` robot stops sliding in `direction`.
///
/// The robot advances while its current cell has no wall on that side and
/// the next cell is free. Returns the start cell when the first step is
/// already blocked, and `None` when the robot is not placed or stands off
/// the board.
#[must_use]
#[inline]
pub fn slide(board: &Board, robots: &RobotSet, color: Color, direction: Direction) -> Option<u8> {
    let mut cell = robots.get(color).filter(|&c| board.contains(usize::from(c)))?;
    while let Some(next) = board.step(cell, direction) {
        if robots.is_occupied(next) {
            break;
        }
        cell = next;
    }
    Some(cell)
}

/// Whether the move changes the robot's cell and does not reverse the
/// robot's own previous move.
#[must_use]
#[inline]
pub fn can_move(board: &Board, state: &SearchState, color: Color, direction: Direction) -> bool {
    if state.last(color) == Some(direction.reverse()) {
        return false;
    }
    let Some(cell) = state.robots().get(color) else {
        return false;
    };
    board
        .step(cell, direction)
        .is_some_and(|next| !state.robots().is_occupied(next))
}

/// Legal moves for `colors`, in the given color order and then N, E, S, W.
#[must_use]
pub fn moves(board: &Board, state: &SearchState, colors: &[Color]) -> MoveList {
    let mut list = MoveList::new();
    for &color in colors {
        for direction in Direction::ALL {
            if can_move(board, state, color, direction) {
                list.push(Move::new(color, direction));
            }
        }
    }
    list
}

/// Play a move, returning what is needed to undo it.
///
/// # Errors
///
/// Rejects a robot that is not placed or stands off the board, a move that
/// reverses the robot's last one, and a move that would not change the
/// robot's cell. The state is untouched on error.
pub fn apply(board: &Board, state: &mut SearchState, mv: Move) -> Result<Undo, IllegalMove> {
    let Move { color, direction } = mv;
    let Some(start) = state.robots().get(color) else {
        return Err(IllegalMove::NoRobot { color });
    };
    if !board.contains(usize::from(start)) {
        return Err(IllegalMove::OffBoard { color, cell: start });
    }
    if state.last(color) == Some(direction.reverse()) {
        return Err(IllegalMove::Reversal { color, direction });
    }
    match slide(board, state.robots(), color, direction) {
        Some(end) if end != start => Ok(state.relocate(color, end, direction)),
        _ => Err(IllegalMove::Blocked { color, direction }),
    }
}

/// Play a move already known to be legal.
#[inline]
pub(crate) fn play(board: &Board, state: &mut SearchState, mv: Move) -> Undo {
    let end = slide(board, state.robots(), mv.color, mv.direction);
    let end = end.unwrap_or_default();
    state.relocate(mv.color, end, mv.direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(width: usize, height: usize) -> Board {
        Board::new(width, height).unwrap()
    }

    #[test]
    fn test_move_byte_encoding() {
        let mv = Move::new(Color::Blue, Direction::West);
        assert_eq!(mv.to_byte(), 0x28);
        assert_eq!(Move::from_byte(0x28), Some(mv));
        assert_eq!(Move::from_byte(0x03), None);
        assert_eq!(Move::from_byte(0x41), None);
    }

    #[test]
    fn test_path_text_form() {
        let path: Path = "RN,ge".parse().unwrap();
        assert_eq!(
            path.moves(),
            &[
                Move::new(Color::Red, Direction::North),
                Move::new(Color::Green, Direction::East)
            ]
        );
        assert_eq!(path.to_string(), "RN,GE");
        assert_eq!("".parse::<Path>().unwrap(), Path::new());
        assert!("RN,XX".parse::<Path>().is_err());
    }

    #[test]
    fn test_path_bytes_reject_garbage() {
        assert!(Path::from_bytes(&[0x11, 0x00]).is_err());
        assert_eq!(Path::from_bytes(&[0x11, 0x32]).unwrap().to_string(), "GN,YE");
    }

    #[test]
    fn test_slide_to_wall() {
        let board = open(4, 4);
        let robots = RobotSet::new([Some(0), None, None, None]);
        assert_eq!(slide(&board, &robots, Color::Red, Direction::East), Some(3));
        assert_eq!(slide(&board, &robots, Color::Red, Direction::South), Some(12));
        assert_eq!(slide(&board, &robots, Color::Red, Direction::North), Some(0));
        assert_eq!(slide(&board, &robots, Color::Green, Direction::North), None);
    }

    #[test]
    fn test_slide_stops_at_robot_and_wall() {
        let mut board = open(4, 4);
        board.set_wall(1, Direction::East, true);
        let robots = RobotSet::new([Some(0), None, None, Some(8)]);
        assert_eq!(slide(&board, &robots, Color::Red, Direction::East), Some(1));
        assert_eq!(slide(&board, &robots, Color::Red, Direction::South), Some(4));
    }

    #[test]
    fn test_can_move_reversal() {
        let board = open(4, 4);
        let mut state = SearchState::new(RobotSet::new([Some(0), None, None, None]));
        assert!(!can_move(&board, &state, Color::Red, Direction::North));
        assert!(can_move(&board, &state, Color::Red, Direction::East));
        apply(&board, &mut state, Move::new(Color::Red, Direction::East)).unwrap();
        assert!(!can_move(&board, &state, Color::Red, Direction::West));
        assert!(can_move(&board, &state, Color::Red, Direction::South));
    }

    #[test]
    fn test_moves_order() {
        let board = open(4, 4);
        let state = SearchState::new(RobotSet::new([Some(5), Some(0), None, None]));
        let list = moves(&board, &state, &Color::ALL);
        let text: Vec<String> = list.iter().map(ToString::to_string).collect();
        assert_eq!(text, ["RN", "RE", "RS", "RW", "GE", "GS"]);
        let only_green = moves(&board, &state, &[Color::Green]);
        assert_eq!(only_green.len(), 2);
    }

    #[test]
    fn test_apply_rejects_without_mutation() {
        let board = open(4, 4);
        let mut state = SearchState::new(RobotSet::new([Some(0), None, None, None]));
        let before = state;
        assert_eq!(
            apply(&board, &mut state, Move::new(Color::Red, Direction::West)),
            Err(IllegalMove::Blocked {
                color: Color::Red,
                direction: Direction::West
            })
        );
        assert_eq!(
            apply(&board, &mut state, Move::new(Color::Yellow, Direction::West)),
            Err(IllegalMove::NoRobot { color: Color::Yellow })
        );
        assert_eq!(state, before);

        apply(&board, &mut state, Move::new(Color::Red, Direction::South)).unwrap();
        let after = state;
        assert_eq!(
            apply(&board, &mut state, Move::new(Color::Red, Direction::North)),
            Err(IllegalMove::Reversal {
                color: Color::Red,
                direction: Direction::North
            })
        );
        assert_eq!(state, after);
    }

    #[test]
    fn test_off_board_robot_rejected() {
        let board = open(4, 4);
        let robots = RobotSet::new([Some(200), Some(16), None, None]);
        let mut state = SearchState::new(robots);
        let before = state;

        assert_eq!(slide(&board, &robots, Color::Red, Direction::East), None);
        assert!(!can_move(&board, &state, Color::Green, Direction::North));
        assert!(moves(&board, &state, &Color::ALL).is_empty());
        assert_eq!(
            apply(&board, &mut state, Move::new(Color::Red, Direction::East)),
            Err(IllegalMove::OffBoard {
                color: Color::Red,
                cell: 200
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_undo_restores_exactly() {
        let board = open(5, 5);
        let mut state = SearchState::new(RobotSet::new([Some(12), Some(0), Some(24), None]));
        let before = state;
        let first = apply(&board, &mut state, Move::new(Color::Red, Direction::North)).unwrap();
        let second = apply(&board, &mut state, Move::new(Color::Green, Direction::East)).unwrap();
        state.undo(second);
        state.undo(first);
        assert_eq!(state, before);
    }

    #[test]
    fn test_replay_reports_index() {
        let board = open(4, 4);
        let mut state = SearchState::new(RobotSet::new([Some(0), None, None, None]));
        let path: Path = "RE,RW".parse().unwrap();
        let err = path.replay(&board, &mut state).unwrap_err();
        assert_eq!(err.0, 1);
        assert_eq!(state.robots().get(Color::Red), Some(3));
    }
}
