//! Robot positions and search state.

use crate::board::{Board, Direction};
use crate::error::InvalidConfiguration;
use crate::piece::Color;

/// Maximum number of robots on a board.
pub const MAX_ROBOTS: usize = 4;

/// Bits per robot slot in [`RobotSet::key`]: cell + 1, or 0 when absent.
const SLOT_BITS: u32 = 9;

/// Up to four robots, one slot per color. A slot may be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RobotSet {
    cells: [Option<u8>; MAX_ROBOTS],
}

impl RobotSet {
    /// A set with every slot empty.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [None; MAX_ROBOTS],
        }
    }

    /// A set from per-color slots, indexed by [`Color::index`].
    #[must_use]
    pub const fn new(cells: [Option<u8>; MAX_ROBOTS]) -> Self {
        Self { cells }
    }

    /// Cell of the `color` robot.
    #[must_use]
    #[inline]
    pub const fn get(&self, color: Color) -> Option<u8> {
        self.cells[color.index()]
    }

    /// Place, move, or remove (`None`) the `color` robot.
    #[inline]
    pub fn set(&mut self, color: Color, cell: Option<u8>) {
        self.cells[color.index()] = cell;
    }

    /// Per-color slots.
    #[must_use]
    pub const fn cells(&self) -> [Option<u8>; MAX_ROBOTS] {
        self.cells
    }

    /// Whether any robot stands on `cell`.
    #[must_use]
    #[inline]
    pub fn is_occupied(&self, cell: u8) -> bool {
        self.cells.contains(&Some(cell))
    }

    /// Color of the robot on `cell`.
    #[must_use]
    pub fn robot_at(&self, cell: u8) -> Option<Color> {
        self.iter()
            .find_map(|(color, at)| (at == cell).then_some(color))
    }

    /// Placed robots in color order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, u8)> + '_ {
        Color::ALL
            .into_iter()
            .filter_map(|color| self.get(color).map(|cell| (color, cell)))
    }

    /// Colors of placed robots, in color order.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.iter().map(|(color, _)| color)
    }

    /// Number of placed robots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Whether no robot is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Packed positions: 9 bits per slot, cell + 1 or 0 when empty.
    ///
    /// Two sets share a key exactly when every slot matches.
    #[must_use]
    #[inline]
    pub fn key(&self) -> u64 {
        self.cells
            .iter()
            .zip(0u32..)
            .fold(0, |key, (cell, slot)| {
                let value = cell.map_or(0, |c| u64::from(c) + 1);
                key | (value << (SLOT_BITS * slot))
            })
    }

    /// Check every placed robot is on a floor cell of `board` and no two
    /// share a cell.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range, sealed, or shared cell.
    pub fn validate(&self, board: &Board) -> Result<(), InvalidConfiguration> {
        for (color, cell) in self.iter() {
            if !board.contains(usize::from(cell)) {
                return Err(InvalidConfiguration::CellOutOfRange {
                    cell: usize::from(cell),
                });
            }
            if board.is_sealed(cell) {
                return Err(InvalidConfiguration::SealedCell { cell });
            }
            if self.iter().any(|(other, at)| other != color && at == cell) {
                return Err(InvalidConfiguration::Overlap { cell });
            }
        }
        Ok(())
    }
}

/// Robots plus the last direction each one moved.
///
/// The board never changes during a search, so this is everything a node
/// needs. It is `Copy`; the solver mutates one in place and undoes moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SearchState {
    robots: RobotSet,
    last: [Option<Direction>; MAX_ROBOTS],
}

impl SearchState {
    /// Fresh state: no robot has moved yet.
    #[must_use]
    pub const fn new(robots: RobotSet) -> Self {
        Self {
            robots,
            last: [None; MAX_ROBOTS],
        }
    }

    /// Current positions.
    #[must_use]
    #[inline]
    pub const fn robots(&self) -> &RobotSet {
        &self.robots
    }

    /// Direction of the `color` robot's most recent move.
    #[must_use]
    #[inline]
    pub const fn last(&self, color: Color) -> Option<Direction> {
        self.last[color.index()]
    }

    /// Whether the goal robot stands on the target.
    #[must_use]
    #[inline]
    pub fn is_solved(&self, goal: Goal) -> bool {
        self.robots.get(goal.color) == Some(goal.target)
    }

    /// Move a robot and record the undo information. No legality check.
    #[inline]
    pub(crate) fn relocate(&mut self, color: Color, to: u8, direction: Direction) -> Undo {
        let start = self.robots.get(color).unwrap_or(to);
        let undo = Undo {
            color,
            start,
            last: self.last[color.index()],
        };
        self.robots.set(color, Some(to));
        self.last[color.index()] = Some(direction);
        undo
    }

    /// Reverse a move. Restores the state exactly as it was before it.
    #[inline]
    pub fn undo(&mut self, undo: Undo) {
        self.robots.set(undo.color, Some(undo.start));
        self.last[undo.color.index()] = undo.last;
    }
}

/// What a move changed: the robot, where it started, and its previous
/// last-move direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    color: Color,
    start: u8,
    last: Option<Direction>,
}

impl Undo {
    /// Robot that moved.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Cell it moved from.
    #[must_use]
    pub const fn start(&self) -> u8 {
        self.start
    }
}

/// The robot that must reach a target, and the target cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Goal {
    /// Robot that must arrive.
    pub color: Color,
    /// Cell it must stop on.
    pub target: u8,
}

impl Goal {
    /// Create a goal.
    #[must_use]
    pub const fn new(color: Color, target: u8) -> Self {
        Self { color, target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_distinguishes_slots() {
        let a = RobotSet::new([Some(0), Some(1), None, None]);
        let b = RobotSet::new([Some(1), Some(0), None, None]);
        let c = RobotSet::new([Some(0), None, Some(1), None]);
        assert_ne!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
        assert_eq!(a.key(), RobotSet::new([Some(0), Some(1), None, None]).key());
        assert_eq!(RobotSet::empty().key(), 0);
    }

    #[test]
    fn test_key_fits_high_cells() {
        let set = RobotSet::new([Some(255); 4]);
        assert_eq!(set.key() >> 36, 0);
    }

    #[test]
    fn test_robot_lookup() {
        let set = RobotSet::new([Some(5), None, Some(9), None]);
        assert_eq!(set.len(), 2);
        assert!(set.is_occupied(9));
        assert!(!set.is_occupied(6));
        assert_eq!(set.robot_at(9), Some(Color::Blue));
        assert_eq!(set.colors().collect::<Vec<_>>(), vec![Color::Red, Color::Blue]);
    }

    #[test]
    fn test_validate_overlap_and_sealed() {
        let mut board = Board::new(4, 4).unwrap();
        let set = RobotSet::new([Some(1), Some(1), None, None]);
        assert_eq!(set.validate(&board), Err(InvalidConfiguration::Overlap { cell: 1 }));

        board.seal(6);
        let set = RobotSet::new([Some(6), None, None, None]);
        assert_eq!(set.validate(&board), Err(InvalidConfiguration::SealedCell { cell: 6 }));

        let set = RobotSet::new([None, None, None, Some(20)]);
        assert_eq!(
            set.validate(&board),
            Err(InvalidConfiguration::CellOutOfRange { cell: 20 })
        );
    }

    #[test]
    fn test_relocate_and_undo() {
        let mut state = SearchState::new(RobotSet::new([Some(0), Some(3), None, None]));
        let before = state;
        let undo = state.relocate(Color::Red, 2, Direction::East);
        assert_eq!(state.robots().get(Color::Red), Some(2));
        assert_eq!(state.last(Color::Red), Some(Direction::East));
        assert_eq!(undo.start(), 0);
        state.undo(undo);
        assert_eq!(state, before);
    }
}
