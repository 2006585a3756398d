//! Editable layouts: a variable-size board with up to four robots and four
//! targets, plus an optional known solution length.
//!
//! Target `i` belongs to robot `i` (same color).

mod record;

pub use record::LayoutRecord;

use std::fs;
use std::path::Path;

use crate::board::{Board, Direction, Symmetry, ascii};
use crate::engine::{Goal, RobotSet};
use crate::error::{InvalidConfiguration, LayoutError};
use crate::piece::Color;
use crate::puzzle::Puzzle;

/// An editor board.
///
/// Any edit clears the stored move count, since it no longer describes the
/// layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    board: Board,
    robots: RobotSet,
    targets: [Option<u8>; 4],
    moves: Option<u32>,
}

impl Layout {
    /// An open board with no pieces.
    ///
    /// # Errors
    ///
    /// Returns an error if either side is outside `1..=16`.
    pub fn new(width: usize, height: usize) -> Result<Self, InvalidConfiguration> {
        Ok(Self::from_board(Board::new(width, height)?))
    }

    /// A layout over an existing board with no pieces.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            robots: RobotSet::empty(),
            targets: [None; 4],
            moves: None,
        }
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Robot positions.
    #[must_use]
    pub fn robots(&self) -> &RobotSet {
        &self.robots
    }

    /// Target cells, indexed by color.
    #[must_use]
    pub fn targets(&self) -> [Option<u8>; 4] {
        self.targets
    }

    /// Cell of the `color` target.
    #[must_use]
    pub fn target(&self, color: Color) -> Option<u8> {
        self.targets[color.index()]
    }

    /// Known minimal solution length, if one was recorded.
    #[must_use]
    pub fn moves(&self) -> Option<u32> {
        self.moves
    }

    /// Record the minimal solution length.
    pub fn set_moves(&mut self, moves: Option<u32>) {
        self.moves = moves;
    }

    /// Interior walls, each edge counted once.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.board.interior_wall_count()
    }

    /// Put the `color` robot on `cell`, or remove it with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfiguration::CellOutOfRange`] for a cell off the board.
    pub fn place_robot(
        &mut self,
        color: Color,
        cell: Option<u8>,
    ) -> Result<(), InvalidConfiguration> {
        self.check_cell(cell)?;
        self.robots.set(color, cell);
        self.moves = None;
        Ok(())
    }

    /// Put the `color` target on `cell`, or remove it with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfiguration::CellOutOfRange`] for a cell off the board.
    pub fn place_target(
        &mut self,
        color: Color,
        cell: Option<u8>,
    ) -> Result<(), InvalidConfiguration> {
        self.check_cell(cell)?;
        self.targets[color.index()] = cell;
        self.moves = None;
        Ok(())
    }

    /// Flip one wall and its neighbor's matching wall. Boundary walls are
    /// left alone.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfiguration::CellOutOfRange`] for a cell off the board.
    pub fn toggle_wall(
        &mut self,
        cell: u8,
        direction: Direction,
    ) -> Result<(), InvalidConfiguration> {
        self.toggle_walls(cell, direction, Symmetry::NONE)
    }

    /// Flip one wall plus its mirrored copies.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfiguration::CellOutOfRange`] for a cell off the board.
    pub fn toggle_walls(
        &mut self,
        cell: u8,
        direction: Direction,
        symmetry: Symmetry,
    ) -> Result<(), InvalidConfiguration> {
        self.check_cell(Some(cell))?;
        self.board.toggle_walls(cell, direction, symmetry);
        self.moves = None;
        Ok(())
    }

    fn check_cell(&self, cell: Option<u8>) -> Result<(), InvalidConfiguration> {
        match cell {
            Some(cell) if !self.board.contains(usize::from(cell)) => {
                Err(InvalidConfiguration::CellOutOfRange {
                    cell: usize::from(cell),
                })
            }
            _ => Ok(()),
        }
    }

    /// Check the board and every placed piece: valid board, pieces on the
    /// board and not sealed, no two robots and no two targets sharing a cell.
    ///
    /// Pieces may be missing, and a robot may stand on a target.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        self.board.validate()?;
        self.robots.validate(&self.board)?;
        let targets = RobotSet::new(self.targets);
        targets.validate(&self.board)
    }

    /// Shorthand for `validate().is_ok()`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Stricter check used for generated puzzles: valid, all four robots and
    /// all four targets placed, and all eight on distinct cells.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate_complete(&self) -> Result<(), InvalidConfiguration> {
        self.validate()?;
        for color in Color::ALL {
            if self.robots.get(color).is_none() {
                return Err(InvalidConfiguration::UnplacedRobot { color });
            }
            if self.target(color).is_none() {
                return Err(InvalidConfiguration::UnplacedTarget { color });
            }
        }
        if let Some(cell) = self
            .targets
            .iter()
            .flatten()
            .find(|&&cell| self.robots.is_occupied(cell))
        {
            return Err(InvalidConfiguration::Overlap { cell: *cell });
        }
        Ok(())
    }

    /// Whether `cell` holds no robot and no target.
    #[must_use]
    pub fn is_free(&self, cell: u8) -> bool {
        !self.robots.is_occupied(cell) && !self.targets.contains(&Some(cell))
    }

    /// The puzzle of moving the `color` robot onto the `color` target.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is unplaced or the position is not a
    /// valid puzzle.
    pub fn puzzle(&self, color: Color) -> Result<Puzzle, InvalidConfiguration> {
        let target = self
            .target(color)
            .ok_or(InvalidConfiguration::UnplacedTarget { color })?;
        Puzzle::new(self.board.clone(), self.robots, Goal::new(color, target))
    }

    /// Text dump: robots as color letters, targets as lowercase letters.
    #[must_use]
    pub fn draw(&self) -> String {
        ascii::draw(&self.board, |cell| {
            if let Some(color) = self.robots.robot_at(cell) {
                color.letter()
            } else if let Some(color) =
                Color::ALL.into_iter().find(|&c| self.target(c) == Some(cell))
            {
                color.letter().to_ascii_lowercase()
            } else {
                '.'
            }
        })
    }

    /// Serialize to the JSON record form.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(&LayoutRecord::from(self))?)
    }

    /// Parse the JSON record form.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a layout record or describes an
    /// impossible board.
    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        let record: LayoutRecord = serde_json::from_str(text)?;
        Self::try_from(record)
    }

    /// Write the JSON record to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file I/O fails.
    pub fn save(&self, path: &Path) -> Result<(), LayoutError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a JSON record from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if file I/O fails or the record is malformed.
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
