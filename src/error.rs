//! Error types for the puzzle engine.
//!
//! None of these are fatal: every error rejects a single operation and
//! leaves the caller's data untouched.

use std::io;

use thiserror::Error;

use crate::board::Direction;
use crate::piece::Color;

/// A board, layout, or piece placement that breaks a structural invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidConfiguration {
    /// Board sides must be between 1 and 16 cells.
    #[error("board dimensions {width}x{height} outside 1..=16")]
    Dimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// The flat grid does not hold `width * height` cells.
    #[error("grid holds {actual} cells, expected {expected}")]
    GridSize {
        /// `width * height`.
        expected: usize,
        /// Cells supplied.
        actual: usize,
    },
    /// A cell on the edge of the grid lacks its outer wall.
    #[error("cell {cell} is missing its {direction} boundary wall")]
    MissingBoundaryWall {
        /// Offending cell.
        cell: u8,
        /// Edge facing outward.
        direction: Direction,
    },
    /// A wall is present on one side of an edge but not the other.
    #[error("wall on the {direction} side of cell {cell} has no matching neighbor wall")]
    AsymmetricWall {
        /// Cell carrying the unmatched wall flag.
        cell: u8,
        /// Side of `cell` the flag sits on.
        direction: Direction,
    },
    /// Every cell is sealed, so there is no floor to play on.
    #[error("board has no open floor")]
    NoFloor,
    /// Open floor is split into pockets that cannot reach each other.
    #[error("cell {cell} is cut off from the rest of the floor")]
    Disconnected {
        /// First unreachable cell found.
        cell: u8,
    },
    /// A cell index does not exist on this board.
    #[error("cell {cell} is outside the board")]
    CellOutOfRange {
        /// Offending index.
        cell: usize,
    },
    /// A piece sits on a sealed cell.
    #[error("piece on sealed cell {cell}")]
    SealedCell {
        /// Offending cell.
        cell: u8,
    },
    /// Two pieces share a cell.
    #[error("more than one piece on cell {cell}")]
    Overlap {
        /// Shared cell.
        cell: u8,
    },
    /// A required robot has not been placed.
    #[error("{color} robot is not placed")]
    UnplacedRobot {
        /// Missing robot.
        color: Color,
    },
    /// A required target has not been placed.
    #[error("{color} target is not placed")]
    UnplacedTarget {
        /// Missing target.
        color: Color,
    },
}

/// A move the engine refused. State is never modified when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    /// The robot is not on the board.
    #[error("{color} robot is not on the board")]
    NoRobot {
        /// Requested robot.
        color: Color,
    },
    /// The robot stands on a cell the board does not have.
    #[error("{color} robot is off the board at cell {cell}")]
    OffBoard {
        /// Requested robot.
        color: Color,
        /// Cell it claims to occupy.
        cell: u8,
    },
    /// A wall or robot directly ahead stops the slide before it starts.
    #[error("{color} robot cannot move {direction}: blocked")]
    Blocked {
        /// Requested robot.
        color: Color,
        /// Requested direction.
        direction: Direction,
    },
    /// The robot would immediately undo its own previous move.
    #[error("{color} robot cannot reverse its last move ({direction})")]
    Reversal {
        /// Requested robot.
        color: Color,
        /// Requested direction.
        direction: Direction,
    },
}

/// Why a solve returned without a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Every depth up to the bound was exhausted without reaching the target.
    #[error("no solution within {max_depth} moves")]
    Unsolvable {
        /// Deepest bound searched.
        max_depth: u8,
    },
    /// The progress observer asked to stop after a completed pass.
    #[error("search cancelled after depth {depth}")]
    Cancelled {
        /// Last completed depth bound.
        depth: u8,
    },
}

/// Failure while parsing a color, direction, or move from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Unknown color name or letter.
    #[error("unknown color: {0:?}")]
    Color(String),
    /// Unknown direction name or letter.
    #[error("unknown direction: {0:?}")]
    Direction(String),
    /// Move text is not `<color letter><direction letter>`.
    #[error("malformed move: {0:?}")]
    Move(String),
    /// Unexpected character in a tile layout cell.
    #[error("malformed tile cell {cell}: {text:?}")]
    TileCell {
        /// Position of the cell within the tile (row-major).
        cell: usize,
        /// Raw cell text.
        text: String,
    },
    /// Tile layout does not have 64 cells.
    #[error("tile layout has {0} cells, expected 64")]
    TileSize(usize),
}

/// Failure while loading or saving a layout record.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Reading or writing the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The record is not valid JSON for a layout.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The record decodes but describes an impossible board.
    #[error("invalid layout: {0}")]
    Invalid(#[from] InvalidConfiguration),
    /// A piece array has more than four entries.
    #[error("{field} holds {count} entries, at most 4 allowed")]
    TooManyPieces {
        /// `robots` or `targets`.
        field: &'static str,
        /// Entries found.
        count: usize,
    },
    /// A piece index is negative but not the `-1` unplaced marker.
    #[error("{field} entry {value} is not a cell index or -1")]
    BadIndex {
        /// `robots` or `targets`.
        field: &'static str,
        /// Offending value.
        value: i32,
    },
}

/// Failure to start a generator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The starting board itself is invalid, so no placement can fix it.
    #[error("starting board is invalid: {0}")]
    InvalidBoard(#[from] InvalidConfiguration),
    /// No valid, solvable placement of pieces was found.
    #[error("no valid starting placement after {attempts} attempts")]
    NoValidStart {
        /// Placements tried.
        attempts: usize,
    },
}
