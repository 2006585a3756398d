//! The persisted JSON form of a layout.

use serde::{Deserialize, Serialize};

use super::Layout;
use crate::board::Board;
use crate::engine::RobotSet;
use crate::error::{InvalidConfiguration, LayoutError};
use crate::piece::Color;

/// Flat record as stored on disk.
///
/// `grid` holds row-major wall masks. Piece arrays hold up to four cell
/// indices in color order, `-1` marking an unplaced piece; `moves` is `-1`
/// when unknown. The older field name `tokens` is accepted for `targets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRecord {
    /// Columns.
    pub width: usize,
    /// Rows.
    pub height: usize,
    /// Wall masks, `width * height` entries.
    pub grid: Vec<u8>,
    /// Robot cells in color order.
    #[serde(default)]
    pub robots: Vec<i32>,
    /// Target cells in color order.
    #[serde(default, alias = "tokens")]
    pub targets: Vec<i32>,
    /// Minimal solution length, `-1` when unknown.
    #[serde(default = "unknown_moves")]
    pub moves: i32,
}

const fn unknown_moves() -> i32 {
    -1
}

impl From<&Layout> for LayoutRecord {
    fn from(layout: &Layout) -> Self {
        let encode = |cell: Option<u8>| cell.map_or(-1, i32::from);
        Self {
            width: layout.board.width(),
            height: layout.board.height(),
            grid: layout.board.masks(),
            robots: layout.robots.cells().into_iter().map(encode).collect(),
            targets: layout.targets.into_iter().map(encode).collect(),
            moves: layout
                .moves
                .and_then(|m| i32::try_from(m).ok())
                .unwrap_or(-1),
        }
    }
}

impl TryFrom<LayoutRecord> for Layout {
    type Error = LayoutError;

    /// Decode a record. Wall invariants must hold; connectivity is not
    /// required, so unfinished editor boards still load.
    fn try_from(record: LayoutRecord) -> Result<Self, Self::Error> {
        let board = Board::from_masks(record.width, record.height, &record.grid)?;
        board.validate_walls()?;

        let robots = decode_pieces(&board, "robots", &record.robots)?;
        let targets = decode_pieces(&board, "targets", &record.targets)?;
        Ok(Self {
            board,
            robots: RobotSet::new(robots),
            targets,
            moves: u32::try_from(record.moves).ok(),
        })
    }
}

fn decode_pieces(
    board: &Board,
    field: &'static str,
    values: &[i32],
) -> Result<[Option<u8>; 4], LayoutError> {
    if values.len() > Color::ALL.len() {
        return Err(LayoutError::TooManyPieces {
            field,
            count: values.len(),
        });
    }
    let mut cells = [None; 4];
    for (slot, &value) in cells.iter_mut().zip(values) {
        if value == -1 {
            continue;
        }
        let index = usize::try_from(value).map_err(|_| LayoutError::BadIndex { field, value })?;
        if !board.contains(index) {
            return Err(InvalidConfiguration::CellOutOfRange { cell: index }.into());
        }
        *slot = u8::try_from(index).ok();
    }
    Ok(cells)
}
