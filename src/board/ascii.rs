//! Plain-text board dump.
//!
//! Two text rows per board row: the first marks north walls with `_`, the
//! second marks west walls with `|` followed by the cell glyph. Outer walls
//! are implied and not drawn.

use super::{Board, Direction};

/// Render `board`, asking `glyph` for the character of each cell.
///
/// Sealed cells are drawn as `#` without consulting `glyph`.
#[must_use]
pub fn draw(board: &Board, glyph: impl Fn(u8) -> char) -> String {
    let mut out = String::with_capacity(board.len() * 4 + board.height() * 2);
    for y in 0..board.height() {
        for x in 0..board.width() {
            let Some(cell) = board.index(x, y) else {
                continue;
            };
            out.push(' ');
            let north = y > 0 && board.has_wall(cell, Direction::North);
            out.push(if north { '_' } else { ' ' });
        }
        out.push('\n');
        for x in 0..board.width() {
            let Some(cell) = board.index(x, y) else {
                continue;
            };
            let west = x > 0 && board.has_wall(cell, Direction::West);
            out.push(if west { '|' } else { ' ' });
            out.push(if board.is_sealed(cell) { '#' } else { glyph(cell) });
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_open_board() {
        let board = Board::new(2, 2).unwrap();
        let text = draw(&board, |_| '.');
        assert_eq!(text, "    \n . .\n    \n . .\n");
    }

    #[test]
    fn test_draw_walls_and_glyphs() {
        let mut board = Board::new(2, 2).unwrap();
        board.set_wall(0, Direction::East, true);
        board.set_wall(1, Direction::South, true);
        let text = draw(&board, |cell| if cell == 3 { 'R' } else { '.' });
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], " .|.");
        assert_eq!(lines[2], "   _");
        assert_eq!(lines[3], " . R");
    }
}
