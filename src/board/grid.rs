//! The walled grid.

// Cell indices are bounded by 16x16 = 256 cells, so they always fit a u8
#![allow(clippy::cast_possible_truncation)]

use super::{Direction, Symmetry, Walls};
use crate::error::InvalidConfiguration;

/// Largest supported board side.
pub const MAX_SIDE: usize = 16;

/// A position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    /// Column, 0 at the west edge.
    pub x: u8,
    /// Row, 0 at the north edge.
    pub y: u8,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// A rectangular grid of wall masks, stored row-major.
///
/// Walls are kept consistent across every interior edge and the outer
/// boundary is always walled, as long as the board is only changed through
/// [`toggle_wall`](Board::toggle_wall), [`set_wall`](Board::set_wall) and
/// [`seal`](Board::seal). Boards decoded with [`from_masks`](Board::from_masks)
/// must be checked with [`validate`](Board::validate).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: u8,
    height: u8,
    cells: Vec<Walls>,
}

impl Board {
    /// Create an open board with only the boundary walls.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfiguration::Dimensions`] if either side is outside `1..=16`.
    pub fn new(width: usize, height: usize) -> Result<Self, InvalidConfiguration> {
        check_dimensions(width, height)?;
        let mut board = Self {
            width: width as u8,
            height: height as u8,
            cells: vec![Walls::NONE; width * height],
        };
        board.close_boundary();
        Ok(board)
    }

    /// Build a board from raw row-major masks. The robot bit is ignored.
    ///
    /// No structural check beyond the dimensions is done here.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are out of range or `masks` does
    /// not hold exactly `width * height` entries.
    pub fn from_masks(
        width: usize,
        height: usize,
        masks: &[u8],
    ) -> Result<Self, InvalidConfiguration> {
        check_dimensions(width, height)?;
        if masks.len() != width * height {
            return Err(InvalidConfiguration::GridSize {
                expected: width * height,
                actual: masks.len(),
            });
        }
        Ok(Self {
            width: width as u8,
            height: height as u8,
            cells: masks.iter().map(|&m| Walls::from_bits(m)).collect(),
        })
    }

    /// Wrap already-sized cells. Callers guarantee the dimensions.
    pub(crate) fn from_walls(width: u8, height: u8, cells: Vec<Walls>) -> Self {
        debug_assert_eq!(cells.len(), usize::from(width) * usize::from(height));
        Self { width, height, cells }
    }

    /// Number of columns.
    #[must_use]
    #[inline]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    /// Number of rows.
    #[must_use]
    #[inline]
    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    /// Number of cells.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: boards have at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `cell` is an index on this board.
    #[must_use]
    #[inline]
    pub fn contains(&self, cell: usize) -> bool {
        cell < self.cells.len()
    }

    /// Index of `(x, y)`, or `None` when outside the board.
    #[must_use]
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width() && y < self.height() {
            Some((y * self.width() + x) as u8)
        } else {
            None
        }
    }

    /// Coordinates of `cell`.
    #[must_use]
    #[inline]
    pub fn coord(&self, cell: u8) -> Coord {
        Coord::new(cell % self.width, cell / self.width)
    }

    /// Walls of `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is not on the board.
    #[must_use]
    #[inline]
    pub fn walls(&self, cell: u8) -> Walls {
        self.cells[usize::from(cell)]
    }

    /// Whether `cell` has a wall on its `direction` side.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is not on the board.
    #[must_use]
    #[inline]
    pub fn has_wall(&self, cell: u8, direction: Direction) -> bool {
        self.walls(cell).contains(direction)
    }

    /// Whether `cell` has walls on all four sides.
    #[must_use]
    pub fn is_sealed(&self, cell: u8) -> bool {
        self.cells.get(usize::from(cell)).is_some_and(|w| w.is_sealed())
    }

    /// Adjacent cell in `direction`, ignoring walls.
    #[must_use]
    #[inline]
    pub fn neighbor(&self, cell: u8, direction: Direction) -> Option<u8> {
        let index = usize::from(cell);
        if !self.contains(index) {
            return None;
        }
        let width = self.width();
        let next = match direction {
            Direction::North => index.checked_sub(width)?,
            Direction::South => Some(index + width).filter(|&n| n < self.len())?,
            Direction::East => Some(index + 1).filter(|_| index % width + 1 < width)?,
            Direction::West => Some(index).filter(|_| index % width > 0)? - 1,
        };
        Some(next as u8)
    }

    /// Adjacent cell in `direction` if no wall separates the two. `None`
    /// for a cell off the board.
    #[must_use]
    #[inline]
    pub fn step(&self, cell: u8, direction: Direction) -> Option<u8> {
        let next = self.neighbor(cell, direction)?;
        (!self.has_wall(cell, direction)).then_some(next)
    }

    /// Whether the `direction` side of `cell` is on the outer edge.
    #[must_use]
    pub fn is_boundary(&self, cell: u8, direction: Direction) -> bool {
        self.neighbor(cell, direction).is_none()
    }

    /// Set or clear the wall between `cell` and its neighbor in `direction`.
    ///
    /// Both sides of the edge change together. Boundary walls and
    /// out-of-range cells are left alone.
    pub fn set_wall(&mut self, cell: u8, direction: Direction, present: bool) {
        let Some(other) = self.neighbor(cell, direction) else {
            return;
        };
        let (a, b) = (usize::from(cell), usize::from(other));
        if present {
            self.cells[a].insert(direction);
            self.cells[b].insert(direction.reverse());
        } else {
            self.cells[a].remove(direction);
            self.cells[b].remove(direction.reverse());
        }
    }

    /// Flip the wall between `cell` and its neighbor in `direction`.
    ///
    /// A no-op on boundary walls.
    pub fn toggle_wall(&mut self, cell: u8, direction: Direction) {
        if let Some(other) = self.neighbor(cell, direction) {
            self.cells[usize::from(cell)].toggle(direction);
            self.cells[usize::from(other)].toggle(direction.reverse());
        }
    }

    /// Flip a wall together with its mirrored copies.
    ///
    /// Each requested mirror is applied as an independent toggle, so a
    /// mirror image that lands on the same edge cancels it out.
    pub fn toggle_walls(&mut self, cell: u8, direction: Direction, symmetry: Symmetry) {
        if !self.contains(usize::from(cell)) {
            return;
        }
        self.toggle_wall(cell, direction);

        let Coord { x, y } = self.coord(cell);
        let mx = self.width - 1 - x;
        let my = self.height - 1 - y;
        if symmetry.mirror_x {
            self.toggle_at(mx, y, direction.mirror_x());
        }
        if symmetry.mirror_y {
            self.toggle_at(x, my, direction.mirror_y());
        }
        if symmetry.point() {
            self.toggle_at(mx, my, direction.reverse());
        }
    }

    fn toggle_at(&mut self, x: u8, y: u8, direction: Direction) {
        if let Some(cell) = self.index(usize::from(x), usize::from(y)) {
            self.toggle_wall(cell, direction);
        }
    }

    /// Wall in `cell` on every side, turning it into a sealed cell.
    pub fn seal(&mut self, cell: u8) {
        if !self.contains(usize::from(cell)) {
            return;
        }
        for direction in Direction::ALL {
            self.set_wall(cell, direction, true);
        }
    }

    /// Number of interior edges carrying a wall. Each edge counts once.
    #[must_use]
    pub fn interior_wall_count(&self) -> usize {
        let mut count = 0;
        for cell in 0..self.len() {
            let cell = cell as u8;
            let Coord { x, y } = self.coord(cell);
            if usize::from(x) + 1 < self.width() && self.has_wall(cell, Direction::East) {
                count += 1;
            }
            if usize::from(y) + 1 < self.height() && self.has_wall(cell, Direction::South) {
                count += 1;
            }
        }
        count
    }

    /// Make every wall two-sided and close the outer boundary.
    ///
    /// A wall recorded on either side of an edge ends up on both.
    pub fn symmetrize(&mut self) {
        for cell in 0..self.len() {
            let cell = cell as u8;
            for direction in [Direction::East, Direction::South] {
                if let Some(other) = self.neighbor(cell, direction) {
                    let present = self.has_wall(cell, direction)
                        || self.has_wall(other, direction.reverse());
                    self.set_wall(cell, direction, present);
                }
            }
        }
        self.close_boundary();
    }

    fn close_boundary(&mut self) {
        for cell in 0..self.len() {
            let cell = cell as u8;
            for direction in Direction::ALL {
                if self.is_boundary(cell, direction) {
                    self.cells[usize::from(cell)].insert(direction);
                }
            }
        }
    }

    /// Cells that are not sealed.
    pub fn floor(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.len())
            .map(|cell| cell as u8)
            .filter(|&cell| !self.walls(cell).is_sealed())
    }

    /// Flood fill over open edges from `start`. Entry `i` is true when cell
    /// `i` is reachable.
    #[must_use]
    pub fn region(&self, start: u8) -> Vec<bool> {
        let mut seen = vec![false; self.len()];
        if !self.contains(usize::from(start)) {
            return seen;
        }
        let mut stack = vec![start];
        seen[usize::from(start)] = true;
        while let Some(cell) = stack.pop() {
            for direction in Direction::ALL {
                if let Some(next) = self.step(cell, direction) {
                    if !seen[usize::from(next)] {
                        seen[usize::from(next)] = true;
                        stack.push(next);
                    }
                }
            }
        }
        seen
    }

    /// Check the structural invariants: boundary walls present, walls
    /// symmetric across every edge, and all non-sealed cells connected.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        self.validate_walls()?;
        let start = self.floor().next().ok_or(InvalidConfiguration::NoFloor)?;
        let seen = self.region(start);
        if let Some(cell) = self.floor().find(|&cell| !seen[usize::from(cell)]) {
            return Err(InvalidConfiguration::Disconnected { cell });
        }
        Ok(())
    }

    /// Check only the wall invariants: boundary walls present and every
    /// interior wall recorded on both sides. Connectivity is not checked.
    ///
    /// # Errors
    ///
    /// Returns the first missing boundary wall or one-sided wall.
    pub fn validate_walls(&self) -> Result<(), InvalidConfiguration> {
        for cell in 0..self.len() {
            let cell = cell as u8;
            for direction in Direction::ALL {
                match self.neighbor(cell, direction) {
                    None if !self.has_wall(cell, direction) => {
                        return Err(InvalidConfiguration::MissingBoundaryWall { cell, direction });
                    }
                    Some(other)
                        if self.has_wall(cell, direction)
                            != self.has_wall(other, direction.reverse()) =>
                    {
                        return Err(InvalidConfiguration::AsymmetricWall { cell, direction });
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Shorthand for `validate().is_ok()`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Raw row-major wall masks.
    #[must_use]
    pub fn masks(&self) -> Vec<u8> {
        self.cells.iter().map(|w| w.bits()).collect()
    }

    /// Wall masks with [`Walls::ROBOT`] set on every occupied cell.
    ///
    /// This is the flat form consumed by external solvers and viewers.
    #[must_use]
    pub fn occupancy_masks(&self, occupied: impl IntoIterator<Item = u8>) -> Vec<u8> {
        let mut masks = self.masks();
        for cell in occupied {
            if let Some(mask) = masks.get_mut(usize::from(cell)) {
                *mask |= Walls::ROBOT;
            }
        }
        masks
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), InvalidConfiguration> {
    if (1..=MAX_SIDE).contains(&width) && (1..=MAX_SIDE).contains(&height) {
        Ok(())
    } else {
        Err(InvalidConfiguration::Dimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_has_boundary() {
        let board = Board::new(4, 3).unwrap();
        assert_eq!(board.len(), 12);
        assert!(board.has_wall(0, Direction::North));
        assert!(board.has_wall(0, Direction::West));
        assert!(!board.has_wall(0, Direction::East));
        assert!(board.has_wall(11, Direction::South));
        assert!(board.has_wall(11, Direction::East));
        assert_eq!(board.interior_wall_count(), 0);
        assert!(board.is_valid());
    }

    #[test]
    fn test_dimensions_rejected() {
        assert!(matches!(
            Board::new(0, 4),
            Err(InvalidConfiguration::Dimensions { width: 0, height: 4 })
        ));
        assert!(Board::new(17, 4).is_err());
        assert!(Board::new(16, 16).is_ok());
    }

    #[test]
    fn test_toggle_wall_both_sides() {
        let mut board = Board::new(4, 4).unwrap();
        board.toggle_wall(5, Direction::East);
        assert!(board.has_wall(5, Direction::East));
        assert!(board.has_wall(6, Direction::West));
        assert_eq!(board.interior_wall_count(), 1);
        board.toggle_wall(6, Direction::West);
        assert!(!board.has_wall(5, Direction::East));
        assert_eq!(board.interior_wall_count(), 0);
    }

    #[test]
    fn test_toggle_boundary_noop() {
        let mut board = Board::new(4, 4).unwrap();
        let before = board.clone();
        board.toggle_wall(0, Direction::North);
        board.toggle_wall(3, Direction::East);
        assert_eq!(board, before);
    }

    #[test]
    fn test_toggle_walls_mirrored() {
        let mut board = Board::new(6, 6).unwrap();
        let sym = Symmetry {
            mirror_x: true,
            mirror_y: false,
            mirror_xy: false,
        };
        // (1, 1) east wall mirrors to (4, 1) west wall
        let cell = board.index(1, 1).unwrap();
        board.toggle_walls(cell, Direction::East, sym);
        assert!(board.has_wall(cell, Direction::East));
        assert!(board.has_wall(board.index(4, 1).unwrap(), Direction::West));
        assert_eq!(board.interior_wall_count(), 2);
    }

    #[test]
    fn test_toggle_walls_both_axes_adds_point() {
        let mut board = Board::new(6, 6).unwrap();
        let sym = Symmetry {
            mirror_x: true,
            mirror_y: true,
            mirror_xy: false,
        };
        let cell = board.index(1, 1).unwrap();
        board.toggle_walls(cell, Direction::South, sym);
        assert!(board.has_wall(cell, Direction::South));
        assert!(board.has_wall(board.index(4, 1).unwrap(), Direction::South));
        assert!(board.has_wall(board.index(1, 4).unwrap(), Direction::North));
        assert!(board.has_wall(board.index(4, 4).unwrap(), Direction::North));
        assert_eq!(board.interior_wall_count(), 4);

        board.toggle_walls(cell, Direction::South, sym);
        assert_eq!(board.interior_wall_count(), 0);
    }

    #[test]
    fn test_validate_disconnected() {
        let mut board = Board::new(4, 4).unwrap();
        // Wall off column 0 entirely
        for y in 0..4 {
            board.set_wall(board.index(0, y).unwrap(), Direction::East, true);
        }
        assert!(matches!(
            board.validate(),
            Err(InvalidConfiguration::Disconnected { .. })
        ));
    }

    #[test]
    fn test_sealed_cell_is_not_floor() {
        let mut board = Board::new(4, 4).unwrap();
        board.seal(5);
        assert!(board.is_sealed(5));
        assert!(board.has_wall(4, Direction::East));
        assert!(board.has_wall(1, Direction::South));
        assert_eq!(board.floor().count(), 15);
        assert!(board.is_valid());
    }

    #[test]
    fn test_validate_asymmetric_from_masks() {
        let mut masks = Board::new(3, 3).unwrap().masks();
        masks[4] |= Direction::East.bit();
        let board = Board::from_masks(3, 3, &masks).unwrap();
        assert!(matches!(
            board.validate(),
            Err(InvalidConfiguration::AsymmetricWall { cell: 4, direction: Direction::East })
        ));
    }

    #[test]
    fn test_validate_missing_boundary() {
        let board = Board::from_masks(2, 1, &[0x0D, 0x06]).unwrap();
        assert!(matches!(
            board.validate(),
            Err(InvalidConfiguration::MissingBoundaryWall { cell: 1, direction: Direction::North })
        ));
    }

    #[test]
    fn test_from_masks_wrong_length() {
        assert!(matches!(
            Board::from_masks(3, 3, &[0; 8]),
            Err(InvalidConfiguration::GridSize { expected: 9, actual: 8 })
        ));
    }

    #[test]
    fn test_symmetrize_restores_edges() {
        let mut masks = vec![0; 9];
        masks[4] = Direction::North.bit();
        let mut board = Board::from_masks(3, 3, &masks).unwrap();
        board.symmetrize();
        assert!(board.has_wall(1, Direction::South));
        assert!(board.is_valid());
    }

    #[test]
    fn test_occupancy_masks() {
        let board = Board::new(2, 2).unwrap();
        let masks = board.occupancy_masks([3]);
        assert_eq!(masks[3] & Walls::ROBOT, Walls::ROBOT);
        assert_eq!(masks[0] & Walls::ROBOT, 0);
        assert_eq!(masks[0], 0x09);
    }

    #[test]
    fn test_neighbor_and_step() {
        let mut board = Board::new(3, 3).unwrap();
        assert_eq!(board.neighbor(0, Direction::North), None);
        assert_eq!(board.neighbor(0, Direction::East), Some(1));
        assert_eq!(board.neighbor(2, Direction::East), None);
        board.set_wall(0, Direction::South, true);
        assert_eq!(board.step(0, Direction::South), None);
        assert_eq!(board.neighbor(0, Direction::South), Some(3));
    }
}
