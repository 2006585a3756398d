//! Random local changes to a layout.

use rand::Rng;
use rand::seq::{IteratorRandom, SliceRandom};

use crate::board::{Direction, Symmetry};
use crate::layout::Layout;
use crate::piece::Color;

/// One local change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proposal {
    /// A robot jumps to another free cell.
    MoveRobot {
        /// Robot moved.
        color: Color,
        /// New cell.
        to: u8,
    },
    /// A target jumps to another free cell.
    MoveTarget {
        /// Target moved.
        color: Color,
        /// New cell.
        to: u8,
    },
    /// A wall and its mirror images flip.
    ToggleWall {
        /// Cell the toggle was aimed at.
        cell: u8,
        /// Side of that cell.
        direction: Direction,
    },
}

/// Apply a random proposal to `layout`.
///
/// Returns `None` when the drawn change is impossible (no free cell, or the
/// wall toggle would exceed `wall_budget`); `layout` is then unchanged.
pub fn propose<R: Rng>(
    layout: &mut Layout,
    rng: &mut R,
    symmetry: Symmetry,
    wall_budget: usize,
) -> Option<Proposal> {
    let color = *Color::ALL.choose(rng)?;
    match rng.gen_range(0..3) {
        0 => {
            let to = random_free_cell(layout, rng)?;
            layout.place_robot(color, Some(to)).ok()?;
            Some(Proposal::MoveRobot { color, to })
        }
        1 => {
            let to = random_free_cell(layout, rng)?;
            layout.place_target(color, Some(to)).ok()?;
            Some(Proposal::MoveTarget { color, to })
        }
        _ => {
            let cell = u8::try_from(rng.gen_range(0..layout.board().len())).ok()?;
            let direction = *Direction::ALL.choose(rng)?;
            let before = layout.clone();
            layout.toggle_walls(cell, direction, symmetry).ok()?;
            if layout.wall_count() > wall_budget {
                *layout = before;
                return None;
            }
            Some(Proposal::ToggleWall { cell, direction })
        }
    }
}

/// A uniformly chosen non-sealed cell with no robot and no target.
pub fn random_free_cell<R: Rng>(layout: &Layout, rng: &mut R) -> Option<u8> {
    layout
        .board()
        .floor()
        .filter(|&cell| layout.is_free(cell))
        .choose(rng)
}
