//! Slide-move physics.
//!
//! Everything here is pure with respect to the board: only the
//! [`SearchState`] changes, and every change can be undone exactly.

mod moves;
mod state;

pub use moves::{MAX_MOVES, Move, MoveList, Path, apply, can_move, moves, slide};
pub(crate) use moves::play;
pub use state::{Goal, MAX_ROBOTS, RobotSet, SearchState, Undo};
