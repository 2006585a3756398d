// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Ricochet: a sliding-robot puzzle engine.
//!
//! Robots move in straight lines until a wall or another robot stops them.
//! The engine assembles boards, plays moves, finds shortest solutions and
//! searches for hard puzzles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Generator (annealing) / Survey    │
//! ├─────────────────────────────────────┤
//! │   Solver (iterative deepening)      │
//! ├─────────────────────────────────────┤
//! │   Move engine (slides, undo)        │
//! ├─────────────────────────────────────┤
//! │   Board (walls, tiles, layouts)     │
//! └─────────────────────────────────────┘
//! ```

pub mod board;
pub mod engine;
pub mod error;
pub mod generator;
pub mod layout;
pub mod piece;
pub mod puzzle;
pub mod solver;
pub mod survey;

pub use board::{Assembly, Board, Coord, Direction, Symmetry, TileSet, Walls, assemble_board};
pub use engine::{Move, Path, RobotSet, SearchState, apply, moves, slide};
pub use error::{
    GenerateError, IllegalMove, InvalidConfiguration, LayoutError, ParseError, SolveError,
};
pub use generator::{Generated, GeneratorConfig, generate, generate_many};
pub use layout::Layout;
pub use piece::{Color, Shape, Token};
pub use puzzle::{Deal, Puzzle};
pub use solver::{Solution, SolverConfig, solve};
pub use survey::{SurveyConfig, SurveyReport, survey};
