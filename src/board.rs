//! Board data model and canonical assembly.
//!
//! This module contains:
//! - Compass directions and per-cell wall masks
//! - The walled grid with symmetric wall editing and validation
//! - Quadrant tiles and the seeded 16x16 assembly
//! - A plain-text dump for debugging

pub mod ascii;
mod direction;
mod grid;
mod tiles;

pub use direction::{Direction, Symmetry, Walls};
pub use grid::{Board, Coord, MAX_SIDE};
pub use tiles::{
    Assembly, CANONICAL_SIDE, TILE_CELLS, TILE_SIDE, Tile, TileSet, TokenSite, assemble_board,
};
