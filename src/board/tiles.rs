//! Quadrant tiles and canonical board assembly.
//!
//! A canonical 16x16 board is four 8x8 tiles, one from each of four groups,
//! shuffled into the quadrants and rotated so every tile's authored outer
//! corner faces outward. Tiles are authored for the top-left quadrant: the
//! outer walls sit on row 0 and column 0, and cell (7, 7) is a corner of the
//! central block.

// Tile-local indices are < 64 and board indices < 256
#![allow(clippy::cast_possible_truncation)]

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::{Board, Direction, Walls};
use crate::error::ParseError;
use crate::piece::{Color, Shape, Token};

/// Cells per tile side.
pub const TILE_SIDE: usize = 8;

/// Cells per tile.
pub const TILE_CELLS: usize = TILE_SIDE * TILE_SIDE;

/// Side of an assembled canonical board.
pub const CANONICAL_SIDE: usize = TILE_SIDE * 2;

/// The four cells of the sealed central block, as `(x, y)`.
const CENTER: [(usize, usize); 4] = [(7, 7), (8, 7), (7, 8), (8, 8)];

/// Quadrant offsets paired with clockwise quarter turns: top-left,
/// top-right, bottom-right, bottom-left.
const SLOTS: [((usize, usize), usize); 4] = [((0, 0), 0), ((8, 0), 1), ((8, 8), 2), ((0, 8), 3)];

/// Classic tile library: two alternatives for each of four groups.
///
/// Each cell is `X` (empty) or wall letters from `NESW` optionally followed
/// by a token code (color `RGBY`, shape `CTQH`).
const CLASSIC: [[&str; 2]; 4] = [
    [
        "NW,N,N,N,NE,NW,N,N,\
         W,S,X,X,X,X,SEYH,W,\
         WE,NWGT,X,X,X,X,N,X,\
         W,X,X,X,X,X,X,X,\
         W,X,X,X,X,X,S,X,\
         SW,X,X,X,X,X,NEBQ,W,\
         NW,X,E,SWRC,X,X,X,S,\
         W,X,X,N,X,X,E,NW",
        "NW,NE,NW,N,NS,N,N,N,\
         W,S,X,E,NWRC,X,X,X,\
         W,NEGT,W,X,X,X,X,X,\
         W,X,X,X,X,X,SEYH,W,\
         W,X,X,X,X,X,N,X,\
         SW,X,X,X,X,X,X,X,\
         NW,X,E,SWBQ,X,X,X,S,\
         W,X,X,N,X,X,E,NW",
    ],
    [
        "NW,N,N,NE,NW,N,N,N,\
         W,X,X,X,X,E,SWBC,X,\
         W,S,X,X,X,X,N,X,\
         W,NEYT,W,X,X,S,X,X,\
         W,X,X,X,E,NWGQ,X,X,\
         W,X,SERH,W,X,X,X,X,\
         SW,X,N,X,X,X,X,S,\
         NW,X,X,X,X,X,E,NW",
        "NW,N,N,N,NE,NW,N,N,\
         W,X,SERH,W,X,X,X,X,\
         W,X,N,X,X,X,X,X,\
         WE,SWGQ,X,X,X,X,S,X,\
         SW,N,X,X,X,E,NWYT,X,\
         NW,X,X,X,X,S,X,X,\
         W,X,X,X,X,NEBC,W,S,\
         W,X,X,X,X,X,E,NW",
    ],
    [
        "NW,N,N,NE,NW,N,N,N,\
         W,X,X,X,X,SEGH,W,X,\
         WE,SWRQ,X,X,X,N,X,X,\
         SW,N,X,X,X,X,S,X,\
         NW,X,X,X,X,E,NWYC,X,\
         W,X,S,X,X,X,X,X,\
         W,X,NEBT,W,X,X,X,S,\
         W,X,X,X,X,X,E,NW",
        "NW,N,NS,N,NE,NW,N,N,\
         W,E,NWYC,X,X,X,X,X,\
         W,X,X,X,X,X,X,X,\
         W,X,X,X,X,E,SWBT,X,\
         SW,X,X,X,S,X,N,X,\
         NW,X,X,X,NERQ,W,X,X,\
         W,SEGH,W,X,X,X,X,S,\
         W,N,X,X,X,X,E,NW",
    ],
    [
        "NW,N,N,NE,NW,N,N,N,\
         W,X,X,X,X,X,X,X,\
         W,X,X,X,X,SEBH,W,X,\
         W,X,S,X,X,N,X,X,\
         SW,X,NEGC,W,X,X,X,X,\
         NW,S,X,X,X,X,E,SWRT,\
         WE,NWYQ,X,X,X,X,X,NS,\
         W,X,X,X,X,X,E,NW",
        "NW,N,N,NE,NW,N,N,N,\
         WE,SWRT,X,X,X,X,S,X,\
         W,N,X,X,X,X,NEGC,W,\
         W,X,X,X,X,X,X,X,\
         W,X,SEBH,W,X,X,X,S,\
         SW,X,N,X,X,X,E,NWYQ,\
         NW,X,X,X,X,X,X,S,\
         W,X,X,X,X,X,E,NW",
    ],
];

/// A token and the cell it sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenSite {
    /// Cell index (tile-local inside a [`Tile`], board index inside an [`Assembly`]).
    pub cell: u8,
    /// The token.
    pub token: Token,
}

/// An 8x8 wall fragment with its tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    walls: [Walls; TILE_CELLS],
    tokens: Vec<TokenSite>,
}

impl Tile {
    /// Parse a comma-separated, row-major tile layout of 64 cells.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::TileSize`] for the wrong cell count and
    /// [`ParseError::TileCell`] for a cell that is not `X` or walls plus an
    /// optional token code.
    pub fn parse(layout: &str) -> Result<Self, ParseError> {
        let cells: Vec<&str> = layout.split(',').map(str::trim).collect();
        if cells.len() != TILE_CELLS {
            return Err(ParseError::TileSize(cells.len()));
        }
        let mut walls = [Walls::NONE; TILE_CELLS];
        let mut tokens = Vec::new();
        for (i, text) in cells.into_iter().enumerate() {
            let (cell_walls, token) = parse_cell(i, text)?;
            walls[i] = cell_walls;
            if let Some(token) = token {
                tokens.push(TokenSite { cell: i as u8, token });
            }
        }
        Ok(Self { walls, tokens })
    }

    /// Wall masks, row-major.
    #[must_use]
    pub fn walls(&self) -> &[Walls; TILE_CELLS] {
        &self.walls
    }

    /// Tokens with tile-local cell indices.
    #[must_use]
    pub fn tokens(&self) -> &[TokenSite] {
        &self.tokens
    }

    /// The tile turned a quarter clockwise.
    ///
    /// Cell `(x, y)` of the result is cell `(y, 7 - x)` of the source, with
    /// every wall flag turned N→E→S→W→N.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let side = TILE_SIDE;
        let mut walls = [Walls::NONE; TILE_CELLS];
        for y in 0..side {
            for x in 0..side {
                walls[y * side + x] = self.walls[(side - 1 - x) * side + y].rotated_cw();
            }
        }
        let tokens = self
            .tokens
            .iter()
            .map(|site| {
                let (ox, oy) = (usize::from(site.cell) % side, usize::from(site.cell) / side);
                TokenSite {
                    cell: (ox * side + (side - 1 - oy)) as u8,
                    token: site.token,
                }
            })
            .collect();
        Self { walls, tokens }
    }

    /// The tile turned `turns` quarters clockwise.
    #[must_use]
    pub fn rotated_by(&self, turns: usize) -> Self {
        let mut tile = self.clone();
        for _ in 0..turns % 4 {
            tile = tile.rotated();
        }
        tile
    }
}

fn parse_cell(cell: usize, text: &str) -> Result<(Walls, Option<Token>), ParseError> {
    let malformed = || ParseError::TileCell {
        cell,
        text: text.to_string(),
    };
    if text == "X" {
        return Ok((Walls::NONE, None));
    }

    let mut walls = Walls::NONE;
    let mut chars = text.chars().peekable();
    while let Some(direction) = chars.peek().copied().and_then(Direction::from_letter) {
        walls.insert(direction);
        chars.next();
    }
    let token = match (chars.next(), chars.next(), chars.next()) {
        (None, _, _) if walls != Walls::NONE => None,
        (Some(c), Some(s), None) => {
            let color = Color::from_letter(c).ok_or_else(malformed)?;
            let shape = Shape::from_letter(s).ok_or_else(malformed)?;
            Some(Token::new(color, shape))
        }
        _ => return Err(malformed()),
    };
    Ok((walls, token))
}

/// A full library: four groups of two interchangeable tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSet {
    groups: [[Tile; 2]; 4],
}

static CLASSIC_SET: LazyLock<TileSet> = LazyLock::new(|| {
    let groups = CLASSIC.map(|pair| {
        pair.map(|layout| Tile::parse(layout).expect("classic tile layouts are well-formed"))
    });
    TileSet::new(groups)
});

impl TileSet {
    /// Build a library from four groups of two alternatives.
    #[must_use]
    pub fn new(groups: [[Tile; 2]; 4]) -> Self {
        Self { groups }
    }

    /// The classic sixteen-token library.
    #[must_use]
    pub fn classic() -> &'static TileSet {
        &CLASSIC_SET
    }

    /// Tile groups.
    #[must_use]
    pub fn groups(&self) -> &[[Tile; 2]; 4] {
        &self.groups
    }

    /// Pick one tile per group, shuffle them over the quadrants, rotate each
    /// into place and merge into a 16x16 board.
    ///
    /// Seams are made two-sided and the central 2x2 block is sealed.
    pub fn assemble<R: Rng>(&self, rng: &mut R) -> Assembly {
        let mut picked: Vec<&Tile> = self
            .groups
            .iter()
            .map(|pair| &pair[rng.gen_range(0..pair.len())])
            .collect();
        picked.shuffle(rng);

        let side = CANONICAL_SIDE;
        let mut cells = vec![Walls::NONE; side * side];
        let mut tokens = Vec::with_capacity(16);
        for (tile, &((ox, oy), turns)) in picked.into_iter().zip(SLOTS.iter()) {
            let tile = tile.rotated_by(turns);
            for (i, walls) in tile.walls.iter().enumerate() {
                let (x, y) = (ox + i % TILE_SIDE, oy + i / TILE_SIDE);
                cells[y * side + x] = *walls;
            }
            for site in &tile.tokens {
                let local = usize::from(site.cell);
                let (x, y) = (ox + local % TILE_SIDE, oy + local / TILE_SIDE);
                tokens.push(TokenSite {
                    cell: (y * side + x) as u8,
                    token: site.token,
                });
            }
        }
        tokens.sort_by_key(|site| site.token);

        let mut board = Board::from_walls(side as u8, side as u8, cells);
        board.symmetrize();
        for (x, y) in CENTER {
            board.seal((y * side + x) as u8);
        }
        Assembly { board, tokens }
    }
}

/// An assembled canonical board and where its tokens landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    /// The merged board.
    pub board: Board,
    /// Token sites in token order.
    pub tokens: Vec<TokenSite>,
}

impl Assembly {
    /// Cell holding `token`, if it is on this board.
    #[must_use]
    pub fn token_cell(&self, token: Token) -> Option<u8> {
        self.tokens
            .iter()
            .find(|site| site.token == token)
            .map(|site| site.cell)
    }

    /// Token on `cell`, if any.
    #[must_use]
    pub fn token_at(&self, cell: u8) -> Option<Token> {
        self.tokens
            .iter()
            .find(|site| site.cell == cell)
            .map(|site| site.token)
    }
}

/// Assemble a canonical board from the classic library, deterministic in `seed`.
#[must_use]
pub fn assemble_board(seed: u64) -> Assembly {
    let mut rng = SmallRng::seed_from_u64(seed);
    TileSet::classic().assemble(&mut rng)
}
