//! Compass directions and per-cell wall masks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// One of the four compass directions.
///
/// The discriminant is the one-hot wall bit, which is also the low nibble of
/// the compact move byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    /// Toward row 0.
    North = 0x01,
    /// Toward the last column.
    East = 0x02,
    /// Toward the last row.
    South = 0x04,
    /// Toward column 0.
    West = 0x08,
}

impl Direction {
    /// Enumeration order used everywhere: N, E, S, W.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Wall bit for this direction.
    #[must_use]
    #[inline]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// Look up a direction by its one-hot bit.
    #[must_use]
    pub const fn from_bit(bit: u8) -> Option<Self> {
        match bit {
            0x01 => Some(Direction::North),
            0x02 => Some(Direction::East),
            0x04 => Some(Direction::South),
            0x08 => Some(Direction::West),
            _ => None,
        }
    }

    /// Opposite direction.
    #[must_use]
    #[inline]
    pub const fn reverse(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Quarter turn clockwise: N→E→S→W→N.
    #[must_use]
    pub const fn rotate_cw(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Reflection across the vertical axis (x mirrored): swaps East and West.
    #[must_use]
    pub const fn mirror_x(self) -> Self {
        match self {
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            other => other,
        }
    }

    /// Reflection across the horizontal axis (y mirrored): swaps North and South.
    #[must_use]
    pub const fn mirror_y(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            other => other,
        }
    }

    /// Unit step as `(dx, dy)`, with y growing southward.
    #[must_use]
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Single-letter code (`N`, `E`, `S`, `W`).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    /// Parse a single-letter code.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let found = match upper.as_str() {
            "NORTH" | "UP" => Some(Direction::North),
            "EAST" | "RIGHT" => Some(Direction::East),
            "SOUTH" | "DOWN" => Some(Direction::South),
            "WEST" | "LEFT" => Some(Direction::West),
            _ => {
                let mut chars = upper.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Direction::from_letter(c),
                    _ => None,
                }
            }
        };
        found.ok_or_else(|| ParseError::Direction(s.to_string()))
    }
}

/// Wall flags of a single cell: N=0x01, E=0x02, S=0x04, W=0x08.
///
/// Only the low nibble is ever stored; the robot bit exists only in
/// [`Board::occupancy_masks`](super::Board::occupancy_masks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Walls(u8);

impl Walls {
    /// No walls.
    pub const NONE: Walls = Walls(0);
    /// All four walls: a sealed cell.
    pub const ALL: Walls = Walls(0x0F);
    /// Occupancy bit used by the exported mask form.
    pub const ROBOT: u8 = 0x10;

    /// Build from a raw mask. Bits above the low nibble are dropped.
    #[must_use]
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Walls(bits & 0x0F)
    }

    /// Raw mask.
    #[must_use]
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether the wall on `direction` is present.
    #[must_use]
    #[inline]
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Add a wall.
    #[inline]
    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    /// Remove a wall.
    #[inline]
    pub fn remove(&mut self, direction: Direction) {
        self.0 &= !direction.bit();
    }

    /// Flip a wall.
    #[inline]
    pub fn toggle(&mut self, direction: Direction) {
        self.0 ^= direction.bit();
    }

    /// Walls on every side.
    #[must_use]
    #[inline]
    pub const fn is_sealed(self) -> bool {
        self.0 == Self::ALL.0
    }

    /// Number of walls present.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Same walls after a clockwise quarter turn of the cell.
    #[must_use]
    pub fn rotated_cw(self) -> Self {
        let mut out = Walls::NONE;
        for direction in Direction::ALL {
            if self.contains(direction) {
                out.insert(direction.rotate_cw());
            }
        }
        out
    }
}

impl fmt::Display for Walls {
    /// Letter form as used in tile layouts, e.g. `NW`; `X` when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("X");
        }
        for direction in Direction::ALL {
            if self.contains(direction) {
                write!(f, "{}", direction.letter())?;
            }
        }
        Ok(())
    }
}

/// Which mirrored copies a symmetric wall toggle also applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Symmetry {
    /// Mirror across the vertical axis (x → width−1−x, East↔West).
    pub mirror_x: bool,
    /// Mirror across the horizontal axis (y → height−1−y, North↔South).
    pub mirror_y: bool,
    /// 180° point mirror (both coordinates, direction reversed).
    pub mirror_xy: bool,
}

impl Symmetry {
    /// No mirroring.
    pub const NONE: Symmetry = Symmetry {
        mirror_x: false,
        mirror_y: false,
        mirror_xy: false,
    };

    /// Whether the point mirror applies. Requesting both axis mirrors implies it.
    #[must_use]
    pub const fn point(self) -> bool {
        self.mirror_xy || (self.mirror_x && self.mirror_y)
    }
}
