//! Robot colors and target tokens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Robot identity. Every robot, and every token, carries one of four colors.
///
/// The discriminant is the robot index used by the compact move encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    /// Robot 0.
    Red = 0,
    /// Robot 1.
    Green = 1,
    /// Robot 2.
    Blue = 2,
    /// Robot 3.
    Yellow = 3,
}

impl Color {
    /// All colors in robot-index order. This is the solver's enumeration order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

    /// Robot index (0-3).
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a color by robot index.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Color::Red),
            1 => Some(Color::Green),
            2 => Some(Color::Blue),
            3 => Some(Color::Yellow),
            _ => None,
        }
    }

    /// Single-letter code (`R`, `G`, `B`, `Y`).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
        }
    }

    /// Parse a single-letter code.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            'Y' => Some(Color::Yellow),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
        };
        f.write_str(name)
    }
}

impl FromStr for Color {
    type Err = ParseError;

    /// Accepts full names in any case (`red`, `Red`) or the letter code (`R`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let found = match upper.as_str() {
            "RED" => Some(Color::Red),
            "GREEN" => Some(Color::Green),
            "BLUE" => Some(Color::Blue),
            "YELLOW" => Some(Color::Yellow),
            _ => {
                let mut chars = upper.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Color::from_letter(c),
                    _ => None,
                }
            }
        };
        found.ok_or_else(|| ParseError::Color(s.to_string()))
    }
}

/// Symbol printed on a target token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// `C` in tile layouts.
    Circle,
    /// `T` in tile layouts.
    Triangle,
    /// `Q` in tile layouts.
    Square,
    /// `H` in tile layouts.
    Hexagon,
}

impl Shape {
    /// All shapes.
    pub const ALL: [Shape; 4] = [Shape::Circle, Shape::Triangle, Shape::Square, Shape::Hexagon];

    /// Single-letter code used in tile layouts.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Shape::Circle => 'C',
            Shape::Triangle => 'T',
            Shape::Square => 'Q',
            Shape::Hexagon => 'H',
        }
    }

    /// Parse a single-letter code.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'C' => Some(Shape::Circle),
            'T' => Some(Shape::Triangle),
            'Q' => Some(Shape::Square),
            'H' => Some(Shape::Hexagon),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Circle => "Circle",
            Shape::Triangle => "Triangle",
            Shape::Square => "Square",
            Shape::Hexagon => "Hexagon",
        };
        f.write_str(name)
    }
}

/// A target token: the robot of the same color must reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Token {
    /// Robot that must reach this token.
    pub color: Color,
    /// Printed symbol.
    pub shape: Shape,
}

impl Token {
    /// All 16 tokens, color-major.
    pub const ALL: [Token; 16] = {
        let mut tokens = [Token::new(Color::Red, Shape::Circle); 16];
        let mut i = 0;
        while i < 16 {
            tokens[i] = Token::new(Color::ALL[i / 4], Shape::ALL[i % 4]);
            i += 1;
        }
        tokens
    };

    /// Create a token.
    #[must_use]
    pub const fn new(color: Color, shape: Shape) -> Self {
        Self { color, shape }
    }

    /// Two-letter code, e.g. `RC` for the red circle.
    #[must_use]
    pub fn code(self) -> String {
        let mut code = String::with_capacity(2);
        code.push(self.color.letter());
        code.push(self.shape.letter());
        code
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_index_roundtrip() {
        for color in Color::ALL {
            let index = u8::try_from(color.index()).unwrap();
            assert_eq!(Color::from_index(index), Some(color));
        }
        assert_eq!(Color::from_index(4), None);
    }

    #[test]
    fn test_color_from_str() {
        assert_eq!("red".parse::<Color>().unwrap(), Color::Red);
        assert_eq!("Yellow".parse::<Color>().unwrap(), Color::Yellow);
        assert_eq!("g".parse::<Color>().unwrap(), Color::Green);
        assert!("purple".parse::<Color>().is_err());
    }

    #[test]
    fn test_all_tokens_distinct() {
        let mut tokens = Token::ALL.to_vec();
        tokens.sort();
        tokens.dedup();
        assert_eq!(tokens.len(), 16);
        assert_eq!(Token::ALL[0].code(), "RC");
        assert_eq!(Token::ALL[15].code(), "YH");
    }
}
