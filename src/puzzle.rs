//! A board, its robots, and the goal: the unit the solver consumes.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;

use crate::board::{Assembly, Board, TileSet, TokenSite, Walls, ascii};
use crate::engine::{Goal, RobotSet, SearchState};
use crate::error::InvalidConfiguration;
use crate::piece::{Color, Token};

/// A solvable-shaped position: valid board, robots on distinct floor
/// cells, and a goal robot that is placed.
///
/// The target cell only has to exist; a sealed target is accepted and
/// simply has no solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    board: Board,
    robots: RobotSet,
    goal: Goal,
}

impl Puzzle {
    /// Check and bundle a position.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is invalid, a robot is off the board,
    /// on a sealed cell or sharing a cell, the goal robot is missing, or
    /// the target is not a cell of the board.
    pub fn new(board: Board, robots: RobotSet, goal: Goal) -> Result<Self, InvalidConfiguration> {
        board.validate()?;
        robots.validate(&board)?;
        if robots.get(goal.color).is_none() {
            return Err(InvalidConfiguration::UnplacedRobot { color: goal.color });
        }
        if !board.contains(usize::from(goal.target)) {
            return Err(InvalidConfiguration::CellOutOfRange {
                cell: usize::from(goal.target),
            });
        }
        Ok(Self { board, robots, goal })
    }

    /// Canonical 16x16 game for `seed`. See [`Deal::canonical`].
    ///
    /// # Panics
    ///
    /// Never in practice: the classic library always leaves room for four
    /// robots and carries all sixteen tokens.
    #[must_use]
    pub fn canonical(seed: u64) -> Self {
        Deal::canonical(seed).puzzle
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Starting robot positions.
    #[must_use]
    pub fn robots(&self) -> &RobotSet {
        &self.robots
    }

    /// Goal robot and target cell.
    #[must_use]
    pub fn goal(&self) -> Goal {
        self.goal
    }

    /// Search state before any move.
    #[must_use]
    pub fn initial_state(&self) -> SearchState {
        SearchState::new(self.robots)
    }

    /// Whether the goal robot already stands on the target.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.robots.get(self.goal.color) == Some(self.goal.target)
    }

    /// Text dump with robots drawn as color letters and the target as `*`.
    #[must_use]
    pub fn draw(&self, state: &SearchState) -> String {
        ascii::draw(&self.board, |cell| {
            if let Some(color) = state.robots().robot_at(cell) {
                color.letter()
            } else if cell == self.goal.target {
                '*'
            } else {
                '.'
            }
        })
    }

    /// Robot-bit occupancy masks for the starting position.
    #[must_use]
    pub fn occupancy_masks(&self) -> Vec<u8> {
        self.board.occupancy_masks(self.robots.iter().map(|(_, cell)| cell))
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.draw(&self.initial_state()))
    }
}

/// A dealt canonical game: the puzzle plus the token layout it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    /// The position to solve.
    pub puzzle: Puzzle,
    /// Every token on the board.
    pub tokens: Vec<TokenSite>,
    /// The token chosen as the goal.
    pub token: Token,
}

impl Deal {
    /// Assemble the classic board from `seed` and deal robots and a goal
    /// token from the same random stream.
    ///
    /// # Panics
    ///
    /// Never in practice, see [`Puzzle::canonical`].
    #[must_use]
    pub fn canonical(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let assembly = TileSet::classic().assemble(&mut rng);
        Self::from_assembly(assembly, &mut rng).expect("classic boards always have room for a deal")
    }

    /// Place four robots on distinct cells that have no walls and no
    /// token, and pick one of the tokens as the goal.
    ///
    /// # Errors
    ///
    /// Returns an error if the board lacks four free cells or has no tokens.
    pub fn from_assembly<R: Rng>(
        assembly: Assembly,
        rng: &mut R,
    ) -> Result<Self, InvalidConfiguration> {
        let Assembly { board, tokens } = assembly;
        let free: Vec<u8> = (0..board.len())
            .filter_map(|cell| u8::try_from(cell).ok())
            .filter(|&cell| {
                board.walls(cell) == Walls::NONE && tokens.iter().all(|t| t.cell != cell)
            })
            .collect();

        let mut robots = RobotSet::empty();
        let mut picked = free.choose_multiple(rng, Color::ALL.len());
        for color in Color::ALL {
            let cell = picked
                .next()
                .ok_or(InvalidConfiguration::UnplacedRobot { color })?;
            robots.set(color, Some(*cell));
        }

        let site = *tokens
            .choose(rng)
            .ok_or(InvalidConfiguration::UnplacedTarget { color: Color::Red })?;
        let goal = Goal::new(site.token.color, site.cell);
        let puzzle = Puzzle::new(board, robots, goal)?;
        Ok(Self {
            puzzle,
            tokens,
            token: site.token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_deterministic() {
        assert_eq!(Puzzle::canonical(3), Puzzle::canonical(3));
        assert_ne!(Puzzle::canonical(3), Puzzle::canonical(4));
    }

    #[test]
    fn test_canonical_robots_on_open_cells() {
        for seed in 0..16 {
            let deal = Deal::canonical(seed);
            let puzzle = &deal.puzzle;
            assert_eq!(puzzle.robots().len(), 4);
            for (_, cell) in puzzle.robots().iter() {
                assert_eq!(puzzle.board().walls(cell), Walls::NONE);
                assert!(deal.tokens.iter().all(|t| t.cell != cell));
            }
            assert_eq!(puzzle.goal().color, deal.token.color);
            assert!(deal.tokens.contains(&TokenSite {
                cell: puzzle.goal().target,
                token: deal.token
            }));
        }
    }

    #[test]
    fn test_canonical_board_matches_assembly() {
        let deal = Deal::canonical(11);
        let assembly = crate::board::assemble_board(11);
        assert_eq!(deal.puzzle.board(), &assembly.board);
        assert_eq!(deal.tokens, assembly.tokens);
    }

    #[test]
    fn test_new_rejects_missing_goal_robot() {
        let board = Board::new(4, 4).unwrap();
        let robots = RobotSet::new([None, Some(0), None, None]);
        assert_eq!(
            Puzzle::new(board, robots, Goal::new(Color::Red, 5)),
            Err(InvalidConfiguration::UnplacedRobot { color: Color::Red })
        );
    }

    #[test]
    fn test_new_rejects_target_off_board() {
        let board = Board::new(4, 4).unwrap();
        let robots = RobotSet::new([Some(0), None, None, None]);
        assert!(matches!(
            Puzzle::new(board, robots, Goal::new(Color::Red, 16)),
            Err(InvalidConfiguration::CellOutOfRange { cell: 16 })
        ));
    }

    #[test]
    fn test_display_marks_robots_and_target() {
        let board = Board::new(3, 2).unwrap();
        let robots = RobotSet::new([Some(0), None, Some(4), None]);
        let puzzle = Puzzle::new(board, robots, Goal::new(Color::Red, 5)).unwrap();
        let text = puzzle.to_string();
        assert!(text.contains('R'));
        assert!(text.contains('B'));
        assert!(text.contains('*'));
        assert!(!puzzle.is_solved());
    }
}
