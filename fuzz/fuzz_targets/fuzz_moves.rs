#![no_main]

//! Move engine fuzzer.
//!
//! Builds a small walled board and a robot placement from fuzzer input, then
//! replays arbitrary move bytes:
//! 1. Decode bytes as a path
//! 2. Apply each move, rejecting illegal ones
//! 3. Undo everything and compare with the start

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ricochet::{Board, Color, Direction, Move, Path, RobotSet, SearchState, apply};

/// Structured input for move fuzzing.
#[derive(Arbitrary, Debug)]
struct MovesInput {
    /// Board width and height, reduced to 1..=16.
    size: (u8, u8),
    /// Wall toggles as (cell, direction index).
    walls: Vec<(u8, u8)>,
    /// Robot cells, reduced modulo the board size.
    robots: [Option<u8>; 4],
    /// Raw move bytes.
    moves: Vec<u8>,
}

fuzz_target!(|input: MovesInput| {
    let width = usize::from(input.size.0 % 16) + 1;
    let height = usize::from(input.size.1 % 16) + 1;
    let Ok(mut board) = Board::new(width, height) else {
        return;
    };
    let len = board.len();
    for (cell, dir) in input.walls.into_iter().take(64) {
        let cell = (usize::from(cell) % len) as u8;
        board.toggle_wall(cell, Direction::ALL[usize::from(dir % 4)]);
    }
    assert!(board.validate_walls().is_ok());

    let robots = RobotSet::new(input.robots.map(|c| c.map(|c| (usize::from(c) % len) as u8)));
    if robots.validate(&board).is_err() {
        return;
    }

    let start = SearchState::new(robots);
    let mut state = start;
    let mut undos = Vec::new();

    // Undecodable bytes are skipped one by one.
    let path: Path = input
        .moves
        .iter()
        .take(256)
        .filter_map(|&b| Path::from_bytes(&[b]).ok())
        .flat_map(|p| p.moves().to_vec())
        .collect::<Vec<Move>>()
        .into();
    assert_eq!(Path::from_bytes(&path.to_bytes()).unwrap(), path);

    for &mv in path.iter() {
        let before = state;
        match apply(&board, &mut state, mv) {
            Ok(undo) => {
                let end = state.robots().get(mv.color).unwrap();
                assert!(board.contains(usize::from(end)));
                assert_ne!(Some(end), before.robots().get(mv.color));
                undos.push(undo);
            }
            Err(_) => assert_eq!(state, before),
        }
        for color in Color::ALL {
            if let Some(cell) = state.robots().get(color) {
                assert_eq!(state.robots().robot_at(cell), Some(color));
            }
        }
    }

    while let Some(undo) = undos.pop() {
        state.undo(undo);
    }
    assert_eq!(state, start);
});
