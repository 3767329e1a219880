//! Tic-tac-toe environment shared by integration tests and benchmarks.

#![allow(dead_code, unreachable_pub)]

use zero_mcts::environment::{Environment, Player};

/// Cells are `1` for the first player, `-1` for the second one and `0` if
/// empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicTacToe {
    board: [i8; 9],
    player: Player,
    finished: bool,
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

impl TicTacToe {
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            player: Player::First,
            finished: false,
        }
    }

    /// Plays the moves starting from the empty board.
    pub fn from_moves(moves: &[usize]) -> Self {
        let mut game = Self::new();
        for action in moves {
            assert!(game.result().is_none(), "game is over before {action}");
            game.apply(action);
        }
        game
    }

    fn winner(&self) -> Option<i8> {
        LINES.iter().find_map(|line| {
            let first = self.board[line[0]];
            (first != 0 && line.iter().all(|&cell| self.board[cell] == first)).then_some(first)
        })
    }
}

impl Environment for TicTacToe {
    type Action = usize;
    type Observation = [i8; 9];

    fn result(&self) -> Option<f32> {
        if !self.finished {
            return None;
        }
        Some(self.winner().map_or(0.0, f32::from))
    }

    fn player(&self) -> Player {
        self.player
    }

    fn observation(&self) -> [i8; 9] {
        let sign = if self.player == Player::First { 1 } else { -1 };
        self.board.map(|cell| cell * sign)
    }

    fn actions(&self) -> Vec<usize> {
        (0..9).filter(|&cell| self.board[cell] == 0).collect()
    }

    fn action_mask(&self) -> Vec<bool> {
        self.board.iter().map(|&cell| cell == 0).collect()
    }

    fn apply(&mut self, action: &usize) {
        assert_eq!(self.board[*action], 0, "cell {action} is occupied");
        self.board[*action] = if self.player == Player::First { 1 } else { -1 };
        if self.winner().is_some() || self.board.iter().all(|&cell| cell != 0) {
            // The player who made the final move stays recorded.
            self.finished = true;
        } else {
            self.player = !self.player;
        }
    }
}
