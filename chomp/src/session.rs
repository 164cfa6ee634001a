//! A running match between two players: names, turn counter and scores
//! across consecutive games on a fresh grid.
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::grid::{Cell, Grid};
use crate::search::choose_move;
use crate::GameError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    One,
    Two,
}

impl Player {
    fn idx(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub player: Player,
    pub cell: Cell,
    pub captured: usize,
    /// The player ate the top-left cell and lost the game.
    pub lost: bool,
}

#[derive(Clone, Debug)]
pub struct Session {
    names: [String; 2],
    scores: [u32; 2],
    grid: Grid,
    to_move: Player,
    turn: u32,
    winner: Option<Player>,
}

impl Session {
    /// Starts a match on a full grid with player one to move. Blank names
    /// fall back to `player 1` / `player 2`.
    pub fn new(one: &str, two: &str) -> Self {
        let name = |given: &str, fallback: &str| {
            let given = given.trim();
            if given.is_empty() {
                fallback.to_string()
            } else {
                given.to_string()
            }
        };
        Self {
            names: [name(one, "player 1"), name(two, "player 2")],
            scores: [0, 0],
            grid: Grid::full(),
            to_move: Player::One,
            turn: 0,
            winner: None,
        }
    }

    pub fn name(&self, player: Player) -> &str {
        &self.names[player.idx()]
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Moves played in the current game.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.idx()]
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Plays `cell` for the side to move. Illegal moves leave the session untouched.
    pub fn play(&mut self, cell: Cell) -> Result<MoveOutcome, GameError> {
        if self.winner.is_some() {
            return Err(GameError::GameOver);
        }
        let player = self.to_move;
        let capture = self.grid.play(cell)?;
        self.turn += 1;
        self.to_move = player.opponent();
        if capture.poisoned {
            let winner = player.opponent();
            self.winner = Some(winner);
            self.scores[winner.idx()] += 1;
            info!(
                winner = self.name(winner),
                turns = self.turn,
                "game over"
            );
        }
        Ok(MoveOutcome {
            player,
            cell,
            captured: capture.captured,
            lost: capture.poisoned,
        })
    }

    /// Lets the engine pick and play the move for the side to move.
    pub fn play_ai(&mut self) -> Result<MoveOutcome, GameError> {
        if self.winner.is_some() {
            return Err(GameError::GameOver);
        }
        let decision = choose_move(&self.grid)?;
        self.play(decision.cell)
    }

    /// Starts a new game on a full grid, keeping names and scores.
    pub fn rematch(&mut self) {
        self.grid = Grid::full();
        self.to_move = Player::One;
        self.turn = 0;
        self.winner = None;
    }
}
