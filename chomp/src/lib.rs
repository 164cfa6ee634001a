//! Chomp engine for a 7x9 grid with at most five cells taken per move.
//!
//! The engine is stateless at its boundary: callers feed a move history
//! string (e.g. `I7H7A3`) and ask either for the AI's reply or whether a
//! given move is legal. The AI answers with a known reply when the grid
//! matches one of seven endgame shapes and falls back to a depth-5 minimax
//! otherwise.
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod capture;
pub mod grid;
pub mod movegen;
pub mod notation;
pub mod pattern;
pub mod search;
pub mod session;

pub use capture::{apply_capture, capture_count, is_legal, Capture, MAX_CAPTURE};
pub use grid::{Cell, Grid, COLS, ROWS};
pub use movegen::legal_moves;
pub use notation::{decode, encode, format_history, parse_history};
pub use pattern::{detect_pattern, pattern_move, Pattern};
pub use search::{choose_move, minimax, Decision, Source, SEARCH_DEPTH};
pub use session::{MoveOutcome, Player, Session};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid move string at position {position}: {reason}")]
    ParseMove { position: usize, reason: String },
    #[error("invalid grid row {row}: {reason}")]
    ParseGrid { row: usize, reason: String },
    #[error("cell ({row}, {col}) is out of bounds")]
    CellOutOfBounds { row: usize, col: usize },
    #[error("cell {cell} is already removed")]
    CellRemoved { cell: Cell },
    #[error("cell {cell} would remove {count} cells, more than the limit of 5")]
    CaptureTooLarge { cell: Cell, count: usize },
    #[error("the game is over")]
    GameOver,
    #[error("no legal moves remain")]
    NoMoves,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub history: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub cell: Cell,
    pub row: usize,
    pub column: usize,
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub history: String,
    pub cell: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub legal: bool,
    pub captured: usize,
}

/// Replays a history string from the opening grid.
pub fn replay(history: &str) -> Result<Grid, GameError> {
    let moves = parse_history(history)?;
    Grid::from_history(&moves)
}

pub fn best_move(request: MoveRequest) -> Result<MoveResponse, GameError> {
    let grid = replay(&request.history)?;
    let decision = choose_move(&grid)?;
    Ok(MoveResponse {
        cell: decision.cell,
        row: decision.cell.row,
        column: decision.cell.col,
        source: decision.source,
        pattern: decision.pattern,
    })
}

/// Legality verdict plus the number of cells the move would take.
/// An illegal move is a normal answer, not an error; only a malformed
/// history or cell code fails.
pub fn check_move(request: CheckRequest) -> Result<CheckResponse, GameError> {
    let grid = replay(&request.history)?;
    let cell = decode(request.cell.trim())?;
    Ok(CheckResponse {
        legal: !grid.is_terminal() && is_legal(&grid, cell),
        captured: capture_count(&grid, cell),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_history() {
        let grid = replay("I7H7I6").unwrap();
        assert_eq!(grid.alive_count(), 60);
        assert!(matches!(replay("I7I7"), Err(GameError::CellRemoved { .. })));
        assert!(matches!(
            replay("A1"),
            Err(GameError::CaptureTooLarge { count: 63, .. })
        ));
    }

    #[test]
    fn check_reports_count_for_illegal_moves() {
        let res = check_move(CheckRequest {
            history: String::new(),
            cell: "F6".to_string(),
        })
        .unwrap();
        assert_eq!(
            res,
            CheckResponse {
                legal: false,
                captured: 8
            }
        );

        let res = check_move(CheckRequest {
            history: String::new(),
            cell: "H6".to_string(),
        })
        .unwrap();
        assert_eq!(
            res,
            CheckResponse {
                legal: true,
                captured: 4
            }
        );
    }

    #[test]
    fn check_rejects_bad_codes() {
        let res = check_move(CheckRequest {
            history: "I7".to_string(),
            cell: "K2".to_string(),
        });
        assert!(matches!(res, Err(GameError::ParseMove { .. })));
    }

    #[test]
    fn best_move_uses_pattern_on_row_line() {
        // Eats everything but the first six cells of the top row.
        let res = best_move(MoveRequest {
            history: "I3H3G3F3E3E2D3C3B3A3A2G1".to_string(),
        })
        .unwrap();
        assert_eq!(encode(res.cell), "B1");
        assert_eq!((res.row, res.column), (0, 1));
        assert_eq!(res.source, Source::Pattern);
        assert_eq!(res.pattern, Some(Pattern::RowLine));
    }

    #[test]
    fn best_move_rejects_finished_game() {
        let res = best_move(MoveRequest {
            history: "I3H3G3F3E3E2D3C3B3A3A2G1B1A1".to_string(),
        });
        assert!(matches!(res, Err(GameError::GameOver)));
    }

    #[test]
    fn response_serializes_with_code() {
        let res = MoveResponse {
            cell: decode("B1").unwrap(),
            row: 0,
            column: 1,
            source: Source::Pattern,
            pattern: Some(Pattern::RowLine),
        };
        let json = serde_json::to_string(&res).unwrap();
        assert_eq!(
            json,
            r#"{"cell":"B1","row":0,"column":1,"source":"pattern","pattern":"row_line"}"#
        );
    }

    #[test]
    fn error_messages_name_the_cell() {
        let err = replay("I7I7").unwrap_err();
        assert_eq!(err.to_string(), "cell I7 is already removed");
    }
}
