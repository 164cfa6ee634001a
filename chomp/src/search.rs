//! Bounded minimax and the AI move policy.
//!
//! The search is a plain fixed-depth minimax: no pruning, no transposition
//! table. Scores are ternary (-1, 0, +1); a terminal grid is scored against
//! the side now to act, and a depth cutoff is neutral.
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::capture::{apply_capture, is_legal};
use crate::grid::{Cell, Grid};
use crate::movegen::legal_moves;
use crate::pattern::{detect_pattern, pattern_move, Pattern};
use crate::GameError;

/// Plies searched below each candidate move.
pub const SEARCH_DEPTH: usize = 5;

/// Returned by a maximizing node that has no legal move on a non-terminal grid.
/// Any non-empty grid has a legal move, so this only shows up on malformed
/// input and carries no game-theoretic meaning.
pub const MAX_SENTINEL: i32 = i32::MIN;
/// Minimizing counterpart of [`MAX_SENTINEL`].
pub const MIN_SENTINEL: i32 = i32::MAX;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Pattern,
    Search,
}

/// A move picked by [`choose_move`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub cell: Cell,
    pub source: Source,
    pub pattern: Option<Pattern>,
    /// Minimax score of the move; `None` for pattern replies.
    pub score: Option<i32>,
}

/// Scores `grid` from the maximizing side's point of view.
///
/// Returns `-1` on a terminal grid when `maximizing` is to act, `+1` when the
/// minimizing side is, and `0` at the depth cutoff. See [`MAX_SENTINEL`] for
/// the no-move case.
pub fn minimax(grid: &Grid, depth: usize, maximizing: bool) -> i32 {
    if grid.is_terminal() {
        return if maximizing { -1 } else { 1 };
    }
    if depth == 0 {
        return 0;
    }

    let mut best = if maximizing { MAX_SENTINEL } else { MIN_SENTINEL };
    for cell in legal_moves(grid) {
        let mut child = *grid;
        apply_capture(&mut child, cell);
        let score = minimax(&child, depth - 1, !maximizing);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}

/// Best root move by minimax, scanning legal moves in row-major order and
/// keeping the first one on ties. `None` when no move is legal.
pub fn search_move(grid: &Grid, depth: usize) -> Option<(Cell, i32)> {
    let mut best: Option<(Cell, i32)> = None;
    for cell in legal_moves(grid) {
        let mut child = *grid;
        apply_capture(&mut child, cell);
        let score = minimax(&child, depth, false);
        trace!(row = cell.row, col = cell.col, score, "evaluated root move");
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((cell, score));
        }
    }
    best
}

/// AI policy: play the reply of a recognised shape, otherwise search.
///
/// Pattern replies are checked for legality; one that is off the board or
/// illegal on a synthetic grid is dropped in favour of the search.
pub fn choose_move(grid: &Grid) -> Result<Decision, GameError> {
    if grid.is_terminal() {
        return Err(GameError::GameOver);
    }

    if let Some(pattern) = detect_pattern(grid) {
        match pattern_move(grid, pattern) {
            Some(cell) if is_legal(grid, cell) => {
                debug!(?pattern, row = cell.row, col = cell.col, "pattern reply");
                return Ok(Decision {
                    cell,
                    source: Source::Pattern,
                    pattern: Some(pattern),
                    score: None,
                });
            }
            reply => warn!(?pattern, ?reply, "pattern reply is not playable"),
        }
    }

    debug!(depth = SEARCH_DEPTH, "no usable pattern, searching");
    let (cell, score) = search_move(grid, SEARCH_DEPTH).ok_or(GameError::NoMoves)?;
    Ok(Decision {
        cell,
        source: Source::Search,
        pattern: None,
        score: Some(score),
    })
}
