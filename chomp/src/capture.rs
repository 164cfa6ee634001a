//! Staircase capture: choosing a cell removes it and every alive cell below
//! and to its right, bounded by the gaps already eaten out of the grid.
use crate::grid::{Cell, Grid, CELLS, COLS, ROWS};
use crate::GameError;

/// A single move may remove at most this many cells.
pub const MAX_CAPTURE: usize = 5;

/// Result of a validated move on a grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capture {
    pub cell: Cell,
    pub captured: usize,
    /// The move ate the top-left cell and ended the game.
    pub poisoned: bool,
}

/// Walks the capture region of `cell` and returns its mask, giving up as soon
/// as more than `limit` cells have been collected.
///
/// Each row is scanned from `cell.col` up to the current right bound and stops
/// at the first removed cell; that column becomes the bound for the rows
/// below. A gap on row 0 ends the row without tightening the bound.
fn scan(grid: &Grid, cell: Cell, limit: usize) -> u64 {
    if !grid.is_alive(cell) {
        return 0;
    }
    let mut mask = 0u64;
    let mut taken = 0;
    let mut bound = COLS;
    for row in cell.row..ROWS {
        if bound <= cell.col {
            break;
        }
        for col in cell.col..bound {
            let target = Cell::at(row, col);
            if !grid.is_alive(target) {
                if row != 0 {
                    bound = col;
                }
                break;
            }
            mask |= target.bit();
            taken += 1;
            if taken > limit {
                return mask;
            }
        }
    }
    mask
}

/// Mask of every cell a move at `cell` would remove.
pub fn capture_mask(grid: &Grid, cell: Cell) -> u64 {
    scan(grid, cell, CELLS)
}

/// Number of cells a move at `cell` would remove. Zero for a removed cell.
pub fn capture_count(grid: &Grid, cell: Cell) -> usize {
    capture_mask(grid, cell).count_ones() as usize
}

/// Removes exactly the cells reported by [`capture_count`].
///
/// No legality check happens here; callers validate first (see [`Grid::play`]).
pub fn apply_capture(grid: &mut Grid, cell: Cell) {
    let mask = capture_mask(grid, cell);
    grid.clear_mask(mask);
}

/// A move is legal when its cell is alive and it removes 1 to 5 cells.
pub fn is_legal(grid: &Grid, cell: Cell) -> bool {
    let taken = scan(grid, cell, MAX_CAPTURE).count_ones() as usize;
    (1..=MAX_CAPTURE).contains(&taken)
}

impl Grid {
    /// Validates a move and applies it.
    ///
    /// The grid is left untouched when the move is rejected.
    pub fn play(&mut self, cell: Cell) -> Result<Capture, GameError> {
        if self.is_terminal() {
            return Err(GameError::GameOver);
        }
        if !self.is_alive(cell) {
            return Err(GameError::CellRemoved { cell });
        }
        let mask = capture_mask(self, cell);
        let captured = mask.count_ones() as usize;
        if captured > MAX_CAPTURE {
            return Err(GameError::CaptureTooLarge {
                cell,
                count: captured,
            });
        }
        self.clear_mask(mask);
        Ok(Capture {
            cell,
            captured,
            poisoned: self.is_terminal(),
        })
    }

    /// Replays `moves` from the opening position, rejecting the first illegal one.
    pub fn from_history(moves: &[Cell]) -> Result<Self, GameError> {
        let mut grid = Self::full();
        for &cell in moves {
            grid.play(cell)?;
        }
        Ok(grid)
    }
}
