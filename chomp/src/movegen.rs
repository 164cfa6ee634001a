use crate::capture::is_legal;
use crate::grid::{Cell, Grid};

/// Every legal move in row-major order.
///
/// The search breaks ties by taking the first best move, so this order is
/// part of the engine's observable behaviour.
pub fn legal_moves(grid: &Grid) -> Vec<Cell> {
    let mut moves = Vec::new();
    // Set bits come out lowest index first, which is row-major.
    let mut alive = grid.bits();
    while alive != 0 {
        let index = alive.trailing_zeros() as usize;
        alive &= alive - 1;
        if let Some(cell) = Cell::from_index(index) {
            if is_legal(grid, cell) {
                moves.push(cell);
            }
        }
    }
    moves
}
