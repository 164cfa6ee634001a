//! Endgame shape recognition.
//!
//! Seven canonical shapes are checked in a fixed priority order; the first
//! one that matches supplies a known reply and the search is skipped.
//! Thresholds are hand-tuned and kept exactly as they are, including the
//! shapes where the reply is not game-theoretically optimal.
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::grid::{block_mask, Cell, Grid};

/// Side of the square block inspected by the gun shape.
const GUN_BLOCK: usize = 5;

/// Block anchored one cell in from the top-left corner, used by the gun shape.
static GUN_BLOCK_MASK: Lazy<u64> = Lazy::new(|| block_mask(Cell::at(1, 1), GUN_BLOCK));

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    RowLine,
    ColLine,
    Square,
    RowRectangle,
    ColRectangle,
    Corner,
    Gun,
}

impl Pattern {
    /// Detection order; earlier entries win.
    pub const PRIORITY: [Pattern; 7] = [
        Pattern::RowLine,
        Pattern::ColLine,
        Pattern::Square,
        Pattern::RowRectangle,
        Pattern::ColRectangle,
        Pattern::Corner,
        Pattern::Gun,
    ];

    pub fn matches(self, grid: &Grid) -> bool {
        match self {
            Pattern::RowLine => row_line_pattern(grid),
            Pattern::ColLine => col_line_pattern(grid),
            Pattern::Square => square_pattern(grid),
            Pattern::RowRectangle => row_rectangle_pattern(grid),
            Pattern::ColRectangle => col_rectangle_pattern(grid),
            Pattern::Corner => corner_pattern(grid),
            Pattern::Gun => gun_pattern(grid),
        }
    }

    /// The shape's reply, or `None` when it would fall off the board
    /// (only possible on synthetic grids).
    pub fn reply(self, grid: &Grid) -> Option<Cell> {
        match self {
            Pattern::RowLine => row_line_strategy(),
            Pattern::ColLine => col_line_strategy(),
            Pattern::Square => square_strategy(),
            Pattern::RowRectangle => row_rectangle_strategy(grid),
            Pattern::ColRectangle => col_rectangle_strategy(grid),
            Pattern::Corner => corner_strategy(grid),
            Pattern::Gun => gun_strategy(grid),
        }
    }
}

/// First matching shape in priority order.
pub fn detect_pattern(grid: &Grid) -> Option<Pattern> {
    Pattern::PRIORITY
        .into_iter()
        .find(|pattern| pattern.matches(grid))
}

/// Reply for a detected shape. Takes a concrete [`Pattern`], so there is no
/// "no pattern" case to dispatch on.
pub fn pattern_move(grid: &Grid, pattern: Pattern) -> Option<Cell> {
    pattern.reply(grid)
}

fn cell(row: usize, col: usize) -> Option<Cell> {
    Cell::new(row, col).ok()
}

/// Only the top row is left, two to six cells long.
pub fn row_line_pattern(grid: &Grid) -> bool {
    grid.col_run(0) == 1 && (2..=6).contains(&grid.row_run(0))
}

/// Only the left column is left, two to six cells long.
pub fn col_line_pattern(grid: &Grid) -> bool {
    grid.row_run(0) == 1 && (2..=6).contains(&grid.col_run(0))
}

pub fn square_pattern(grid: &Grid) -> bool {
    let across = grid.row_run(0);
    let down = grid.col_run(0);
    across == down && down <= 3 && grid.is_alive(Cell::at(1, 1))
}

/// Two rows whose lengths differ by anything but exactly one.
pub fn row_rectangle_pattern(grid: &Grid) -> bool {
    let spread = grid.row_run(0).abs_diff(grid.row_run(1));
    grid.col_run(0) == 2 && spread != 1 && spread <= 6
}

/// Two columns whose lengths differ by anything but exactly one.
pub fn col_rectangle_pattern(grid: &Grid) -> bool {
    let spread = grid.col_run(0).abs_diff(grid.col_run(1));
    grid.row_run(0) == 2 && spread != 1 && spread <= 6
}

/// An L of unequal arms with the inside corner eaten.
pub fn corner_pattern(grid: &Grid) -> bool {
    let across = grid.row_run(0);
    let down = grid.col_run(0);
    !grid.is_alive(Cell::at(1, 1))
        && across != down
        && across != 1
        && down != 1
        && across.abs_diff(down) <= 5
}

/// A sparse interior with both arms of similar length.
pub fn gun_pattern(grid: &Grid) -> bool {
    let interior = grid.alive_in(*GUN_BLOCK_MASK);
    (1..=GUN_BLOCK).contains(&interior)
        && grid.col_run(6) <= 1
        && grid.row_run(6) <= 1
        && grid.col_run(0).abs_diff(grid.row_run(0)) <= 3
}

pub fn row_line_strategy() -> Option<Cell> {
    cell(0, 1)
}

pub fn col_line_strategy() -> Option<Cell> {
    cell(1, 0)
}

pub fn square_strategy() -> Option<Cell> {
    cell(1, 1)
}

pub fn row_rectangle_strategy(grid: &Grid) -> Option<Cell> {
    let top = grid.row_run(0);
    let second = grid.row_run(1);
    if top == second {
        cell(1, top.checked_sub(1)?)
    } else {
        cell(0, second + 1)
    }
}

pub fn col_rectangle_strategy(grid: &Grid) -> Option<Cell> {
    let left = grid.col_run(0);
    let second = grid.col_run(1);
    if left == second {
        cell(left.checked_sub(1)?, 1)
    } else {
        cell(second + 1, 0)
    }
}

/// Cuts the longer arm down to the length of the shorter one.
pub fn corner_strategy(grid: &Grid) -> Option<Cell> {
    let across = grid.row_run(0);
    let down = grid.col_run(0);
    if down > across {
        cell(across, 0)
    } else {
        cell(0, down)
    }
}

pub fn gun_strategy(grid: &Grid) -> Option<Cell> {
    let across = grid.row_run(0);
    let down = grid.col_run(0);
    if down == across {
        return cell(1, 1);
    }
    if down > across {
        let row = across.checked_sub(1)?;
        if grid.is_alive(Cell::at(row, 1)) {
            cell(row, 1)
        } else {
            cell(row, 0)
        }
    } else {
        let col = down.checked_sub(1)?;
        if grid.is_alive(Cell::at(1, col)) {
            cell(1, col)
        } else {
            cell(0, col)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    fn at(row: usize, col: usize) -> Option<Cell> {
        Some(Cell::new(row, col).unwrap())
    }

    #[test]
    fn row_line() {
        let g = grid(&["111111000"]);
        assert!(row_line_pattern(&g));
        assert_eq!(detect_pattern(&g), Some(Pattern::RowLine));
        assert_eq!(pattern_move(&g, Pattern::RowLine), at(0, 1));
        assert!(!row_line_pattern(&grid(&["1111111"])));
        assert!(!row_line_pattern(&grid(&["1"])));
    }

    #[test]
    fn col_line() {
        let g = grid(&["1", "1", "1", "1", "1", "1"]);
        assert!(col_line_pattern(&g));
        assert_eq!(detect_pattern(&g), Some(Pattern::ColLine));
        assert_eq!(pattern_move(&g, Pattern::ColLine), at(1, 0));
    }

    #[test]
    fn square() {
        let g = grid(&["111", "111", "111"]);
        assert!(square_pattern(&g));
        assert_eq!(detect_pattern(&g), Some(Pattern::Square));
        assert_eq!(pattern_move(&g, Pattern::Square), at(1, 1));
        assert!(!square_pattern(&grid(&["1111", "1111", "1111", "1111"])));
    }

    #[test]
    fn row_rectangle() {
        let g = grid(&["111111", "1111"]);
        assert!(row_rectangle_pattern(&g));
        assert_eq!(detect_pattern(&g), Some(Pattern::RowRectangle));
        assert_eq!(row_rectangle_strategy(&g), at(0, 5));

        let even = grid(&["1111", "1111"]);
        assert!(row_rectangle_pattern(&even));
        assert_eq!(row_rectangle_strategy(&even), at(1, 3));

        assert!(!row_rectangle_pattern(&grid(&["11111", "1111"])));
    }

    #[test]
    fn col_rectangle() {
        let g = grid(&["11", "11", "11", "11", "1", "1"]);
        assert!(col_rectangle_pattern(&g));
        assert_eq!(detect_pattern(&g), Some(Pattern::ColRectangle));
        assert_eq!(col_rectangle_strategy(&g), at(5, 0));
        assert_eq!(col_rectangle_strategy(&g).map(Cell::index), Some(45));
    }

    #[test]
    fn corner() {
        let g = grid(&["111111", "1", "1", "1"]);
        assert!(corner_pattern(&g));
        assert_eq!(detect_pattern(&g), Some(Pattern::Corner));
        assert_eq!(corner_strategy(&g), at(0, 4));

        let tall = grid(&["111", "1", "1", "1", "1"]);
        assert_eq!(corner_strategy(&tall), at(3, 0));
    }

    #[test]
    fn gun() {
        let g = grid(&["111111", "1111", "11", "1"]);
        assert!(gun_pattern(&g));
        assert_eq!(detect_pattern(&g), Some(Pattern::Gun));
        assert_eq!(gun_strategy(&g).map(Cell::index), Some(12));
        assert_eq!(gun_strategy(&g), at(1, 3));
    }

    #[test]
    fn gun_replies_on_each_branch() {
        let even = grid(&["111", "11", "1"]);
        assert_eq!(gun_strategy(&even), at(1, 1));

        let tall = grid(&["111", "11", "1", "1", "1"]);
        assert_eq!(gun_strategy(&tall), at(2, 0));

        let wide = grid(&["11111", "1", "1"]);
        assert_eq!(gun_strategy(&wide), at(0, 2));
    }

    #[test]
    fn row_line_outranks_later_shapes() {
        // Also satisfies the gun thresholds thanks to the stray interior cell.
        let g = grid(&["111", "0", "001"]);
        assert!(row_line_pattern(&g));
        assert!(gun_pattern(&g));
        assert_eq!(detect_pattern(&g), Some(Pattern::RowLine));
    }

    #[test]
    fn no_pattern_on_opening_grid() {
        assert_eq!(detect_pattern(&Grid::full()), None);
    }

    #[test]
    fn off_board_replies_are_none() {
        // Second row reaches column 7 while the top row is short.
        let g = grid(&["11", "111111110"]);
        assert!(row_rectangle_pattern(&g));
        assert_eq!(row_rectangle_strategy(&g), None);
    }
}
