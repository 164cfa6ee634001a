//! The 7x9 Chomp grid.
//!
//! Cells are packed into the low 63 bits of a `u64`, one bit per cell, with
//! bit index `row * COLS + col` (row-major). A set bit is an alive cell.
//! `Grid` is `Copy`, so every search node owns an independent board and
//! sibling branches never observe each other's captures.
use std::fmt;

use crate::GameError;

pub const ROWS: usize = 7;
pub const COLS: usize = 9;
pub const CELLS: usize = ROWS * COLS;

const FULL: u64 = (1u64 << CELLS) - 1;

/// A board coordinate. Row 0 is the top row, column 0 the left column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Bounds-checked constructor for coordinates coming from outside the engine.
    pub fn new(row: usize, col: usize) -> Result<Self, GameError> {
        if row >= ROWS || col >= COLS {
            return Err(GameError::CellOutOfBounds { row, col });
        }
        Ok(Self { row, col })
    }

    /// The poisoned top-left cell.
    pub const TOP_LEFT: Cell = Cell { row: 0, col: 0 };

    pub(crate) const fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        (index < CELLS).then(|| Self::at(index / COLS, index % COLS))
    }

    pub fn index(self) -> usize {
        self.row * COLS + self.col
    }

    pub(crate) fn bit(self) -> u64 {
        1u64 << self.index()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    bits: u64,
}

impl Default for Grid {
    fn default() -> Self {
        Self::full()
    }
}

impl Grid {
    /// Every cell alive: the opening position.
    pub const fn full() -> Self {
        Self { bits: FULL }
    }

    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Builds a grid from raw cell bits. Bits above the 63rd are dropped.
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits: bits & FULL }
    }

    pub const fn bits(&self) -> u64 {
        self.bits
    }

    /// Parses rows of `1`/`#` (alive) and `0`/`.` (removed), top row first.
    /// Rows that are shorter than the grid, or missing, are padded with removed cells.
    pub fn from_rows(rows: &[&str]) -> Result<Self, GameError> {
        if rows.len() > ROWS {
            return Err(GameError::ParseGrid {
                row: ROWS,
                reason: format!("expected at most {ROWS} rows, found {}", rows.len()),
            });
        }
        let mut grid = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let line = line.trim();
            if line.chars().count() > COLS {
                return Err(GameError::ParseGrid {
                    row,
                    reason: format!("expected at most {COLS} cells"),
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '1' | '#' => grid.revive(Cell::at(row, col)),
                    '0' | '.' => {}
                    other => {
                        return Err(GameError::ParseGrid {
                            row,
                            reason: format!("unexpected cell marker {other}"),
                        })
                    }
                }
            }
        }
        Ok(grid)
    }

    pub fn is_alive(&self, cell: Cell) -> bool {
        cell.row < ROWS && cell.col < COLS && self.bits & cell.bit() != 0
    }

    /// True once the top-left cell is gone. No move is legal afterwards.
    pub fn is_terminal(&self) -> bool {
        !self.is_alive(Cell::TOP_LEFT)
    }

    pub fn alive_count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn remove(&mut self, cell: Cell) {
        self.bits &= !cell.bit();
    }

    pub fn revive(&mut self, cell: Cell) {
        self.bits |= cell.bit();
    }

    pub(crate) fn clear_mask(&mut self, mask: u64) {
        self.bits &= !mask;
    }

    /// Contiguous alive cells in `row`, counted from column 0.
    pub fn row_run(&self, row: usize) -> usize {
        (0..COLS)
            .take_while(|&col| self.is_alive(Cell::at(row, col)))
            .count()
    }

    /// Contiguous alive cells in `col`, counted from row 0.
    pub fn col_run(&self, col: usize) -> usize {
        (0..ROWS)
            .take_while(|&row| self.is_alive(Cell::at(row, col)))
            .count()
    }

    /// Alive cells among those selected by `mask`.
    pub fn alive_in(&self, mask: u64) -> usize {
        (self.bits & mask).count_ones() as usize
    }
}

/// Mask of the `size` x `size` block whose top-left corner is `corner`,
/// clipped to the board.
pub fn block_mask(corner: Cell, size: usize) -> u64 {
    let mut mask = 0;
    for row in corner.row..(corner.row + size).min(ROWS) {
        for col in corner.col..(corner.col + size).min(COLS) {
            mask |= Cell::at(row, col).bit();
        }
    }
    mask
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..COLS {
            write!(f, " {}", (b'A' + col as u8) as char)?;
        }
        writeln!(f)?;
        for row in 0..ROWS {
            write!(f, "{}", row + 1)?;
            for col in 0..COLS {
                let mark = if self.is_alive(Cell::at(row, col)) { '#' } else { '.' };
                write!(f, " {mark}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_grid_has_every_cell() {
        let grid = Grid::full();
        assert_eq!(grid.alive_count(), CELLS);
        assert!(grid.is_alive(Cell::at(6, 8)));
        assert!(!grid.is_terminal());
    }

    #[test]
    fn terminal_iff_top_left_removed() {
        let mut grid = Grid::full();
        grid.remove(Cell::at(3, 3));
        assert!(!grid.is_terminal());
        grid.remove(Cell::TOP_LEFT);
        assert!(grid.is_terminal());
        assert!(Grid::empty().is_terminal());
    }

    #[test]
    fn copies_are_independent() {
        let original = Grid::full();
        let mut copy = original;
        copy.remove(Cell::at(2, 2));
        assert!(original.is_alive(Cell::at(2, 2)));
        assert!(!copy.is_alive(Cell::at(2, 2)));
    }

    #[test]
    fn run_lengths_stop_at_first_gap() {
        let grid = Grid::from_rows(&[
            "111111000",
            "100000000",
            "100000000",
            "000000000",
            "100000000",
        ])
        .unwrap();
        assert_eq!(grid.row_run(0), 6);
        assert_eq!(grid.row_run(1), 1);
        assert_eq!(grid.col_run(0), 3);
        assert_eq!(grid.col_run(1), 1);
        assert_eq!(grid.row_run(6), 0);
    }

    #[test]
    fn block_count_matches_hand_count() {
        let grid = Grid::from_rows(&[
            "111111000",
            "111000000",
            "111000000",
            "100000000",
            "100000000",
        ])
        .unwrap();
        assert_eq!(grid.alive_in(block_mask(Cell::TOP_LEFT, 5)), 13);
        assert_eq!(grid.alive_in(block_mask(Cell::at(1, 1), 5)), 4);
    }

    #[test]
    fn rejects_bad_rows() {
        assert!(Grid::from_rows(&["1111111111"]).is_err());
        assert!(Grid::from_rows(&["11x"]).is_err());
        assert!(Grid::from_rows(&["1"; 8]).is_err());
    }

    #[test]
    fn cell_bounds_are_checked() {
        assert!(Cell::new(6, 8).is_ok());
        assert!(matches!(
            Cell::new(7, 0),
            Err(GameError::CellOutOfBounds { row: 7, col: 0 })
        ));
        assert_eq!(Cell::from_index(62), Some(Cell::at(6, 8)));
        assert_eq!(Cell::from_index(63), None);
    }

    #[test]
    fn renders_alive_and_removed_cells() {
        let mut grid = Grid::full();
        grid.remove(Cell::at(0, 8));
        let text = grid.to_string();
        let first_row = text.lines().nth(1).unwrap();
        assert_eq!(first_row, "1 # # # # # # # # .");
    }
}
