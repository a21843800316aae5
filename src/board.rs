use std::fmt;
use std::fmt::Write;
use std::mem;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;

use crate::Coord;
use crate::neighbors::NeighborTable;
use crate::rules;

/// Board side length used when the caller doesn't pick one.
pub const DEFAULT_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("row {row} outside of bounds [0, {rows})")]
    RowOutOfBounds { row: usize, rows: usize },

    #[error("col {col} outside of bounds [0, {cols})")]
    ColOutOfBounds { col: usize, cols: usize },

    #[error("board dimensions must be positive, got {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },
}

/// A finite life board.
///
/// Cells live in a row-major buffer where every entry is exactly 0 (dead) or
/// 1 (alive). The dimensions are fixed for the board's lifetime, and the
/// board exclusively owns its buffers: readers go through [`Board::get`] or
/// [`Board::cells`].
#[derive(Clone)]
pub struct Board {
    rows: usize,
    cols: usize,

    /// The current generation.
    cells: Vec<u8>,

    /// Write target for the next generation, swapped with `cells` at the end
    /// of every step. Double-buffering instead of cloning the board each
    /// step.
    scratch: Vec<u8>,

    /// Neighbor indices of every cell, fixed for the board's lifetime.
    table: NeighborTable,

    /// Number of steps taken so far.
    generation: u64,
}

impl Board {
    /// Create a `rows x cols` board with every cell independently dead or
    /// alive with equal probability.
    ///
    /// `Some(seed)` makes the fill reproducible: the same seed and dimensions
    /// always produce the same board. `None` seeds from OS entropy.
    pub fn new(rows: usize, cols: usize, seed: Option<u64>) -> Result<Self, BoardError> {
        let mut board = Self::blank(rows, cols)?;

        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        for cell in &mut board.cells {
            *cell = u8::from(rng.gen_bool(0.5));
        }

        debug!(rows, cols, ?seed, "created board");

        Ok(board)
    }

    /// Create an all-dead `rows x cols` board.
    pub fn blank(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimension { rows, cols });
        }

        Ok(Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
            scratch: vec![0; rows * cols],
            table: NeighborTable::build(rows, cols),
            generation: 0,
        })
    }

    /// A randomly filled [`DEFAULT_SIZE`]-sided board.
    pub fn with_default_size(seed: Option<u64>) -> Self {
        match Self::new(DEFAULT_SIZE, DEFAULT_SIZE, seed) {
            Ok(board) => board,
            Err(_) => unreachable!("default dimensions are positive"),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of steps taken since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The current generation as a row-major slice of 0/1 values.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// The 0/1 value of the cell at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<u8, BoardError> {
        let i = self.index_of(row, col)?;

        Ok(self.cells[i])
    }

    /// Set the cell at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<(), BoardError> {
        let i = self.index_of(row, col)?;
        self.cells[i] = u8::from(alive);

        Ok(())
    }

    /// The in-bounds neighbor coordinates of `(row, col)`.
    ///
    /// Up to 8 of them: the 3x3 block around the cell, minus the cell itself
    /// and anything past the edges. No wraparound.
    pub fn neighbors(
        &self,
        row: usize,
        col: usize,
    ) -> Result<impl Iterator<Item = Coord> + '_, BoardError> {
        let i = self.index_of(row, col)?;
        let cols = self.cols;

        Ok(self.table.at(i).iter().map(move |&j| (j / cols, j % cols)))
    }

    /// Advance the board by exactly one generation.
    ///
    /// Every cell's next state is computed from the pre-step buffer, so a
    /// freshly written cell can never influence a neighbor within the same
    /// step. Infallible.
    pub fn step(&mut self) {
        for i in 0..self.cells.len() {
            let live = self
                .table
                .at(i)
                .iter()
                .map(|&j| u64::from(self.cells[j]))
                .sum::<u64>() as u8;

            self.scratch[i] = rules::next_state(self.cells[i] == 1, live);
        }

        mem::swap(&mut self.cells, &mut self.scratch);
        self.generation += 1;
    }

    fn index_of(&self, row: usize, col: usize) -> Result<usize, BoardError> {
        if row >= self.rows {
            return Err(BoardError::RowOutOfBounds {
                row,
                rows: self.rows,
            });
        }

        if col >= self.cols {
            return Err(BoardError::ColOutOfBounds {
                col,
                cols: self.cols,
            });
        }

        Ok(row * self.cols + col)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.cols).enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }

            for &cell in row {
                f.write_char(if cell == 1 { '#' } else { '.' })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use super::BoardError;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            Board::new(0, 10, None),
            Err(BoardError::InvalidDimension { rows: 0, cols: 10 })
        ));
        assert!(matches!(
            Board::blank(3, 0),
            Err(BoardError::InvalidDimension { rows: 3, cols: 0 })
        ));
    }

    #[test]
    fn get_checks_each_axis() {
        let board = Board::new(4, 6, Some(7)).unwrap();

        assert!(matches!(
            board.get(4, 0),
            Err(BoardError::RowOutOfBounds { row: 4, rows: 4 })
        ));
        assert!(matches!(
            board.get(0, 6),
            Err(BoardError::ColOutOfBounds { col: 6, cols: 6 })
        ));
    }

    #[test]
    fn out_of_bounds_message_names_the_range() {
        let board = Board::blank(4, 6).unwrap();
        let err = board.get(9, 0).unwrap_err();

        assert_eq!(err.to_string(), "row 9 outside of bounds [0, 4)");
    }

    #[test]
    fn same_seed_same_board() {
        let a = Board::new(20, 30, Some(42)).unwrap();
        let b = Board::new(20, 30, Some(42)).unwrap();

        assert_eq!(a.cells(), b.cells());
        assert_eq!(a.generation(), 0);
    }

    #[test]
    fn neighbor_iterator_is_bounds_checked() {
        let board = Board::blank(3, 3).unwrap();

        assert_eq!(board.neighbors(1, 1).unwrap().count(), 8);
        assert_eq!(board.neighbors(0, 0).unwrap().count(), 3);
        assert_eq!(board.neighbors(0, 1).unwrap().count(), 5);
        assert!(board.neighbors(3, 0).is_err());
    }

    #[test]
    fn display_uses_hash_and_dot() {
        let mut board = Board::blank(2, 2).unwrap();
        board.set(0, 1, true).unwrap();

        assert_eq!(board.to_string(), ".#\n..");
    }
}
