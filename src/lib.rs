pub mod board;
pub mod neighbors;
pub mod render;
pub mod rules;

/// A `(row, col)` position on the board.
pub type Coord = (usize, usize);
