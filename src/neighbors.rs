use crate::Coord;

/// Flattened per-cell neighbor lists.
///
/// Which cells touch which is a pure function of the board dimensions, so the
/// whole table is built once at construction and `step` just walks it every
/// generation.
///
/// Cells are addressed by their row-major index `row * cols + col`. The lists
/// are packed back to back in `cells`, with `offsets` marking where each
/// cell's run starts.
#[derive(Clone)]
pub struct NeighborTable {
    /// Start of each cell's run in `cells`, with one extra entry so that
    /// `cells[offsets[i]..offsets[i + 1]]` is valid for every cell `i`.
    offsets: Vec<usize>,

    /// Neighbor cell indices, grouped by cell.
    cells: Vec<usize>,
}

impl NeighborTable {
    /// Build the table for a `rows x cols` board.
    ///
    /// Every cell gets the in-bounds subset of the 3x3 block around it, minus
    /// itself. No wraparound: corners get 3 neighbors, other edge cells 5,
    /// interior cells 8.
    pub fn build(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0);

        let n = rows * cols;

        let mut offsets = Vec::with_capacity(n + 1);
        let mut cells = Vec::with_capacity(n * 8);

        offsets.push(0);

        for row in 0..rows {
            for col in 0..cols {
                let r1 = (row + 1).min(rows - 1);
                let c1 = (col + 1).min(cols - 1);

                for r in row.saturating_sub(1)..=r1 {
                    for c in col.saturating_sub(1)..=c1 {
                        if (r, c) == (row, col) {
                            continue;
                        }

                        cells.push(r * cols + c);
                    }
                }

                offsets.push(cells.len());
            }
        }

        Self { offsets, cells }
    }

    /// The neighbor indices of the cell at row-major index `i`.
    pub fn at(&self, i: usize) -> &[usize] {
        &self.cells[self.offsets[i]..self.offsets[i + 1]]
    }
}

/// Recompute the neighbors of `(row, col)` from scratch.
///
/// Same output as [`NeighborTable::at`], without the table. Used to
/// cross-check the packed representation in tests.
pub fn neighbors_of(rows: usize, cols: usize, (row, col): Coord) -> Vec<Coord> {
    let r1 = (row + 1).min(rows - 1);
    let c1 = (col + 1).min(cols - 1);

    let mut out = Vec::with_capacity(8);

    for r in row.saturating_sub(1)..=r1 {
        for c in col.saturating_sub(1)..=c1 {
            if (r, c) != (row, col) {
                out.push((r, c));
            }
        }
    }

    out
}
