// grid.rs - Immutable numeric grid snapshots and their transitions

use rand::Rng;
use tracing::debug;

use crate::error::GridError;

/// Upper bound (exclusive) of every cell value.
pub const CELL_MAX: f64 = 100.0;

/// Row-major R x C grid of values in `[0, 100)`.
///
/// Every transition returns a fresh snapshot; a `Grid` is never mutated once
/// handed out, so renderers can hold one without coordinating with the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<f64>,
}

impl Grid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.offset(row, column).map(|i| self.cells[i])
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        (row < self.rows).then(|| &self.cells[row * self.columns..(row + 1) * self.columns])
    }

    /// Flat position of `(row, column)`, used as the cell's flat index.
    pub fn offset(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.rows && column < self.columns).then_some(row * self.columns + column)
    }

    /// Number of positions at which two same-shaped grids differ.
    pub fn diff_count(&self, other: &Grid) -> Option<usize> {
        if self.shape() != other.shape() {
            return None;
        }
        Some(
            self.cells
                .iter()
                .zip(&other.cells)
                .filter(|(a, b)| a.to_bits() != b.to_bits())
                .count(),
        )
    }
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..CELL_MAX)
}

/// Build a `rows` x `columns` grid of uniformly random values.
pub fn initialize(rows: usize, columns: usize) -> Grid {
    initialize_with(&mut rand::thread_rng(), rows, columns)
}

pub fn initialize_with<R: Rng + ?Sized>(rng: &mut R, rows: usize, columns: usize) -> Grid {
    let cells = (0..rows * columns).map(|_| random_cell(rng)).collect();
    debug!(rows, columns, "grid initialized");
    Grid { rows, columns, cells }
}

/// Same shape, every cell re-randomized. The input is left untouched.
pub fn regenerate(grid: &Grid) -> Grid {
    regenerate_with(&mut rand::thread_rng(), grid)
}

pub fn regenerate_with<R: Rng + ?Sized>(rng: &mut R, grid: &Grid) -> Grid {
    initialize_with(rng, grid.rows, grid.columns)
}

/// Copy of `grid` with a fresh random value at `(row, column)`.
pub fn set_cell(grid: &Grid, row: usize, column: usize) -> Result<Grid, GridError> {
    set_cell_with(&mut rand::thread_rng(), grid, row, column)
}

pub fn set_cell_with<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    row: usize,
    column: usize,
) -> Result<Grid, GridError> {
    let offset = grid.offset(row, column).ok_or(GridError::OutOfBounds {
        row,
        column,
        rows: grid.rows,
        columns: grid.columns,
    })?;

    let mut next = grid.clone();
    next.cells[offset] = random_cell(rng);
    debug!(row, column, value = next.cells[offset], "grid cell updated");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn initialize_fills_every_cell_in_range() {
        let grid = initialize_with(&mut seeded(1), 7, 3);
        assert_eq!(grid.shape(), (7, 3));
        assert_eq!(grid.cells().len(), 21);
        assert!(grid.cells().iter().all(|v| (0.0..CELL_MAX).contains(v)));
    }

    #[test]
    fn empty_grid_is_allowed() {
        let grid = initialize_with(&mut seeded(2), 0, 0);
        assert!(grid.cells().is_empty());
        assert_eq!(grid.get(0, 0), None);
    }

    #[test]
    fn regenerate_leaves_input_alone() {
        let mut rng = seeded(3);
        let grid = initialize_with(&mut rng, 4, 4);
        let before = grid.clone();
        let next = regenerate_with(&mut rng, &grid);
        assert_eq!(grid, before);
        assert_ne!(next, grid);
    }

    #[test]
    fn set_cell_rejects_row_past_end() {
        let grid = initialize_with(&mut seeded(4), 3, 5);
        let err = set_cell(&grid, 3, 0).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds { row: 3, column: 0, rows: 3, columns: 5 }
        );
    }

    #[test]
    fn set_cell_rejects_column_past_end() {
        let grid = initialize_with(&mut seeded(5), 3, 5);
        assert!(matches!(
            set_cell(&grid, 0, 5),
            Err(GridError::OutOfBounds { column: 5, .. })
        ));
    }

    #[test]
    fn row_slices_follow_row_major_layout() {
        let grid = initialize_with(&mut seeded(6), 2, 3);
        assert_eq!(grid.row(1).unwrap(), &grid.cells()[3..6]);
        assert_eq!(grid.row(2), None);
        assert_eq!(grid.offset(1, 2), Some(5));
    }

    proptest! {
        #[test]
        fn regenerate_preserves_shape(rows in 0usize..40, columns in 0usize..40, seed in any::<u64>()) {
            let mut rng = seeded(seed);
            let grid = initialize_with(&mut rng, rows, columns);
            let next = regenerate_with(&mut rng, &grid);
            prop_assert_eq!(next.shape(), (rows, columns));
            prop_assert!(next.cells().iter().all(|v| (0.0..CELL_MAX).contains(v)));
        }

        #[test]
        fn set_cell_touches_at_most_one_position(
            rows in 1usize..30,
            columns in 1usize..30,
            pick in any::<(usize, usize)>(),
            seed in any::<u64>(),
        ) {
            let mut rng = seeded(seed);
            let grid = initialize_with(&mut rng, rows, columns);
            let (row, column) = (pick.0 % rows, pick.1 % columns);
            let next = set_cell_with(&mut rng, &grid, row, column).unwrap();
            prop_assert!(next.diff_count(&grid).unwrap() <= 1);
            for r in 0..rows {
                for c in 0..columns {
                    if (r, c) != (row, column) {
                        prop_assert_eq!(next.get(r, c), grid.get(r, c));
                    }
                }
            }
        }

        #[test]
        fn set_cell_out_of_range_always_fails(
            rows in 1usize..20,
            columns in 1usize..20,
            extra in 0usize..10,
        ) {
            let grid = initialize_with(&mut seeded(0), rows, columns);
            let by_row = set_cell(&grid, rows + extra, 0).is_err();
            let by_column = set_cell(&grid, 0, columns + extra).is_err();
            prop_assert!(by_row);
            prop_assert!(by_column);
        }
    }
}
