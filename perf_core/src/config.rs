// config.rs - Sizes and timings for the grid and list exercises

use std::time::Duration;

// Compile-time grid size configuration
pub const GRID_ROWS: usize = 100;                     // Rows held by the grid store
pub const GRID_COLUMNS: usize = 100;                  // Columns held by the grid store
pub const DEFAULT_VIEW: usize = 50;                   // Rows/columns shown on startup
pub const MAX_VISIBLE_ITEMS: usize = 100;             // Filtered list is cut to this many rows
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Startup configuration for the grid exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub rows: usize,
    pub columns: usize,
    pub view_rows: usize,
    pub view_columns: usize,
    pub debounce: Duration,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            columns: GRID_COLUMNS,
            view_rows: DEFAULT_VIEW,
            view_columns: DEFAULT_VIEW,
            debounce: DEBOUNCE,
        }
    }
}

impl GridConfig {
    /// Clamp the visible window to the stored grid shape.
    pub fn clamp_view(&self, rows: usize, columns: usize) -> (usize, usize) {
        (rows.clamp(1, self.rows.max(1)), columns.clamp(1, self.columns.max(1)))
    }
}
