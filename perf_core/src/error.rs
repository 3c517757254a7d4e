use thiserror::Error;

/// Errors raised by grid store transitions.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("Cell ({row}, {column}) is outside the {rows}x{columns} grid")]
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
}

/// Errors surfaced by the background filter task.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Filter task was cancelled before it finished")]
    Cancelled,

    #[error("Filter task panicked: {message}")]
    Panicked { message: String },
}

/// Errors surfaced by a deferred module loader.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Module loader for {module} panicked")]
    LoaderPanicked { module: &'static str },
}
