//! Render-avoidance building blocks: an immutable numeric grid store, a
//! per-cell change detector, a memoizing render gate, and the supporting
//! pieces used by the desktop exercises (ranked city filter, background
//! filter task, deferred module loading, combobox state).

pub mod cities;
pub mod combobox;
pub mod config;
pub mod debounce;
pub mod detector;
pub mod error;
pub mod filter;
pub mod gate;
pub mod globe;
pub mod grid;
pub mod lazy;
pub mod store;
pub mod task;

pub use detector::{CellRenderInput, ContentKey, DispatchHandle, ItemId, Verdict, should_recompute};
pub use error::{GridError, LoadError, TaskError};
pub use gate::{GateStats, RenderGate, with_render_gate};
pub use grid::{Grid, initialize, regenerate, set_cell};
