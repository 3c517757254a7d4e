// store.rs - Separately owned state containers and their reducers

use tracing::{debug, info};

use crate::config::GridConfig;
use crate::detector::DispatchHandle;
use crate::error::GridError;
use crate::grid::{self, Grid};

/// A state value that knows how to produce its successor for an action.
pub trait Reducer: Sized {
    type Action: std::fmt::Debug;
    type Error;

    fn reduce(&self, action: Self::Action) -> Result<Self, Self::Error>;
}

/// One state container. Consumers of a store see its version move only when
/// an action dispatched to that store succeeds.
#[derive(Debug)]
pub struct Store<S> {
    name: &'static str,
    state: S,
    version: u64,
    dispatch: DispatchHandle,
}

impl<S: Reducer> Store<S> {
    pub fn new(name: &'static str, state: S) -> Self {
        Self {
            name,
            state,
            version: 0,
            dispatch: DispatchHandle::fresh(),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Identity of this store's dispatcher; stable until `rebuild_dispatch`.
    pub fn dispatch_handle(&self) -> DispatchHandle {
        self.dispatch
    }

    /// Apply `action`. On error the state and version are left unchanged.
    pub fn dispatch(&mut self, action: S::Action) -> Result<(), S::Error> {
        debug!(store = self.name, ?action, "dispatch");
        self.state = self.state.reduce(action)?;
        self.version += 1;
        Ok(())
    }

    /// Replace the dispatcher, invalidating every handle given out so far.
    pub fn rebuild_dispatch(&mut self) -> DispatchHandle {
        self.dispatch = DispatchHandle::fresh();
        info!(store = self.name, "dispatcher rebuilt");
        self.dispatch
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    pub grid: Grid,
}

impl GridState {
    pub fn new(config: &GridConfig) -> Self {
        Self { grid: grid::initialize(config.rows, config.columns) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    UpdateGrid,
    UpdateGridCell { row: usize, column: usize },
}

impl Reducer for GridState {
    type Action = GridAction;
    type Error = GridError;

    fn reduce(&self, action: GridAction) -> Result<Self, GridError> {
        let grid = match action {
            GridAction::UpdateGrid => {
                info!(rows = self.grid.rows(), columns = self.grid.columns(), "regenerating grid");
                grid::regenerate(&self.grid)
            }
            GridAction::UpdateGridCell { row, column } => grid::set_cell(&self.grid, row, column)?,
        };
        Ok(Self { grid })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DogState {
    pub dog_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DogAction {
    TypedInDogInput(String),
}

impl Reducer for DogState {
    type Action = DogAction;
    type Error = std::convert::Infallible;

    fn reduce(&self, action: DogAction) -> Result<Self, Self::Error> {
        match action {
            DogAction::TypedInDogInput(dog_name) => Ok(Self { dog_name }),
        }
    }
}

pub type GridStore = Store<GridState>;
pub type DogStore = Store<DogState>;

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid_store() -> GridStore {
        let config = GridConfig { rows: 4, columns: 6, ..GridConfig::default() };
        Store::new("grid", GridState::new(&config))
    }

    #[test]
    fn update_grid_keeps_shape_and_bumps_version() {
        let mut store = small_grid_store();
        store.dispatch(GridAction::UpdateGrid).unwrap();
        assert_eq!(store.state().grid.shape(), (4, 6));
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn update_cell_changes_at_most_that_cell() {
        let mut store = small_grid_store();
        let before = store.state().grid.clone();
        store.dispatch(GridAction::UpdateGridCell { row: 2, column: 5 }).unwrap();
        assert!(store.state().grid.diff_count(&before).unwrap() <= 1);
        assert_eq!(store.state().grid.get(0, 0), before.get(0, 0));
    }

    #[test]
    fn failed_dispatch_leaves_state_alone() {
        let mut store = small_grid_store();
        let before = store.state().clone();
        let err = store
            .dispatch(GridAction::UpdateGridCell { row: 4, column: 0 })
            .unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { row: 4, .. }));
        assert_eq!(store.state(), &before);
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn dispatch_handle_is_stable_across_actions() {
        let mut store = small_grid_store();
        let handle = store.dispatch_handle();
        store.dispatch(GridAction::UpdateGrid).unwrap();
        store.dispatch(GridAction::UpdateGridCell { row: 0, column: 0 }).unwrap();
        assert_eq!(store.dispatch_handle(), handle);
        assert_ne!(store.rebuild_dispatch(), handle);
    }

    #[test]
    fn typing_a_dog_name_does_not_touch_the_grid_store() {
        let mut grid_store = small_grid_store();
        let mut dog_store = DogStore::new("dog", DogState::default());
        let grid_version = grid_store.version();

        for name in ["T", "To", "Tot", "Toto"] {
            dog_store
                .dispatch(DogAction::TypedInDogInput(name.to_string()))
                .unwrap();
        }

        assert_eq!(dog_store.state().dog_name, "Toto");
        assert_eq!(dog_store.version(), 4);
        assert_eq!(grid_store.version(), grid_version);

        grid_store.dispatch(GridAction::UpdateGrid).unwrap();
        assert_eq!(dog_store.version(), 4);
    }
}
