// lazy.rs - Load an expensive module on first use, or earlier on a hint

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::error::LoadError;

#[derive(Debug)]
pub enum LoadState<T> {
    Unloaded,
    Loading,
    Ready(Arc<T>),
    Failed(LoadError),
}

/// A module built by `loader` on a blocking thread at most once.
///
/// `prefetch` is meant for hover/focus hints so the module is usually ready by
/// the time it is actually shown.
pub struct LazyModule<T> {
    name: &'static str,
    loader: fn() -> T,
    runtime: Handle,
    state: LoadState<T>,
    pending: Option<oneshot::Receiver<T>>,
}

impl<T: Send + Sync + 'static> LazyModule<T> {
    pub fn new(name: &'static str, loader: fn() -> T, runtime: Handle) -> Self {
        Self {
            name,
            loader,
            runtime,
            state: LoadState::Unloaded,
            pending: None,
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    /// Start loading if nothing has been started yet.
    pub fn prefetch(&mut self) {
        if !matches!(self.state, LoadState::Unloaded) {
            return;
        }
        info!(module = self.name, "loading module");
        let (tx, rx) = oneshot::channel();
        let loader = self.loader;
        self.runtime.spawn_blocking(move || {
            let _ = tx.send(loader());
        });
        self.state = LoadState::Loading;
        self.pending = Some(rx);
    }

    /// Non-blocking check on a load in progress.
    pub fn poll(&mut self) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };
        let outcome = match rx.try_recv() {
            Ok(module) => Ok(module),
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => Err(()),
        };
        self.settle(outcome);
    }

    /// The module if it is ready, kicking off a load otherwise.
    pub fn get(&mut self) -> Option<Arc<T>> {
        self.prefetch();
        self.poll();
        match &self.state {
            LoadState::Ready(module) => Some(Arc::clone(module)),
            _ => None,
        }
    }

    /// Wait until the module is loaded.
    pub async fn load(&mut self) -> Result<Arc<T>, LoadError> {
        self.prefetch();
        if let Some(rx) = self.pending.as_mut() {
            let outcome = rx.await.map_err(|_| ());
            self.settle(outcome);
        }
        match &self.state {
            LoadState::Ready(module) => Ok(Arc::clone(module)),
            LoadState::Failed(err) => Err(err.clone()),
            LoadState::Unloaded | LoadState::Loading => Err(LoadError::LoaderPanicked { module: self.name }),
        }
    }

    fn settle(&mut self, outcome: Result<T, ()>) {
        self.pending = None;
        self.state = match outcome {
            Ok(module) => {
                info!(module = self.name, "module ready");
                LoadState::Ready(Arc::new(module))
            }
            Err(()) => {
                warn!(module = self.name, "module loader failed");
                LoadState::Failed(LoadError::LoaderPanicked { module: self.name })
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static LOADS: AtomicUsize = AtomicUsize::new(0);

    fn counted_loader() -> Vec<u32> {
        LOADS.fetch_add(1, Ordering::SeqCst);
        (0..1000).collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn loads_once_across_prefetch_and_get() {
        let mut module = LazyModule::new("numbers", counted_loader, Handle::current());
        assert!(matches!(module.state(), LoadState::Unloaded));

        module.prefetch();
        module.prefetch();
        assert!(module.is_loading());

        let loaded = module.load().await.unwrap();
        assert_eq!(loaded.len(), 1000);
        assert!(Arc::ptr_eq(&loaded, &module.get().unwrap()));
        assert_eq!(LOADS.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn panicking_loader_fails() {
        let mut module: LazyModule<u8> =
            LazyModule::new("broken", || panic!("boom"), Handle::current());
        let err = module.load().await.unwrap_err();
        assert_eq!(err, LoadError::LoaderPanicked { module: "broken" });
        assert!(module.get().is_none());
        assert!(matches!(module.state(), LoadState::Failed(_)));
    }
}
