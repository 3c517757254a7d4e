// task.rs - City filtering moved off the UI thread onto the tokio runtime

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cities::{City, all_cities};
use crate::error::TaskError;
use crate::filter::{self, rank, sort_ranked};

// Rows ranked between cooperative yields
const YIELD_EVERY: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncStatus {
    Idle,
    Pending,
    Resolved,
    Rejected(TaskError),
}

struct InFlight {
    generation: u64,
    query: String,
    result: oneshot::Receiver<Vec<City>>,
    handle: JoinHandle<()>,
}

/// Ranked filtering that runs as a tokio task. The UI polls it once per frame
/// and keeps showing the last resolved list while a new one is pending.
pub struct AsyncFilter {
    runtime: Handle,
    data: Vec<City>,
    status: AsyncStatus,
    generation: u64,
    in_flight: Option<InFlight>,
}

async fn rank_cities(query: String) -> Vec<City> {
    let query = query.trim();
    if query.is_empty() {
        return all_cities().to_vec();
    }
    let mut ranked = Vec::new();
    for (i, city) in all_cities().iter().enumerate() {
        if let Some(r) = rank(city.name, query) {
            ranked.push((r, *city));
        }
        if i % YIELD_EVERY == YIELD_EVERY - 1 {
            tokio::task::yield_now().await;  // Cooperative yielding
        }
    }
    sort_ranked(ranked)
}

impl AsyncFilter {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            data: Vec::new(),
            status: AsyncStatus::Idle,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn status(&self) -> &AsyncStatus {
        &self.status
    }

    /// Last resolved list; kept while a newer run is pending.
    pub fn data(&self) -> &[City] {
        &self.data
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start filtering for `query`, superseding any run still in flight.
    pub fn run(&mut self, query: &str) {
        self.cancel();
        self.generation += 1;

        let (tx, rx) = oneshot::channel();
        let owned = query.to_string();
        let handle = self.runtime.spawn(async move {
            let cities = rank_cities(owned).await;
            // Receiver is gone when the run was superseded.
            let _ = tx.send(cities);
        });

        debug!(generation = self.generation, query, "filter task started");
        self.status = AsyncStatus::Pending;
        self.in_flight = Some(InFlight {
            generation: self.generation,
            query: query.to_string(),
            result: rx,
            handle,
        });
    }

    /// Abort the run in flight, if any. Its result will never be observed.
    pub fn cancel(&mut self) {
        if let Some(flight) = self.in_flight.take() {
            debug!(generation = flight.generation, query = %flight.query, "filter task superseded");
            flight.handle.abort();
            if self.status == AsyncStatus::Pending {
                self.status = AsyncStatus::Rejected(TaskError::Cancelled);
            }
        }
    }

    /// Non-blocking check for a finished run. Returns true when the status
    /// changed.
    pub fn poll(&mut self) -> bool {
        let Some(flight) = self.in_flight.as_mut() else {
            return false;
        };
        let outcome = match flight.result.try_recv() {
            Ok(cities) => Ok(cities),
            Err(oneshot::error::TryRecvError::Empty) => return false,
            Err(oneshot::error::TryRecvError::Closed) => Err(()),
        };
        self.finish(outcome);
        true
    }

    /// Wait for the run in flight to finish.
    pub async fn wait(&mut self) -> &AsyncStatus {
        if let Some(flight) = self.in_flight.as_mut() {
            let outcome = (&mut flight.result).await.map_err(|_| ());
            self.finish(outcome);
        }
        &self.status
    }

    fn finish(&mut self, outcome: Result<Vec<City>, ()>) {
        let Some(flight) = self.in_flight.take() else {
            return;
        };
        match outcome {
            Ok(cities) => {
                debug!(generation = flight.generation, matches = cities.len(), "filter task resolved");
                self.data = cities;
                self.status = AsyncStatus::Resolved;
            }
            Err(()) => {
                warn!(generation = flight.generation, query = %flight.query, "filter task died without a result");
                self.status = AsyncStatus::Rejected(TaskError::Panicked {
                    message: format!("no result for query {:?}", flight.query),
                });
            }
        }
    }

    /// Filter on the calling thread, bypassing the runtime.
    pub fn run_inline(&mut self, query: &str) {
        self.cancel();
        self.generation += 1;
        self.data = filter::filter_cities(query);
        self.status = AsyncStatus::Resolved;
    }
}

impl Drop for AsyncFilter {
    fn drop(&mut self) {
        if let Some(flight) = self.in_flight.take() {
            flight.handle.abort();
        }
    }
}
