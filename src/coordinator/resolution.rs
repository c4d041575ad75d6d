// ABOUTME: ResolutionCoordinator - fans unresolved names out to a bounded worker pool.
// ABOUTME: Gathers results in completion order into updates plus a failure list.

use std::collections::{HashMap, HashSet, VecDeque};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;

use super::{RateLimiter, ResolutionResult, SearchWorker};
use crate::capability::SearchCapability;
use crate::catalog::CatalogEntry;

/// Aggregate result of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// Name → identifier for every resolved name.
    pub updates: HashMap<String, String>,

    /// Names that could not be resolved, in completion order.
    pub failures: Vec<String>,
}

impl ResolutionOutcome {
    pub fn resolved_count(&self) -> usize {
        self.updates.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// Number of terminal outcomes recorded.
    pub fn total(&self) -> usize {
        self.resolved_count() + self.failed_count()
    }

    fn record(&mut self, name: String, result: ResolutionResult) {
        match result {
            ResolutionResult::Resolved(id) => {
                self.updates.insert(name, id);
            }
            ResolutionResult::Failed(_) => self.failures.push(name),
        }
    }
}

/// Resolves batches of catalog entries against a rate-limited search capability.
///
/// The concurrency bound and the rate limit are independent: at most
/// `concurrency` workers run search logic at once, and every one of them
/// passes through the same [`RateLimiter`] before calling out.
pub struct ResolutionCoordinator {
    worker: SearchWorker,
    limiter: Arc<RateLimiter>,
}

impl ResolutionCoordinator {
    /// Create a coordinator with its own limiter spacing calls by `min_interval`.
    pub fn new(search: Arc<dyn SearchCapability>, min_interval: Duration) -> Self {
        Self::with_limiter(search, Arc::new(RateLimiter::new(min_interval)))
    }

    /// Create a coordinator that shares an existing limiter's budget.
    pub fn with_limiter(search: Arc<dyn SearchCapability>, limiter: Arc<RateLimiter>) -> Self {
        Self {
            worker: SearchWorker::new(search, limiter.clone()),
            limiter,
        }
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// Resolve `entries` with at most `concurrency` searches in flight.
    ///
    /// Entries that already carry an identifier are skipped. Each distinct
    /// name is searched once; the name is the join key when the updates are
    /// merged back. Returns only after every submitted name has a terminal
    /// result. Individual failures never abort the batch.
    pub async fn resolve(
        &self,
        entries: &[CatalogEntry],
        concurrency: NonZeroUsize,
    ) -> ResolutionOutcome {
        let names = Self::distinct_unresolved(entries);
        let mut outcome = ResolutionOutcome::default();
        if names.is_empty() {
            tracing::debug!("nothing to resolve");
            return outcome;
        }

        let workers = concurrency.get().min(names.len());
        tracing::info!(
            entries = names.len(),
            workers,
            min_interval_ms = self.limiter.min_interval().as_millis() as u64,
            "resolving"
        );

        let mut pending: HashSet<String> = names.iter().cloned().collect();
        let queue = Arc::new(Mutex::new(names));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut pool = JoinSet::new();
        for _ in 0..workers {
            let queue = queue.clone();
            let tx = tx.clone();
            let worker = self.worker.clone();
            pool.spawn(async move {
                loop {
                    let Some(name) = queue.lock().await.pop_front() else {
                        break;
                    };
                    let result = worker.run(&name).await;
                    if tx.send((name, result)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        while let Some((name, result)) = rx.recv().await {
            pending.remove(&name);
            outcome.record(name, result);
        }

        while let Some(joined) = pool.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "resolution worker aborted");
            }
        }

        // A worker that died mid-entry leaves names without a result.
        for name in pending {
            outcome.record(
                name,
                ResolutionResult::Failed("worker aborted".to_string()),
            );
        }

        tracing::info!(
            resolved = outcome.resolved_count(),
            failed = outcome.failed_count(),
            "resolution finished"
        );
        outcome
    }

    fn distinct_unresolved(entries: &[CatalogEntry]) -> VecDeque<String> {
        let mut seen = HashSet::new();
        let mut names = VecDeque::new();
        for entry in entries {
            if entry.is_resolved() {
                tracing::debug!(name = %entry.name, "skipping already resolved entry");
                continue;
            }
            if seen.insert(entry.name.as_str()) {
                names.push_back(entry.name.clone());
            }
        }
        names
    }
}
