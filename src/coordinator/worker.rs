// ABOUTME: SearchWorker - resolves one name through the shared rate limiter.
// ABOUTME: Any error, empty answer, or panic from the capability becomes Failed.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use super::RateLimiter;
use crate::capability::SearchCapability;

/// Terminal outcome of resolving one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult {
    /// The capability returned a candidate identifier.
    Resolved(String),
    /// No candidate, or the capability failed. Carries a human-readable reason.
    Failed(String),
}

impl ResolutionResult {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionResult::Resolved(_))
    }
}

/// Calls the search capability for single entries, one attempt each.
///
/// Cloning is cheap; clones share the capability and the rate limiter.
#[derive(Clone)]
pub struct SearchWorker {
    search: Arc<dyn SearchCapability>,
    limiter: Arc<RateLimiter>,
}

impl SearchWorker {
    pub fn new(search: Arc<dyn SearchCapability>, limiter: Arc<RateLimiter>) -> Self {
        Self { search, limiter }
    }

    /// Acquire the limiter, then search for `name`. Never retries.
    pub async fn run(&self, name: &str) -> ResolutionResult {
        self.limiter.acquire().await;

        let attempt = AssertUnwindSafe(self.search.search(name))
            .catch_unwind()
            .await;

        match attempt {
            Ok(Ok(Some(id))) if !id.is_empty() => {
                tracing::debug!(name, id = %id, "resolved");
                ResolutionResult::Resolved(id)
            }
            Ok(Ok(_)) => {
                tracing::warn!(name, "no search result");
                ResolutionResult::Failed("no search result".to_string())
            }
            Ok(Err(e)) => {
                tracing::warn!(name, error = %e, "search failed");
                ResolutionResult::Failed(e.to_string())
            }
            Err(_) => {
                tracing::warn!(name, "search capability panicked");
                ResolutionResult::Failed("search capability panicked".to_string())
            }
        }
    }
}
