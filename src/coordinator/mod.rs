// ABOUTME: Coordinator module for rate-limited, bounded-concurrency resolution.
// ABOUTME: Contains the shared rate limiter, the search worker, and the worker pool.

mod rate_limiter;
mod resolution;
mod worker;

pub use rate_limiter::{Cancelled, RateLimiter};
pub use resolution::{ResolutionCoordinator, ResolutionOutcome};
pub use worker::{ResolutionResult, SearchWorker};

#[cfg(test)]
mod rate_limiter_test;
