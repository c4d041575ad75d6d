// ABOUTME: Tests for the minimum-interval rate limiter.
// ABOUTME: Runs on a paused tokio clock and checks spacing across concurrent callers.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use super::rate_limiter::{Cancelled, RateLimiter};

/// The paused clock advances in whole milliseconds; allow one tick of slack.
fn assert_elapsed(actual: Duration, expected: Duration) {
    assert!(
        actual >= expected && actual <= expected + Duration::from_millis(1),
        "expected ~{:?}, got {:?}",
        expected,
        actual
    );
}

#[tokio::test(start_paused = true)]
async fn test_first_acquire_is_immediate() {
    let limiter = RateLimiter::new(Duration::from_secs(1));
    let start = Instant::now();
    limiter.acquire().await;
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(limiter.last_acquired().await, Some(start));
}

#[tokio::test(start_paused = true)]
async fn test_second_acquire_waits_remaining_interval() {
    let limiter = RateLimiter::new(Duration::from_secs(1));
    let start = Instant::now();

    limiter.acquire().await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    limiter.acquire().await;

    // Waits only the 700ms still owed, not a full interval.
    assert_elapsed(start.elapsed(), Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_no_wait_after_idle_period() {
    let limiter = RateLimiter::new(Duration::from_millis(100));
    limiter.acquire().await;
    tokio::time::sleep(Duration::from_secs(5)).await;

    let before = Instant::now();
    limiter.acquire().await;
    assert_eq!(before.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_zero_interval_never_waits() {
    let limiter = RateLimiter::new(Duration::ZERO);
    let start = Instant::now();
    for _ in 0..10 {
        limiter.acquire().await;
    }
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_acquisitions_are_spaced() {
    let interval = Duration::from_millis(100);
    let limiter = Arc::new(RateLimiter::new(interval));
    let log = Arc::new(std::sync::Mutex::new(Vec::new()));
    let start = Instant::now();

    let mut handles = Vec::new();
    for _ in 0..5 {
        let limiter = limiter.clone();
        let log = log.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..4 {
                limiter.acquire().await;
                log.lock().unwrap().push(Instant::now());
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let mut times = log.lock().unwrap().clone();
    times.sort();
    assert_eq!(times.len(), 20);
    for pair in times.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(gap >= interval, "acquisitions only {:?} apart", gap);
    }

    // Nobody waited longer than the spacing requires.
    let elapsed = start.elapsed();
    assert!(elapsed >= interval * 19, "finished early: {:?}", elapsed);
    assert!(
        elapsed < interval * 20,
        "waited longer than needed: {:?}",
        elapsed
    );
}

#[tokio::test(start_paused = true)]
async fn test_acquire_cancelled() {
    let limiter = RateLimiter::new(Duration::from_secs(10));
    limiter.acquire().await;
    let recorded = limiter.last_acquired().await;

    let cancel = async {
        tokio::time::sleep(Duration::from_millis(20)).await;
    };
    let result = limiter.acquire_with_cancel(cancel).await;

    assert_eq!(result, Err(Cancelled));
    // A cancelled acquisition leaves no trace.
    assert_eq!(limiter.last_acquired().await, recorded);
}

#[tokio::test(start_paused = true)]
async fn test_acquire_with_cancel_succeeds_when_not_cancelled() {
    let limiter = RateLimiter::new(Duration::from_millis(50));
    let result = limiter
        .acquire_with_cancel(std::future::pending::<()>())
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cancelled_error_display() {
    let err = Cancelled;
    assert_eq!(err.to_string(), "operation cancelled");
}

#[test]
fn test_default_interval_is_one_second() {
    assert_eq!(
        RateLimiter::default().min_interval(),
        Duration::from_secs(1)
    );
}
