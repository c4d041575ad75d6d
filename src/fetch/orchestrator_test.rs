// ABOUTME: Tests for the fetch orchestrator - ordering, isolation, and skips.
// ABOUTME: A recording fake fetcher writes nothing but logs every attempt.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio_test::assert_ok;

use super::{FetchOrchestrator, FetchOutcome};
use crate::capability::FetchCapability;
use crate::catalog::{Catalog, CatalogEntry};
use crate::error::{CapabilityError, FetchError};

#[derive(Default)]
struct RecordingFetcher {
    attempts: Mutex<Vec<(String, PathBuf)>>,
    fail_ids: Vec<String>,
    panic_ids: Vec<String>,
}

impl RecordingFetcher {
    fn failing(ids: &[&str]) -> Self {
        Self {
            fail_ids: ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    fn panicking(ids: &[&str]) -> Self {
        Self {
            panic_ids: ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    fn attempts(&self) -> Vec<(String, PathBuf)> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl FetchCapability for RecordingFetcher {
    async fn fetch(&self, identifier: &str, target: &Path) -> Result<PathBuf, CapabilityError> {
        self.attempts
            .lock()
            .unwrap()
            .push((identifier.to_string(), target.to_path_buf()));
        if self.panic_ids.iter().any(|id| id == identifier) {
            panic!("fetcher blew up on {identifier}");
        }
        if self.fail_ids.iter().any(|id| id == identifier) {
            return Err(CapabilityError::Unexpected(format!(
                "video {identifier} unavailable"
            )));
        }
        let mut path = target.as_os_str().to_owned();
        path.push(".wav");
        Ok(PathBuf::from(path))
    }
}

fn resolved_catalog() -> Catalog {
    vec![
        CatalogEntry::resolved("First Song", "id-1"),
        CatalogEntry::resolved("Second Song", "id-2"),
        CatalogEntry::resolved("Third Song", "id-3"),
    ]
    .into_iter()
    .collect()
}

#[tokio::test]
async fn test_continues_past_failure() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(RecordingFetcher::failing(&["id-2"]));
    let orchestrator = FetchOrchestrator::new(fetcher.clone());

    let report = assert_ok!(orchestrator.fetch_all(&resolved_catalog(), dir.path()).await);

    assert_eq!(fetcher.attempts().len(), 3);
    assert_eq!(report.fetched(), 2);
    assert_eq!(report.failed(), 1);
    assert!(matches!(report.entries[0].outcome, FetchOutcome::Fetched { .. }));
    assert!(matches!(
        &report.entries[1].outcome,
        FetchOutcome::Failed { message } if message.contains("id-2")
    ));
    assert!(matches!(report.entries[2].outcome, FetchOutcome::Fetched { .. }));
}

#[tokio::test]
async fn test_panicking_fetch_is_contained() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(RecordingFetcher::panicking(&["id-2"]));
    let orchestrator = FetchOrchestrator::new(fetcher.clone());

    let report = assert_ok!(orchestrator.fetch_all(&resolved_catalog(), dir.path()).await);

    let ids: Vec<_> = fetcher.attempts().into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["id-1", "id-2", "id-3"]);
    assert_eq!(report.fetched(), 2);
    assert_eq!(
        report.entries[1].outcome,
        FetchOutcome::Failed {
            message: "fetch capability panicked".to_string()
        }
    );
    assert!(matches!(report.entries[2].outcome, FetchOutcome::Fetched { .. }));
}

#[tokio::test]
async fn test_attempts_follow_catalog_order_and_targets() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(RecordingFetcher::default());
    let orchestrator = FetchOrchestrator::new(fetcher.clone());

    let report = orchestrator
        .fetch_all(&resolved_catalog(), dir.path())
        .await
        .unwrap();

    let attempts = fetcher.attempts();
    let ids: Vec<_> = attempts.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["id-1", "id-2", "id-3"]);
    assert_eq!(attempts[0].1, dir.path().join("First Song"));
    assert_eq!(
        report.entries[0].outcome,
        FetchOutcome::Fetched {
            path: dir.path().join("First Song.wav")
        }
    );
}

#[tokio::test]
async fn test_unresolved_entries_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(RecordingFetcher::default());
    let orchestrator = FetchOrchestrator::new(fetcher.clone());
    let catalog: Catalog = vec![
        CatalogEntry::new("Nobody Found Me"),
        CatalogEntry::resolved("Found", "id-f"),
    ]
    .into_iter()
    .collect();

    let report = orchestrator.fetch_all(&catalog, dir.path()).await.unwrap();

    assert_eq!(report.skipped(), 1);
    assert_eq!(report.fetched(), 1);
    assert_eq!(report.attempted(), 1);
    assert_eq!(report.entries[0].resolved_id, None);
    assert_eq!(fetcher.attempts().len(), 1);
}

#[tokio::test]
async fn test_unsafe_name_uses_sanitized_or_identifier_target() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(RecordingFetcher::default());
    let orchestrator = FetchOrchestrator::new(fetcher.clone());
    let catalog: Catalog = vec![
        CatalogEntry::resolved("AC/DC: Back in Black?", "id-acdc"),
        CatalogEntry::resolved("***", "id-stars"),
    ]
    .into_iter()
    .collect();

    orchestrator.fetch_all(&catalog, dir.path()).await.unwrap();

    let attempts = fetcher.attempts();
    assert_eq!(attempts[0].1, dir.path().join("ACDC Back in Black"));
    assert_eq!(attempts[1].1, dir.path().join("id-stars"));
}

#[tokio::test]
async fn test_creates_destination_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("music").join("friday");
    let orchestrator = FetchOrchestrator::new(Arc::new(RecordingFetcher::default()));

    orchestrator
        .fetch_all(&resolved_catalog(), &nested)
        .await
        .unwrap();

    assert!(nested.is_dir());
}

#[tokio::test]
async fn test_uncreatable_destination_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file").unwrap();
    let fetcher = Arc::new(RecordingFetcher::default());
    let orchestrator = FetchOrchestrator::new(fetcher.clone());

    let err = orchestrator
        .fetch_all(&resolved_catalog(), &blocker.join("inside"))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Destination { .. }));
    assert!(fetcher.attempts().is_empty());
}

#[tokio::test]
async fn test_report_display_and_failures() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = FetchOrchestrator::new(Arc::new(RecordingFetcher::failing(&["id-3"])));
    let mut catalog = resolved_catalog();
    catalog.push(CatalogEntry::new("Unresolved"));

    let report = orchestrator.fetch_all(&catalog, dir.path()).await.unwrap();

    assert_eq!(report.to_string(), "2 fetched, 1 failed, 1 skipped");
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "Third Song");
}
