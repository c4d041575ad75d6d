// ABOUTME: Fetch module - sequential retrieval of resolved catalog entries.
// ABOUTME: Provides filename sanitization, the orchestrator, and its report types.

mod orchestrator;
mod sanitize;

pub use orchestrator::{EntryReport, FetchOrchestrator, FetchOutcome, FetchReport};
pub use sanitize::{MAX_STEM_LEN, sanitize_file_stem, target_stem};

#[cfg(test)]
mod orchestrator_test;
