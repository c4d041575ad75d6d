// ABOUTME: Root module for tunefetch - rate-limited song resolution and fetching.
// ABOUTME: Re-exports the public types of the catalog, coordinator, and fetch layers.

pub mod capability;
pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod playlist;
pub mod prelude;

pub use error::TunefetchError;
