// ABOUTME: Capability module - the external search and fetch collaborators.
// ABOUTME: Traits for the core plus YouTube search and yt-dlp fetch implementations.

mod traits;
mod youtube;
mod ytdlp;

pub use traits::{FetchCapability, SearchCapability};
pub use youtube::{YoutubeSearch, parse_video_id, watch_url};
pub use ytdlp::YtDlpFetcher;
