// ABOUTME: YtDlpFetcher - downloads audio for a video id with the yt-dlp program.
// ABOUTME: Returns the post-processed file path that yt-dlp prints on success.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;

use super::{FetchCapability, watch_url};
use crate::error::CapabilityError;

/// Fetch capability that shells out to `yt-dlp`.
pub struct YtDlpFetcher {
    program: PathBuf,
    audio_format: String,
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

impl YtDlpFetcher {
    /// Create a fetcher that runs `program`, extracting to wav.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            audio_format: "wav".to_string(),
        }
    }

    /// Set the audio format passed to `--audio-format`.
    pub fn audio_format(mut self, format: impl Into<String>) -> Self {
        self.audio_format = format.into();
        self
    }

    fn args(&self, identifier: &str, target: &Path) -> Vec<OsString> {
        let mut template = target.as_os_str().to_owned();
        template.push(".%(ext)s");

        let mut args: Vec<OsString> = [
            "--format",
            "bestaudio/best",
            "--extract-audio",
            "--audio-format",
            self.audio_format.as_str(),
            "--audio-quality",
            "0",
            "--geo-bypass",
            "--quiet",
            "--no-warnings",
            "--no-simulate",
            "--print",
            "after_move:filepath",
            "--output",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(template);
        args.push("--".into());
        args.push(watch_url(identifier).into());
        args
    }

    fn final_path(stdout: &str) -> Option<PathBuf> {
        stdout
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .map(PathBuf::from)
    }
}

#[async_trait]
impl FetchCapability for YtDlpFetcher {
    async fn fetch(&self, identifier: &str, target: &Path) -> Result<PathBuf, CapabilityError> {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(self.args(identifier, target));
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            return Err(CapabilityError::Process {
                program: self.program.display().to_string(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Self::final_path(&stdout).ok_or_else(|| {
            CapabilityError::Unexpected(format!("no output file reported for video {identifier}"))
        })
    }
}
