use std::{path::PathBuf, time::Duration};

use thiserror::Error;

/// Everything that can go wrong while checking or downloading mods.
///
/// Only [`Error::MissingFile`] stops a run. The rest are reported and
/// recovered from at the level of a single mod or the checkpoint. Probe
/// failures have their own [`ProbeError`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("The file {} does not exist.", .0.display())]
    MissingFile(PathBuf),

    #[error("Invalid date format in {}: {reason}", .path.display())]
    CheckpointParse { path: PathBuf, reason: String },

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Download timeout exceeded after {} seconds", .0.as_secs())]
    DownloadTimeout(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a single mod page could not be turned into a date.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("invalid mod URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no '{0}' element on the page")]
    MissingContainer(&'static str),

    #[error("no last update date inside '{0}'")]
    MissingDate(&'static str),

    #[error("unparsable date '{text}': {source}")]
    BadDate {
        text: String,
        source: chrono::ParseError,
    },
}

impl From<fantoccini::error::CmdError> for Error {
    fn from(e: fantoccini::error::CmdError) -> Self {
        Error::Download(e.to_string())
    }
}

impl From<fantoccini::error::NewSessionError> for Error {
    fn from(e: fantoccini::error::NewSessionError) -> Self {
        Error::Download(format!("could not start browser session: {}", e))
    }
}
