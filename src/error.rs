//! Crate error type.
//!
//! Scrape-specific conditions get their own variants; transport and JSON
//! failures pass through from `reqwest` / `serde_json`.

use thiserror::Error;

/// Errors produced while listing, expanding, or resolving channels.
#[derive(Error, Debug)]
pub enum Error {
    /// A listing/resolve payload did not deserialize into the expected shape.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A channel's stream page lacked the expected iframe marker.
    ///
    /// Hard failure only when a single channel is being resolved; batch
    /// resolution downgrades this to a skip.
    #[error("no iframe found on stream page: {0}")]
    IframeNotFound(String),

    /// A URL could not be parsed into scheme + authority.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
