//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by a `PairSource`.
///
/// The assembler never surfaces these; it logs them and falls back to local
/// pair synthesis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PairSourceError {
    #[error("pair source is not configured")]
    Disabled,
    #[error("pair source returned an empty response")]
    EmptyResponse,
    #[error("pair source request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("pair source payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}
