//! Error kinds for the ask-author core.
//!
//! Every failure path maps to a distinct variant so callers can tell a bad
//! configuration from a failed corpus load from a failed generation call.
//! The tokenizer and retriever are infallible; they have no variant here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AskError {
    /// Invalid or unrecognized configuration. Fatal at startup, never retried.
    #[error("configuration error: {0}")]
    Config(String),

    /// The corpus could not be fetched or parsed. Fatal at startup — the
    /// process cannot serve without its document snapshot.
    #[error("corpus load error: {0}")]
    CorpusLoad(String),

    /// The hosted generation call failed or returned a malformed response.
    /// Surfaced to the caller as a failed generation; not retried internally.
    #[error("generation service error: {0}")]
    Generation(String),
}

pub type Result<T> = std::result::Result<T, AskError>;
