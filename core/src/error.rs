//! Error types for the todo API client.
//!
//! `NotFound` gets a dedicated variant because callers frequently
//! distinguish "the todo does not exist" from "the server returned an
//! unexpected status". All other non-2xx responses land in `Http` with the
//! raw status code and body for debugging.

use thiserror::Error;

/// Errors returned by the data-access layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}
