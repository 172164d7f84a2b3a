//! Error types for the catalog API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because views distinguish "the book is
//! gone" from "the server misbehaved." All other unexpected statuses land in
//! `Http` with the raw status code and body for diagnostics. `Validation`
//! covers form data rejected before any request is built.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by `CatalogClient` parse methods, `Catalog` resource
/// access functions, and `Transport` implementations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested book or review does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the expected one or 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialize(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialize(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// Form data failed client-side validation; no request was sent.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
