//! Error types for the request client.
//!
//! # Design
//! `TransportError` is never returned from `RequestClient::execute`; it is
//! carried inside the fault envelope (status 900) instead. Variants hold
//! rendered messages rather than source errors so envelopes stay `Clone` and
//! comparable.

use thiserror::Error;

/// A failure to complete the exchange at the network or protocol level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// DNS failure, refused or reset connection.
    #[error("connection error: {0}")]
    Connection(String),

    /// The request could not be built (bad URL, invalid header name or value).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The response body stream failed before completion.
    #[error("body error: {0}")]
    Body(String),

    /// The response advertised JSON but the payload did not parse.
    #[error("decode error: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            TransportError::InvalidRequest(err.to_string())
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else if err.is_body() {
            TransportError::Body(err.to_string())
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Decode(err.to_string())
    }
}

/// Returned when parsing a method name outside GET, POST, PUT, PATCH, DELETE.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported HTTP method: {0}")]
pub struct InvalidMethod(pub String);
