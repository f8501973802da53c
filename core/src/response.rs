//! The normalized envelope returned for every exchange outcome.
//!
//! # Design
//! Success, remote error and transport fault all produce the same
//! `Response` shape. A fault is told apart only by `status == 900`, which no
//! real HTTP status can take, and by a `Body::Fault` payload.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::TransportError;

/// Status reserved for local transport failures.
pub const TRANSPORT_FAULT_STATUS: u16 = 900;

/// Decoded response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// The response content type was JSON.
    Json(Value),
    /// Any other content type, read as text.
    Text(String),
    /// The exchange did not complete.
    Fault(TransportError),
}

impl Body {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_fault(&self) -> Option<&TransportError> {
        match self {
            Body::Fault(err) => Some(err),
            _ => None,
        }
    }
}

impl Serialize for Body {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Body::Json(value) => value.serialize(serializer),
            Body::Text(text) => serializer.serialize_str(text),
            Body::Fault(err) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", &err.to_string())?;
                map.end()
            }
        }
    }
}

/// Envelope returned by `RequestClient::execute`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub ok: bool,
    pub body: Body,
    pub status: u16,
    pub headers: BTreeMap<String, String>,
}

impl Response {
    /// Envelope for an exchange that never produced an HTTP response.
    pub fn fault(err: TransportError) -> Self {
        Self {
            ok: false,
            body: Body::Fault(err),
            status: TRANSPORT_FAULT_STATUS,
            headers: BTreeMap::new(),
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self.body, Body::Fault(_))
    }
}

/// Statuses a remote can legitimately answer with. Anything else is treated
/// as a transport fault so it never lands on `TRANSPORT_FAULT_STATUS`.
pub fn is_valid_status(status: u16) -> bool {
    (100..600).contains(&status)
}

/// True for the conventional success range, 200 through 299.
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
