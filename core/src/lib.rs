//! Minimal HTTP request helper with a uniform response envelope.
//!
//! # Overview
//! `RequestClient::execute` takes a declarative `Request`, performs one HTTP
//! exchange through an injected `Transport`, and always resolves to a
//! `Response`. Remote error statuses and transport faults come back in the
//! same shape; a fault is marked by the reserved status 900.
//!
//! # Design
//! - `RequestClient` is stateless; it holds only its transport.
//! - Request assembly (`build_request`) is pure, so header, cookie and body
//!   rules are testable without I/O.
//! - The transport is a trait. `ReqwestTransport` is the default backend
//!   behind the `reqwest` feature; tests inject scripted transports.
//! - No retries, timeouts or caching are added on top of the transport.

pub mod client;
pub mod error;
pub mod helpers;
pub mod http;
pub mod request;
pub mod response;
pub mod transport;

pub use client::{build_request, request_server, RequestClient};
pub use error::{InvalidMethod, TransportError};
pub use helpers::{combine_cookies, content_is, content_set_default};
pub use http::{Headers, HttpMethod, HttpRequest};
pub use request::Request;
pub use response::{Body, Response, TRANSPORT_FAULT_STATUS};
#[cfg(feature = "reqwest")]
pub use transport::{ReqwestResponse, ReqwestTransport};
pub use transport::{Transport, TransportResponse};
