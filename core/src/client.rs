//! One-shot HTTP exchange that always resolves to a `Response` envelope.
//!
//! # Design
//! `RequestClient` holds only its transport and carries no mutable state
//! between calls, so concurrent calls are independent. `execute` is split
//! into `build_request` (header assembly and body encoding, no I/O) and an
//! exchange step that yields an `Exchange` variant. Every variant maps to
//! the same envelope shape, so the caller branches on `ok` and `status`
//! instead of handling errors.

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::TransportError;
use crate::helpers::{
    combine_cookies, content_is, content_set_default, DEFAULT_CONTENT_TYPE, JSON_CONTENT_TYPE,
};
use crate::http::{Headers, HttpRequest};
use crate::request::Request;
use crate::response::{is_success, is_valid_status, Body, Response};
use crate::transport::{Transport, TransportResponse};

/// Stateless client that runs requests through a `Transport`.
#[derive(Debug, Clone, Default)]
pub struct RequestClient<T> {
    transport: T,
}

#[cfg(feature = "reqwest")]
impl RequestClient<crate::transport::ReqwestTransport> {
    /// Client over a default `reqwest::Client`.
    pub fn reqwest() -> Self {
        Self::new(crate::transport::ReqwestTransport::new())
    }
}

impl<T: Transport> RequestClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform one exchange. Never fails: remote errors keep their real
    /// status and headers, transport faults become status 900.
    pub async fn execute(&self, request: &Request) -> Response {
        request_server(&self.transport, request).await
    }
}

/// Run `request` through `transport` once and normalize the outcome.
pub async fn request_server<T: Transport>(transport: &T, request: &Request) -> Response {
    let http_request = build_request(request);
    debug!(method = %http_request.method, url = %http_request.url, "sending request");
    exchange(transport, http_request).await.into()
}

/// Assemble the outgoing request: merged cookies, default content type and
/// JSON body encoding.
///
/// A body is encoded only when the outgoing content type is JSON; with any
/// other content type the structured body is dropped.
pub fn build_request(request: &Request) -> HttpRequest {
    let mut headers: Headers = request.headers.iter().flatten().collect();

    let cookie = combine_cookies(&[headers.get("cookie").as_deref(), request.cookies.as_deref()]);
    headers.set("cookie", &cookie);
    content_set_default(&mut headers, DEFAULT_CONTENT_TYPE);

    let body = match &request.body {
        Some(body) if content_is(&headers, JSON_CONTENT_TYPE) => {
            Some(Value::Object(body.clone()).to_string())
        }
        _ => None,
    };

    HttpRequest {
        method: request.method,
        url: request.url.clone(),
        headers,
        body,
    }
}

/// Outcome of a single exchange before it is flattened into an envelope.
#[derive(Debug)]
enum Exchange {
    Success(Response),
    RemoteError(Response),
    TransportFault(TransportError),
}

impl From<Exchange> for Response {
    fn from(exchange: Exchange) -> Self {
        match exchange {
            Exchange::Success(response) | Exchange::RemoteError(response) => response,
            Exchange::TransportFault(err) => Response::fault(err),
        }
    }
}

async fn exchange<T: Transport>(transport: &T, request: HttpRequest) -> Exchange {
    let url = request.url.clone();
    match send_and_decode(transport, request).await {
        Ok(response) if response.ok => {
            debug!(%url, status = response.status, "request succeeded");
            Exchange::Success(response)
        }
        Ok(response) => {
            debug!(%url, status = response.status, "remote returned error status");
            Exchange::RemoteError(response)
        }
        Err(err) => {
            warn!(%url, error = %err, "transport fault");
            Exchange::TransportFault(err)
        }
    }
}

async fn send_and_decode<T: Transport>(
    transport: &T,
    request: HttpRequest,
) -> Result<Response, TransportError> {
    let response = transport.send(request).await?;

    let status = response.status();
    if !is_valid_status(status) {
        return Err(TransportError::Other(format!("invalid status code: {status}")));
    }
    let headers = response.headers().to_map();
    let is_json = content_is(response.headers(), JSON_CONTENT_TYPE);

    let text = response.text().await?;
    let body = if is_json {
        Body::Json(serde_json::from_str(&text)?)
    } else {
        Body::Text(text)
    };

    Ok(Response {
        ok: is_success(status),
        body,
        status,
        headers,
    })
}
