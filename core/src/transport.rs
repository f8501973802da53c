//! The injected HTTP capability the client runs its exchange through.
//!
//! # Design
//! The exchange has two suspension points: `Transport::send` resolves once
//! status and headers are in, and `TransportResponse::text` reads the body
//! to completion. JSON parsing stays in the client so every transport gets
//! the same decode rules.
//!
//! `ReqwestTransport` is the production implementation. Tests pass their
//! own scripted transports.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{Headers, HttpRequest};

/// Performs a single HTTP exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    type Response: TransportResponse;

    /// Send `request` and resolve once the response head has arrived.
    async fn send(&self, request: HttpRequest) -> Result<Self::Response, TransportError>;
}

/// A response whose head has arrived but whose body is still unread.
#[async_trait]
pub trait TransportResponse: Send {
    fn status(&self) -> u16;

    fn headers(&self) -> &Headers;

    /// Read the whole body as text.
    async fn text(self) -> Result<String, TransportError>;
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::{ReqwestResponse, ReqwestTransport};

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use async_trait::async_trait;

    use super::{Transport, TransportResponse};
    use crate::error::TransportError;
    use crate::http::{Headers, HttpMethod, HttpRequest};

    /// `Transport` backed by a `reqwest::Client`.
    ///
    /// No timeout is configured here; pass a preconfigured client through
    /// `from_client` to change transport behavior.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn from_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        type Response = ReqwestResponse;

        async fn send(&self, request: HttpRequest) -> Result<Self::Response, TransportError> {
            let mut builder = self
                .client
                .request(to_reqwest_method(request.method), &request.url);
            for (name, value) in request.headers.iter() {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let headers = response
                .headers()
                .iter()
                .map(|(k, v)| (k.as_str(), String::from_utf8_lossy(v.as_bytes())))
                .collect();

            Ok(ReqwestResponse {
                status: response.status().as_u16(),
                headers,
                inner: response,
            })
        }
    }

    /// Response head from reqwest with the body still pending.
    #[derive(Debug)]
    pub struct ReqwestResponse {
        status: u16,
        headers: Headers,
        inner: reqwest::Response,
    }

    #[async_trait]
    impl TransportResponse for ReqwestResponse {
        fn status(&self) -> u16 {
            self.status
        }

        fn headers(&self) -> &Headers {
            &self.headers
        }

        async fn text(self) -> Result<String, TransportError> {
            Ok(self.inner.text().await?)
        }
    }

}
