//! Deterministic HTTP server used to exercise the request client end to end.
//!
//! Every route returns a fixed payload except `/echo`, which reports back
//! what it received so tests can observe the outgoing request.

use axum::{
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;

/// Header stamped on every response.
pub const SERVER_HEADER: &str = "x-mock-server";

/// What `/echo` saw of the incoming request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub content_type: Option<String>,
    pub cookie: Option<String>,
    pub body: Option<String>,
}

pub fn app() -> Router {
    Router::new()
        .route("/json", get(json_message))
        .route("/text", get(plain_text))
        .route("/missing", get(missing))
        .route("/teapot", get(teapot))
        .route("/broken-json", get(broken_json))
        .route("/echo", any(echo))
        .layer(middleware::map_response(stamp_server_header))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn stamp_server_header(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(SERVER_HEADER, HeaderValue::from_static("1"));
    response
}

async fn json_message() -> Json<serde_json::Value> {
    Json(json!({ "message": "hello" }))
}

async fn plain_text() -> &'static str {
    "plain text"
}

async fn missing() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}

async fn teapot() -> (StatusCode, &'static str) {
    (StatusCode::IM_A_TEAPOT, "short and stout")
}

async fn broken_json() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], "not json")
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Echo> {
    let text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    tracing::debug!(%method, "echo");
    Json(Echo {
        method: method.to_string(),
        content_type: text(header::CONTENT_TYPE),
        cookie: text(header::COOKIE),
        body: (!body.is_empty()).then_some(body),
    })
}
