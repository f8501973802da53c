//! Verify request assembly and envelope normalization against the JSON test
//! vectors in `test-vectors/`.
//!
//! Each vector describes a request, the request the transport should see, a
//! simulated response (or fault), and the expected envelope. Comparing parsed
//! JSON (not raw strings) avoids false negatives from field ordering.

use std::sync::Mutex;

use async_trait::async_trait;
use request_core::{
    build_request, Headers, HttpMethod, HttpRequest, Request, RequestClient, Transport,
    TransportError, TransportResponse,
};
use serde_json::Value;

/// Replays one simulated response and records the request it was given.
struct ScriptedTransport {
    reply: Result<ScriptedResponse, TransportError>,
    sent: Mutex<Vec<HttpRequest>>,
}

#[derive(Clone)]
struct ScriptedResponse {
    status: u16,
    headers: Headers,
    body: Result<String, TransportError>,
}

#[async_trait]
impl TransportResponse for ScriptedResponse {
    fn status(&self) -> u16 {
        self.status
    }

    fn headers(&self) -> &Headers {
        &self.headers
    }

    async fn text(self) -> Result<String, TransportError> {
        self.body
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    type Response = ScriptedResponse;

    async fn send(&self, request: HttpRequest) -> Result<ScriptedResponse, TransportError> {
        self.sent.lock().unwrap().push(request);
        self.reply.clone()
    }
}

fn header_pairs(value: &Value) -> Headers {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let pair = pair.as_array().unwrap();
            (pair[0].as_str().unwrap(), pair[1].as_str().unwrap())
        })
        .collect()
}

/// Build a fault of the kind named in a vector. Defaults to a connection
/// failure when no kind is given.
fn fault(kind: Option<&Value>, message: &Value) -> TransportError {
    let message = message.as_str().unwrap().to_string();
    match kind.and_then(Value::as_str).unwrap_or("connection") {
        "connection" => TransportError::Connection(message),
        "invalid_request" => TransportError::InvalidRequest(message),
        "body" => TransportError::Body(message),
        "decode" => TransportError::Decode(message),
        "other" => TransportError::Other(message),
        other => panic!("unknown fault kind: {other}"),
    }
}

fn scripted(case: &Value) -> ScriptedTransport {
    let reply = match case.get("simulated_fault") {
        Some(message) => Err(fault(case.get("simulated_fault_kind"), message)),
        None => {
            let sim = &case["simulated_response"];
            let body = match sim.get("body_fault") {
                Some(message) => Err(fault(sim.get("body_fault_kind"), message)),
                None => Ok(sim["body"].as_str().unwrap().to_string()),
            };
            Ok(ScriptedResponse {
                status: sim["status"].as_u64().unwrap() as u16,
                headers: header_pairs(&sim["headers"]),
                body,
            })
        }
    };
    ScriptedTransport {
        reply,
        sent: Mutex::new(Vec::new()),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    let method: HttpMethod = expected["method"].as_str().unwrap().parse().unwrap();
    assert_eq!(req.method, method, "{name}: method");
    assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");
    assert_eq!(req.headers, header_pairs(&expected["headers"]), "{name}: headers");

    let body = req
        .body
        .as_deref()
        .map(|b| serde_json::from_str::<Value>(b).unwrap())
        .unwrap_or(Value::Null);
    assert_eq!(body, expected["body"], "{name}: body");
}

fn load_cases() -> Vec<Value> {
    let raw = include_str!("../../test-vectors/execute.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

#[tokio::test]
async fn execute_test_vectors() {
    for case in load_cases() {
        let name = case["name"].as_str().unwrap();
        let request: Request = serde_json::from_value(case["request"].clone()).unwrap();

        // Verify build
        assert_request(name, &build_request(&request), &case["expected_request"]);

        // Verify exchange
        let client = RequestClient::new(scripted(&case));
        let envelope = client.execute(&request).await;
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            case["expected_envelope"],
            "{name}: envelope"
        );

        let sent = client.transport().sent.lock().unwrap();
        assert_eq!(sent.len(), 1, "{name}: exactly one exchange");
        assert_request(name, &sent[0], &case["expected_request"]);
    }
}

#[tokio::test]
async fn identical_requests_yield_identical_envelopes() {
    for case in load_cases() {
        let name = case["name"].as_str().unwrap();
        let request: Request = serde_json::from_value(case["request"].clone()).unwrap();
        let client = RequestClient::new(scripted(&case));

        let first = client.execute(&request).await;
        let second = client.execute(&request).await;
        assert_eq!(first, second, "{name}");
    }
}

/// A non-2xx status never escapes as anything but an envelope carrying the
/// real status; there is no path that returns a bare, unwrapped value.
#[tokio::test]
async fn every_outcome_has_envelope_shape() {
    for case in load_cases() {
        let name = case["name"].as_str().unwrap();
        let request: Request = serde_json::from_value(case["request"].clone()).unwrap();
        let envelope = RequestClient::new(scripted(&case)).execute(&request).await;

        let json = serde_json::to_value(&envelope).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 4, "{name}");
        for key in ["ok", "body", "status", "headers"] {
            assert!(json.get(key).is_some(), "{name}: {key}");
        }
        assert_eq!(envelope.ok, (200..300).contains(&envelope.status), "{name}");
    }
}
