use std::collections::VecDeque;
use std::sync::Mutex;

use super::{HttpRequest, HttpResponse, HttpTransport};
use crate::ConnectorError;
use linkflow_types::{Value, async_trait, json::json};

/// In-memory transport that records requests and replays queued responses.
/// Unqueued calls answer `200 {}`.
#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<HttpResponse, ConnectorError>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_json(&self, status: u16, body: Value) -> &Self {
        self.push(Ok(HttpResponse::json(status, &body)))
    }

    pub fn respond_raw(&self, status: u16, body: &str) -> &Self {
        self.push(Ok(HttpResponse::new(status, body.to_string())))
    }

    pub fn respond_error(&self, error: ConnectorError) -> &Self {
        self.push(Err(error))
    }

    fn push(&self, response: Result<HttpResponse, ConnectorError>) -> &Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .map(|requests| requests.len())
            .unwrap_or_default()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests().pop()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ConnectorError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let queued = self
            .responses
            .lock()
            .ok()
            .and_then(|mut responses| responses.pop_front());

        queued.unwrap_or_else(|| Ok(HttpResponse::json(200, &json!({}))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::http::send_json;

    #[tokio::test]
    async fn replays_in_order_then_defaults() {
        let mock = MockTransport::new();
        mock.respond_json(200, json!({"n": 1}))
            .respond_raw(500, "boom");

        let first = send_json(&mock, HttpRequest::get("https://a.test/1")).await;
        let second = send_json(&mock, HttpRequest::get("https://a.test/2")).await;
        let third = send_json(&mock, HttpRequest::get("https://a.test/3")).await;

        assert_eq!(first.unwrap(), json!({"n": 1}));
        assert!(matches!(second, Err(ConnectorError::HttpStatus { status: 500, .. })));
        assert_eq!(third.unwrap(), json!({}));
        assert_eq!(mock.call_count(), 3);
        assert_eq!(mock.last_request().map(|r| r.url), Some("https://a.test/3".to_string()));
    }

    #[tokio::test]
    async fn queued_errors_surface() {
        let mock = MockTransport::new();
        mock.respond_error(ConnectorError::Network("connection reset".into()));

        let err = send_json(&mock, HttpRequest::get("https://a.test")).await.unwrap_err();
        assert!(matches!(err, ConnectorError::Network(_)));
    }
}
