use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::sync::Arc;

use crate::{ConnectorError, RuntimeConfig};
use linkflow_types::{
    Bytes, Value, async_trait,
    reqwest::{self, Method},
};

pub mod mock;

pub use mock::MockTransport;

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Form(Vec<(String, String)>),
}

/// Transport-agnostic description of one outbound API call
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.push((key.to_string(), value.into()));
        self
    }

    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {}", token))
    }

    pub fn basic_auth(self, username: &str, password: &str) -> Self {
        let encoded = STANDARD.encode(format!("{}:{}", username, password));
        self.header("Authorization", format!("Basic {}", encoded))
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = Some(RequestBody::Form(fields));
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            Some(RequestBody::Json(value)) => Some(value),
            _ => None,
        }
    }

    pub fn form_value(&self, key: &str) -> Option<&str> {
        match &self.body {
            Some(RequestBody::Form(fields)) => fields
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ConnectorError>;
}

/// `reqwest`-backed transport sharing one connection pool
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &RuntimeConfig) -> Result<Self, ConnectorError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ConnectorError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn shared(config: &RuntimeConfig) -> Result<Arc<dyn HttpTransport>, ConnectorError> {
        Ok(Arc::new(Self::new(config)?))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ConnectorError> {
        let mut builder = self.client.request(request.method, &request.url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        builder = match request.body {
            Some(RequestBody::Json(body)) => builder.json(&body),
            Some(RequestBody::Form(fields)) => builder.form(&fields),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ConnectorError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ConnectorError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

/// Executes `request` and applies the uniform response policy: non-2xx is
/// `HttpStatus`, an unparsable body is `Decode`, an empty body is `null`.
pub async fn send_json(
    transport: &dyn HttpTransport,
    request: HttpRequest,
) -> Result<Value, ConnectorError> {
    let response = transport.execute(request).await?;

    if !response.is_success() {
        return Err(ConnectorError::HttpStatus {
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        });
    }

    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    linkflow_types::json::from_slice(&response.body).map_err(|e| ConnectorError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkflow_types::json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(&RuntimeConfig::default()).unwrap()
    }

    #[test]
    fn basic_auth_is_base64() {
        let request = HttpRequest::get("https://example.test").basic_auth("me@example.com", "tok");
        assert_eq!(
            request.header_value("authorization"),
            Some("Basic bWVAZXhhbXBsZS5jb206dG9r")
        );
    }

    #[tokio::test]
    async fn sends_query_headers_and_json() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/items"))
            .and(query_param("since", "2024-01-01T00:00:00Z"))
            .and(header("Authorization", "Bearer secret"))
            .and(body_json(json!({"name": "x"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let request = HttpRequest::post(format!("{}/v1/items", server.uri()))
            .query("since", "2024-01-01T00:00:00Z")
            .bearer_auth("secret")
            .json(json!({"name": "x"}));

        let value = send_json(&transport(), request).await.unwrap();
        assert_eq!(value, json!({"ok": true}));
    }

    #[tokio::test]
    async fn non_success_is_http_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
            .mount(&server)
            .await;

        let err = send_json(&transport(), HttpRequest::get(server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ConnectorError::HttpStatus { status: 401, ref body } if body == "bad token"
        ));
    }

    #[tokio::test]
    async fn garbage_body_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = send_json(&transport(), HttpRequest::get(server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectorError::Decode(_)));
    }

    #[tokio::test]
    async fn empty_body_is_null() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let value = send_json(&transport(), HttpRequest::delete(server.uri()))
            .await
            .unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let err = send_json(&transport(), HttpRequest::get("http://127.0.0.1:9/nothing"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectorError::Network(_)));
    }
}
