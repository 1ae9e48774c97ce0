use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::{LogLevel, LogMessage, TriggerMeta};
use crate::{
    ConnectorError, RuntimeConfig,
    flow::{
        auth::Credentials,
        node::{Node, is_blank},
        pin::PinType,
    },
    utils::http::{HttpRequest, HttpTransport, send_json},
};
use linkflow_types::{Map, Value, json};

/// Everything one invocation of a node sees: inputs, credentials, trigger
/// metadata, the clock and the outbound transport. Outputs and log entries
/// accumulate here and are handed back to the host afterwards.
pub struct ExecutionContext {
    node: Option<Arc<Node>>,
    inputs: Map<String, Value>,
    outputs: Map<String, Value>,
    credentials: Credentials,
    trigger: TriggerMeta,
    transport: Arc<dyn HttpTransport>,
    config: Arc<RuntimeConfig>,
    now: DateTime<Utc>,
    logs: Vec<LogMessage>,
}

impl ExecutionContext {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            node: None,
            inputs: Map::new(),
            outputs: Map::new(),
            credentials: Credentials::default(),
            trigger: TriggerMeta::default(),
            transport,
            config: Arc::new(RuntimeConfig::default()),
            now: Utc::now(),
            logs: Vec::new(),
        }
    }

    pub fn with_inputs(mut self, inputs: Map<String, Value>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_input(mut self, name: &str, value: Value) -> Self {
        self.inputs.insert(name.to_string(), value);
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_last_run(mut self, last_run: Option<DateTime<Utc>>) -> Self {
        self.trigger.last_run = last_run;
        self
    }

    pub fn with_trigger(mut self, trigger: TriggerMeta) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_config(mut self, config: Arc<RuntimeConfig>) -> Self {
        self.config = config;
        self
    }

    /// Pins the invocation clock; the host passes the scheduled tick here.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn attach_node(&mut self, node: Arc<Node>) {
        self.node = Some(node);
    }

    pub fn node(&self) -> Option<&Node> {
        self.node.as_deref()
    }

    pub fn node_name(&self) -> &str {
        self.node.as_ref().map(|n| n.name.as_str()).unwrap_or("unbound")
    }

    pub fn inputs(&self) -> &Map<String, Value> {
        &self.inputs
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn trigger(&self) -> &TriggerMeta {
        &self.trigger
    }

    pub fn last_run(&self) -> Option<DateTime<Utc>> {
        self.trigger.last_run
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn transport(&self) -> &dyn HttpTransport {
        self.transport.as_ref()
    }

    /// Rejects the credentials before anything touches the network.
    pub fn validate_credentials(&self) -> Result<(), ConnectorError> {
        let now_unix = self.now.timestamp().max(0) as u64;
        match &self.node {
            Some(node) => node.validate_credentials(&self.credentials, now_unix),
            None => Ok(()),
        }
    }

    pub fn validate_inputs(&self) -> Result<(), ConnectorError> {
        match &self.node {
            Some(node) => node.validate_inputs(&self.inputs),
            None => Ok(()),
        }
    }

    fn raw_pin(&self, pin: &str) -> Option<&Value> {
        match self.inputs.get(pin) {
            Some(value) if !is_blank(value) => Some(value),
            _ => self
                .node
                .as_ref()
                .and_then(|node| node.get_pin(pin, PinType::Input))
                .and_then(|pin| pin.default_value.as_ref()),
        }
    }

    /// Reads an input, falling back to the pin's default value.
    pub async fn evaluate_pin<T: DeserializeOwned>(&self, pin: &str) -> linkflow_types::Result<T> {
        let value = self
            .raw_pin(pin)
            .ok_or_else(|| ConnectorError::MissingInput(pin.to_string()))?;

        json::from_value(value.clone())
            .map_err(|e| ConnectorError::invalid_input(pin, e.to_string()).into())
    }

    /// Like `evaluate_pin`, but a blank or absent optional input is `None`.
    pub async fn evaluate_optional_pin<T: DeserializeOwned>(
        &self,
        pin: &str,
    ) -> linkflow_types::Result<Option<T>> {
        match self.raw_pin(pin) {
            Some(value) => json::from_value(value.clone())
                .map(Some)
                .map_err(|e| ConnectorError::invalid_input(pin, e.to_string()).into()),
            None => Ok(None),
        }
    }

    pub async fn set_pin_value(&mut self, pin: &str, value: Value) -> linkflow_types::Result<()> {
        if let Some(node) = &self.node {
            if node.get_pin(pin, PinType::Output).is_none() {
                return Err(linkflow_types::anyhow!(
                    "node '{}' has no output pin '{}'",
                    node.name,
                    pin
                ));
            }
        }

        self.outputs.insert(pin.to_string(), value);
        Ok(())
    }

    pub fn get_output(&self, pin: &str) -> Option<&Value> {
        self.outputs.get(pin)
    }

    pub fn take_outputs(&mut self) -> Value {
        Value::Object(std::mem::take(&mut self.outputs))
    }

    pub fn log_message(&mut self, message: &str, log_level: LogLevel) {
        let entry = LogMessage::new(self.node_name(), message, log_level);
        entry.trace();
        self.logs.push(entry);
    }

    pub fn logs(&self) -> &[LogMessage] {
        &self.logs
    }

    pub fn take_logs(&mut self) -> Vec<LogMessage> {
        std::mem::take(&mut self.logs)
    }

    /// Issues one request through the context's transport and decodes the JSON body.
    pub async fn send(&mut self, request: HttpRequest) -> linkflow_types::Result<Value> {
        self.log_message(
            &format!("{} {}", request.method, request.url),
            LogLevel::Debug,
        );

        match send_json(self.transport.as_ref(), request).await {
            Ok(value) => Ok(value),
            Err(err) => {
                self.log_message(&err.to_string(), LogLevel::Error);
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{pin::PinOptions, variable::VariableType};
    use crate::utils::http::MockTransport;
    use linkflow_types::json::json;

    fn node() -> Arc<Node> {
        let mut node = Node::new("ctx_test", "Ctx", "", "Test");
        node.add_input_pin("title", "Title", "", VariableType::String);
        node.add_input_pin("limit", "Limit", "", VariableType::Integer)
            .set_default_value(Some(json!(25)))
            .set_options(PinOptions::new().set_range((1.0, 100.0)).build());
        node.add_input_pin("notes", "Notes", "", VariableType::String)
            .set_optional();
        node.add_output_pin("id", "Id", "", VariableType::String);
        Arc::new(node)
    }

    fn context() -> ExecutionContext {
        let mut ctx = ExecutionContext::new(Arc::new(MockTransport::new()));
        ctx.attach_node(node());
        ctx
    }

    #[tokio::test]
    async fn evaluates_inputs_and_defaults() {
        let ctx = context().with_input("title", json!("Hello"));
        let title: String = ctx.evaluate_pin("title").await.unwrap();
        let limit: i64 = ctx.evaluate_pin("limit").await.unwrap();
        let notes: Option<String> = ctx.evaluate_optional_pin("notes").await.unwrap();

        assert_eq!(title, "Hello");
        assert_eq!(limit, 25);
        assert!(notes.is_none());
    }

    #[tokio::test]
    async fn missing_and_mistyped_inputs() {
        let ctx = context().with_input("limit", json!("many"));

        let err = ctx.evaluate_pin::<String>("title").await.unwrap_err();
        assert!(matches!(
            ConnectorError::find(&err),
            Some(ConnectorError::MissingInput(_))
        ));

        let err = ctx.evaluate_pin::<i64>("limit").await.unwrap_err();
        assert!(matches!(
            ConnectorError::find(&err),
            Some(ConnectorError::InvalidInput { .. })
        ));
    }

    #[tokio::test]
    async fn outputs_must_be_declared() {
        let mut ctx = context();
        ctx.set_pin_value("id", json!("42")).await.unwrap();
        assert!(ctx.set_pin_value("nope", json!(1)).await.is_err());
        assert_eq!(ctx.take_outputs(), json!({"id": "42"}));
    }

    #[tokio::test]
    async fn send_logs_and_returns_body() {
        let mock = Arc::new(MockTransport::new());
        mock.respond_json(200, json!({"id": "1"}));

        let mut ctx = ExecutionContext::new(mock.clone());
        let body = ctx.send(HttpRequest::get("https://api.test/x")).await.unwrap();

        assert_eq!(body, json!({"id": "1"}));
        assert_eq!(mock.call_count(), 1);
        assert_eq!(ctx.logs().len(), 1);
        assert_eq!(ctx.logs()[0].log_level, LogLevel::Debug);
        assert_eq!(ctx.logs()[0].node, "unbound");
    }

    #[tokio::test]
    async fn send_failure_is_logged_as_error() {
        let mock = Arc::new(MockTransport::new());
        mock.respond_raw(403, "forbidden");

        let mut ctx = ExecutionContext::new(mock.clone());
        ctx.attach_node(node());

        let err = ctx.send(HttpRequest::get("https://api.test/x")).await.unwrap_err();
        assert!(matches!(
            ConnectorError::find(&err),
            Some(ConnectorError::HttpStatus { status: 403, .. })
        ));
        assert_eq!(ctx.take_logs().last().map(|l| l.log_level), Some(LogLevel::Error));
    }
}
