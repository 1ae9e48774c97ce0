//! Shared "since last run" polling used by every polling trigger.
//!
//! A trigger supplies the JSON pointer of the record array and a closure
//! turning the lower bound into a request; the poller resolves the bound,
//! issues exactly one request and hands back the records together with the
//! timestamp the host should persist.

use chrono::{DateTime, Utc};
use std::time::Duration;

use super::execution::{LogLevel, context::ExecutionContext};
use crate::{ConnectorError, utils::http::HttpRequest};
use linkflow_types::{Value, json::json};

/// `last_run` verbatim when present, otherwise `now - lookback`.
pub fn lower_bound(
    last_run: Option<DateTime<Utc>>,
    lookback: Duration,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    match last_run {
        Some(last_run) => last_run,
        None => {
            let lookback = chrono::Duration::from_std(lookback).unwrap_or(chrono::Duration::MAX);
            now.checked_sub_signed(lookback)
                .unwrap_or(DateTime::<Utc>::MIN_UTC)
        }
    }
}

/// Reads the record array at `pointer`. Absent or `null` means no records.
pub fn extract_records(body: Value, pointer: &str) -> Result<Vec<Value>, ConnectorError> {
    let mut body = body;
    match body.pointer_mut(pointer).map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(records)) => Ok(records),
        Some(other) => Err(ConnectorError::Decode(format!(
            "expected an array at '{}', found {}",
            pointer,
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PollOutcome {
    /// Lower bound the query was built from
    pub since: DateTime<Utc>,
    /// Records in upstream order
    pub records: Vec<Value>,
    /// Value the host should persist as the next `last_run`
    pub next_last_run: DateTime<Utc>,
}

impl PollOutcome {
    /// Writes the standard trigger outputs (`records`, `count`, `next_last_run`).
    pub async fn write_outputs(self, context: &mut ExecutionContext) -> linkflow_types::Result<()> {
        let count = self.records.len();
        context.set_pin_value("records", Value::Array(self.records)).await?;
        context.set_pin_value("count", json!(count)).await?;
        context
            .set_pin_value("next_last_run", json!(self.next_last_run.to_rfc3339()))
            .await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SincePoller {
    records_at: String,
    lookback: Option<Duration>,
}

impl SincePoller {
    pub fn new(records_at: &str) -> Self {
        Self {
            records_at: records_at.to_string(),
            lookback: None,
        }
    }

    pub fn with_lookback(mut self, lookback: Duration) -> Self {
        self.lookback = Some(lookback);
        self
    }

    /// Explicit lookback, then the node's declared default, then the runtime default.
    pub fn lookback(&self, context: &ExecutionContext) -> Duration {
        self.lookback
            .or_else(|| context.node().and_then(|node| node.default_lookback()))
            .unwrap_or_else(|| context.config().default_lookback())
    }

    pub fn since(&self, context: &ExecutionContext) -> DateTime<Utc> {
        lower_bound(context.last_run(), self.lookback(context), context.now())
    }

    pub async fn poll<F>(
        &self,
        context: &mut ExecutionContext,
        build_query: F,
    ) -> linkflow_types::Result<PollOutcome>
    where
        F: FnOnce(DateTime<Utc>) -> HttpRequest,
    {
        let since = self.since(context);
        let next_last_run = context.now();

        context.log_message(
            &format!("Polling for records since {}", since.to_rfc3339()),
            LogLevel::Debug,
        );

        let body = context.send(build_query(since)).await?;
        let records = extract_records(body, &self.records_at)?;

        context.log_message(
            &format!("Poll returned {} records", records.len()),
            LogLevel::Info,
        );

        Ok(PollOutcome {
            since,
            records,
            next_last_run,
        })
    }

    /// `poll` followed by `PollOutcome::write_outputs`.
    pub async fn run<F>(
        &self,
        context: &mut ExecutionContext,
        build_query: F,
    ) -> linkflow_types::Result<()>
    where
        F: FnOnce(DateTime<Utc>) -> HttpRequest,
    {
        let outcome = self.poll(context, build_query).await?;
        outcome.write_outputs(context).await
    }
}
