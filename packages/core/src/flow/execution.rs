use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod context;
pub mod log;

pub use log::{LogLevel, LogMessage};

/// Metadata the host attaches to a trigger invocation
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerMeta {
    /// Timestamp persisted after the previous successful poll
    pub last_run: Option<DateTime<Utc>>,
}
