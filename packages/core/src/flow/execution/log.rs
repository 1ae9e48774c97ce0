use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct LogMessage {
    pub id: String,
    pub node: String,
    pub message: String,
    pub log_level: LogLevel,
    pub timestamp: DateTime<Utc>,
}

impl LogMessage {
    pub fn new(node: &str, message: &str, log_level: LogLevel) -> Self {
        LogMessage {
            id: linkflow_types::create_id(),
            node: node.to_string(),
            message: message.to_string(),
            log_level,
            timestamp: Utc::now(),
        }
    }

    /// Mirrors the entry into `tracing` at the matching level.
    pub fn trace(&self) {
        let node = self.node.as_str();
        match self.log_level {
            LogLevel::Debug => tracing::debug!(node, "{}", self.message),
            LogLevel::Info => tracing::info!(node, "{}", self.message),
            LogLevel::Warn => tracing::warn!(node, "{}", self.message),
            LogLevel::Error | LogLevel::Fatal => tracing::error!(node, "{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn > LogLevel::Info);
        assert!(LogLevel::Fatal > LogLevel::Error);
    }

    #[test]
    fn message_carries_node_and_level() {
        let message = LogMessage::new("hash_text", "hashed", LogLevel::Info);
        assert_eq!(message.node, "hash_text");
        assert_eq!(message.message, "hashed");
        assert_eq!(message.log_level, LogLevel::Info);
        assert!(!message.id.is_empty());
    }
}
