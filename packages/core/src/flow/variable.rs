use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use linkflow_types::Value;

/// Data type of a form field or output value
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    String,
    Integer,
    Float,
    Boolean,
    /// RFC 3339 timestamp carried as a string
    Date,
    Struct,
    Generic,
}

impl VariableType {
    /// Checks a single (non-array) JSON value against this type.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            VariableType::String => value.is_string(),
            VariableType::Integer => value.is_i64() || value.is_u64(),
            VariableType::Float => value.is_number(),
            VariableType::Boolean => value.is_boolean(),
            VariableType::Date => value
                .as_str()
                .is_some_and(|s| chrono::DateTime::parse_from_rfc3339(s).is_ok()),
            VariableType::Struct => value.is_object(),
            VariableType::Generic => true,
        }
    }
}
