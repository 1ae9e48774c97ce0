use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};

use super::variable::VariableType;
use crate::ConnectorError;
use linkflow_types::Value;

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinType {
    Input,
    Output,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueType {
    #[default]
    Normal,
    Array,
    HashMap,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq)]
pub struct PinOptions {
    pub valid_values: Option<Vec<String>>,
    pub range: Option<(f64, f64)>,
    pub sensitive: Option<bool>,
    pub enforce_schema: Option<bool>,
    /// Values come from `NodeLogic::get_options` at form-fill time
    pub dynamic_options: Option<bool>,
    /// Inputs that must be filled before dynamic options can be resolved
    pub depends_on: Option<Vec<String>>,
}

impl PinOptions {
    pub fn new() -> Self {
        PinOptions::default()
    }

    pub fn set_valid_values(&mut self, valid_values: Vec<String>) -> &mut Self {
        self.valid_values = Some(valid_values);
        self
    }

    pub fn set_range(&mut self, range: (f64, f64)) -> &mut Self {
        self.range = Some(range);
        self
    }

    pub fn set_sensitive(&mut self, sensitive: bool) -> &mut Self {
        self.sensitive = Some(sensitive);
        self
    }

    pub fn set_enforce_schema(&mut self, enforce_schema: bool) -> &mut Self {
        self.enforce_schema = Some(enforce_schema);
        self
    }

    pub fn set_dynamic_options(&mut self, dynamic: bool) -> &mut Self {
        self.dynamic_options = Some(dynamic);
        self
    }

    pub fn set_depends_on(&mut self, pins: Vec<&str>) -> &mut Self {
        self.depends_on = Some(pins.into_iter().map(String::from).collect());
        self
    }

    pub fn build(&mut self) -> Self {
        self.clone()
    }
}

/// One field of a node's form schema, or one value it outputs
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Pin {
    pub name: String,
    pub friendly_name: String,
    pub description: String,
    pub pin_type: PinType,
    pub data_type: VariableType,
    pub value_type: ValueType,
    pub schema: Option<String>,
    pub default_value: Option<Value>,
    pub options: Option<PinOptions>,
    pub optional: bool,
    pub index: u16,
}

impl Pin {
    pub fn new(
        name: &str,
        friendly_name: &str,
        description: &str,
        pin_type: PinType,
        data_type: VariableType,
        index: u16,
    ) -> Self {
        Self {
            name: name.to_string(),
            friendly_name: friendly_name.to_string(),
            description: description.to_string(),
            pin_type,
            data_type,
            value_type: ValueType::Normal,
            schema: None,
            default_value: None,
            options: None,
            optional: false,
            index,
        }
    }

    pub fn set_default_value(&mut self, default_value: Option<Value>) -> &mut Self {
        self.default_value = default_value;
        self
    }

    pub fn set_value_type(&mut self, value_type: ValueType) -> &mut Self {
        self.value_type = value_type;
        self
    }

    pub fn set_options(&mut self, options: PinOptions) -> &mut Self {
        self.options = Some(options);
        self
    }

    pub fn set_optional(&mut self) -> &mut Self {
        self.optional = true;
        self
    }

    pub fn set_schema<T: JsonSchema>(&mut self) -> &mut Self {
        let schema = schema_for!(T);
        self.schema = linkflow_types::json::to_string(&schema).ok();
        self
    }

    /// Inputs without a default that are not marked optional must be filled.
    pub fn is_required(&self) -> bool {
        self.pin_type == PinType::Input && !self.optional && self.default_value.is_none()
    }

    pub fn is_sensitive(&self) -> bool {
        self.options
            .as_ref()
            .and_then(|options| options.sensitive)
            .unwrap_or(false)
    }

    pub fn has_dynamic_options(&self) -> bool {
        self.options
            .as_ref()
            .and_then(|options| options.dynamic_options)
            .unwrap_or(false)
    }

    pub fn depends_on(&self) -> &[String] {
        self.options
            .as_ref()
            .and_then(|options| options.depends_on.as_deref())
            .unwrap_or(&[])
    }

    /// Checks a provided value against type, valid values and range.
    pub fn validate_value(&self, value: &Value) -> Result<(), ConnectorError> {
        match self.value_type {
            ValueType::Normal => self.validate_single(value),
            ValueType::Array => {
                let items = value.as_array().ok_or_else(|| {
                    ConnectorError::invalid_input(&self.name, "expected an array")
                })?;
                items.iter().try_for_each(|item| self.validate_single(item))
            }
            ValueType::HashMap => {
                let entries = value.as_object().ok_or_else(|| {
                    ConnectorError::invalid_input(&self.name, "expected an object")
                })?;
                entries.values().try_for_each(|item| self.validate_single(item))
            }
        }
    }

    fn validate_single(&self, value: &Value) -> Result<(), ConnectorError> {
        if !self.data_type.accepts(value) {
            return Err(ConnectorError::invalid_input(
                &self.name,
                format!("expected {:?}, got {}", self.data_type, value),
            ));
        }

        let Some(options) = &self.options else {
            return Ok(());
        };

        if let (Some(valid_values), Some(text)) = (&options.valid_values, value.as_str()) {
            if !valid_values.iter().any(|valid| valid == text) {
                return Err(ConnectorError::invalid_input(
                    &self.name,
                    format!("'{}' is not one of {}", text, valid_values.join(", ")),
                ));
            }
        }

        if let (Some((min, max)), Some(number)) = (options.range, value.as_f64()) {
            if number < min || number > max {
                return Err(ConnectorError::invalid_input(
                    &self.name,
                    format!("{} is outside [{}, {}]", number, min, max),
                ));
            }
        }

        Ok(())
    }
}
