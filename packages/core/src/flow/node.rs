use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{
    auth::{AuthField, AuthRequirement, Credentials},
    execution::context::ExecutionContext,
    oauth::OAuthProvider,
    options::OptionItem,
    pin::{Pin, PinType, ValueType},
    variable::VariableType,
};
use crate::ConnectorError;
use linkflow_types::{Map, Value, async_trait};

/// How the host should drive a trigger node
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerKind {
    /// Invoked on the host's schedule with the previous `last_run`
    Polling { default_lookback_secs: u64 },
}

/// Host-facing descriptor of one connector operation
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct Node {
    pub name: String,
    pub friendly_name: String,
    pub description: String,
    pub category: String,
    pub icon: Option<String>,
    pub docs: Option<String>,
    pub pins: Vec<Pin>,
    pub auth: AuthRequirement,
    pub oauth_providers: Vec<OAuthProvider>,
    pub trigger: Option<TriggerKind>,
}

impl Node {
    pub fn new(name: &str, friendly_name: &str, description: &str, category: &str) -> Self {
        Node {
            name: name.to_string(),
            friendly_name: friendly_name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            icon: None,
            docs: None,
            pins: Vec::new(),
            auth: AuthRequirement::None,
            oauth_providers: Vec::new(),
            trigger: None,
        }
    }

    pub fn add_icon(&mut self, icon: &str) {
        self.icon = Some(icon.to_string());
    }

    pub fn set_docs(&mut self, docs: &str) {
        self.docs = Some(docs.to_string());
    }

    pub fn add_input_pin(
        &mut self,
        name: &str,
        friendly_name: &str,
        description: &str,
        data_type: VariableType,
    ) -> &mut Pin {
        self.push_pin(name, friendly_name, description, PinType::Input, data_type)
    }

    pub fn add_output_pin(
        &mut self,
        name: &str,
        friendly_name: &str,
        description: &str,
        data_type: VariableType,
    ) -> &mut Pin {
        self.push_pin(name, friendly_name, description, PinType::Output, data_type)
    }

    fn push_pin(
        &mut self,
        name: &str,
        friendly_name: &str,
        description: &str,
        pin_type: PinType,
        data_type: VariableType,
    ) -> &mut Pin {
        let index = self
            .pins
            .iter()
            .filter(|pin| pin.pin_type == pin_type)
            .count() as u16;
        self.pins.push(Pin::new(
            name,
            friendly_name,
            description,
            pin_type,
            data_type,
            index,
        ));
        let last = self.pins.len() - 1;
        &mut self.pins[last]
    }

    pub fn get_pin(&self, name: &str, pin_type: PinType) -> Option<&Pin> {
        self.pins
            .iter()
            .find(|pin| pin.name == name && pin.pin_type == pin_type)
    }

    pub fn input_pins(&self) -> impl Iterator<Item = &Pin> {
        self.pins.iter().filter(|pin| pin.pin_type == PinType::Input)
    }

    pub fn output_pins(&self) -> impl Iterator<Item = &Pin> {
        self.pins.iter().filter(|pin| pin.pin_type == PinType::Output)
    }

    /// Declares the OAuth provider the host must authorize before running.
    pub fn add_oauth_provider(&mut self, provider: OAuthProvider) {
        self.auth = AuthRequirement::OAuth2 {
            provider: provider.id.clone(),
            scopes: provider.scopes.clone(),
        };
        if !self.oauth_providers.iter().any(|p| p.id == provider.id) {
            self.oauth_providers.push(provider);
        }
    }

    /// Scopes this node needs on top of the provider's defaults.
    pub fn add_required_oauth_scopes(&mut self, provider_id: &str, scopes: Vec<&str>) {
        if let AuthRequirement::OAuth2 {
            provider,
            scopes: required,
        } = &mut self.auth
        {
            if provider == provider_id {
                for scope in scopes {
                    if !required.iter().any(|s| s == scope) {
                        required.push(scope.to_string());
                    }
                }
            }
        }
    }

    pub fn add_auth_field(&mut self, provider_id: &str, field: AuthField) {
        match &mut self.auth {
            AuthRequirement::Custom { provider, fields } if provider == provider_id => {
                fields.push(field);
            }
            _ => {
                self.auth = AuthRequirement::Custom {
                    provider: provider_id.to_string(),
                    fields: vec![field],
                };
            }
        }
    }

    /// Marks the node as a polling trigger and adds the standard trigger outputs.
    pub fn set_polling_trigger(&mut self, default_lookback: Duration) {
        self.trigger = Some(TriggerKind::Polling {
            default_lookback_secs: default_lookback.as_secs(),
        });

        self.add_output_pin(
            "records",
            "Records",
            "Records created or changed since the last run, in upstream order",
            VariableType::Struct,
        )
        .set_value_type(ValueType::Array);

        self.add_output_pin(
            "count",
            "Count",
            "Number of records returned",
            VariableType::Integer,
        );

        self.add_output_pin(
            "next_last_run",
            "Next Last Run",
            "Timestamp the host should persist as last_run",
            VariableType::Date,
        );
    }

    pub fn is_trigger(&self) -> bool {
        self.trigger.is_some()
    }

    pub fn default_lookback(&self) -> Option<Duration> {
        match &self.trigger {
            Some(TriggerKind::Polling {
                default_lookback_secs,
            }) => Some(Duration::from_secs(*default_lookback_secs)),
            None => None,
        }
    }

    pub fn validate_credentials(
        &self,
        credentials: &Credentials,
        now_unix: u64,
    ) -> Result<(), ConnectorError> {
        self.auth.validate(credentials, now_unix)
    }

    /// Required inputs must be present, provided inputs must be well-typed.
    pub fn validate_inputs(&self, inputs: &Map<String, Value>) -> Result<(), ConnectorError> {
        for pin in self.input_pins() {
            match inputs.get(&pin.name) {
                Some(value) if !is_blank(value) => pin.validate_value(value)?,
                _ if pin.is_required() => {
                    return Err(ConnectorError::MissingInput(pin.name.clone()));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// `null` and whitespace-only strings count as "not filled in".
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

#[async_trait]
pub trait NodeLogic: Send + Sync {
    fn get_node(&self) -> Node;

    async fn run(&self, context: &mut ExecutionContext) -> linkflow_types::Result<()>;

    /// Resolves the selectable values of a `dynamic_options` input.
    async fn get_options(
        &self,
        pin: &str,
        _context: &mut ExecutionContext,
    ) -> linkflow_types::Result<Vec<OptionItem>> {
        Err(ConnectorError::NoDynamicOptions {
            node: self.get_node().name,
            pin: pin.to_string(),
        }
        .into())
    }

    async fn on_start(&self) -> linkflow_types::Result<()> {
        Ok(())
    }

    async fn on_stop(&self) -> linkflow_types::Result<()> {
        Ok(())
    }
}
