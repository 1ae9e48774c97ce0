/// Typed failures raised by connectors and the catalog.
///
/// Node code returns `linkflow_types::Result`, so these travel inside an
/// `anyhow::Error`; hosts recover the variant with `downcast_ref`.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("missing {provider} auth {detail}")]
    MissingCredentials { provider: String, detail: String },

    #[error("missing required input '{0}'")]
    MissingInput(String),

    #[error("invalid input '{pin}': {reason}")]
    InvalidInput { pin: String, reason: String },

    #[error("request failed: {0}")]
    Network(String),

    #[error("request failed with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("{service} API error: {message}")]
    Api { service: String, message: String },

    #[error("unknown node '{0}'")]
    UnknownNode(String),

    #[error("node '{0}' is registered more than once")]
    DuplicateNode(String),

    #[error("node '{node}' has no dynamic options for '{pin}'")]
    NoDynamicOptions { node: String, pin: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl ConnectorError {
    pub fn missing_credentials(provider: &str, detail: &str) -> Self {
        Self::MissingCredentials {
            provider: provider.to_string(),
            detail: detail.to_string(),
        }
    }

    pub fn invalid_input(pin: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            pin: pin.to_string(),
            reason: reason.into(),
        }
    }

    pub fn api(service: &str, message: impl Into<String>) -> Self {
        Self::Api {
            service: service.to_string(),
            message: message.into(),
        }
    }

    pub fn no_dynamic_options(node: &str, pin: &str) -> Self {
        Self::NoDynamicOptions {
            node: node.to_string(),
            pin: pin.to_string(),
        }
    }

    /// Finds a `ConnectorError` inside an `anyhow` chain.
    pub fn find(error: &linkflow_types::Error) -> Option<&ConnectorError> {
        error.chain().find_map(|cause| cause.downcast_ref::<ConnectorError>())
    }
}
