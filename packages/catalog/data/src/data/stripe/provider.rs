use linkflow::{
    ConnectorError,
    flow::{
        auth::{AuthField, Credentials},
        execution::context::ExecutionContext,
        node::Node,
    },
    utils::http::HttpRequest,
};
use linkflow_types::JsonSchema;
use serde::{Deserialize, Serialize};

pub const STRIPE_PROVIDER_ID: &str = "stripe";
pub const STRIPE_API_URL: &str = "https://api.stripe.com/v1";

/// Stripe access through a secret (or restricted) API key
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct StripeProvider {
    pub secret_key: String,
}

impl StripeProvider {
    pub fn add_auth(node: &mut Node) {
        node.add_auth_field(
            STRIPE_PROVIDER_ID,
            AuthField::new(
                "secret_key",
                "Secret Key",
                "Secret or restricted key from the Stripe dashboard (sk_... or rk_...)",
            )
            .sensitive(),
        );
    }

    pub fn from_credentials(credentials: &Credentials) -> Result<Self, ConnectorError> {
        Ok(Self {
            secret_key: credentials.require_field(STRIPE_PROVIDER_ID, "secret_key")?,
        })
    }

    pub fn from_context(context: &ExecutionContext) -> Result<Self, ConnectorError> {
        Self::from_credentials(context.credentials())
    }

    pub fn get(&self, path: &str) -> HttpRequest {
        HttpRequest::get(format!("{}{}", STRIPE_API_URL, path)).bearer_auth(&self.secret_key)
    }

    /// Stripe takes form-encoded bodies on writes.
    pub fn post(&self, path: &str) -> HttpRequest {
        HttpRequest::post(format!("{}{}", STRIPE_API_URL, path)).bearer_auth(&self.secret_key)
    }
}
