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

pub const WHATSAPP_PROVIDER_ID: &str = "whatsapp";
pub const GRAPH_API_URL: &str = "https://graph.facebook.com/v19.0";

/// WhatsApp Cloud API access for one business phone number
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct WhatsAppProvider {
    pub access_token: String,
    pub phone_number_id: String,
}

impl WhatsAppProvider {
    pub fn add_auth(node: &mut Node) {
        node.add_auth_field(
            WHATSAPP_PROVIDER_ID,
            AuthField::new(
                "access_token",
                "Access Token",
                "System user or temporary token from the Meta app dashboard",
            )
            .sensitive(),
        );
        node.add_auth_field(
            WHATSAPP_PROVIDER_ID,
            AuthField::new(
                "phone_number_id",
                "Phone Number ID",
                "Id of the sending phone number (not the number itself)",
            ),
        );
    }

    pub fn from_credentials(credentials: &Credentials) -> Result<Self, ConnectorError> {
        Ok(Self {
            access_token: credentials.require_field(WHATSAPP_PROVIDER_ID, "access_token")?,
            phone_number_id: credentials.require_field(WHATSAPP_PROVIDER_ID, "phone_number_id")?,
        })
    }

    pub fn from_context(context: &ExecutionContext) -> Result<Self, ConnectorError> {
        Self::from_credentials(context.credentials())
    }

    pub fn messages(&self) -> HttpRequest {
        HttpRequest::post(format!(
            "{}/{}/messages",
            GRAPH_API_URL,
            urlencoding::encode(&self.phone_number_id)
        ))
        .bearer_auth(&self.access_token)
    }
}
