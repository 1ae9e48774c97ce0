use linkflow::{
    ConnectorError,
    flow::{
        auth::{AuthField, Credentials},
        execution::context::ExecutionContext,
        node::Node,
        options::{OptionItem, collect_options},
    },
    utils::http::HttpRequest,
};
use linkflow_types::JsonSchema;
use serde::{Deserialize, Serialize};

pub const TYPEFORM_PROVIDER_ID: &str = "typeform";
pub const TYPEFORM_API_URL: &str = "https://api.typeform.com";

/// Typeform personal access token
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct TypeformProvider {
    pub token: String,
}

impl TypeformProvider {
    pub fn add_auth(node: &mut Node) {
        node.add_auth_field(
            TYPEFORM_PROVIDER_ID,
            AuthField::new(
                "token",
                "Personal Access Token",
                "Token with forms:read and responses:read",
            )
            .sensitive(),
        );
    }

    pub fn from_credentials(credentials: &Credentials) -> Result<Self, ConnectorError> {
        Ok(Self {
            token: credentials.require_field(TYPEFORM_PROVIDER_ID, "token")?,
        })
    }

    pub fn from_context(context: &ExecutionContext) -> Result<Self, ConnectorError> {
        Self::from_credentials(context.credentials())
    }

    pub fn get(&self, path: &str) -> HttpRequest {
        HttpRequest::get(format!("{}{}", TYPEFORM_API_URL, path)).bearer_auth(&self.token)
    }
}

pub async fn form_options(
    context: &mut ExecutionContext,
) -> linkflow_types::Result<Vec<OptionItem>> {
    let provider = TypeformProvider::from_context(context)?;
    let body = context
        .send(provider.get("/forms").query("page_size", 200))
        .await?;
    Ok(collect_options(&body, "/items", "id", "title"))
}
