use linkflow::{
    ConnectorError,
    flow::{
        auth::Credentials,
        execution::context::ExecutionContext,
        node::Node,
        oauth::OAuthProvider,
        options::{OptionItem, collect_options},
    },
    utils::http::HttpRequest,
};
use linkflow_types::JsonSchema;
use serde::{Deserialize, Serialize};

pub const ASANA_PROVIDER_ID: &str = "asana";
pub const ASANA_API_URL: &str = "https://app.asana.com/api/1.0";

pub fn asana_oauth_provider() -> OAuthProvider {
    OAuthProvider::new(ASANA_PROVIDER_ID, "Asana")
        .set_auth_url("https://app.asana.com/-/oauth_authorize")
        .set_token_url("https://app.asana.com/-/oauth_token")
        .add_scope("default")
        .build()
}

/// Asana access, either an OAuth token or a personal access token
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct AsanaProvider {
    pub access_token: String,
}

impl AsanaProvider {
    pub fn add_auth(node: &mut Node) {
        node.add_oauth_provider(asana_oauth_provider());
    }

    pub fn from_credentials(credentials: &Credentials) -> Result<Self, ConnectorError> {
        Ok(Self {
            access_token: credentials.require_access_token(ASANA_PROVIDER_ID)?,
        })
    }

    pub fn from_context(context: &ExecutionContext) -> Result<Self, ConnectorError> {
        Self::from_credentials(context.credentials())
    }

    pub fn get(&self, path: &str) -> HttpRequest {
        HttpRequest::get(format!("{}{}", ASANA_API_URL, path)).bearer_auth(&self.access_token)
    }

    pub fn post(&self, path: &str) -> HttpRequest {
        HttpRequest::post(format!("{}{}", ASANA_API_URL, path)).bearer_auth(&self.access_token)
    }
}

pub async fn workspace_options(
    context: &mut ExecutionContext,
) -> linkflow_types::Result<Vec<OptionItem>> {
    let provider = AsanaProvider::from_context(context)?;
    let body = context.send(provider.get("/workspaces")).await?;
    Ok(collect_options(&body, "/data", "gid", "name"))
}

pub async fn project_options(
    context: &mut ExecutionContext,
) -> linkflow_types::Result<Vec<OptionItem>> {
    let provider = AsanaProvider::from_context(context)?;
    let workspace: String = context.evaluate_pin("workspace").await?;
    let body = context
        .send(
            provider
                .get("/projects")
                .query("workspace", workspace)
                .query("archived", false),
        )
        .await?;
    Ok(collect_options(&body, "/data", "gid", "name"))
}
