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
use linkflow_types::{JsonSchema, Value};
use serde::{Deserialize, Serialize};

pub const SLACK_PROVIDER_ID: &str = "slack";
pub const SLACK_API_URL: &str = "https://slack.com/api";

pub fn slack_oauth_provider() -> OAuthProvider {
    OAuthProvider::new(SLACK_PROVIDER_ID, "Slack")
        .set_auth_url("https://slack.com/oauth/v2/authorize")
        .set_token_url("https://slack.com/api/oauth.v2.access")
        .set_revoke_url("https://slack.com/api/auth.revoke")
        .set_pkce_required(false)
        .build()
}

/// Slack bot token
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct SlackProvider {
    pub access_token: String,
}

impl SlackProvider {
    pub fn add_auth(node: &mut Node, scopes: Vec<&str>) {
        node.add_oauth_provider(slack_oauth_provider());
        node.add_required_oauth_scopes(SLACK_PROVIDER_ID, scopes);
    }

    pub fn from_credentials(credentials: &Credentials) -> Result<Self, ConnectorError> {
        Ok(Self {
            access_token: credentials.require_access_token(SLACK_PROVIDER_ID)?,
        })
    }

    pub fn from_context(context: &ExecutionContext) -> Result<Self, ConnectorError> {
        Self::from_credentials(context.credentials())
    }

    pub fn get(&self, method: &str) -> HttpRequest {
        HttpRequest::get(format!("{}/{}", SLACK_API_URL, method)).bearer_auth(&self.access_token)
    }

    pub fn post(&self, method: &str) -> HttpRequest {
        HttpRequest::post(format!("{}/{}", SLACK_API_URL, method)).bearer_auth(&self.access_token)
    }

    /// Sends a Web API call. Slack reports most failures as `200 {"ok": false}`.
    pub async fn call(
        &self,
        context: &mut ExecutionContext,
        request: HttpRequest,
    ) -> linkflow_types::Result<Value> {
        let body = context.send(request).await?;
        check_ok(body).map_err(Into::into)
    }
}

pub fn check_ok(body: Value) -> Result<Value, ConnectorError> {
    if body["ok"].as_bool() == Some(true) {
        return Ok(body);
    }

    let code = body["error"].as_str().unwrap_or("unknown_error");
    Err(ConnectorError::api(SLACK_PROVIDER_ID, code))
}

pub async fn channel_options(
    context: &mut ExecutionContext,
) -> linkflow_types::Result<Vec<OptionItem>> {
    let provider = SlackProvider::from_context(context)?;
    let body = provider
        .call(
            context,
            provider
                .get("conversations.list")
                .query("types", "public_channel,private_channel")
                .query("exclude_archived", true)
                .query("limit", 200),
        )
        .await?;
    Ok(collect_options(&body, "/channels", "id", "name"))
}
