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

pub const SURVEYMONKEY_PROVIDER_ID: &str = "surveymonkey";
pub const SURVEYMONKEY_API_URL: &str = "https://api.surveymonkey.com/v3";

pub fn surveymonkey_oauth_provider() -> OAuthProvider {
    OAuthProvider::new(SURVEYMONKEY_PROVIDER_ID, "SurveyMonkey")
        .set_auth_url("https://api.surveymonkey.com/oauth/authorize")
        .set_token_url("https://api.surveymonkey.com/oauth/token")
        .set_pkce_required(false)
        .add_scope("surveys_read")
        .add_scope("responses_read")
        .build()
}

/// SurveyMonkey OAuth or private app access token
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct SurveyMonkeyProvider {
    pub access_token: String,
}

impl SurveyMonkeyProvider {
    pub fn add_auth(node: &mut Node) {
        node.add_oauth_provider(surveymonkey_oauth_provider());
    }

    pub fn from_credentials(credentials: &Credentials) -> Result<Self, ConnectorError> {
        Ok(Self {
            access_token: credentials.require_access_token(SURVEYMONKEY_PROVIDER_ID)?,
        })
    }

    pub fn from_context(context: &ExecutionContext) -> Result<Self, ConnectorError> {
        Self::from_credentials(context.credentials())
    }

    pub fn get(&self, path: &str) -> HttpRequest {
        HttpRequest::get(format!("{}{}", SURVEYMONKEY_API_URL, path))
            .bearer_auth(&self.access_token)
    }
}

pub async fn survey_options(
    context: &mut ExecutionContext,
) -> linkflow_types::Result<Vec<OptionItem>> {
    let provider = SurveyMonkeyProvider::from_context(context)?;
    let body = context
        .send(provider.get("/surveys").query("per_page", 100))
        .await?;
    Ok(collect_options(&body, "/data", "id", "title"))
}
