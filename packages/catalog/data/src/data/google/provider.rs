use linkflow::{
    ConnectorError,
    flow::{
        auth::Credentials, execution::context::ExecutionContext, node::Node,
        oauth::OAuthProvider,
    },
    utils::http::HttpRequest,
};
use linkflow_types::JsonSchema;
use serde::{Deserialize, Serialize};

pub const GOOGLE_PROVIDER_ID: &str = "google";

pub fn google_oauth_provider() -> OAuthProvider {
    OAuthProvider::new(GOOGLE_PROVIDER_ID, "Google")
        .set_auth_url("https://accounts.google.com/o/oauth2/v2/auth")
        .set_token_url("https://oauth2.googleapis.com/token")
        .set_revoke_url("https://oauth2.googleapis.com/revoke")
        .add_scope("openid")
        .add_scope("email")
        .build()
}

/// Google OAuth token shared by Calendar and Docs. Each node adds the scopes it needs.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct GoogleProvider {
    pub access_token: String,
}

impl GoogleProvider {
    pub fn add_auth(node: &mut Node, scopes: Vec<&str>) {
        node.add_oauth_provider(google_oauth_provider());
        node.add_required_oauth_scopes(GOOGLE_PROVIDER_ID, scopes);
    }

    pub fn from_credentials(credentials: &Credentials) -> Result<Self, ConnectorError> {
        Ok(Self {
            access_token: credentials.require_access_token(GOOGLE_PROVIDER_ID)?,
        })
    }

    pub fn from_context(context: &ExecutionContext) -> Result<Self, ConnectorError> {
        Self::from_credentials(context.credentials())
    }

    pub fn get(&self, url: &str) -> HttpRequest {
        HttpRequest::get(url).bearer_auth(&self.access_token)
    }

    pub fn post(&self, url: &str) -> HttpRequest {
        HttpRequest::post(url).bearer_auth(&self.access_token)
    }
}
