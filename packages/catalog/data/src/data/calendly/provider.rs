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

pub const CALENDLY_PROVIDER_ID: &str = "calendly";
pub const CALENDLY_API_URL: &str = "https://api.calendly.com";

pub fn calendly_oauth_provider() -> OAuthProvider {
    OAuthProvider::new(CALENDLY_PROVIDER_ID, "Calendly")
        .set_auth_url("https://auth.calendly.com/oauth/authorize")
        .set_token_url("https://auth.calendly.com/oauth/token")
        .set_revoke_url("https://auth.calendly.com/oauth/revoke")
        .build()
}

/// Calendly access via OAuth or a personal access token
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct CalendlyProvider {
    pub access_token: String,
}

impl CalendlyProvider {
    pub fn add_auth(node: &mut Node) {
        node.add_oauth_provider(calendly_oauth_provider());
    }

    pub fn from_credentials(credentials: &Credentials) -> Result<Self, ConnectorError> {
        Ok(Self {
            access_token: credentials.require_access_token(CALENDLY_PROVIDER_ID)?,
        })
    }

    pub fn from_context(context: &ExecutionContext) -> Result<Self, ConnectorError> {
        Self::from_credentials(context.credentials())
    }

    pub fn get(&self, path: &str) -> HttpRequest {
        HttpRequest::get(format!("{}{}", CALENDLY_API_URL, path)).bearer_auth(&self.access_token)
    }

    pub fn post(&self, path: &str) -> HttpRequest {
        HttpRequest::post(format!("{}{}", CALENDLY_API_URL, path)).bearer_auth(&self.access_token)
    }
}

/// Calendly identifies resources by URI; accepts either the URI or its trailing uuid.
pub fn resource_uuid(value: &str) -> &str {
    value.trim().trim_end_matches('/').rsplit('/').next().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::resource_uuid;

    #[test]
    fn uuid_from_uri_or_bare_value() {
        assert_eq!(
            resource_uuid("https://api.calendly.com/scheduled_events/ABC123"),
            "ABC123"
        );
        assert_eq!(resource_uuid("ABC123/"), "ABC123");
        assert_eq!(resource_uuid("ABC123"), "ABC123");
    }
}
