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

pub const ZENDESK_PROVIDER_ID: &str = "zendesk";

/// Zendesk Support access with an agent email and API token
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct ZendeskProvider {
    pub subdomain: String,
    pub email: String,
    pub api_token: String,
}

impl ZendeskProvider {
    pub fn add_auth(node: &mut Node) {
        node.add_auth_field(
            ZENDESK_PROVIDER_ID,
            AuthField::new(
                "subdomain",
                "Subdomain",
                "Account subdomain, 'acme' for acme.zendesk.com",
            ),
        );
        node.add_auth_field(
            ZENDESK_PROVIDER_ID,
            AuthField::new("email", "Email", "Email of the agent owning the token"),
        );
        node.add_auth_field(
            ZENDESK_PROVIDER_ID,
            AuthField::new("api_token", "API Token", "Zendesk API token").sensitive(),
        );
    }

    pub fn from_credentials(credentials: &Credentials) -> Result<Self, ConnectorError> {
        let subdomain = credentials.require_field(ZENDESK_PROVIDER_ID, "subdomain")?;
        let subdomain = subdomain
            .trim_start_matches("https://")
            .trim_end_matches('/')
            .trim_end_matches(".zendesk.com")
            .to_string();

        if subdomain.is_empty()
            || !subdomain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ConnectorError::missing_credentials(
                ZENDESK_PROVIDER_ID,
                "valid subdomain",
            ));
        }

        Ok(Self {
            subdomain,
            email: credentials.require_field(ZENDESK_PROVIDER_ID, "email")?,
            api_token: credentials.require_field(ZENDESK_PROVIDER_ID, "api_token")?,
        })
    }

    pub fn from_context(context: &ExecutionContext) -> Result<Self, ConnectorError> {
        Self::from_credentials(context.credentials())
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("https://{}.zendesk.com/api/v2{}", self.subdomain, path)
    }

    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        request.basic_auth(&format!("{}/token", self.email), &self.api_token)
    }

    pub fn get(&self, path: &str) -> HttpRequest {
        self.authorize(HttpRequest::get(self.api_url(path)))
    }

    pub fn post(&self, path: &str) -> HttpRequest {
        self.authorize(HttpRequest::post(self.api_url(path)))
    }
}
