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

pub const TRELLO_PROVIDER_ID: &str = "trello";
pub const TRELLO_API_URL: &str = "https://api.trello.com/1";

/// Trello REST access. Key and token travel as query parameters.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct TrelloProvider {
    pub api_key: String,
    pub token: String,
}

impl TrelloProvider {
    pub fn add_auth(node: &mut Node) {
        node.add_auth_field(
            TRELLO_PROVIDER_ID,
            AuthField::new("api_key", "API Key", "Key from trello.com/power-ups/admin"),
        );
        node.add_auth_field(
            TRELLO_PROVIDER_ID,
            AuthField::new("token", "Token", "User token authorized for the key").sensitive(),
        );
    }

    pub fn from_credentials(credentials: &Credentials) -> Result<Self, ConnectorError> {
        Ok(Self {
            api_key: credentials.require_field(TRELLO_PROVIDER_ID, "api_key")?,
            token: credentials.require_field(TRELLO_PROVIDER_ID, "token")?,
        })
    }

    pub fn from_context(context: &ExecutionContext) -> Result<Self, ConnectorError> {
        Self::from_credentials(context.credentials())
    }

    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        request.query("key", &self.api_key).query("token", &self.token)
    }

    pub fn get(&self, path: &str) -> HttpRequest {
        self.authorize(HttpRequest::get(format!("{}{}", TRELLO_API_URL, path)))
    }

    pub fn post(&self, path: &str) -> HttpRequest {
        self.authorize(HttpRequest::post(format!("{}{}", TRELLO_API_URL, path)))
    }
}

pub async fn board_options(
    context: &mut ExecutionContext,
) -> linkflow_types::Result<Vec<OptionItem>> {
    let provider = TrelloProvider::from_context(context)?;
    let body = context
        .send(
            provider
                .get("/members/me/boards")
                .query("filter", "open")
                .query("fields", "name"),
        )
        .await?;
    Ok(collect_options(&body, "", "id", "name"))
}

pub async fn list_options(
    context: &mut ExecutionContext,
) -> linkflow_types::Result<Vec<OptionItem>> {
    let provider = TrelloProvider::from_context(context)?;
    let board: String = context.evaluate_pin("board_id").await?;
    let body = context
        .send(
            provider
                .get(&format!("/boards/{}/lists", urlencoding::encode(&board)))
                .query("filter", "open")
                .query("fields", "name"),
        )
        .await?;
    Ok(collect_options(&body, "", "id", "name"))
}
