#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use linkflow::{
    flow::{auth::Credentials, execution::context::ExecutionContext, node::NodeLogic},
    utils::http::MockTransport,
};
use linkflow_catalog_core::Catalog;

pub fn catalog(node: impl NodeLogic + 'static) -> Catalog {
    Catalog::from_nodes(vec![Arc::new(node)]).unwrap()
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn context(mock: &Arc<MockTransport>, credentials: Credentials) -> ExecutionContext {
    ExecutionContext::new(mock.clone())
        .with_credentials(credentials)
        .with_now(now())
}

pub fn oauth() -> Credentials {
    Credentials::oauth("oauth-token")
}

pub fn stripe() -> Credentials {
    Credentials::new().with_field("secret_key", "sk_test_123")
}

pub fn zendesk() -> Credentials {
    Credentials::new()
        .with_field("subdomain", "acme")
        .with_field("email", "agent@acme.test")
        .with_field("api_token", "zd-token")
}

pub fn trello() -> Credentials {
    Credentials::new()
        .with_field("api_key", "trello-key")
        .with_field("token", "trello-token")
}

pub fn typeform() -> Credentials {
    Credentials::new().with_field("token", "tfp_123")
}

pub fn whatsapp() -> Credentials {
    Credentials::new()
        .with_field("access_token", "wa-token")
        .with_field("phone_number_id", "1098765")
}

pub fn jira() -> Credentials {
    Credentials::new()
        .with_field("site_url", "https://acme.atlassian.net")
        .with_field("email", "dev@acme.test")
        .with_field("api_token", "jira-token")
}
