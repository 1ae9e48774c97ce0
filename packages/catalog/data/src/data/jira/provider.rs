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

pub const JIRA_PROVIDER_ID: &str = "jira";

/// Jira Cloud access with an account email and API token (basic auth)
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct JiraProvider {
    /// Site root, e.g. https://your-domain.atlassian.net
    pub site_url: String,
    pub email: String,
    pub api_token: String,
}

impl JiraProvider {
    pub fn add_auth(node: &mut Node) {
        node.add_auth_field(
            JIRA_PROVIDER_ID,
            AuthField::new(
                "site_url",
                "Site URL",
                "Your Jira site, e.g. https://your-domain.atlassian.net",
            ),
        );
        node.add_auth_field(
            JIRA_PROVIDER_ID,
            AuthField::new("email", "Email", "Atlassian account email"),
        );
        node.add_auth_field(
            JIRA_PROVIDER_ID,
            AuthField::new(
                "api_token",
                "API Token",
                "Create one at id.atlassian.com/manage-profile/security/api-tokens",
            )
            .sensitive(),
        );
    }

    pub fn from_credentials(credentials: &Credentials) -> Result<Self, ConnectorError> {
        let site = credentials.require_field(JIRA_PROVIDER_ID, "site_url")?;
        let site = site.trim_end_matches('/');
        let site_url = if site.starts_with("https://") || site.starts_with("http://") {
            site.to_string()
        } else {
            format!("https://{}", site)
        };

        Ok(Self {
            site_url,
            email: credentials.require_field(JIRA_PROVIDER_ID, "email")?,
            api_token: credentials.require_field(JIRA_PROVIDER_ID, "api_token")?,
        })
    }

    pub fn from_context(context: &ExecutionContext) -> Result<Self, ConnectorError> {
        Self::from_credentials(context.credentials())
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}/rest/api/3{}", self.site_url, path)
    }

    pub fn get(&self, path: &str) -> HttpRequest {
        HttpRequest::get(self.api_url(path)).basic_auth(&self.email, &self.api_token)
    }

    pub fn post(&self, path: &str) -> HttpRequest {
        HttpRequest::post(self.api_url(path)).basic_auth(&self.email, &self.api_token)
    }
}

pub async fn project_options(
    context: &mut ExecutionContext,
) -> linkflow_types::Result<Vec<OptionItem>> {
    let provider = JiraProvider::from_context(context)?;
    let body = context
        .send(provider.get("/project/search").query("maxResults", 100))
        .await?;
    Ok(collect_options(&body, "/values", "key", "name"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_url_gets_scheme_and_loses_trailing_slash() {
        let credentials = Credentials::new()
            .with_field("site_url", "acme.atlassian.net/")
            .with_field("email", "a@acme.test")
            .with_field("api_token", "t");
        let provider = JiraProvider::from_credentials(&credentials).unwrap();
        assert_eq!(
            provider.api_url("/issue"),
            "https://acme.atlassian.net/rest/api/3/issue"
        );
    }
}
