use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// OAuth 2.0 provider a connector needs the host to authorize against.
/// The host runs the authorization flow; connectors only receive the token.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct OAuthProvider {
    /// Unique identifier for this provider (e.g., "google_calendar", "slack")
    pub id: String,
    /// Display name shown to users
    pub name: String,
    pub auth_url: String,
    pub token_url: String,
    /// Scopes every node using this provider needs
    pub scopes: Vec<String>,
    pub pkce_required: bool,
    pub revoke_url: Option<String>,
}

impl OAuthProvider {
    pub fn new(id: &str, name: &str) -> Self {
        OAuthProvider {
            id: id.to_string(),
            name: name.to_string(),
            auth_url: String::new(),
            token_url: String::new(),
            scopes: Vec::new(),
            pkce_required: true,
            revoke_url: None,
        }
    }

    pub fn set_auth_url(mut self, url: &str) -> Self {
        self.auth_url = url.to_string();
        self
    }

    pub fn set_token_url(mut self, url: &str) -> Self {
        self.token_url = url.to_string();
        self
    }

    pub fn add_scope(mut self, scope: &str) -> Self {
        self.scopes.push(scope.to_string());
        self
    }

    pub fn set_pkce_required(mut self, required: bool) -> Self {
        self.pkce_required = required;
        self
    }

    pub fn set_revoke_url(mut self, url: &str) -> Self {
        self.revoke_url = Some(url.to_string());
        self
    }

    pub fn build(self) -> Self {
        self
    }
}

/// Token handed to the connector after the host completed OAuth
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct OAuthToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Unix timestamp when the access token expires
    pub expires_at: Option<u64>,
    /// The token type (usually "Bearer")
    pub token_type: Option<String>,
}

impl OAuthToken {
    pub fn new(access_token: &str) -> Self {
        OAuthToken {
            access_token: access_token.to_string(),
            refresh_token: None,
            expires_at: None,
            token_type: Some("Bearer".to_string()),
        }
    }

    pub fn is_expired_at(&self, now_unix: u64) -> bool {
        // Less than a minute left counts as expired
        self.expires_at
            .is_some_and(|expires_at| expires_at <= now_unix + 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_builder() {
        let provider = OAuthProvider::new("asana", "Asana")
            .set_auth_url("https://app.asana.com/-/oauth_authorize")
            .set_token_url("https://app.asana.com/-/oauth_token")
            .add_scope("default")
            .set_pkce_required(false)
            .build();

        assert_eq!(provider.scopes, vec!["default".to_string()]);
        assert!(!provider.pkce_required);
        assert!(provider.revoke_url.is_none());
    }

    #[test]
    fn expiry_has_a_minute_of_slack() {
        let mut token = OAuthToken::new("abc");
        assert!(!token.is_expired_at(1_000));

        token.expires_at = Some(1_050);
        assert!(token.is_expired_at(1_000));

        token.expires_at = Some(1_100);
        assert!(!token.is_expired_at(1_000));
    }
}
