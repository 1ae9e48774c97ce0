use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::oauth::OAuthToken;
use crate::ConnectorError;

/// What a node needs from the host before it may touch the network
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthRequirement {
    #[default]
    None,
    /// Host-managed OAuth 2.0 token for `provider`
    OAuth2 {
        provider: String,
        scopes: Vec<String>,
    },
    /// Connector-specific key/token fields entered by the user
    Custom {
        provider: String,
        fields: Vec<AuthField>,
    },
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct AuthField {
    pub name: String,
    pub friendly_name: String,
    pub description: String,
    pub sensitive: bool,
    pub optional: bool,
}

impl AuthField {
    pub fn new(name: &str, friendly_name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            friendly_name: friendly_name.to_string(),
            description: description.to_string(),
            sensitive: false,
            optional: false,
        }
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

impl AuthRequirement {
    pub fn provider(&self) -> Option<&str> {
        match self {
            AuthRequirement::None => None,
            AuthRequirement::OAuth2 { provider, .. } | AuthRequirement::Custom { provider, .. } => {
                Some(provider)
            }
        }
    }

    /// Fails with `MissingCredentials` when `credentials` cannot satisfy this requirement.
    pub fn validate(&self, credentials: &Credentials, now_unix: u64) -> Result<(), ConnectorError> {
        match self {
            AuthRequirement::None => Ok(()),
            AuthRequirement::OAuth2 { provider, .. } => {
                let token = credentials
                    .oauth_token
                    .as_ref()
                    .filter(|token| !token.access_token.trim().is_empty())
                    .ok_or_else(|| ConnectorError::missing_credentials(provider, "token"))?;

                if token.is_expired_at(now_unix) {
                    return Err(ConnectorError::missing_credentials(
                        provider,
                        "token (expired, reauthorize)",
                    ));
                }

                Ok(())
            }
            AuthRequirement::Custom { provider, fields } => {
                for field in fields.iter().filter(|field| !field.optional) {
                    if credentials.field(&field.name).is_none() {
                        return Err(ConnectorError::missing_credentials(
                            provider,
                            &field.friendly_name,
                        ));
                    }
                }
                Ok(())
            }
        }
    }
}

/// Credentials of one integration instance, resolved by the host
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default)]
pub struct Credentials {
    pub oauth_token: Option<OAuthToken>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn oauth(access_token: &str) -> Self {
        Self {
            oauth_token: Some(OAuthToken::new(access_token)),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    /// Non-blank value of a custom field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn access_token(&self) -> Option<&str> {
        self.oauth_token
            .as_ref()
            .map(|token| token.access_token.trim())
            .filter(|token| !token.is_empty())
    }

    pub fn require_field(&self, provider: &str, name: &str) -> Result<String, ConnectorError> {
        self.field(name)
            .map(str::to_string)
            .ok_or_else(|| ConnectorError::missing_credentials(provider, name))
    }

    pub fn require_access_token(&self, provider: &str) -> Result<String, ConnectorError> {
        self.access_token()
            .map(str::to_string)
            .ok_or_else(|| ConnectorError::missing_credentials(provider, "token"))
    }
}
