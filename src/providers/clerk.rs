use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::{AuthProvider, UserProfile};
use crate::error::ShowcaseError;

// --- Wire structs (private, map 1:1 to the users API response) ---

#[derive(Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    primary_email_address_id: Option<String>,
    #[serde(default)]
    email_addresses: Vec<EmailAddress>,
    #[serde(default)]
    public_metadata: Map<String, Value>,
}

#[derive(Deserialize)]
struct EmailAddress {
    id: String,
    email_address: String,
}

impl From<UserResponse> for UserProfile {
    fn from(user: UserResponse) -> Self {
        let primary = user.primary_email_address_id.as_deref();
        let email = user
            .email_addresses
            .iter()
            .find(|e| Some(e.id.as_str()) == primary)
            .or_else(|| user.email_addresses.first())
            .map(|e| e.email_address.clone());

        UserProfile {
            id: user.id,
            email,
            public_metadata: user.public_metadata,
        }
    }
}

/// Clerk backend API: reads users and their public metadata.
pub struct ClerkAuth {
    client: reqwest::Client,
    api_url: String,
    secret_key: SecretString,
}

impl ClerkAuth {
    pub fn new(api_url: &str, secret_key: SecretString) -> Result<Self, ShowcaseError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ShowcaseError::Auth(format!("cannot build http client: {e}")))?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_owned(),
            secret_key,
        })
    }
}

impl std::fmt::Debug for ClerkAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClerkAuth")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthProvider for ClerkAuth {
    fn name(&self) -> &str {
        "clerk"
    }

    async fn user(&self, user_id: &str) -> Result<Option<UserProfile>, ShowcaseError> {
        if user_id.is_empty()
            || !user_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ShowcaseError::Auth(format!("malformed user id '{user_id}'")));
        }

        let url = format!("{}/v1/users/{user_id}", self.api_url);
        debug!(%url, "fetching user");

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.secret_key.expose_secret())
            .send()
            .await
            .map_err(|e| ShowcaseError::Auth(format!("request failed: {e}")))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if !status.is_success() => {
                Err(ShowcaseError::Auth(format!("users API returned {status}")))
            }
            _ => {
                let user: UserResponse = response
                    .json()
                    .await
                    .map_err(|e| ShowcaseError::Auth(format!("cannot decode user: {e}")))?;
                Ok(Some(user.into()))
            }
        }
    }
}
