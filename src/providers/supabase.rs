use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::EventStore;
use crate::error::ShowcaseError;
use crate::events::EventRow;

/// Supabase REST (PostgREST) table reader.
pub struct SupabaseStore {
    client: reqwest::Client,
    url: String,
    table: String,
    anon_key: SecretString,
}

impl SupabaseStore {
    pub fn new(url: &str, table: &str, anon_key: SecretString) -> Result<Self, ShowcaseError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ShowcaseError::Store(format!("cannot build http client: {e}")))?;

        Ok(Self {
            client,
            url: url.trim_end_matches('/').to_owned(),
            table: table.to_owned(),
            anon_key,
        })
    }

    fn events_url(&self) -> String {
        format!("{}/rest/v1/{}?select=*&order=date.asc", self.url, self.table)
    }
}

impl std::fmt::Debug for SupabaseStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseStore")
            .field("url", &self.url)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EventStore for SupabaseStore {
    fn name(&self) -> &str {
        "supabase"
    }

    async fn fetch_events(&self) -> Result<Vec<EventRow>, ShowcaseError> {
        let url = self.events_url();
        debug!(%url, "fetching events");

        let key = self.anon_key.expose_secret();
        let response = self
            .client
            .get(&url)
            .header("apikey", key)
            .bearer_auth(key)
            .send()
            .await
            .map_err(|e| ShowcaseError::Store(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ShowcaseError::Store(format!("{status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| ShowcaseError::Store(format!("cannot decode rows: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_orders_by_date() {
        let store = SupabaseStore::new(
            "https://abc.supabase.co/",
            "events",
            SecretString::from("anon".to_owned()),
        )
        .unwrap();
        assert_eq!(
            store.events_url(),
            "https://abc.supabase.co/rest/v1/events?select=*&order=date.asc"
        );
    }
}
