pub mod clerk;
pub mod memory;
pub mod supabase;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::ShowcaseError;
use crate::events::EventRow;

/// A user as the auth provider reports them.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub email: Option<String>,
    pub public_metadata: Map<String, Value>,
}

impl UserProfile {
    /// The raw `tier` metadata value, if the user has one.
    pub fn tier_claim(&self) -> Option<&Value> {
        self.public_metadata.get("tier")
    }
}

/// Extension point for identity backends. One of the two `dyn Trait`
/// boundaries in the crate (with `EventStore`).
#[async_trait]
pub trait AuthProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Look up a signed-in user. `Ok(None)` means no such user.
    async fn user(&self, user_id: &str) -> Result<Option<UserProfile>, ShowcaseError>;
}

/// Extension point for the event table. Read-only.
#[async_trait]
pub trait EventStore: Send + Sync {
    fn name(&self) -> &str;

    /// Every event row, ordered by date ascending. All-or-nothing.
    async fn fetch_events(&self) -> Result<Vec<EventRow>, ShowcaseError>;
}
