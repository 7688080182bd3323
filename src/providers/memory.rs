use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{AuthProvider, EventStore, UserProfile};
use crate::error::ShowcaseError;
use crate::events::{EventRow, parse_timestamp};

/// Fixed set of users, for demos and tests.
#[derive(Debug, Default)]
pub struct StaticAuth {
    users: HashMap<String, UserProfile>,
}

impl StaticAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, profile: UserProfile) -> Self {
        self.users.insert(profile.id.clone(), profile);
        self
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    fn name(&self) -> &str {
        "static"
    }

    async fn user(&self, user_id: &str) -> Result<Option<UserProfile>, ShowcaseError> {
        Ok(self.users.get(user_id).cloned())
    }
}

/// Fixed event rows. Counts fetches and can be switched into a failing mode.
#[derive(Debug, Default)]
pub struct StaticStore {
    rows: Vec<EventRow>,
    fetches: AtomicUsize,
    failing: AtomicBool,
}

impl StaticStore {
    /// Rows are sorted by their date instant on the way in, like the real
    /// table query. Unparseable dates go last, in their original order.
    pub fn new(mut rows: Vec<EventRow>) -> Self {
        rows.sort_by_cached_key(|row| {
            let instant = parse_timestamp(&row.date);
            (instant.is_none(), instant)
        });
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventStore for StaticStore {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_events(&self) -> Result<Vec<EventRow>, ShowcaseError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ShowcaseError::Store("store unavailable".to_owned()));
        }
        Ok(self.rows.clone())
    }
}
