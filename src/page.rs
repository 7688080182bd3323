use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::access::partition::Partition;
use crate::access::viewer::{UpgradeOutcome, Viewer};
use crate::access;
use crate::error::ShowcaseError;
use crate::events::{Event, RejectedRow, validate_rows};
use crate::providers::{AuthProvider, EventStore};

pub const LOAD_FAILED: &str = "Failed to load events";
pub const SESSION_FAILED: &str = "Failed to load session";

/// Fetched events for one viewer. The partition is derived on demand, so a
/// tier change never needs another fetch.
#[derive(Debug, Clone)]
pub struct Listing {
    viewer: Viewer,
    events: Vec<Event>,
    rejected: Vec<RejectedRow>,
}

impl Listing {
    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Valid events in storage order (date ascending).
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Rows refused during validation. Never part of either partition.
    pub fn rejected(&self) -> &[RejectedRow] {
        &self.rejected
    }

    pub fn partition(&self) -> Partition<'_> {
        access::partition(&self.events, self.viewer.tier())
    }
}

#[derive(Debug, Clone)]
pub enum PageState {
    /// Fetch pending. No partition is shown.
    Loading,
    SignedOut,
    /// `viewer` is known when only the event fetch failed; retry reuses it.
    Failed {
        viewer: Option<Viewer>,
        message: String,
    },
    /// The account's tier claim is unusable. Retrying cannot fix it.
    Refused {
        message: String,
    },
    Ready(Listing),
}

/// One events-page session: a single thread of control with at most one
/// fetch in flight (every transition takes `&mut self`).
pub struct EventsPage {
    session_id: Uuid,
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn EventStore>,
    user_id: Option<String>,
    fetch_timeout: Option<Duration>,
    state: PageState,
}

impl EventsPage {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn EventStore>,
        user_id: Option<String>,
    ) -> Self {
        Self {
            session_id: Uuid::now_v7(),
            auth,
            store,
            user_id,
            fetch_timeout: None,
            state: PageState::Loading,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn listing(&self) -> Option<&Listing> {
        match &self.state {
            PageState::Ready(listing) => Some(listing),
            _ => None,
        }
    }

    /// Resolve the signed-in user, read their tier, then fetch and partition.
    #[tracing::instrument(skip(self), fields(session = %self.session_id))]
    pub async fn load(&mut self) {
        self.state = PageState::Loading;

        let Some(user_id) = self.user_id.clone() else {
            info!("no signed-in user");
            self.state = PageState::SignedOut;
            return;
        };

        let profile = match self.auth.user(&user_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                info!(%user_id, "user not known to auth provider");
                self.state = PageState::SignedOut;
                return;
            }
            Err(e) => {
                error!(provider = self.auth.name(), error = %e, "error loading user");
                self.state = PageState::Failed {
                    viewer: None,
                    message: SESSION_FAILED.to_owned(),
                };
                return;
            }
        };

        let viewer = match Viewer::from_profile(&profile) {
            Ok(viewer) => viewer,
            Err(e) => {
                warn!(error = %e, "refusing session with invalid tier claim");
                self.state = PageState::Refused {
                    message: e.to_string(),
                };
                return;
            }
        };

        self.fetch(viewer).await;
    }

    /// Manual retry. Re-issues the same fetch when the viewer is already
    /// known, otherwise starts over with `load`.
    #[tracing::instrument(skip(self), fields(session = %self.session_id))]
    pub async fn retry(&mut self) {
        match &self.state {
            PageState::Failed {
                viewer: Some(viewer),
                ..
            } => {
                let viewer = viewer.clone();
                self.state = PageState::Loading;
                self.fetch(viewer).await;
            }
            _ => self.load().await,
        }
    }

    /// Demo upgrade: raise the viewer one tier and re-partition the events
    /// already held. No fetch, no write.
    pub fn upgrade(&mut self) -> Result<UpgradeOutcome, ShowcaseError> {
        match &mut self.state {
            PageState::Ready(listing) => Ok(listing.viewer.simulate_upgrade()),
            PageState::SignedOut => Err(ShowcaseError::Unauthenticated),
            _ => Err(ShowcaseError::NotReady),
        }
    }

    async fn fetch(&mut self, viewer: Viewer) {
        let result = match self.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, self.store.fetch_events())
                .await
                .unwrap_or_else(|_| {
                    Err(ShowcaseError::Store(format!("timed out after {limit:?}")))
                }),
            None => self.store.fetch_events().await,
        };

        self.state = match result {
            Ok(rows) => {
                let (events, rejected) = validate_rows(rows);
                info!(
                    user_id = viewer.user_id(),
                    tier = %viewer.tier(),
                    events = events.len(),
                    rejected = rejected.len(),
                    "events loaded"
                );
                PageState::Ready(Listing {
                    viewer,
                    events,
                    rejected,
                })
            }
            Err(e) => {
                error!(store = self.store.name(), error = %e, "error fetching events");
                PageState::Failed {
                    viewer: Some(viewer),
                    message: LOAD_FAILED.to_owned(),
                }
            }
        };
    }
}

impl std::fmt::Debug for EventsPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventsPage")
            .field("session_id", &self.session_id)
            .field("auth", &self.auth.name())
            .field("store", &self.store.name())
            .field("state", &self.state)
            .finish()
    }
}
