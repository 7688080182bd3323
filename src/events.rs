use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::access::tier::Tier;
use crate::error::ShowcaseError;

/// Shown when an event row carries no image reference.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-event.jpg";

/// A validated event. Every event holds exactly one known `Tier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub image_url: String,
    pub tier: Tier,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    pub fn image_or_placeholder(&self) -> &str {
        if self.image_url.trim().is_empty() {
            PLACEHOLDER_IMAGE
        } else {
            &self.image_url
        }
    }
}

// --- Storage row (maps 1:1 to the `events` table, nothing validated yet) ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRow {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub tier: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A row that was refused during validation. It is never rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub id: String,
    pub reason: String,
}

impl TryFrom<EventRow> for Event {
    type Error = ShowcaseError;

    fn try_from(row: EventRow) -> Result<Self, ShowcaseError> {
        let tier: Tier = row
            .tier
            .parse()
            .map_err(|e| ShowcaseError::InvalidEvent(format!("event '{}': {e}", row.id)))?;

        let date = parse_timestamp(&row.date).ok_or_else(|| {
            ShowcaseError::InvalidEvent(format!("event '{}': bad date '{}'", row.id, row.date))
        })?;

        // Bookkeeping timestamps are informational; an unparseable one is dropped.
        let created_at = row.created_at.as_deref().and_then(parse_timestamp);
        let updated_at = row.updated_at.as_deref().and_then(parse_timestamp);

        Ok(Self {
            id: row.id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            date,
            image_url: row.image_url.unwrap_or_default(),
            tier,
            created_at,
            updated_at,
        })
    }
}

/// Validate storage rows, keeping their order.
///
/// Rows with an unknown tier or an unparseable date are refused rather than
/// guessed at, so they never land in either partition.
pub fn validate_rows(rows: Vec<EventRow>) -> (Vec<Event>, Vec<RejectedRow>) {
    let mut events = Vec::with_capacity(rows.len());
    let mut rejected = Vec::new();

    for row in rows {
        let id = row.id.clone();
        match Event::try_from(row) {
            Ok(event) => events.push(event),
            Err(e) => {
                warn!(event_id = %id, error = %e, "refusing event row");
                rejected.push(RejectedRow {
                    id,
                    reason: e.to_string(),
                });
            }
        }
    }

    (events, rejected)
}

/// RFC 3339 first, then naive ISO timestamps read as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
