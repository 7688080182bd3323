use serde_json::Value;
use tracing::info;

use super::tier::Tier;
use crate::error::ShowcaseError;
use crate::providers::UserProfile;

/// Where a viewer's current tier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierSource {
    /// Read from the auth provider's `tier` metadata.
    Claimed,
    /// Metadata had no tier, so the lowest tier applies.
    Defaulted,
    /// Raised by the demo upgrade. Session-local, never written back.
    Simulated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeOutcome {
    Upgraded { from: Tier, to: Tier },
    AlreadyAtMaximum(Tier),
}

/// The signed-in user as the access filter sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    user_id: String,
    email: Option<String>,
    tier: Tier,
    source: TierSource,
}

impl Viewer {
    pub fn new(user_id: &str, tier: Tier) -> Self {
        Self {
            user_id: user_id.to_owned(),
            email: None,
            tier,
            source: TierSource::Claimed,
        }
    }

    /// Build a viewer from an auth profile.
    ///
    /// A missing or null `tier` claim means `Free`. Anything else must be one
    /// of the four tier names; unknown values are an error, not a fallback.
    pub fn from_profile(profile: &UserProfile) -> Result<Self, ShowcaseError> {
        let (tier, source) = match profile.tier_claim() {
            None | Some(Value::Null) => (Tier::Free, TierSource::Defaulted),
            Some(Value::String(raw)) => {
                let tier = raw.parse().map_err(|_| {
                    ShowcaseError::InvalidTier(format!(
                        "user '{}' claims unrecognized tier '{raw}'",
                        profile.id
                    ))
                })?;
                (tier, TierSource::Claimed)
            }
            Some(other) => {
                return Err(ShowcaseError::InvalidTier(format!(
                    "user '{}': tier claim must be a string, got {other}",
                    profile.id
                )));
            }
        };

        Ok(Self {
            user_id: profile.id.clone(),
            email: profile.email.clone(),
            tier,
            source,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn source(&self) -> TierSource {
        self.source
    }

    /// Demo-only: move one tier up. Nothing is persisted and no backend is
    /// called; a reload restores the claimed tier.
    pub fn simulate_upgrade(&mut self) -> UpgradeOutcome {
        match self.tier.next() {
            None => UpgradeOutcome::AlreadyAtMaximum(self.tier),
            Some(next) => {
                let from = self.tier;
                self.tier = next;
                self.source = TierSource::Simulated;
                info!(user_id = %self.user_id, %from, to = %next, "tier upgraded (simulated)");
                UpgradeOutcome::Upgraded { from, to: next }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn profile(metadata: serde_json::Value) -> UserProfile {
        UserProfile {
            id: "user_1".to_owned(),
            email: Some("ada@example.com".to_owned()),
            public_metadata: metadata.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn missing_claim_defaults_to_free() {
        let viewer = Viewer::from_profile(&profile(json!({}))).unwrap();
        assert_eq!(viewer.tier(), Tier::Free);
        assert_eq!(viewer.source(), TierSource::Defaulted);
    }

    #[test]
    fn null_claim_defaults_to_free() {
        let viewer = Viewer::from_profile(&profile(json!({"tier": null}))).unwrap();
        assert_eq!(viewer.tier(), Tier::Free);
        assert_eq!(viewer.source(), TierSource::Defaulted);
    }

    #[test]
    fn claimed_tier_is_used() {
        let viewer = Viewer::from_profile(&profile(json!({"tier": "gold"}))).unwrap();
        assert_eq!(viewer.tier(), Tier::Gold);
        assert_eq!(viewer.source(), TierSource::Claimed);
        assert_eq!(viewer.email(), Some("ada@example.com"));
        assert_eq!(viewer.user_id(), "user_1");
    }

    #[test]
    fn unknown_claim_is_an_error() {
        let err = Viewer::from_profile(&profile(json!({"tier": "diamond"}))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid tier: user 'user_1' claims unrecognized tier 'diamond'"
        );
    }

    #[test]
    fn non_string_claim_is_an_error() {
        let err = Viewer::from_profile(&profile(json!({"tier": 3}))).unwrap_err();
        assert!(matches!(err, ShowcaseError::InvalidTier(_)));
    }

    #[test]
    fn upgrade_walks_to_platinum_then_stops() {
        let mut viewer = Viewer::new("u", Tier::Free);
        assert_eq!(
            viewer.simulate_upgrade(),
            UpgradeOutcome::Upgraded { from: Tier::Free, to: Tier::Silver }
        );
        assert_eq!(viewer.source(), TierSource::Simulated);
        viewer.simulate_upgrade();
        viewer.simulate_upgrade();
        assert_eq!(viewer.tier(), Tier::Platinum);
        assert_eq!(viewer.simulate_upgrade(), UpgradeOutcome::AlreadyAtMaximum(Tier::Platinum));
        assert_eq!(viewer.tier(), Tier::Platinum);
    }

    #[test]
    fn upgrade_at_maximum_keeps_claimed_source() {
        let mut viewer = Viewer::new("u", Tier::Platinum);
        viewer.simulate_upgrade();
        assert_eq!(viewer.source(), TierSource::Claimed);
    }
}
