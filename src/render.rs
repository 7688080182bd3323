//! Plain-text rendering of the events page for the terminal front-end.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::access::tier::Tier;
use crate::access::viewer::{TierSource, UpgradeOutcome};
use crate::events::Event;
use crate::page::{Listing, PageState};

pub fn tier_badge(tier: Tier) -> String {
    format!("{} {}", tier.emoji(), tier.label())
}

/// en-US long form, e.g. `March 15, 2024 at 06:00 PM`.
pub fn format_event_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y at %I:%M %p").to_string()
}

pub fn event_card(event: &Event, accessible: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", tier_badge(event.tier), event.title);
    if !event.description.is_empty() {
        let _ = writeln!(out, "    {}", event.description);
    }
    let _ = writeln!(out, "    📅 {}", format_event_date(&event.date));
    let _ = writeln!(out, "    🖼  {}", event.image_or_placeholder());
    if accessible {
        let _ = writeln!(out, "    🎟️ View Details");
    } else {
        let _ = writeln!(out, "    🔒 Upgrade Required: unlock with higher tier");
    }
    out
}

/// Offer for the next tier, or `None` at the top.
pub fn upgrade_banner(tier: Tier) -> Option<String> {
    let next = tier.next()?;
    Some(format!(
        "Unlock More Events with {next_label} Tier\n\
         You're currently on the {current} tier. Upgrade to {next_label} to access premium events and exclusive content.\n\
         Type `upgrade` to move to {next_label}.\n\
         * This is a simulation for demo purposes\n",
        next_label = next.label(),
        current = tier.label(),
    ))
}

pub fn listing(listing: &Listing) -> String {
    let viewer = listing.viewer();
    let partition = listing.partition();
    let mut out = String::new();

    let simulated = if viewer.source() == TierSource::Simulated {
        " (simulated)"
    } else {
        ""
    };
    let _ = writeln!(out, "Your tier: {}{simulated}", tier_badge(viewer.tier()));
    let _ = writeln!(out);

    if let Some(banner) = upgrade_banner(viewer.tier()) {
        let _ = writeln!(out, "{banner}");
    }

    let _ = writeln!(out, "🎪 Available Events ({})", partition.accessible().len());
    if partition.accessible().is_empty() {
        let _ = writeln!(out, "😔 No events available for your tier.");
    }
    for event in partition.accessible() {
        let _ = writeln!(out, "{}", event_card(event, true));
    }

    if !partition.restricted().is_empty() {
        let _ = writeln!(out, "🔒 Upgrade to Access ({})", partition.restricted().len());
        for event in partition.restricted() {
            let _ = writeln!(out, "{}", event_card(event, false));
        }
    }

    if !listing.rejected().is_empty() {
        let _ = writeln!(
            out,
            "⚠ {} event(s) hidden: invalid data from storage",
            listing.rejected().len()
        );
    }

    out
}

pub fn page(state: &PageState) -> String {
    match state {
        PageState::Loading => "Loading events...\n".to_owned(),
        PageState::SignedOut => "Please sign in to view events\n".to_owned(),
        PageState::Failed { message, .. } => {
            format!("Error: {message}\nType `retry` to try again.\n")
        }
        PageState::Refused { message } => {
            format!("Error: {message}\nYour membership tier needs fixing before events can be shown.\n")
        }
        PageState::Ready(l) => listing(l),
    }
}

pub fn upgrade_outcome(outcome: UpgradeOutcome) -> String {
    match outcome {
        UpgradeOutcome::Upgraded { from, to } => {
            format!("Tier upgraded from {} to {} (simulation only)\n", from.label(), to.label())
        }
        UpgradeOutcome::AlreadyAtMaximum(tier) => {
            format!("Already at {}, the highest tier\n", tier.label())
        }
    }
}

/// The tier ladder with prices, as shown on the landing page.
pub fn tier_overview() -> String {
    let mut out = String::new();
    for tier in Tier::ALL {
        let _ = writeln!(
            out,
            "{} Tier  ${}/month\n    {}",
            tier_badge(tier),
            tier.monthly_price_usd(),
            tier.perks()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn event(tier: Tier) -> Event {
        Event {
            id: "1".to_owned(),
            title: "Rust Meetup".to_owned(),
            description: "Talks and pizza".to_owned(),
            date: Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap(),
            image_url: String::new(),
            tier,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn date_uses_long_us_form() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 9, 7, 0).unwrap();
        assert_eq!(format_event_date(&date), "March 5, 2024 at 09:07 AM");
    }

    #[test]
    fn restricted_card_shows_lock() {
        let card = event_card(&event(Tier::Gold), false);
        assert!(card.contains("🥇 Gold"));
        assert!(card.contains("Upgrade Required"));
        assert!(!card.contains("View Details"));
    }

    #[test]
    fn accessible_card_uses_placeholder_image() {
        let card = event_card(&event(Tier::Free), true);
        assert!(card.contains("View Details"));
        assert!(card.contains(crate::events::PLACEHOLDER_IMAGE));
    }

    #[test]
    fn no_banner_at_platinum() {
        assert!(upgrade_banner(Tier::Platinum).is_none());
        let banner = upgrade_banner(Tier::Gold).unwrap();
        assert!(banner.starts_with("Unlock More Events with Platinum Tier"));
        assert!(banner.contains("simulation for demo purposes"));
    }

    #[test]
    fn page_states_render() {
        assert!(page(&PageState::SignedOut).contains("Please sign in"));
        let failed = PageState::Failed {
            viewer: None,
            message: "Failed to load events".to_owned(),
        };
        assert!(page(&failed).starts_with("Error: Failed to load events"));
        assert!(page(&PageState::Loading).contains("Loading"));

        let refused = PageState::Refused {
            message: "invalid tier: user 'u1' claims unrecognized tier 'diamond'".to_owned(),
        };
        let text = page(&refused);
        assert!(text.starts_with("Error: invalid tier: user 'u1'"));
        assert!(!text.contains("retry"));
    }

    #[test]
    fn overview_lists_every_tier() {
        let overview = tier_overview();
        for tier in Tier::ALL {
            assert!(overview.contains(tier.label()));
        }
        assert!(overview.contains("$299/month"));
    }
}
