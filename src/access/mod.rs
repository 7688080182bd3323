pub mod partition;
pub mod tier;
pub mod viewer;

use partition::Partition;
use tier::Tier;
use crate::events::Event;

/// An event is open to a viewer when its required tier is at or below theirs.
pub fn is_accessible(event: &Event, tier: Tier) -> bool {
    event.tier.ordinal() <= tier.ordinal()
}

/// Split `events` into accessible and restricted halves for `tier`.
///
/// Stable: both halves keep the input order. Callers sort by date before
/// calling; this never re-sorts. Pure, so re-running on the same input gives
/// the same halves.
pub fn partition(events: &[Event], tier: Tier) -> Partition<'_> {
    let (accessible, restricted): (Vec<&Event>, Vec<&Event>) =
        events.iter().partition(|event| is_accessible(event, tier));

    Partition::new(tier, accessible, restricted)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn event(id: &str, tier: Tier, day: i64) -> Event {
        Event {
            id: id.to_owned(),
            title: format!("Event {id}"),
            description: String::new(),
            date: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::days(day),
            image_url: String::new(),
            tier,
            created_at: None,
            updated_at: None,
        }
    }

    /// One event per tier, twice over, in date order.
    fn catalogue() -> Vec<Event> {
        Tier::ALL
            .iter()
            .chain(Tier::ALL.iter().rev())
            .enumerate()
            .map(|(i, tier)| event(&format!("e{i}"), *tier, i as i64))
            .collect()
    }

    fn ids(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn free_user_sees_only_free() {
        let events = vec![event("a", Tier::Free, 0), event("b", Tier::Gold, 1)];
        let p = partition(&events, Tier::Free);
        assert_eq!(ids(p.accessible()), vec!["a"]);
        assert_eq!(ids(p.restricted()), vec!["b"]);
    }

    #[test]
    fn platinum_user_has_nothing_restricted() {
        let events = catalogue();
        let p = partition(&events, Tier::Platinum);
        assert!(p.restricted().is_empty());
        assert_eq!(p.accessible().len(), events.len());
    }

    #[test]
    fn empty_input_gives_empty_halves() {
        for tier in Tier::ALL {
            let p = partition(&[], tier);
            assert!(p.accessible().is_empty());
            assert!(p.restricted().is_empty());
        }
    }

    #[test]
    fn halves_cover_input_without_overlap() {
        let events = catalogue();
        for tier in Tier::ALL {
            let p = partition(&events, tier);
            assert_eq!(p.len(), events.len());

            let mut seen: Vec<String> = ids(p.accessible());
            seen.extend(ids(p.restricted()));
            seen.sort();
            let mut expected: Vec<String> = events.iter().map(|e| e.id.clone()).collect();
            expected.sort();
            assert_eq!(seen, expected, "tier {tier}");
        }
    }

    #[test]
    fn membership_follows_ordinal_rule() {
        let events = catalogue();
        for tier in Tier::ALL {
            let p = partition(&events, tier);
            for e in p.accessible() {
                assert!(e.tier.ordinal() <= tier.ordinal());
            }
            for e in p.restricted() {
                assert!(e.tier.ordinal() > tier.ordinal());
            }
        }
    }

    #[test]
    fn order_is_preserved() {
        let events = catalogue();
        let p = partition(&events, Tier::Silver);
        let position = |id: &str| events.iter().position(|e| e.id == id).unwrap();
        for half in [p.accessible(), p.restricted()] {
            let positions: Vec<usize> = half.iter().map(|e| position(&e.id)).collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn repeated_partition_is_identical() {
        let events = catalogue();
        let first = partition(&events, Tier::Gold);
        let second = partition(&events, Tier::Gold);
        assert_eq!(ids(first.accessible()), ids(second.accessible()));
        assert_eq!(ids(first.restricted()), ids(second.restricted()));
    }

    #[test]
    fn higher_tier_never_loses_access() {
        let events = catalogue();
        for pair in Tier::ALL.windows(2) {
            let lower = ids(partition(&events, pair[0]).accessible());
            let higher = ids(partition(&events, pair[1]).accessible());
            assert!(lower.iter().all(|id| higher.contains(id)), "{} -> {}", pair[0], pair[1]);
        }
    }
}
