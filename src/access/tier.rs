use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShowcaseError;

/// Membership tiers ordered by access level.
/// Variant order defines the `Ord` derivation: Free < Silver < Gold < Platinum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Free, Tier::Silver, Tier::Gold, Tier::Platinum];

    pub fn ordinal(self) -> u8 {
        match self {
            Tier::Free => 0,
            Tier::Silver => 1,
            Tier::Gold => 2,
            Tier::Platinum => 3,
        }
    }

    /// The tier one step up, or `None` at the top.
    pub fn next(self) -> Option<Tier> {
        match self {
            Tier::Free => Some(Tier::Silver),
            Tier::Silver => Some(Tier::Gold),
            Tier::Gold => Some(Tier::Platinum),
            Tier::Platinum => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Silver => "silver",
            Tier::Gold => "gold",
            Tier::Platinum => "platinum",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Free => "Free",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Tier::Free => "🆓",
            Tier::Silver => "🥈",
            Tier::Gold => "🥇",
            Tier::Platinum => "💎",
        }
    }

    pub fn monthly_price_usd(self) -> u32 {
        match self {
            Tier::Free => 0,
            Tier::Silver => 29,
            Tier::Gold => 99,
            Tier::Platinum => 299,
        }
    }

    pub fn perks(self) -> &'static str {
        match self {
            Tier::Free => "Community events and basic workshops",
            Tier::Silver => "Premium workshops and networking dinners",
            Tier::Gold => "Masterclasses and VIP conference access",
            Tier::Platinum => "Private consultations and exclusive tours",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ShowcaseError;

    /// Accepts only the lowercase wire names. No fallback for unknown values.
    fn from_str(value: &str) -> Result<Self, ShowcaseError> {
        match value {
            "free" => Ok(Tier::Free),
            "silver" => Ok(Tier::Silver),
            "gold" => Ok(Tier::Gold),
            "platinum" => Ok(Tier::Platinum),
            other => Err(ShowcaseError::InvalidTier(format!("unrecognized tier '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_ordering() {
        assert!(Tier::Free < Tier::Silver);
        assert!(Tier::Silver < Tier::Gold);
        assert!(Tier::Gold < Tier::Platinum);
        assert!(Tier::Free < Tier::Platinum);
    }

    #[test]
    fn ordinals_follow_order() {
        let ordinals: Vec<u8> = Tier::ALL.iter().map(|t| t.ordinal()).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3]);
        for pair in Tier::ALL.windows(2) {
            assert_eq!(pair[0].cmp(&pair[1]), pair[0].ordinal().cmp(&pair[1].ordinal()));
        }
    }

    #[test]
    fn next_walks_the_ladder() {
        assert_eq!(Tier::Free.next(), Some(Tier::Silver));
        assert_eq!(Tier::Silver.next(), Some(Tier::Gold));
        assert_eq!(Tier::Gold.next(), Some(Tier::Platinum));
        assert_eq!(Tier::Platinum.next(), None);
    }

    #[test]
    fn parse_round_trips_display() {
        for tier in Tier::ALL {
            assert_eq!(tier.to_string().parse::<Tier>().unwrap(), tier);
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        for bad in ["diamond", "", "Gold", " free", "PLATINUM"] {
            let err = bad.parse::<Tier>().unwrap_err();
            assert!(matches!(err, ShowcaseError::InvalidTier(_)), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Tier::Gold).unwrap(), "\"gold\"");
        let tier: Tier = serde_json::from_str("\"silver\"").unwrap();
        assert_eq!(tier, Tier::Silver);
        assert!(serde_json::from_str::<Tier>("\"bronze\"").is_err());
    }

    #[test]
    fn prices_rise_with_tier() {
        for pair in Tier::ALL.windows(2) {
            assert!(pair[0].monthly_price_usd() < pair[1].monthly_price_usd());
        }
    }
}
