use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Subscription level of an account, embedded in every token.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Tier {
    #[default]
    Free,
    Basic,
    Premium,
}

impl Tier {
    /// Human-readable name for listings
    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Free => "Free",
            Tier::Basic => "Basic",
            Tier::Premium => "Premium",
        }
    }

    /// Monthly list price in cents
    pub fn price_cents(&self) -> i64 {
        match self {
            Tier::Free => 0,
            Tier::Basic => 999,
            Tier::Premium => 2999,
        }
    }

    pub fn all() -> &'static [Tier] {
        &[Tier::Free, Tier::Basic, Tier::Premium]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("free".parse::<Tier>().unwrap(), Tier::Free);
        assert_eq!("Premium".parse::<Tier>().unwrap(), Tier::Premium);
        assert_eq!("BASIC".parse::<Tier>().unwrap(), Tier::Basic);
        assert!("gold".parse::<Tier>().is_err());
        assert!("".parse::<Tier>().is_err());
    }

    #[test]
    fn test_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Premium).unwrap(), "\"premium\"");
        let t: Tier = serde_json::from_str("\"basic\"").unwrap();
        assert_eq!(t, Tier::Basic);
        assert!(serde_json::from_str::<Tier>("\"Basic\"").is_err());
    }

    #[test]
    fn test_ordering_follows_price() {
        assert!(Tier::Free < Tier::Basic);
        assert!(Tier::Basic < Tier::Premium);
        for pair in Tier::all().windows(2) {
            assert!(pair[0].price_cents() < pair[1].price_cents());
        }
    }

    #[test]
    fn test_default_is_free() {
        assert_eq!(Tier::default(), Tier::Free);
    }
}
