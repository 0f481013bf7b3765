use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{RANK_MASTER_STEPS, RANK_TIER_STEPS, RANK_TIER_WEIGHT};

static RANK_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(ノーマル|スーパー|ハイパー|マスター)([0-9]+)")
        .map_err(|err| log::error!("rank pattern failed to compile: {err}"))
        .ok()
});

/// Research rank tier, ordered from easiest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Normal,
    Super,
    Hyper,
    Master,
}

impl Tier {
    pub const ALL: [Self; 4] = [Self::Normal, Self::Super, Self::Hyper, Self::Master];

    #[must_use]
    pub const fn index(self) -> u32 {
        match self {
            Self::Normal => 0,
            Self::Super => 1,
            Self::Hyper => 2,
            Self::Master => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "ノーマル",
            Self::Super => "スーパー",
            Self::Hyper => "ハイパー",
            Self::Master => "マスター",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.label() == label)
    }

    /// Highest selectable number within the tier.
    #[must_use]
    pub const fn steps(self) -> u32 {
        match self {
            Self::Master => RANK_MASTER_STEPS,
            _ => RANK_TIER_STEPS,
        }
    }
}

/// A tier plus a number, e.g. `スーパー3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rank {
    pub tier: Tier,
    pub number: u32,
}

impl Rank {
    #[must_use]
    pub const fn new(tier: Tier, number: u32) -> Self {
        Self { tier, number }
    }

    /// Parse the first `<tier><number>` occurrence in `text`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let re = RANK_PATTERN.as_ref()?;
        let caps = re.captures(text)?;
        let tier = Tier::from_label(caps.get(1)?.as_str())?;
        let number = caps.get(2)?.as_str().parse().ok()?;
        Some(Self { tier, number })
    }

    /// Total order key: `tier_index * 100 + number`.
    #[must_use]
    pub const fn order_key(self) -> u32 {
        self.tier.index() * RANK_TIER_WEIGHT + self.number
    }

    /// Every rank offered as a threshold, ascending.
    #[must_use]
    pub fn all() -> Vec<Self> {
        Tier::ALL
            .into_iter()
            .flat_map(|tier| (1..=tier.steps()).map(move |number| Self::new(tier, number)))
            .collect()
    }

    /// Whether a raw rank string sits at or below this threshold.
    ///
    /// Unparsable strings never satisfy a threshold.
    #[must_use]
    pub fn admits(self, raw: &str) -> bool {
        Self::parse(raw).is_some_and(|rank| rank <= self)
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tier.label(), self.number)
    }
}

impl std::str::FromStr for Rank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unrecognised rank: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tier_and_number() {
        assert_eq!(Rank::parse("スーパー3"), Some(Rank::new(Tier::Super, 3)));
        assert_eq!(Rank::parse("マスター12"), Some(Rank::new(Tier::Master, 12)));
        assert_eq!(
            Rank::parse(" ハイパー1 以上"),
            Some(Rank::new(Tier::Hyper, 1))
        );
        assert_eq!(Rank::parse("ウルトラ1"), None);
        assert_eq!(Rank::parse("ノーマル"), None);
        assert_eq!(Rank::parse(""), None);
    }

    #[test]
    fn number_stops_at_first_non_ascii_digit() {
        assert_eq!(Rank::parse("スーパー1２"), Some(Rank::new(Tier::Super, 1)));
        assert_eq!(Rank::parse("ハイパー３"), None);
        assert!(Rank::new(Tier::Super, 1).admits("スーパー1２"));
    }

    #[test]
    fn orders_by_tier_then_number() {
        let normal5 = Rank::new(Tier::Normal, 5);
        let super1 = Rank::new(Tier::Super, 1);
        let master20 = Rank::new(Tier::Master, 20);
        assert!(normal5 < super1);
        assert!(super1 < master20);
        assert_eq!(super1.order_key(), 101);
        assert_eq!(master20.order_key(), 320);
    }

    #[test]
    fn threshold_is_inclusive_and_rejects_garbage() {
        let threshold = Rank::new(Tier::Super, 5);
        assert!(threshold.admits("スーパー5"));
        assert!(threshold.admits("ノーマル1"));
        assert!(!threshold.admits("ハイパー1"));
        assert!(!threshold.admits("???"));
    }

    #[test]
    fn selectable_ranks_cover_every_tier() {
        let ranks = Rank::all();
        assert_eq!(ranks.len(), 35);
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ranks.first().map(ToString::to_string).as_deref(), Some("ノーマル1"));
        assert_eq!(ranks.last().map(ToString::to_string).as_deref(), Some("マスター20"));
    }

    #[test]
    fn round_trips_through_display() {
        for rank in Rank::all() {
            assert_eq!(rank.to_string().parse::<Rank>(), Ok(rank));
        }
    }
}
