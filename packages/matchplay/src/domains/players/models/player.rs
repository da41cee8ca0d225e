use anyhow::Result;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::common::{Location, PlayerId};
use crate::domains::sports::Sport;

use super::PastMatch;

/// Skill tiers, ordered from least to most experienced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Position on the ordinal scale (Beginner = 0).
    pub fn ordinal(&self) -> u8 {
        match self {
            SkillLevel::Beginner => 0,
            SkillLevel::Intermediate => 1,
            SkillLevel::Advanced => 2,
        }
    }
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkillLevel::Beginner => write!(f, "beginner"),
            SkillLevel::Intermediate => write!(f, "intermediate"),
            SkillLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl std::str::FromStr for SkillLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" => Ok(SkillLevel::Advanced),
            _ => Err(anyhow::anyhow!("Invalid skill level: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
            Gender::Other => write!(f, "other"),
        }
    }
}

/// Snapshot of a player as supplied by the account service.
///
/// The core never mutates a player; every evaluation reads one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct Player {
    #[builder(default)]
    pub id: PlayerId,
    #[builder(setter(into))]
    pub name: String,
    pub level: SkillLevel,
    pub age: u8,
    pub gender: Gender,
    #[builder(default, setter(strip_option))]
    pub location: Option<Location>,
    #[builder(default, setter(strip_option))]
    pub favorite_sport: Option<Sport>,
    /// Past matches, only consulted by history-based matching.
    #[builder(default)]
    pub history: Vec<PastMatch>,
}

impl Player {
    /// Whether the player's favourite sport rules them out for `sport`.
    ///
    /// An unset favourite never excludes.
    pub fn prefers_other_sport(&self, sport: Sport) -> bool {
        self.favorite_sport.is_some_and(|favorite| favorite != sport)
    }

    /// Distance from the player's home to `location`, if the player has one.
    pub fn distance_to(&self, location: &Location) -> Option<f64> {
        self.location.as_ref().map(|home| home.distance_km(location))
    }

    pub fn history_in(&self, sport: Sport) -> impl Iterator<Item = &PastMatch> {
        self.history.iter().filter(move |past| past.sport == sport)
    }

    /// Past matches this player shared with `other`.
    pub fn history_with(&self, other: PlayerId) -> impl Iterator<Item = &PastMatch> {
        self.history
            .iter()
            .filter(move |past| past.participants.contains(&other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::builder()
            .name("Ana")
            .level(SkillLevel::Intermediate)
            .age(29)
            .gender(Gender::Female)
            .build()
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(SkillLevel::Beginner < SkillLevel::Intermediate);
        assert!(SkillLevel::Intermediate < SkillLevel::Advanced);
        assert_eq!(SkillLevel::Advanced.ordinal(), 2);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(
            "advanced".parse::<SkillLevel>().unwrap(),
            SkillLevel::Advanced
        );
        assert!("pro".parse::<SkillLevel>().is_err());
    }

    #[test]
    fn test_unset_favorite_never_excludes() {
        let p = player();
        for sport in Sport::ALL {
            assert!(!p.prefers_other_sport(sport));
        }
    }

    #[test]
    fn test_favorite_excludes_other_sports() {
        let mut p = player();
        p.favorite_sport = Some(Sport::Padel);
        assert!(!p.prefers_other_sport(Sport::Padel));
        assert!(p.prefers_other_sport(Sport::Tennis));
    }

    #[test]
    fn test_distance_requires_home() {
        let mut p = player();
        let court = Location::new(40.0, -3.0);
        assert_eq!(p.distance_to(&court), None);

        p.location = Some(court);
        assert_eq!(p.distance_to(&court), Some(0.0));
    }
}
