use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::common::Location;
use crate::domains::players::{Gender, Player, SkillLevel};

/// Which genders a match accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "gender")]
pub enum GenderRule {
    #[default]
    Any,
    Only(Gender),
}

impl GenderRule {
    pub fn admits(&self, gender: Gender) -> bool {
        match self {
            GenderRule::Any => true,
            GenderRule::Only(required) => *required == gender,
        }
    }
}

/// The first dimension a player failed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaViolation {
    LevelTooLow { level: SkillLevel, min: SkillLevel },
    LevelTooHigh { level: SkillLevel, max: SkillLevel },
    TooYoung { age: u8, min: u8 },
    TooOld { age: u8, max: u8 },
    Gender { gender: Gender },
    OutOfRange { distance_km: f64, max_km: f64 },
    /// A radius is set but the player has no home location.
    LocationUnknown,
}

impl std::fmt::Display for CriteriaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CriteriaViolation::LevelTooLow { level, min } => {
                write!(f, "level {} is below {}", level, min)
            }
            CriteriaViolation::LevelTooHigh { level, max } => {
                write!(f, "level {} is above {}", level, max)
            }
            CriteriaViolation::TooYoung { age, min } => write!(f, "age {} is under {}", age, min),
            CriteriaViolation::TooOld { age, max } => write!(f, "age {} is over {}", age, max),
            CriteriaViolation::Gender { gender } => write!(f, "gender {} not accepted", gender),
            CriteriaViolation::OutOfRange {
                distance_km,
                max_km,
            } => write!(f, "{:.1} km away, limit is {:.1} km", distance_km, max_km),
            CriteriaViolation::LocationUnknown => write!(f, "player location unknown"),
        }
    }
}

/// Eligibility gate a match can impose on players who want to join.
///
/// Every bound is optional and an unset bound never rejects anyone. This is a
/// hard filter; scoring lives in the matching strategies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
pub struct EligibilityCriteria {
    #[builder(default, setter(strip_option))]
    pub min_level: Option<SkillLevel>,
    #[builder(default, setter(strip_option))]
    pub max_level: Option<SkillLevel>,
    #[builder(default, setter(strip_option))]
    pub min_age: Option<u8>,
    #[builder(default, setter(strip_option))]
    pub max_age: Option<u8>,
    #[builder(default)]
    pub gender: GenderRule,
    #[builder(default, setter(strip_option))]
    pub max_radius_km: Option<f64>,
}

impl EligibilityCriteria {
    /// Criteria that admit everyone.
    pub fn open() -> Self {
        Self::default()
    }

    /// Level, age and gender checks.
    pub fn satisfies(&self, player: &Player) -> bool {
        self.evaluate(player, None).is_ok()
    }

    /// Level, age and gender checks plus the radius check around `origin`.
    pub fn satisfies_at(&self, player: &Player, origin: &Location) -> bool {
        self.evaluate(player, Some(origin)).is_ok()
    }

    /// Runs every check and reports the first one that fails.
    ///
    /// The radius is only checked when `origin` is given.
    pub fn evaluate(
        &self,
        player: &Player,
        origin: Option<&Location>,
    ) -> Result<(), CriteriaViolation> {
        self.check_level(player.level)?;
        self.check_age(player.age)?;
        if !self.gender.admits(player.gender) {
            return Err(CriteriaViolation::Gender {
                gender: player.gender,
            });
        }
        if let Some(origin) = origin {
            self.check_distance(player, origin)?;
        }
        Ok(())
    }

    fn check_level(&self, level: SkillLevel) -> Result<(), CriteriaViolation> {
        if let Some(min) = self.min_level {
            if level < min {
                return Err(CriteriaViolation::LevelTooLow { level, min });
            }
        }
        if let Some(max) = self.max_level {
            if level > max {
                return Err(CriteriaViolation::LevelTooHigh { level, max });
            }
        }
        Ok(())
    }

    fn check_age(&self, age: u8) -> Result<(), CriteriaViolation> {
        if let Some(min) = self.min_age {
            if age < min {
                return Err(CriteriaViolation::TooYoung { age, min });
            }
        }
        if let Some(max) = self.max_age {
            if age > max {
                return Err(CriteriaViolation::TooOld { age, max });
            }
        }
        Ok(())
    }

    fn check_distance(&self, player: &Player, origin: &Location) -> Result<(), CriteriaViolation> {
        let Some(max_km) = self.max_radius_km else {
            return Ok(());
        };
        let distance_km = player
            .distance_to(origin)
            .ok_or(CriteriaViolation::LocationUnknown)?;
        if distance_km > max_km {
            return Err(CriteriaViolation::OutOfRange {
                distance_km,
                max_km,
            });
        }
        Ok(())
    }
}
