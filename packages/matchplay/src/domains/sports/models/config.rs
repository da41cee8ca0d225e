use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use typed_builder::TypedBuilder;

use super::Sport;

/// Why a sport configuration cannot describe a playable match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SportConfigError {
    #[error("{sport}: team layout must not be empty")]
    EmptyLayout { sport: Sport },

    #[error("{sport}: a match needs at least 2 players, layout gives {roster_size}")]
    RosterTooSmall { sport: Sport, roster_size: usize },

    #[error("{sport}: duration must be positive")]
    ZeroDuration { sport: Sport },
}

/// Roster layout and nominal length of a sport.
///
/// Only read when a match is created; later changes to a catalog entry do not
/// touch matches that already exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
pub struct SportConfig {
    pub sport: Sport,
    #[builder(default = 2)]
    pub team_count: u8,
    pub players_per_team: u8,
    #[builder(default = 60)]
    pub duration_minutes: u32,
}

impl SportConfig {
    /// Total players required to play.
    pub fn roster_size(&self) -> usize {
        self.team_count as usize * self.players_per_team as usize
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_minutes as i64)
    }

    /// Checks the layout describes a playable match.
    pub fn validate(&self) -> Result<(), SportConfigError> {
        let sport = self.sport;
        if self.team_count == 0 || self.players_per_team == 0 {
            return Err(SportConfigError::EmptyLayout { sport });
        }
        if self.roster_size() < 2 {
            return Err(SportConfigError::RosterTooSmall {
                sport,
                roster_size: self.roster_size(),
            });
        }
        if self.duration_minutes == 0 {
            return Err(SportConfigError::ZeroDuration { sport });
        }
        Ok(())
    }

    fn preset(sport: Sport, players_per_team: u8, duration_minutes: u32) -> Self {
        Self {
            sport,
            team_count: 2,
            players_per_team,
            duration_minutes,
        }
    }
}

/// Lookup table from sport to its configuration.
#[derive(Debug, Clone)]
pub struct SportCatalog {
    configs: HashMap<Sport, SportConfig>,
}

impl SportCatalog {
    pub fn empty() -> Self {
        Self {
            configs: HashMap::new(),
        }
    }

    pub fn get(&self, sport: Sport) -> Option<&SportConfig> {
        self.configs.get(&sport)
    }

    /// Replaces (or adds) the entry for `config.sport`.
    pub fn with(mut self, config: SportConfig) -> Self {
        self.configs.insert(config.sport, config);
        self
    }

    pub fn sports(&self) -> impl Iterator<Item = Sport> + '_ {
        self.configs.keys().copied()
    }
}

impl Default for SportCatalog {
    fn default() -> Self {
        Self::empty()
            .with(SportConfig::preset(Sport::Football5, 5, 60))
            .with(SportConfig::preset(Sport::Football7, 7, 70))
            .with(SportConfig::preset(Sport::Football11, 11, 90))
            .with(SportConfig::preset(Sport::Basketball, 5, 48))
            .with(SportConfig::preset(Sport::Volleyball, 6, 90))
            .with(SportConfig::preset(Sport::Tennis, 1, 90))
            .with(SportConfig::preset(Sport::Padel, 2, 90))
    }
}
