use crate::common::Location;
use crate::domains::matches::Match;
use crate::domains::matching::utils::sport_affinity;
use crate::domains::players::Player;

use super::MatchingStrategy;

const SPORT_WEIGHT: f64 = 0.2;
const DISTANCE_WEIGHT: f64 = 0.8;

pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Prefers players who live close to the venue.
///
/// The radius comes from the match criteria, then the match location, then
/// the strategy default. Players or matches without a location never fit.
#[derive(Debug, Clone, Copy)]
pub struct ProximityStrategy {
    default_radius_km: f64,
}

impl Default for ProximityStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_KM)
    }
}

impl ProximityStrategy {
    pub fn new(default_radius_km: f64) -> Self {
        Self { default_radius_km }
    }

    pub fn radius_for(&self, game: &Match) -> f64 {
        let radius = game
            .criteria()
            .and_then(|criteria| criteria.max_radius_km)
            .or_else(|| game.location().and_then(Location::radius))
            .unwrap_or(self.default_radius_km);
        if radius > 0.0 {
            radius
        } else {
            DEFAULT_RADIUS_KM
        }
    }

    fn distance(player: &Player, game: &Match) -> Option<f64> {
        game.location().and_then(|venue| player.distance_to(venue))
    }
}

impl MatchingStrategy for ProximityStrategy {
    fn name(&self) -> &'static str {
        "proximity"
    }

    fn compatibility_score(&self, player: &Player, game: &Match) -> f64 {
        let Some(distance) = Self::distance(player, game) else {
            return 0.0;
        };
        let radius = self.radius_for(game);
        if distance > radius {
            return 0.0;
        }
        let closeness = 1.0 - distance / radius;
        let score = SPORT_WEIGHT * sport_affinity(player, game) + DISTANCE_WEIGHT * closeness;
        score.clamp(0.0, 1.0)
    }

    fn is_compatible(&self, player: &Player, game: &Match) -> bool {
        Self::distance(player, game).is_some_and(|distance| distance <= self.radius_for(game))
    }
}
