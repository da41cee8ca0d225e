use crate::domains::matches::Match;
use crate::domains::matching::utils::sport_affinity;
use crate::domains::players::Player;

use super::MatchingStrategy;

const SPORT_WEIGHT: f64 = 0.3;
const LEVEL_WEIGHT: f64 = 0.7;

/// Score lost per skill step between the candidate and the roster average.
const PENALTY_PER_STEP: f64 = 0.3;

/// Furthest a candidate may sit from the roster average, in skill steps.
const MAX_LEVEL_GAP: f64 = 1.0;

/// Prefers players whose skill is close to the roster's average.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelStrategy;

impl LevelStrategy {
    fn level_gap(player: &Player, game: &Match) -> f64 {
        (f64::from(player.level.ordinal()) - average_level(game)).abs()
    }
}

/// Mean skill ordinal of the roster. A roster is never empty, the creator is
/// always on it.
fn average_level(game: &Match) -> f64 {
    let roster = game.roster();
    if roster.is_empty() {
        return 0.0;
    }
    let total: f64 = roster.iter().map(|p| f64::from(p.level.ordinal())).sum();
    total / roster.len() as f64
}

impl MatchingStrategy for LevelStrategy {
    fn name(&self) -> &'static str {
        "level"
    }

    fn compatibility_score(&self, player: &Player, game: &Match) -> f64 {
        let closeness = (1.0 - PENALTY_PER_STEP * Self::level_gap(player, game)).max(0.0);
        let score = SPORT_WEIGHT * sport_affinity(player, game) + LEVEL_WEIGHT * closeness;
        score.clamp(0.0, 1.0)
    }

    fn is_compatible(&self, player: &Player, game: &Match) -> bool {
        Self::level_gap(player, game) <= MAX_LEVEL_GAP
    }
}
