use crate::domains::matches::Match;
use crate::domains::players::Player;

use super::{HistoryStrategy, LevelStrategy, MatchingStrategy, ProximityStrategy};

const LEVEL_WEIGHT: f64 = 0.4;
const PROXIMITY_WEIGHT: f64 = 0.3;
const HISTORY_WEIGHT: f64 = 0.3;

/// Votes a candidate in when at least this many strategies agree.
const QUORUM: usize = 2;

/// Weighted blend of level, proximity and history.
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridStrategy {
    level: LevelStrategy,
    proximity: ProximityStrategy,
    history: HistoryStrategy,
}

impl HybridStrategy {
    pub fn new(default_radius_km: f64) -> Self {
        Self {
            level: LevelStrategy,
            proximity: ProximityStrategy::new(default_radius_km),
            history: HistoryStrategy,
        }
    }
}

impl MatchingStrategy for HybridStrategy {
    fn name(&self) -> &'static str {
        "hybrid"
    }

    fn compatibility_score(&self, player: &Player, game: &Match) -> f64 {
        let score = LEVEL_WEIGHT * self.level.compatibility_score(player, game)
            + PROXIMITY_WEIGHT * self.proximity.compatibility_score(player, game)
            + HISTORY_WEIGHT * self.history.compatibility_score(player, game);
        score.clamp(0.0, 1.0)
    }

    fn is_compatible(&self, player: &Player, game: &Match) -> bool {
        let votes = [
            self.level.is_compatible(player, game),
            self.proximity.is_compatible(player, game),
            self.history.is_compatible(player, game),
        ];
        votes.iter().filter(|vote| **vote).count() >= QUORUM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Location;
    use crate::domains::matching::strategies::test_support::*;
    use crate::domains::players::SkillLevel;
    use crate::domains::sports::Sport;

    #[test]
    fn test_two_of_three_is_enough() {
        // Level and history agree, proximity does not (no home location)
        let game = game_with(Sport::Football5, &[SkillLevel::Intermediate], Some(court()));
        let player = candidate(SkillLevel::Intermediate, Some(Sport::Football5), None);

        let hybrid = HybridStrategy::default();
        assert!(!ProximityStrategy::default().is_compatible(&player, &game));
        assert!(hybrid.is_compatible(&player, &game));
    }

    #[test]
    fn test_one_of_three_is_not() {
        // Far away and two levels apart; history alone is neutral
        let game = game_with(Sport::Football5, &[SkillLevel::Beginner], Some(court()));
        let player = candidate(
            SkillLevel::Advanced,
            None,
            Some(Location::new(45.5, -94.0)),
        );

        assert!(HistoryStrategy.is_compatible(&player, &game));
        assert!(!HybridStrategy::new(10.0).is_compatible(&player, &game));
    }

    #[test]
    fn test_perfect_candidate_scores_high() {
        let game = game_with(Sport::Football5, &[SkillLevel::Intermediate], Some(court()));
        let player = candidate(
            SkillLevel::Intermediate,
            Some(Sport::Football5),
            Some(court()),
        );

        let score = HybridStrategy::default().compatibility_score(&player, &game);
        // Level and proximity are 1.0; history is 0.6 with no record
        assert!((score - (0.4 + 0.3 + 0.3 * 0.6)).abs() < 1e-9, "got {score}");
    }
}
