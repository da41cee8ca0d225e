use crate::domains::matches::Match;
use crate::domains::matching::utils::sport_affinity;
use crate::domains::players::{MatchOutcome, PastMatch, Player};

use super::MatchingStrategy;

const SPORT_WEIGHT: f64 = 0.2;
const COMPLETION_WEIGHT: f64 = 0.4;
const PAIRING_WEIGHT: f64 = 0.4;

/// Score for a player or pairing we know nothing about.
const NEUTRAL: f64 = 0.5;

const VOLUME_BONUS_PER_MATCH: f64 = 0.02;
const MAX_VOLUME_BONUS: f64 = 0.2;

/// Prefers reliable players who have played well with the current roster.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryStrategy;

impl HistoryStrategy {
    /// Share of the player's matches in this sport that finished, plus a small
    /// bonus for experience.
    pub fn completion(player: &Player, game: &Match) -> f64 {
        let (played, finished) = player
            .history_in(game.sport())
            .fold((0usize, 0usize), |(played, finished), past| {
                (played + 1, finished + usize::from(past.is_finished()))
            });
        if played == 0 {
            return NEUTRAL;
        }
        let rate = finished as f64 / played as f64;
        let bonus = (played as f64 * VOLUME_BONUS_PER_MATCH).min(MAX_VOLUME_BONUS);
        (rate + bonus).min(1.0)
    }

    /// Average of the pairwise scores between `player` and everyone already
    /// enrolled.
    pub fn pairing(player: &Player, game: &Match) -> f64 {
        let scores: Vec<f64> = game
            .roster()
            .iter()
            .filter(|enrolled| enrolled.id != player.id)
            .map(|enrolled| pair_score(player, enrolled))
            .collect();
        if scores.is_empty() {
            return NEUTRAL;
        }
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// 1.0 when every shared match finished, 0.0 when every one was cancelled.
///
/// Either side's history may record the pairing, the candidate's is read first.
fn pair_score(candidate: &Player, enrolled: &Player) -> f64 {
    let mut shared: Vec<&PastMatch> = candidate.history_with(enrolled.id).collect();
    if shared.is_empty() {
        shared = enrolled.history_with(candidate.id).collect();
    }
    if shared.is_empty() {
        return NEUTRAL;
    }
    let balance: i64 = shared
        .iter()
        .map(|past| match past.outcome {
            MatchOutcome::Finished => 1,
            MatchOutcome::Cancelled => -1,
        })
        .sum();
    NEUTRAL + NEUTRAL * balance as f64 / shared.len() as f64
}

impl MatchingStrategy for HistoryStrategy {
    fn name(&self) -> &'static str {
        "history"
    }

    fn compatibility_score(&self, player: &Player, game: &Match) -> f64 {
        let score = SPORT_WEIGHT * sport_affinity(player, game)
            + COMPLETION_WEIGHT * Self::completion(player, game)
            + PAIRING_WEIGHT * Self::pairing(player, game);
        score.clamp(0.0, 1.0)
    }

    /// Newcomers with no favourite sport land exactly on the threshold and pass.
    fn is_compatible(&self, player: &Player, game: &Match) -> bool {
        self.compatibility_score(player, game) >= NEUTRAL
    }
}
