//! Pluggable player-to-match compatibility scoring.
//!
//! Every strategy answers two questions about one candidate and one match:
//! how well do they fit (`compatibility_score`, always within `[0, 1]`) and do
//! they fit at all (`is_compatible`). The strategy is chosen per call; nothing
//! stores a "current" strategy.

mod history;
mod hybrid;
mod level;
mod proximity;

pub use history::HistoryStrategy;
pub use hybrid::HybridStrategy;
pub use level::LevelStrategy;
pub use proximity::ProximityStrategy;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domains::matches::Match;
use crate::domains::matching::utils::{is_candidate, rank};
use crate::domains::players::Player;

/// A candidate and how well they fit.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub player: Player,
    pub score: f64,
}

pub trait MatchingStrategy: Send + Sync {
    /// Name used in logs and configuration.
    fn name(&self) -> &'static str;

    /// Fit of `player` for `game`, within `[0, 1]`.
    fn compatibility_score(&self, player: &Player, game: &Match) -> f64;

    /// Whether `player` is worth proposing for `game` at all.
    fn is_compatible(&self, player: &Player, game: &Match) -> bool;

    /// Compatible candidates from `pool`, best first.
    ///
    /// Enrolled players, players preferring another sport and players the
    /// match criteria refuse are never returned.
    fn find_compatible(&self, game: &Match, pool: &[Player]) -> Vec<ScoredCandidate> {
        let scored = pool
            .iter()
            .filter(|player| is_candidate(player, game))
            .filter(|player| self.is_compatible(player, game))
            .map(|player| ScoredCandidate {
                player: player.clone(),
                score: self.compatibility_score(player, game),
            })
            .collect();
        rank(scored)
    }
}

/// The built-in strategies, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Level,
    Proximity,
    History,
    Hybrid,
}

impl StrategyKind {
    /// Builds the strategy. `default_radius_km` applies to proximity scoring
    /// when neither the match criteria nor the match location set a radius.
    pub fn build(self, default_radius_km: f64) -> Box<dyn MatchingStrategy> {
        match self {
            StrategyKind::Level => Box::new(LevelStrategy),
            StrategyKind::Proximity => Box::new(ProximityStrategy::new(default_radius_km)),
            StrategyKind::History => Box::new(HistoryStrategy),
            StrategyKind::Hybrid => Box::new(HybridStrategy::new(default_radius_km)),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Level => write!(f, "level"),
            StrategyKind::Proximity => write!(f, "proximity"),
            StrategyKind::History => write!(f, "history"),
            StrategyKind::Hybrid => write!(f, "hybrid"),
        }
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "level" => Ok(StrategyKind::Level),
            "proximity" => Ok(StrategyKind::Proximity),
            "history" => Ok(StrategyKind::History),
            "hybrid" => Ok(StrategyKind::Hybrid),
            _ => Err(anyhow::anyhow!("Invalid matching strategy: {}", s)),
        }
    }
}

/// Top `limit` players from `pool` to invite to `game`.
pub fn recommend_players(
    strategy: &dyn MatchingStrategy,
    game: &Match,
    pool: &[Player],
    limit: usize,
) -> Vec<ScoredCandidate> {
    let mut ranked = strategy.find_compatible(game, pool);
    debug!(
        match_id = %game.id(),
        strategy = strategy.name(),
        pool = pool.len(),
        compatible = ranked.len(),
        "ranked invite candidates"
    );
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
pub(crate) mod test_support;
