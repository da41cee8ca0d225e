//! Pure helpers shared by every matching strategy.
//!
//! Nothing here has side effects; each function reads one player and one
//! match snapshot.

use crate::domains::matches::Match;
use crate::domains::players::Player;

use crate::domains::matching::strategies::ScoredCandidate;

/// Sport component when the player's favourite sport is the match's.
pub const SPORT_MATCH: f64 = 1.0;

/// Sport component when the player has no favourite sport.
pub const SPORT_UNSET: f64 = 0.5;

/// Sport component of every score.
///
/// Players whose favourite differs never reach scoring (see [`is_candidate`]),
/// but they get 0.0 if asked directly.
pub fn sport_affinity(player: &Player, game: &Match) -> f64 {
    match player.favorite_sport {
        Some(sport) if sport == game.sport() => SPORT_MATCH,
        Some(_) => 0.0,
        None => SPORT_UNSET,
    }
}

/// Filter shared by every strategy.
///
/// Drops players already on the roster, players whose favourite sport is a
/// different one, and players the match's criteria would refuse.
pub fn is_candidate(player: &Player, game: &Match) -> bool {
    if game.is_enrolled(player.id) || player.prefers_other_sport(game.sport()) {
        return false;
    }
    match game.criteria() {
        Some(criteria) => criteria.evaluate(player, game.location()).is_ok(),
        None => true,
    }
}

/// Sorts by descending score.
///
/// The sort is stable, so equal scores keep pool order.
pub fn rank(mut candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates
}
