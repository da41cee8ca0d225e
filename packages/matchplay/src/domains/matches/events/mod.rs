use serde::{Deserialize, Serialize};

use crate::common::{MatchId, PlayerId};
use crate::domains::matches::models::MatchState;

/// Match lifecycle events (facts)
///
/// Returned by every successful mutation, in the order they happened. The
/// core never delivers them itself; see `kernel::dispatch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    PlayerAdded {
        match_id: MatchId,
        player_id: PlayerId,
        roster_count: usize,
        capacity: usize,
    },
    PlayerRemoved {
        match_id: MatchId,
        player_id: PlayerId,
        roster_count: usize,
        capacity: usize,
    },
    StateChanged {
        match_id: MatchId,
        previous: MatchState,
        new: MatchState,
    },
}

impl MatchEvent {
    pub fn match_id(&self) -> MatchId {
        match self {
            MatchEvent::PlayerAdded { match_id, .. }
            | MatchEvent::PlayerRemoved { match_id, .. }
            | MatchEvent::StateChanged { match_id, .. } => *match_id,
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            MatchEvent::PlayerAdded { .. } => "player_added",
            MatchEvent::PlayerRemoved { .. } => "player_removed",
            MatchEvent::StateChanged { .. } => "state_changed",
        }
    }
}
