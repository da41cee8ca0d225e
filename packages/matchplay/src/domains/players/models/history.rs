use serde::{Deserialize, Serialize};

use crate::common::{MatchId, PlayerId};
use crate::domains::sports::Sport;

/// How a past match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    Finished,
    Cancelled,
}

/// One entry of a player's match history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PastMatch {
    pub match_id: MatchId,
    pub sport: Sport,
    pub outcome: MatchOutcome,
    pub participants: Vec<PlayerId>,
}

impl PastMatch {
    pub fn new(sport: Sport, outcome: MatchOutcome, participants: Vec<PlayerId>) -> Self {
        Self {
            match_id: MatchId::new(),
            sport,
            outcome,
            participants,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome == MatchOutcome::Finished
    }
}
