use thiserror::Error;

use crate::common::PlayerId;
use crate::domains::matches::models::{CriteriaViolation, InvalidTransition, MatchState};
use crate::domains::sports::SportConfigError;

/// Everything a match mutation can refuse.
///
/// A failed operation leaves the match exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    #[error("cannot {operation} while the match is {state}")]
    IllegalState {
        state: MatchState,
        operation: &'static str,
    },

    #[error("player {0} is already enrolled")]
    DuplicatePlayer(PlayerId),

    #[error("player {0} is not enrolled")]
    PlayerNotEnrolled(PlayerId),

    #[error("player {0} created the match and cannot leave it")]
    CreatorCannotLeave(PlayerId),

    #[error("player {player_id} does not meet the match criteria: {violation}")]
    CriteriaNotMet {
        player_id: PlayerId,
        violation: CriteriaViolation,
    },

    #[error("match is full ({capacity} players)")]
    Full { capacity: usize },

    #[error("invalid sport configuration: {0}")]
    InvalidConfig(#[from] SportConfigError),
}
