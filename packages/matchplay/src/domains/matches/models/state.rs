//! Match lifecycle states and the pure transition function.
//!
//! ```text
//!  NeedPlayers ──roster full──► Formed ─confirm─► Confirmed ─start─► InPlay ─finish─► Finished
//!       ▲                         │                     │
//!       └──────roster opens───────┘                     │
//!       │                         │                     │
//!       └──────────── cancel ─────┴──────── cancel ─────┴──► Cancelled
//! ```
//!
//! Each state is a fixed set of capability flags; no state carries data.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    NeedPlayers,
    Formed,
    Confirmed,
    InPlay,
    Finished,
    Cancelled,
}

/// Operations that move a match between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateOp {
    /// Roster reached the required size (automatic).
    RosterFilled,
    /// Roster dropped below the required size (automatic).
    RosterOpened,
    Confirm,
    Start,
    Finish,
    Cancel,
}

/// A requested operation the current state does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {op} a match that is {from}")]
pub struct InvalidTransition {
    pub from: MatchState,
    pub op: StateOp,
}

impl MatchState {
    pub const ALL: [MatchState; 6] = [
        MatchState::NeedPlayers,
        MatchState::Formed,
        MatchState::Confirmed,
        MatchState::InPlay,
        MatchState::Finished,
        MatchState::Cancelled,
    ];

    pub fn can_add_player(&self) -> bool {
        matches!(self, MatchState::NeedPlayers)
    }

    /// Players may leave while the roster is still being assembled.
    pub fn can_remove_player(&self) -> bool {
        matches!(self, MatchState::NeedPlayers | MatchState::Formed)
    }

    pub fn can_confirm(&self) -> bool {
        matches!(self, MatchState::Formed)
    }

    pub fn can_cancel(&self) -> bool {
        matches!(
            self,
            MatchState::NeedPlayers | MatchState::Formed | MatchState::Confirmed
        )
    }

    pub fn can_start(&self) -> bool {
        matches!(self, MatchState::Confirmed)
    }

    pub fn can_finish(&self) -> bool {
        matches!(self, MatchState::InPlay)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchState::Finished | MatchState::Cancelled)
    }

    /// Human readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            MatchState::NeedPlayers => "Need players",
            MatchState::Formed => "Formed",
            MatchState::Confirmed => "Confirmed",
            MatchState::InPlay => "In play",
            MatchState::Finished => "Finished",
            MatchState::Cancelled => "Cancelled",
        }
    }

    /// State reached by applying `op`, or the reason it is not allowed.
    pub fn next_legal(self, op: StateOp) -> Result<MatchState, InvalidTransition> {
        let next = match (self, op) {
            (MatchState::NeedPlayers, StateOp::RosterFilled) => MatchState::Formed,
            (MatchState::Formed, StateOp::RosterOpened) => MatchState::NeedPlayers,
            (state, StateOp::Confirm) if state.can_confirm() => MatchState::Confirmed,
            (state, StateOp::Start) if state.can_start() => MatchState::InPlay,
            (state, StateOp::Finish) if state.can_finish() => MatchState::Finished,
            (state, StateOp::Cancel) if state.can_cancel() => MatchState::Cancelled,
            (from, op) => return Err(InvalidTransition { from, op }),
        };
        Ok(next)
    }
}

impl StateOp {
    /// The operation whose successful application lands in `target`.
    pub fn for_target(target: MatchState) -> StateOp {
        match target {
            MatchState::NeedPlayers => StateOp::RosterOpened,
            MatchState::Formed => StateOp::RosterFilled,
            MatchState::Confirmed => StateOp::Confirm,
            MatchState::InPlay => StateOp::Start,
            MatchState::Finished => StateOp::Finish,
            MatchState::Cancelled => StateOp::Cancel,
        }
    }

    /// Roster operations are driven by roster size and never requested directly.
    pub fn is_automatic(&self) -> bool {
        matches!(self, StateOp::RosterFilled | StateOp::RosterOpened)
    }
}

impl std::fmt::Display for MatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchState::NeedPlayers => write!(f, "need_players"),
            MatchState::Formed => write!(f, "formed"),
            MatchState::Confirmed => write!(f, "confirmed"),
            MatchState::InPlay => write!(f, "in_play"),
            MatchState::Finished => write!(f, "finished"),
            MatchState::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for MatchState {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "need_players" => Ok(MatchState::NeedPlayers),
            "formed" => Ok(MatchState::Formed),
            "confirmed" => Ok(MatchState::Confirmed),
            "in_play" => Ok(MatchState::InPlay),
            "finished" => Ok(MatchState::Finished),
            "cancelled" => Ok(MatchState::Cancelled),
            _ => Err(anyhow::anyhow!("Invalid match state: {}", s)),
        }
    }
}

impl std::fmt::Display for StateOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateOp::RosterFilled => write!(f, "fill the roster of"),
            StateOp::RosterOpened => write!(f, "reopen the roster of"),
            StateOp::Confirm => write!(f, "confirm"),
            StateOp::Start => write!(f, "start"),
            StateOp::Finish => write!(f, "finish"),
            StateOp::Cancel => write!(f, "cancel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // (state, add, confirm, cancel, start, finish)
    const TABLE: [(MatchState, bool, bool, bool, bool, bool); 6] = [
        (MatchState::NeedPlayers, true, false, true, false, false),
        (MatchState::Formed, false, true, true, false, false),
        (MatchState::Confirmed, false, false, true, true, false),
        (MatchState::InPlay, false, false, false, false, true),
        (MatchState::Finished, false, false, false, false, false),
        (MatchState::Cancelled, false, false, false, false, false),
    ];

    #[test]
    fn test_capability_flags_match_table() {
        for (state, add, confirm, cancel, start, finish) in TABLE {
            assert_eq!(state.can_add_player(), add, "{state} add");
            assert_eq!(state.can_confirm(), confirm, "{state} confirm");
            assert_eq!(state.can_cancel(), cancel, "{state} cancel");
            assert_eq!(state.can_start(), start, "{state} start");
            assert_eq!(state.can_finish(), finish, "{state} finish");
        }
    }

    #[test]
    fn test_happy_path() {
        let state = MatchState::NeedPlayers
            .next_legal(StateOp::RosterFilled)
            .and_then(|s| s.next_legal(StateOp::Confirm))
            .and_then(|s| s.next_legal(StateOp::Start))
            .and_then(|s| s.next_legal(StateOp::Finish))
            .unwrap();
        assert_eq!(state, MatchState::Finished);
    }

    #[test]
    fn test_roster_ops_only_between_need_players_and_formed() {
        assert_eq!(
            MatchState::Formed.next_legal(StateOp::RosterOpened),
            Ok(MatchState::NeedPlayers)
        );
        for state in MatchState::ALL {
            if state != MatchState::NeedPlayers {
                assert!(state.next_legal(StateOp::RosterFilled).is_err());
            }
            if state != MatchState::Formed {
                assert!(state.next_legal(StateOp::RosterOpened).is_err());
            }
        }
    }

    #[test]
    fn test_cancel_only_before_play() {
        for state in MatchState::ALL {
            let result = state.next_legal(StateOp::Cancel);
            assert_eq!(result.is_ok(), state.can_cancel(), "{state}");
        }
        assert!(MatchState::InPlay.next_legal(StateOp::Cancel).is_err());
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        let ops = [
            StateOp::RosterFilled,
            StateOp::RosterOpened,
            StateOp::Confirm,
            StateOp::Start,
            StateOp::Finish,
            StateOp::Cancel,
        ];
        for state in [MatchState::Finished, MatchState::Cancelled] {
            assert!(state.is_terminal());
            for op in ops {
                let err = state.next_legal(op).unwrap_err();
                assert_eq!(err, InvalidTransition { from: state, op });
            }
        }
    }

    #[test]
    fn test_error_names_state_and_op() {
        let err = MatchState::NeedPlayers
            .next_legal(StateOp::Start)
            .unwrap_err();
        assert_eq!(err.to_string(), "cannot start a match that is need_players");
    }

    #[test]
    fn test_op_for_every_target() {
        for state in MatchState::ALL {
            let op = StateOp::for_target(state);
            let roster_driven = matches!(state, MatchState::NeedPlayers | MatchState::Formed);
            assert_eq!(op.is_automatic(), roster_driven, "{state}");
        }
        assert_eq!(StateOp::for_target(MatchState::InPlay), StateOp::Start);
    }

    #[test]
    fn test_state_parse() {
        for state in MatchState::ALL {
            assert_eq!(state.to_string().parse::<MatchState>().unwrap(), state);
        }
    }
}
