use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use typed_builder::TypedBuilder;

use crate::common::{Location, MatchId, PlayerId};
use crate::domains::matches::errors::MatchError;
use crate::domains::matches::events::MatchEvent;
use crate::domains::players::Player;
use crate::domains::sports::{Sport, SportConfig};

use super::{EligibilityCriteria, MatchSchedule, MatchState, ScheduleError, StateOp};

/// Parameters for [`Match::create`].
#[derive(TypedBuilder)]
pub struct NewMatch<'a> {
    pub config: &'a SportConfig,
    pub creator: Player,
    pub schedule: MatchSchedule,
    #[builder(default, setter(strip_option))]
    pub location: Option<Location>,
    #[builder(default, setter(strip_option))]
    pub criteria: Option<EligibilityCriteria>,
}

/// One organised game and its roster.
///
/// Fields are private so the roster invariants hold: never more players than
/// `capacity`, no duplicates, and the creator is always enrolled.
/// Deserialization checks the same invariants before handing out a `Match`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "MatchRecord")]
pub struct Match {
    id: MatchId,
    sport: Sport,
    capacity: usize,
    team_count: u8,
    duration_minutes: u32,
    schedule: MatchSchedule,
    location: Option<Location>,
    creator: PlayerId,
    roster: Vec<Player>,
    state: MatchState,
    criteria: Option<EligibilityCriteria>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Match {
    /// Creates a match in `NeedPlayers` with the creator enrolled.
    ///
    /// The sport configuration is validated here and copied; it is never read
    /// again.
    pub fn create(params: NewMatch<'_>) -> Result<Self, MatchError> {
        params.config.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: MatchId::new(),
            sport: params.config.sport,
            capacity: params.config.roster_size(),
            team_count: params.config.team_count,
            duration_minutes: params.config.duration_minutes,
            schedule: params.schedule,
            location: params.location,
            creator: params.creator.id,
            roster: vec![params.creator],
            state: MatchState::NeedPlayers,
            criteria: params.criteria,
            created_at: now,
            updated_at: now,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn sport(&self) -> Sport {
        self.sport
    }

    /// Number of players required to play.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn creator(&self) -> PlayerId {
        self.creator
    }

    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    pub fn roster_count(&self) -> usize {
        self.roster.len()
    }

    pub fn schedule(&self) -> &MatchSchedule {
        &self.schedule
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn criteria(&self) -> Option<&EligibilityCriteria> {
        self.criteria.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_minutes as i64)
    }

    pub fn is_enrolled(&self, player_id: PlayerId) -> bool {
        self.roster.iter().any(|p| p.id == player_id)
    }

    pub fn is_full(&self) -> bool {
        self.roster.len() >= self.capacity
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn players_needed(&self) -> usize {
        self.capacity.saturating_sub(self.roster.len())
    }

    /// Enrolled players as a percentage of capacity.
    pub fn occupancy_percent(&self) -> f64 {
        self.roster.len() as f64 / self.capacity as f64 * 100.0
    }

    pub fn starts_at(&self) -> Result<DateTime<Utc>, ScheduleError> {
        self.schedule.starts_at()
    }

    /// Kick-off plus the sport's nominal duration.
    pub fn ends_at(&self) -> Result<DateTime<Utc>, ScheduleError> {
        Ok(self.starts_at()? + self.duration())
    }

    /// Whether a new player could join right now.
    ///
    /// A schedule that cannot be resolved counts as not available.
    pub fn is_available(&self, now: DateTime<Utc>) -> bool {
        self.state.can_add_player()
            && !self.is_full()
            && self.starts_at().map(|start| start > now).unwrap_or(false)
    }

    /// Roster dealt round-robin into the sport's teams, in enrolment order.
    pub fn teams(&self) -> Vec<Vec<PlayerId>> {
        let team_count = self.team_count.max(1) as usize;
        let mut teams = vec![Vec::new(); team_count];
        for (seat, player) in self.roster.iter().enumerate() {
            teams[seat % team_count].push(player.id);
        }
        teams
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Enrols `player`.
    ///
    /// Returns `StateChanged` first when the new player fills the roster,
    /// followed by `PlayerAdded`.
    pub fn add_player(&mut self, player: Player) -> Result<Vec<MatchEvent>, MatchError> {
        if !self.state.can_add_player() {
            return Err(MatchError::IllegalState {
                state: self.state,
                operation: "add a player",
            });
        }
        if self.is_enrolled(player.id) {
            return Err(MatchError::DuplicatePlayer(player.id));
        }
        if self.is_full() {
            return Err(MatchError::Full {
                capacity: self.capacity,
            });
        }
        if let Some(criteria) = &self.criteria {
            criteria
                .evaluate(&player, self.location.as_ref())
                .map_err(|violation| MatchError::CriteriaNotMet {
                    player_id: player.id,
                    violation,
                })?;
        }

        let player_id = player.id;
        self.roster.push(player);
        self.touch();

        let mut events = Vec::with_capacity(2);
        events.extend(self.reconcile_roster());
        events.push(MatchEvent::PlayerAdded {
            match_id: self.id,
            player_id,
            roster_count: self.roster.len(),
            capacity: self.capacity,
        });
        Ok(events)
    }

    /// Removes `player_id` from the roster.
    ///
    /// The creator check comes first so it is reported in every state.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<Vec<MatchEvent>, MatchError> {
        if player_id == self.creator {
            return Err(MatchError::CreatorCannotLeave(player_id));
        }
        if !self.state.can_remove_player() {
            return Err(MatchError::IllegalState {
                state: self.state,
                operation: "remove a player",
            });
        }
        let seat = self
            .roster
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(MatchError::PlayerNotEnrolled(player_id))?;

        self.roster.remove(seat);
        self.touch();

        let mut events = Vec::with_capacity(2);
        events.extend(self.reconcile_roster());
        events.push(MatchEvent::PlayerRemoved {
            match_id: self.id,
            player_id,
            roster_count: self.roster.len(),
            capacity: self.capacity,
        });
        Ok(events)
    }

    /// Replaces the eligibility gate. Already enrolled players stay.
    pub fn apply_criteria(&mut self, criteria: EligibilityCriteria) {
        self.criteria = Some(criteria);
        self.touch();
    }

    pub fn clear_criteria(&mut self) {
        self.criteria = None;
        self.touch();
    }

    /// Explicit move to `target` (Confirmed, InPlay, Finished or Cancelled).
    ///
    /// `NeedPlayers` and `Formed` follow the roster and are always rejected
    /// here.
    pub fn transition_to(&mut self, target: MatchState) -> Result<MatchEvent, MatchError> {
        let op = StateOp::for_target(target);
        if op.is_automatic() {
            return Err(super::InvalidTransition {
                from: self.state,
                op,
            }
            .into());
        }
        Ok(self.apply(op)?)
    }

    fn apply(&mut self, op: StateOp) -> Result<MatchEvent, super::InvalidTransition> {
        let previous = self.state;
        let new = previous.next_legal(op)?;
        self.state = new;
        self.touch();
        debug!(match_id = %self.id, from = %previous, to = %new, "match state changed");
        Ok(MatchEvent::StateChanged {
            match_id: self.id,
            previous,
            new,
        })
    }

    /// Moves between NeedPlayers and Formed when the roster size calls for it.
    fn reconcile_roster(&mut self) -> Option<MatchEvent> {
        let op = match self.state {
            MatchState::NeedPlayers if self.is_full() => StateOp::RosterFilled,
            MatchState::Formed if !self.is_full() => StateOp::RosterOpened,
            _ => return None,
        };
        self.apply(op).ok()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A stored match that breaks the roster invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchRecordError {
    #[error("capacity {0} is below 2")]
    CapacityTooSmall(usize),

    #[error("roster of {roster_count} exceeds capacity {capacity}")]
    OverCapacity {
        roster_count: usize,
        capacity: usize,
    },

    #[error("player {0} appears more than once on the roster")]
    DuplicatePlayer(PlayerId),

    #[error("creator {0} is not on the roster")]
    CreatorMissing(PlayerId),

    #[error("a {state} match cannot have {roster_count} of {capacity} players")]
    StateMismatch {
        state: MatchState,
        roster_count: usize,
        capacity: usize,
    },
}

/// Wire shape of [`Match`], validated on the way in.
#[derive(Deserialize)]
struct MatchRecord {
    id: MatchId,
    sport: Sport,
    capacity: usize,
    team_count: u8,
    duration_minutes: u32,
    schedule: MatchSchedule,
    location: Option<Location>,
    creator: PlayerId,
    roster: Vec<Player>,
    state: MatchState,
    criteria: Option<EligibilityCriteria>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MatchRecord> for Match {
    type Error = MatchRecordError;

    fn try_from(record: MatchRecord) -> Result<Self, Self::Error> {
        let capacity = record.capacity;
        let roster_count = record.roster.len();
        if capacity < 2 {
            return Err(MatchRecordError::CapacityTooSmall(capacity));
        }
        if roster_count > capacity {
            return Err(MatchRecordError::OverCapacity {
                roster_count,
                capacity,
            });
        }
        let mut seen = HashSet::with_capacity(roster_count);
        if let Some(twice) = record.roster.iter().find(|p| !seen.insert(p.id)) {
            return Err(MatchRecordError::DuplicatePlayer(twice.id));
        }
        if !seen.contains(&record.creator) {
            return Err(MatchRecordError::CreatorMissing(record.creator));
        }

        // Only NeedPlayers may be short, and a cancelled match may be either
        let full = roster_count == capacity;
        let consistent = match record.state {
            MatchState::NeedPlayers => !full,
            MatchState::Cancelled => true,
            MatchState::Formed
            | MatchState::Confirmed
            | MatchState::InPlay
            | MatchState::Finished => full,
        };
        if !consistent {
            return Err(MatchRecordError::StateMismatch {
                state: record.state,
                roster_count,
                capacity,
            });
        }

        Ok(Self {
            id: record.id,
            sport: record.sport,
            capacity,
            team_count: record.team_count,
            duration_minutes: record.duration_minutes,
            schedule: record.schedule,
            location: record.location,
            creator: record.creator,
            roster: record.roster,
            state: record.state,
            criteria: record.criteria,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}
