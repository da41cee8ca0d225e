pub mod criteria;
pub mod game;
pub mod schedule;
pub mod state;

pub use criteria::{CriteriaViolation, EligibilityCriteria, GenderRule};
pub use game::{Match, MatchRecordError, NewMatch};
pub use schedule::{MatchSchedule, ScheduleError};
pub use state::{InvalidTransition, MatchState, StateOp};
