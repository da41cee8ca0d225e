pub mod errors;
pub mod events;
pub mod models;

// Re-export commonly used types
pub use errors::MatchError;
pub use events::MatchEvent;
pub use models::{
    CriteriaViolation, EligibilityCriteria, GenderRule, InvalidTransition, Match, MatchRecordError,
    MatchSchedule, MatchState, NewMatch, ScheduleError, StateOp,
};
