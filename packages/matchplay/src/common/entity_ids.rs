//! Typed ids for the entities the core refers to.

pub use super::id::Id;

/// Marker type for players.
pub struct Player;

/// Marker type for matches.
pub struct Match;

pub type PlayerId = Id<Player>;

pub type MatchId = Id<Match>;
