//! Test fixtures for players, sport configurations and matches.
//!
//! These fixtures use the model builders directly.

use std::sync::Arc;

use chrono::{Duration, Utc};
use matchplay_core::common::{Location, MatchId};
use matchplay_core::domains::matches::{Match, MatchSchedule, NewMatch};
use matchplay_core::domains::players::{Gender, Player, SkillLevel};
use matchplay_core::domains::sports::{Sport, SportConfig};
use matchplay_core::kernel::{EventDispatcher, MatchBook, RecordingListener};

/// Downtown Minneapolis
pub const MINNEAPOLIS: (f64, f64) = (44.98, -93.27);

/// Downtown St. Paul, ≈16 km from Minneapolis
pub const ST_PAUL: (f64, f64) = (44.95, -93.09);

pub fn minneapolis() -> Location {
    Location::new(MINNEAPOLIS.0, MINNEAPOLIS.1)
}

pub fn st_paul() -> Location {
    Location::new(ST_PAUL.0, ST_PAUL.1)
}

/// An intermediate 30-year-old with no home and no favourite sport.
pub fn player(name: &str) -> Player {
    player_at(name, SkillLevel::Intermediate, None)
}

pub fn player_at(name: &str, level: SkillLevel, home: Option<Location>) -> Player {
    let mut player = Player::builder()
        .name(name)
        .level(level)
        .age(30)
        .gender(Gender::Female)
        .build();
    player.location = home;
    player
}

/// Two teams of `per_team`.
pub fn config(sport: Sport, per_team: u8) -> SportConfig {
    SportConfig::builder()
        .sport(sport)
        .players_per_team(per_team)
        .build()
}

/// Kick-off `minutes` from now; negative means in the past.
pub fn starting_in(minutes: i64) -> MatchSchedule {
    MatchSchedule::at(Utc::now() + Duration::minutes(minutes))
}

pub fn new_match(config: &SportConfig, creator: Player, schedule: MatchSchedule) -> Match {
    Match::create(
        NewMatch::builder()
            .config(config)
            .creator(creator)
            .schedule(schedule)
            .build(),
    )
    .expect("fixture config is valid")
}

pub fn new_match_at(
    config: &SportConfig,
    creator: Player,
    schedule: MatchSchedule,
    venue: Location,
) -> Match {
    Match::create(
        NewMatch::builder()
            .config(config)
            .creator(creator)
            .schedule(schedule)
            .location(venue)
            .build(),
    )
    .expect("fixture config is valid")
}

/// Book whose every dispatched event is recorded.
pub fn recording_book() -> (MatchBook, Arc<RecordingListener>) {
    let recorder = Arc::new(RecordingListener::new());
    let book = MatchBook::new(EventDispatcher::new().with_listener(recorder.clone()));
    (book, recorder)
}

/// Creates a located match directly in `book`.
pub fn create_in_book(
    book: &MatchBook,
    config: &SportConfig,
    creator: Player,
    schedule: MatchSchedule,
    venue: Location,
) -> MatchId {
    book.create(
        NewMatch::builder()
            .config(config)
            .creator(creator)
            .schedule(schedule)
            .location(venue)
            .build(),
    )
    .expect("fixture config is valid")
}
