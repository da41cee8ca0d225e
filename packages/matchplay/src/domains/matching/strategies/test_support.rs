use chrono::{Duration, Utc};

use crate::common::Location;
use crate::domains::matches::{Match, MatchSchedule, NewMatch};
use crate::domains::players::{Gender, Player, SkillLevel};
use crate::domains::sports::{Sport, SportConfig};

pub const COURT: (f64, f64) = (44.98, -93.27);

pub fn court() -> Location {
    Location::new(COURT.0, COURT.1)
}

pub fn candidate(level: SkillLevel, sport: Option<Sport>, location: Option<Location>) -> Player {
    let mut player = Player::builder()
        .name("candidate")
        .level(level)
        .age(28)
        .gender(Gender::Female)
        .build();
    player.favorite_sport = sport;
    player.location = location;
    player
}

/// A match with room for 10 whose roster holds one player per level given.
pub fn game_with(sport: Sport, levels: &[SkillLevel], location: Option<Location>) -> Match {
    let config = SportConfig::builder()
        .sport(sport)
        .players_per_team(5)
        .build();
    let mut levels = levels.iter();
    let creator = candidate(
        *levels.next().unwrap_or(&SkillLevel::Intermediate),
        Some(sport),
        None,
    );
    let params = NewMatch::builder()
        .config(&config)
        .creator(creator)
        .schedule(MatchSchedule::at(Utc::now() + Duration::days(1)));
    let mut game = match location {
        Some(location) => Match::create(params.location(location).build()),
        None => Match::create(params.build()),
    }
    .unwrap();
    for level in levels {
        game.add_player(candidate(*level, Some(sport), None)).unwrap();
    }
    game
}
