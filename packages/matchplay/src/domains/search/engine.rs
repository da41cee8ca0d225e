//! Ranks a pool of matches for one player.
//!
//! Everything here reads snapshots; callers pass clones taken from the book.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::common::Location;
use crate::domains::matches::Match;
use crate::domains::players::Player;
use crate::domains::sports::Sport;

use super::models::{SearchFilter, SearchHit};

/// Matches from `pool` that `player` may join and that pass `filter`.
///
/// Sorted by players needed ascending, then by distance ascending with
/// unknown distances last.
pub fn search(pool: &[Match], player: &Player, filter: &SearchFilter) -> Vec<SearchHit> {
    let origin = filter.near.or(player.location);
    let max_radius = filter.near.as_ref().and_then(Location::radius);

    let mut hits: Vec<SearchHit> = pool
        .iter()
        .filter(|game| passes(game, player, filter))
        .map(|game| SearchHit {
            players_needed: game.players_needed(),
            distance_km: origin
                .as_ref()
                .and_then(|origin| game.location().map(|venue| venue.distance_km(origin))),
            game: game.clone(),
        })
        .filter(|hit| match max_radius {
            Some(radius) => hit.distance_km.is_some_and(|d| d <= radius),
            None => true,
        })
        .collect();

    hits.sort_by(|a, b| {
        a.players_needed
            .cmp(&b.players_needed)
            .then_with(|| by_distance(a.distance_km, b.distance_km))
    });

    debug!(
        player_id = %player.id,
        pool = pool.len(),
        hits = hits.len(),
        "searched matches"
    );
    hits
}

/// Open matches within `radius_km` of the player's home.
///
/// A player without a home location gets nothing.
pub fn nearby(pool: &[Match], player: &Player, radius_km: f64) -> Vec<SearchHit> {
    let Some(home) = player.location else {
        return Vec::new();
    };
    let filter = SearchFilter::builder()
        .only_open(true)
        .near(Location::with_radius(home.latitude, home.longitude, radius_km))
        .build();
    search(pool, player, &filter)
}

pub fn by_sport(pool: &[Match], player: &Player, sport: Sport) -> Vec<SearchHit> {
    let filter = SearchFilter::builder().only_open(true).sport(sport).build();
    search(pool, player, &filter)
}

/// Open matches missing at most `max_needed` players.
pub fn near_completion(pool: &[Match], player: &Player, max_needed: usize) -> Vec<SearchHit> {
    let filter = SearchFilter::builder()
        .only_open(true)
        .max_players_needed(max_needed)
        .build();
    search(pool, player, &filter)
}

/// Open matches that have not kicked off yet.
pub fn available_for(pool: &[Match], player: &Player, now: DateTime<Utc>) -> Vec<SearchHit> {
    let mut hits = search(pool, player, &SearchFilter::open());
    hits.retain(|hit| hit.game.is_available(now));
    hits
}

fn passes(game: &Match, player: &Player, filter: &SearchFilter) -> bool {
    if filter.only_open
        && (!game.state().can_add_player() || game.is_full() || game.is_enrolled(player.id))
    {
        return false;
    }
    if filter.sport.is_some_and(|sport| sport != game.sport()) {
        return false;
    }
    if filter.date.is_some_and(|date| date != game.schedule().date) {
        return false;
    }
    if filter
        .max_players_needed
        .is_some_and(|max| game.players_needed() > max)
    {
        return false;
    }
    match game.criteria() {
        Some(criteria) => criteria.evaluate(player, game.location()).is_ok(),
        None => true,
    }
}

fn by_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
