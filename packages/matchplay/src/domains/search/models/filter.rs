use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::common::Location;
use crate::domains::matches::Match;
use crate::domains::sports::Sport;

/// What a player is looking for.
///
/// Unset fields never filter. `near` is both the distance origin and, when its
/// radius is set, a hard bound on how far the venue may be.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
pub struct SearchFilter {
    /// Only matches that accept players right now.
    #[builder(default)]
    pub only_open: bool,
    #[builder(default, setter(strip_option))]
    pub sport: Option<Sport>,
    /// Exact local kick-off date.
    #[builder(default, setter(strip_option))]
    pub date: Option<NaiveDate>,
    #[builder(default, setter(strip_option))]
    pub max_players_needed: Option<usize>,
    #[builder(default, setter(strip_option))]
    pub near: Option<Location>,
}

impl SearchFilter {
    /// Everything that is open, in any sport, anywhere.
    pub fn open() -> Self {
        Self::builder().only_open(true).build()
    }
}

/// One match that passed the filter, with the figures it was ranked by.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(rename = "match")]
    pub game: Match,
    pub players_needed: usize,
    /// `None` when the match or the origin has no location.
    pub distance_km: Option<f64>,
}
