//! In-memory registry of live matches.
//!
//! Each match sits behind its own lock, so at most one mutation per match is in
//! flight while different matches never contend. Events are dispatched after
//! the lock is released.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::common::{MatchId, PlayerId};
use crate::domains::matches::{
    EligibilityCriteria, Match, MatchError, MatchEvent, MatchState, NewMatch,
};
use crate::domains::players::Player;
use crate::kernel::dispatch::EventDispatcher;
use crate::kernel::scheduled_tasks::{sweep, SweepReport};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BookError {
    #[error("match {0} not found")]
    NotFound(MatchId),

    #[error(transparent)]
    Match(#[from] MatchError),
}

/// A match that several threads may read and mutate.
///
/// Mutations take the write lock for their whole duration; readers get clones.
/// A panic while holding the lock does not poison the match for everyone
/// else: the data is only ever changed after all checks pass.
#[derive(Debug, Clone)]
pub struct SharedMatch {
    inner: Arc<RwLock<Match>>,
}

impl SharedMatch {
    pub fn new(game: Match) -> Self {
        Self {
            inner: Arc::new(RwLock::new(game)),
        }
    }

    pub fn id(&self) -> MatchId {
        self.read().id()
    }

    pub fn state(&self) -> MatchState {
        self.read().state()
    }

    /// Consistent copy of the match as of now.
    pub fn snapshot(&self) -> Match {
        self.read().clone()
    }

    pub fn add_player(&self, player: Player) -> Result<Vec<MatchEvent>, MatchError> {
        self.write().add_player(player)
    }

    pub fn remove_player(&self, player_id: PlayerId) -> Result<Vec<MatchEvent>, MatchError> {
        self.write().remove_player(player_id)
    }

    pub fn transition_to(&self, target: MatchState) -> Result<MatchEvent, MatchError> {
        self.write().transition_to(target)
    }

    pub fn apply_criteria(&self, criteria: EligibilityCriteria) {
        self.write().apply_criteria(criteria)
    }

    pub fn clear_criteria(&self) {
        self.write().clear_criteria()
    }

    /// Runs `f` under the write lock, for check-then-act sequences.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Match) -> R) -> R {
        f(&mut *self.write())
    }

    fn read(&self) -> RwLockReadGuard<'_, Match> {
        match self.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Match> {
        match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Every live match, keyed by id, plus the dispatcher their events go to.
#[derive(Clone, Default)]
pub struct MatchBook {
    matches: Arc<DashMap<MatchId, SharedMatch>>,
    dispatcher: EventDispatcher,
}

impl MatchBook {
    pub fn new(dispatcher: EventDispatcher) -> Self {
        Self {
            matches: Arc::new(DashMap::new()),
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Creates a match and registers it.
    #[instrument(skip_all, fields(sport = %params.config.sport, creator = %params.creator.id))]
    pub fn create(&self, params: NewMatch<'_>) -> Result<MatchId, BookError> {
        let game = Match::create(params)?;
        let id = game.id();
        self.insert(game);
        debug!(match_id = %id, "match created");
        Ok(id)
    }

    /// Registers an existing match, replacing any match with the same id.
    pub fn insert(&self, game: Match) -> SharedMatch {
        let shared = SharedMatch::new(game);
        self.matches.insert(shared.id(), shared.clone());
        shared
    }

    /// Registers previously stored matches. Returns how many were added.
    pub fn restore(&self, matches: impl IntoIterator<Item = Match>) -> usize {
        matches
            .into_iter()
            .map(|game| self.insert(game))
            .count()
    }

    pub fn get(&self, id: MatchId) -> Option<SharedMatch> {
        self.matches.get(&id).map(|entry| entry.value().clone())
    }

    pub fn snapshot(&self, id: MatchId) -> Result<Match, BookError> {
        Ok(self.shared(id)?.snapshot())
    }

    /// Snapshots of every match, in no particular order.
    pub fn snapshots(&self) -> Vec<Match> {
        self.handles().iter().map(SharedMatch::snapshot).collect()
    }

    /// Drops a match from the book and returns its final state.
    pub fn remove(&self, id: MatchId) -> Option<Match> {
        self.matches.remove(&id).map(|(_, shared)| shared.snapshot())
    }

    #[instrument(skip(self, player), fields(player_id = %player.id))]
    pub fn add_player(&self, id: MatchId, player: Player) -> Result<Vec<MatchEvent>, BookError> {
        let events = self.shared(id)?.add_player(player)?;
        self.dispatcher.dispatch(&events);
        Ok(events)
    }

    #[instrument(skip(self))]
    pub fn remove_player(
        &self,
        id: MatchId,
        player_id: PlayerId,
    ) -> Result<Vec<MatchEvent>, BookError> {
        let events = self.shared(id)?.remove_player(player_id)?;
        self.dispatcher.dispatch(&events);
        Ok(events)
    }

    #[instrument(skip(self))]
    pub fn transition(&self, id: MatchId, target: MatchState) -> Result<MatchEvent, BookError> {
        let event = self.shared(id)?.transition_to(target)?;
        self.dispatcher.dispatch(std::slice::from_ref(&event));
        Ok(event)
    }

    pub fn apply_criteria(
        &self,
        id: MatchId,
        criteria: EligibilityCriteria,
    ) -> Result<(), BookError> {
        self.shared(id)?.apply_criteria(criteria);
        Ok(())
    }

    pub fn clear_criteria(&self, id: MatchId) -> Result<(), BookError> {
        self.shared(id)?.clear_criteria();
        Ok(())
    }

    /// Starts every confirmed match that is due and dispatches the results.
    pub fn sweep(&self, now: DateTime<Utc>) -> SweepReport {
        let report = sweep(&self.handles(), now);
        self.dispatcher.dispatch(&report.events);
        report
    }

    fn shared(&self, id: MatchId) -> Result<SharedMatch, BookError> {
        self.get(id).ok_or(BookError::NotFound(id))
    }

    /// Clones the handles so no map shard stays locked while a match is.
    fn handles(&self) -> Vec<SharedMatch> {
        self.matches
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::matches::MatchSchedule;
    use crate::domains::players::{Gender, SkillLevel};
    use crate::domains::sports::{Sport, SportConfig};
    use crate::kernel::dispatch::RecordingListener;
    use chrono::Duration;

    fn player(name: &str) -> Player {
        Player::builder()
            .name(name)
            .level(SkillLevel::Intermediate)
            .age(30)
            .gender(Gender::Other)
            .build()
    }

    fn singles() -> SportConfig {
        SportConfig::builder()
            .sport(Sport::Tennis)
            .players_per_team(1)
            .build()
    }

    fn book() -> (MatchBook, Arc<RecordingListener>) {
        let recorder = Arc::new(RecordingListener::new());
        let book = MatchBook::new(EventDispatcher::new().with_listener(recorder.clone()));
        (book, recorder)
    }

    fn create(book: &MatchBook, config: &SportConfig) -> MatchId {
        book.create(
            NewMatch::builder()
                .config(config)
                .creator(player("host"))
                .schedule(MatchSchedule::at(Utc::now() + Duration::hours(1)))
                .build(),
        )
        .unwrap()
    }

    #[test]
    fn test_mutations_dispatch_their_events() {
        let (book, recorder) = book();
        let config = singles();
        let id = create(&book, &config);

        let events = book.add_player(id, player("guest")).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(recorder.take(), events);

        let event = book.transition(id, MatchState::Confirmed).unwrap();
        assert_eq!(recorder.take(), vec![event]);
        assert_eq!(book.snapshot(id).unwrap().state(), MatchState::Confirmed);
    }

    #[test]
    fn test_rejected_mutation_dispatches_nothing() {
        let (book, recorder) = book();
        let config = singles();
        let id = create(&book, &config);

        let err = book.transition(id, MatchState::InPlay).unwrap_err();
        assert!(matches!(
            err,
            BookError::Match(MatchError::InvalidTransition(_))
        ));
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_unknown_match() {
        let (book, _) = book();
        let id = MatchId::new();
        assert_eq!(book.snapshot(id).unwrap_err(), BookError::NotFound(id));
        assert_eq!(
            book.add_player(id, player("ghost")).unwrap_err(),
            BookError::NotFound(id)
        );
    }

    #[test]
    fn test_invalid_config_is_refused() {
        let (book, _) = book();
        let config = SportConfig::builder()
            .sport(Sport::Tennis)
            .players_per_team(0)
            .build();
        let params = NewMatch::builder()
            .config(&config)
            .creator(player("host"))
            .schedule(MatchSchedule::at(Utc::now()))
            .build();

        assert!(matches!(
            book.create(params),
            Err(BookError::Match(MatchError::InvalidConfig(_)))
        ));
        assert!(book.is_empty());
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let (book, _) = book();
        let config = singles();
        let id = create(&book, &config);
        let shared = book.get(id).unwrap();

        let poisoner = shared.clone();
        let result = std::thread::spawn(move || {
            poisoner.with_mut(|_| panic!("boom"));
        })
        .join();
        assert!(result.is_err());

        assert_eq!(shared.state(), MatchState::NeedPlayers);
        book.add_player(id, player("guest")).unwrap();
        assert_eq!(shared.state(), MatchState::Formed);
    }

    #[test]
    fn test_remove_returns_final_state() {
        let (book, _) = book();
        let config = singles();
        let id = create(&book, &config);
        book.transition(id, MatchState::Cancelled).unwrap();

        let removed = book.remove(id).unwrap();
        assert_eq!(removed.state(), MatchState::Cancelled);
        assert!(book.get(id).is_none());
        assert_eq!(book.len(), 0);
    }

    #[test]
    fn test_restored_matches_are_swept() {
        let (source, _) = book();
        let config = singles();
        let id = source
            .create(
                NewMatch::builder()
                    .config(&config)
                    .creator(player("host"))
                    .schedule(MatchSchedule::at(Utc::now() - Duration::minutes(1)))
                    .build(),
            )
            .unwrap();
        source.add_player(id, player("guest")).unwrap();
        source.transition(id, MatchState::Confirmed).unwrap();

        let (book, recorder) = book();
        assert_eq!(book.restore(source.snapshots()), 1);

        let report = book.sweep(Utc::now());
        assert_eq!(report.started, vec![id]);
        assert_eq!(recorder.events().len(), 1);
        assert_eq!(book.snapshot(id).unwrap().state(), MatchState::InPlay);
    }
}
