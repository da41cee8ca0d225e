//! Fans match events out to listeners at the process boundary.
//!
//! Matches only return events; whoever mutated a match hands them to an
//! [`EventDispatcher`]. A listener that fails or panics is logged and skipped.
//! The caller's mutation has already happened and is never undone.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use tracing::{error, info, warn};

use crate::domains::matches::MatchEvent;

/// Something that wants to hear about match events.
pub trait EventListener: Send + Sync {
    fn name(&self) -> &'static str;

    fn on_event(&self, event: &MatchEvent) -> Result<()>;
}

#[derive(Clone, Default)]
pub struct EventDispatcher {
    listeners: Vec<Arc<dyn EventListener>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listener(mut self, listener: Arc<dyn EventListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn subscribe(&mut self, listener: Arc<dyn EventListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Delivers every event to every listener, in order.
    ///
    /// Returns how many deliveries failed.
    pub fn dispatch(&self, events: &[MatchEvent]) -> usize {
        let mut failures = 0;
        for event in events {
            for listener in &self.listeners {
                if !deliver(listener.as_ref(), event) {
                    failures += 1;
                }
            }
        }
        failures
    }
}

fn deliver(listener: &dyn EventListener, event: &MatchEvent) -> bool {
    match catch_unwind(AssertUnwindSafe(|| listener.on_event(event))) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            warn!(
                listener = listener.name(),
                event = event.kind(),
                match_id = %event.match_id(),
                error = %e,
                "listener failed"
            );
            false
        }
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic".to_string()
            };
            error!(
                listener = listener.name(),
                event = event.kind(),
                match_id = %event.match_id(),
                panic = %panic_msg,
                "listener panicked"
            );
            false
        }
    }
}

/// Logs every event at info level.
#[derive(Debug, Default)]
pub struct TracingListener;

impl EventListener for TracingListener {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn on_event(&self, event: &MatchEvent) -> Result<()> {
        match event {
            MatchEvent::PlayerAdded {
                match_id,
                player_id,
                roster_count,
                capacity,
            } => info!(%match_id, %player_id, roster_count, capacity, "player joined match"),
            MatchEvent::PlayerRemoved {
                match_id,
                player_id,
                roster_count,
                capacity,
            } => info!(%match_id, %player_id, roster_count, capacity, "player left match"),
            MatchEvent::StateChanged {
                match_id,
                previous,
                new,
            } => info!(%match_id, from = %previous, to = %new, "match state changed"),
        }
        Ok(())
    }
}

/// Keeps the events it hears, oldest first.
///
/// `new()` keeps everything until [`take`](Self::take) drains it, which suits
/// tests. Long-lived embedders should use [`bounded`](Self::bounded), which
/// drops the oldest events past the limit.
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: Mutex<VecDeque<MatchEvent>>,
    limit: Option<usize>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most the `limit` most recent events.
    pub fn bounded(limit: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::new()),
            limit: Some(limit),
        }
    }

    pub fn events(&self) -> Vec<MatchEvent> {
        self.lock().iter().cloned().collect()
    }

    pub fn take(&self) -> Vec<MatchEvent> {
        std::mem::take(&mut *self.lock()).into()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<MatchEvent>> {
        match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl EventListener for RecordingListener {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn on_event(&self, event: &MatchEvent) -> Result<()> {
        if self.limit == Some(0) {
            return Ok(());
        }
        let mut events = self.lock();
        if let Some(limit) = self.limit {
            while events.len() >= limit {
                events.pop_front();
            }
        }
        events.push_back(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{MatchId, PlayerId};
    use crate::domains::matches::MatchState;

    struct Failing;

    impl EventListener for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn on_event(&self, _event: &MatchEvent) -> Result<()> {
            anyhow::bail!("mailer unreachable")
        }
    }

    struct Panicking;

    impl EventListener for Panicking {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn on_event(&self, _event: &MatchEvent) -> Result<()> {
            panic!("listener bug")
        }
    }

    fn events() -> Vec<MatchEvent> {
        let match_id = MatchId::new();
        vec![
            MatchEvent::StateChanged {
                match_id,
                previous: MatchState::NeedPlayers,
                new: MatchState::Formed,
            },
            MatchEvent::PlayerAdded {
                match_id,
                player_id: PlayerId::new(),
                roster_count: 2,
                capacity: 2,
            },
        ]
    }

    #[test]
    fn test_events_reach_listeners_in_order() {
        let recorder = Arc::new(RecordingListener::new());
        let dispatcher = EventDispatcher::new()
            .with_listener(Arc::new(TracingListener))
            .with_listener(recorder.clone());

        let events = events();
        assert_eq!(dispatcher.dispatch(&events), 0);
        assert_eq!(recorder.events(), events);
    }

    #[test]
    fn test_failures_do_not_stop_other_listeners() {
        let recorder = Arc::new(RecordingListener::new());
        let mut dispatcher = EventDispatcher::new();
        dispatcher.subscribe(Arc::new(Failing));
        dispatcher.subscribe(Arc::new(Panicking));
        dispatcher.subscribe(recorder.clone());
        assert_eq!(dispatcher.listener_count(), 3);

        let failures = dispatcher.dispatch(&events());

        // Two events, two broken listeners
        assert_eq!(failures, 4);
        assert_eq!(recorder.take().len(), 2);
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_bounded_recorder_keeps_most_recent() {
        let recorder = Arc::new(RecordingListener::bounded(3));
        let dispatcher = EventDispatcher::new().with_listener(recorder.clone());

        let first = events();
        let second = events();
        dispatcher.dispatch(&first);
        dispatcher.dispatch(&second);

        let kept = recorder.events();
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[0], first[1]);
        assert_eq!(kept[1..], second[..]);

        let silent = RecordingListener::bounded(0);
        silent.on_event(&first[0]).unwrap();
        assert!(silent.events().is_empty());
    }
}
