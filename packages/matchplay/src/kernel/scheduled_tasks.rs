//! Recurring start sweep using tokio-cron-scheduler.
//!
//! ```text
//! Scheduler (SWEEP_CRON, every minute by default)
//!     │
//!     └─► MatchBook::sweep(now)
//!             └─► For each Confirmed match that is due → transition_to(InPlay)
//!                     └─► EventDispatcher → listeners
//! ```
//!
//! The sweep itself is synchronous and takes `now` as a parameter, so tests
//! drive it directly without a runtime.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, info, warn};

use crate::common::MatchId;
use crate::config::Config;
use crate::domains::matches::{Match, MatchEvent, MatchState, ScheduleError};
use crate::kernel::book::{MatchBook, SharedMatch};

/// What one sweep did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepReport {
    /// Matches moved to InPlay.
    pub started: Vec<MatchId>,
    /// Matches not confirmed or not due yet.
    pub skipped: usize,
    /// Matches whose start could not be resolved; left untouched.
    pub failed: Vec<MatchId>,
    pub events: Vec<MatchEvent>,
}

/// Moves `game` to InPlay if it is Confirmed and its start is at or before
/// `now`. Returns `Ok(None)` when there is nothing to do.
pub fn promote_if_due(
    game: &mut Match,
    now: DateTime<Utc>,
) -> Result<Option<MatchEvent>, ScheduleError> {
    if game.state() != MatchState::Confirmed {
        return Ok(None);
    }
    if !game.schedule().has_started(now)? {
        return Ok(None);
    }
    // Confirmed always allows Start
    Ok(game.transition_to(MatchState::InPlay).ok())
}

/// Runs [`promote_if_due`] on every match, each under its own lock.
///
/// Running it twice with the same `now` starts nothing the second time.
pub fn sweep(matches: &[SharedMatch], now: DateTime<Utc>) -> SweepReport {
    let mut report = SweepReport::default();

    for shared in matches {
        let (id, outcome) = shared.with_mut(|game| (game.id(), promote_if_due(game, now)));
        match outcome {
            Ok(Some(event)) => {
                report.started.push(id);
                report.events.push(event);
            }
            Ok(None) => report.skipped += 1,
            Err(e) => {
                warn!(match_id = %id, error = %e, "cannot resolve match start, leaving it as is");
                report.failed.push(id);
            }
        }
    }

    debug!(
        started = report.started.len(),
        skipped = report.skipped,
        failed = report.failed.len(),
        "start sweep finished"
    );
    report
}

/// Start all scheduled tasks
pub async fn start_scheduler(book: MatchBook, config: &Config) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let sweep_book = book.clone();
    let sweep_job = Job::new_async(config.sweep_cron.as_str(), move |_uuid, _lock| {
        let book = sweep_book.clone();
        Box::pin(async move {
            let report = book.sweep(Utc::now());
            if !report.started.is_empty() || !report.failed.is_empty() {
                info!(
                    started = report.started.len(),
                    failed = report.failed.len(),
                    "start sweep moved matches"
                );
            }
        })
    })
    .with_context(|| format!("invalid SWEEP_CRON expression: {}", config.sweep_cron))?;

    scheduler.add(sweep_job).await?;
    scheduler.start().await?;

    info!(cron = %config.sweep_cron, matches = book.len(), "Scheduled tasks started");
    Ok(scheduler)
}
