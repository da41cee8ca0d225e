use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("{local} does not exist in {timezone}")]
    NonexistentLocalTime {
        local: NaiveDateTime,
        timezone: String,
    },
}

/// When a match kicks off, as entered by its organiser.
///
/// Stored as local wall-clock date and time plus an IANA timezone name, the way
/// players agree on it. Resolving to an absolute instant can fail, for example
/// when the local time falls inside a daylight-saving gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSchedule {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub timezone: String,
}

impl MatchSchedule {
    pub fn new(date: NaiveDate, start_time: NaiveTime, timezone: impl Into<String>) -> Self {
        Self {
            date,
            start_time,
            timezone: timezone.into(),
        }
    }

    /// Schedule at an absolute instant, expressed in UTC.
    pub fn at(instant: DateTime<Utc>) -> Self {
        let naive = instant.naive_utc();
        Self::new(naive.date(), naive.time(), "UTC")
    }

    pub fn local(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    /// Resolves the local start to a UTC instant.
    ///
    /// Ambiguous local times (clocks going back) resolve to the earlier instant.
    pub fn starts_at(&self) -> Result<DateTime<Utc>, ScheduleError> {
        let tz: Tz = self
            .timezone
            .parse()
            .map_err(|_| ScheduleError::UnknownTimezone(self.timezone.clone()))?;

        let local = self.local();
        tz.from_local_datetime(&local)
            .earliest()
            .map(|start| start.with_timezone(&Utc))
            .ok_or_else(|| ScheduleError::NonexistentLocalTime {
                local,
                timezone: self.timezone.clone(),
            })
    }

    /// Whether the start is at or before `now`.
    pub fn has_started(&self, now: DateTime<Utc>) -> Result<bool, ScheduleError> {
        Ok(self.starts_at()? <= now)
    }
}
