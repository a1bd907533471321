use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tracing::{error, info, instrument};

use crate::contract::{CalendarError, CalendarEvent, EventSnapshot};
use crate::domain::repo::CalendarRepository;

/// Application service for per-user calendars. All mutations are
/// idempotent so retried requests and redelivered change events
/// converge on the same state.
pub struct CalendarService {
    repo: Arc<dyn CalendarRepository>,
}

impl CalendarService {
    pub fn new(repo: Arc<dyn CalendarRepository>) -> Self {
        Self { repo }
    }

    /// Add an event to the caller's calendar, seeding the local replica
    /// on first sight of the event.
    #[instrument(name = "calendar.add", skip(self, snapshot), fields(event_id = snapshot.event_id))]
    pub async fn add_to_calendar(
        &self,
        user_id: i64,
        snapshot: EventSnapshot,
    ) -> Result<(), CalendarError> {
        let event_id = snapshot.event_id;
        self.repo.seed_replica(snapshot).await.map_err(internal)?;
        self.repo
            .add_entry(user_id, event_id)
            .await
            .map_err(internal)?;
        info!(user_id, event_id, "event added to calendar");
        Ok(())
    }

    /// Remove an event from the caller's calendar. Removing an event
    /// that is not on the calendar succeeds.
    #[instrument(name = "calendar.remove", skip(self))]
    pub async fn remove_from_calendar(
        &self,
        user_id: i64,
        event_id: i64,
    ) -> Result<(), CalendarError> {
        self.repo
            .remove_entry(user_id, event_id)
            .await
            .map_err(internal)?;
        Ok(())
    }

    /// The caller's events falling in the given civil month, datetime
    /// ascending.
    #[instrument(name = "calendar.get", skip(self))]
    pub async fn get_calendar(
        &self,
        user_id: i64,
        year: i32,
        month: u32,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        let (from, to) = month_window(year, month)?;
        self.repo
            .list_window(user_id, from, to)
            .await
            .map_err(internal)
    }
}

/// Half-open UTC window `[first day of month, first day of next month)`.
fn month_window(year: i32, month: u32) -> Result<(DateTime<Utc>, DateTime<Utc>), CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::invalid_argument("month must be in 1..=12"));
    }
    let start = Utc
        .with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| CalendarError::invalid_argument("year is out of range"))?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = Utc
        .with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| CalendarError::invalid_argument("year is out of range"))?;
    Ok((start, end))
}

fn internal(e: anyhow::Error) -> CalendarError {
    error!(error = %e, "calendar repository failure");
    CalendarError::internal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_window_is_half_open() {
        let (from, to) = month_window(2024, 8).unwrap();
        assert_eq!(from, Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap());
        assert_eq!(to, Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn december_rolls_into_the_next_year() {
        let (from, to) = month_window(2024, 12).unwrap();
        assert_eq!(from, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(to, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn out_of_range_months_are_rejected() {
        assert!(month_window(2024, 0).is_err());
        assert!(month_window(2024, 13).is_err());
    }
}
