// libs/appointment-cell/src/services/schedule.rs
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::models::ScheduleError;

/// Clinic opening hour, inclusive.
pub const OPENING_HOUR: u32 = 8;
/// Clinic closing hour, exclusive: 18:00 sharp is already outside.
pub const CLOSING_HOUR: u32 = 18;

/// Decide whether a candidate appointment instant is schedulable.
///
/// Rules run in order and the first failure wins, so at most one reason
/// surfaces per validation pass. "Now" is always supplied by the caller;
/// this function never reads the wall clock.
pub fn validate_schedule(
    candidate: NaiveDateTime,
    now: NaiveDateTime,
) -> Result<(), ScheduleError> {
    if candidate <= now {
        return Err(ScheduleError::InPast);
    }

    let hour = candidate.hour();
    if hour < OPENING_HOUR || hour >= CLOSING_HOUR {
        return Err(ScheduleError::OutsideBusinessHours);
    }

    if matches!(candidate.weekday(), Weekday::Sat | Weekday::Sun) {
        return Err(ScheduleError::Weekend);
    }

    Ok(())
}

/// Parse raw form input and validate it in one pass.
///
/// Accepts the `datetime-local` shape (`2026-03-02T10:30`), with seconds
/// optional. Empty or unparseable input is `Required` - the form never had
/// a usable instant to begin with.
pub fn parse_schedule_input(
    raw: &str,
    now: NaiveDateTime,
) -> Result<NaiveDateTime, ScheduleError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScheduleError::Required);
    }

    let candidate = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .map_err(|_| ScheduleError::Required)?;

    validate_schedule(candidate, now)?;
    Ok(candidate)
}
