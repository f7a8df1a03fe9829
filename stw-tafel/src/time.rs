//! Clock handling: server-local time, day disambiguation around
//! midnight, and delay arithmetic.

use chrono::prelude::*;
use chrono::Duration;

/// From this hour of the evening on, an early-morning scheduled time is
/// taken to mean tomorrow.
const EVENING_HOUR: u32 = 20;
/// Before this hour of the morning, a late-evening scheduled time is
/// taken to mean yesterday.
const MORNING_HOUR: u32 = 12;

/// Returns the current server-local time: UTC shifted by the observed
/// server's timezone offset, in hours.
pub fn server_now(tz_offset_hours: i32) -> NaiveDateTime {
    Utc::now().naive_utc() + Duration::hours(tz_offset_hours as i64)
}

/// Resolves an hour/minute-only scheduled time to a full instant,
/// relative to `now`'s calendar date.
///
/// Late in the evening (from 20:00), a scheduled time before noon
/// refers to tomorrow; early in the morning (before noon), a scheduled
/// time of 20:00 or later refers to yesterday. Anything else is today.
///
/// Arrival and departure are resolved through separate calls against
/// the same `now`, so when only one of them sits near a boundary the
/// two can land on different day offsets. That asymmetry matches the
/// board this replaces and is kept on purpose.
pub fn resolve_scheduled_instant(now: NaiveDateTime, scheduled: NaiveTime) -> NaiveDateTime {
    let next_day = now.hour() >= EVENING_HOUR && scheduled.hour() < MORNING_HOUR;
    let previous_day = scheduled.hour() >= EVENING_HOUR && now.hour() < MORNING_HOUR;
    let date = if next_day {
        now.date() + Duration::days(1)
    }
    else if previous_day {
        now.date() - Duration::days(1)
    }
    else {
        now.date()
    };
    date.and_time(scheduled)
}

/// Signed delay in whole minutes: how far past (positive) or short of
/// (negative) the expected instant the clock currently is. No clamping.
pub fn delay_mins(now: NaiveDateTime, expected: NaiveDateTime) -> i64 {
    (now - expected).num_minutes()
}

/// Minutes from `now` to `expected`, comparing times-of-day only
/// (hours × 60 + minutes), ignoring the calendar date.
///
/// NB: this is a different strategy from `resolve_scheduled_instant`,
/// and the two disagree near midnight - an arrival expected at 00:10
/// compares as nearly a whole day away from a `now` of 23:50. The
/// max-time filter has always worked on times-of-day, and unifying the
/// two would change which rows survive filtering near midnight, so both
/// are kept as separately named computations.
pub fn timetable_offset_mins(now: NaiveDateTime, expected: NaiveDateTime) -> i64 {
    let expected_mins = (expected.hour() * 60 + expected.minute()) as i64;
    let now_mins = (now.hour() * 60 + now.minute()) as i64;
    expected_mins - now_mins
}
