//! The row status deriver: turns one scheduled stop plus whatever
//! telemetry exists for its train into the facts a board row displays.

use chrono::prelude::*;
use chrono::Duration;

use crate::reference::ReferenceData;
use crate::time::{delay_mins, resolve_scheduled_instant, timetable_offset_mins};
use crate::types::*;

/// Whether the train has already passed the station this row describes.
///
/// Decided purely on the route-progress index: passed iff the train's
/// index is strictly greater than the row's station index. The distance
/// samples never override this - they are allowed to show an
/// "approaching" state a little early while the upstream index catches
/// up, but feed the departure predicate and range filter only.
///
/// With no telemetry, passage is unknown and reported as false.
pub fn has_passed_station(stop: &ScheduledStop, telemetry: Option<&LiveTelemetry>) -> bool {
    match telemetry {
        Some(t) => t.timetable_index > stop.station_index,
        None => false,
    }
}

/// Whether the "about to depart" state should show for this row: the
/// train is still to pass, it is within the proximity threshold of the
/// station, and the clock has reached one minute before the expected
/// departure.
///
/// Not latched - once the route-progress index confirms departure, this
/// goes false again on the next tick.
pub fn must_depart_now(
    has_passed: bool,
    distance: Option<f64>,
    threshold: f64,
    now: NaiveDateTime,
    expected_departure: NaiveDateTime,
) -> bool {
    if has_passed {
        return false;
    }
    match distance {
        Some(d) => d < threshold && now >= expected_departure - Duration::minutes(1),
        None => false,
    }
}

/// Applies the display filters. AND semantics: the row shows only if it
/// survives every configured filter.
///
/// An offline row carries no distance, so `max_range` never catches it;
/// `only_approaching` is the filter that hides offline trains.
pub fn row_visible(
    filter: &FilterCriteria,
    has_passed: bool,
    offline: bool,
    distance: Option<f64>,
    arrival_offset_mins: i64,
) -> bool {
    if filter.only_approaching && (has_passed || offline) {
        return false;
    }
    if let (Some(max), Some(d)) = (filter.max_range, distance) {
        if d > max {
            return false;
        }
    }
    if let Some(max) = filter.max_time_mins {
        if arrival_offset_mins.abs() > max {
            return false;
        }
    }
    true
}

/// Derives everything the board needs to render one row.
///
/// Pure and idempotent: same inputs, same output, nothing carried over
/// between refresh ticks.
pub fn derive_row_status(
    stop: &ScheduledStop,
    telemetry: Option<&LiveTelemetry>,
    reference: &ReferenceData,
    now: NaiveDateTime,
    filter: &FilterCriteria,
) -> DerivedRowStatus {
    let offline = telemetry.is_none();
    let distance = telemetry.and_then(|t| t.distance_from_station());
    let has_passed = has_passed_station(stop, telemetry);

    // Arrival and departure are disambiguated independently against the
    // same `now`; near the boundaries one can resolve to a different
    // day than the other. See `resolve_scheduled_instant`.
    let expected_arrival = resolve_scheduled_instant(now, stop.scheduled_arrival);
    let expected_departure = resolve_scheduled_instant(now, stop.scheduled_departure);
    let arrival_delay_mins = delay_mins(now, expected_arrival);
    let departure_delay_mins = delay_mins(now, expected_departure);

    let threshold = reference.proximity_threshold(&stop.point_id);
    let must_depart = must_depart_now(has_passed, distance, threshold, now, expected_departure);

    let arrival_offset = timetable_offset_mins(now, expected_arrival);
    let visible = row_visible(filter, has_passed, offline, distance, arrival_offset);

    DerivedRowStatus {
        expected_arrival,
        expected_departure,
        arrival_delay_mins,
        departure_delay_mins,
        has_passed_station: has_passed,
        must_depart_now: must_depart,
        distance_from_station: distance,
        offline,
        visible,
        heading: reference.heading(&stop.point_id, &stop.to_post_id),
        badge_colour: reference.badge_colour(&stop.train_type).to_string(),
    }
}
