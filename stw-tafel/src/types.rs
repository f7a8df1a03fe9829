//! Data model: what the timetable says, what the telemetry says, and
//! what gets derived from the two.

use chrono::prelude::*;
use serde_derive::{Serialize, Deserialize};

/// A scheduled call at a dispatch post, for one train.
///
/// ## Identification
///
/// Station ids (`point_id`, `to_post_id`) arrive as strings from the
/// schedule source and are only parsed where a lookup actually needs a
/// number; a row with an unparseable id still derives fine, it just
/// loses its direction arrow.
///
/// ## Versioning
///
/// Rows are immutable once received for a given schedule version. A
/// timetable re-issue bumps `schedule_version` on the rows it touches
/// rather than mutating them in place, which is what change detection
/// keys off (see [`RowFingerprint`]).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ScheduledStop {
    /// Train running number.
    pub train_number: String,
    /// Train type/category, e.g. freight or express. Keys the badge
    /// colour lookup.
    pub train_type: String,
    /// Line designation.
    pub line: String,
    /// Id of the post this row belongs to.
    pub point_id: String,
    /// Id of the next post along the train's route.
    pub to_post_id: String,
    /// Display name of the next post.
    pub to_post: String,
    /// Scheduled arrival, wall clock only - no date. Which calendar day
    /// it refers to is resolved per tick, see `time`.
    pub scheduled_arrival: NaiveTime,
    /// Scheduled departure, wall clock only.
    pub scheduled_departure: NaiveTime,
    /// Index of this station within the train's stop sequence.
    pub station_index: u32,
    /// Platform/track, where the post has one.
    pub platform: Option<String>,
    /// Extra rows for secondary posts sharing this stop.
    #[serde(default)]
    pub secondary_posts: Vec<SecondaryPost>,
    /// Version of the schedule this row was issued under.
    #[serde(default)]
    pub schedule_version: u32,
}

/// A secondary post sharing one scheduled stop (e.g. a platform group
/// worked from the same box).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SecondaryPost {
    /// Display name of the secondary post.
    pub post: String,
    /// Platform/track at the secondary post, if any.
    pub platform: Option<String>,
}

/// Live telemetry for one train.
///
/// Absent entirely when the train is offline/untracked - that is a
/// valid state, not an error, and downstream derivation treats it as
/// "passage unknown" with the row deemphasised.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LiveTelemetry {
    /// Route-progress index: how far along its scheduled stop sequence
    /// the train has got. Monotonically increasing.
    pub timetable_index: u32,
    /// Recent distance-to-station samples, oldest first.
    pub distances: Vec<f64>,
    /// Train-type classification as reported by the telemetry source.
    pub train_class: Option<String>,
    /// Update counter, bumped by the upstream source on every new
    /// sample batch. Only used for change detection.
    #[serde(default)]
    pub seq: u64,
}

impl LiveTelemetry {
    /// The most recent distance sample, rounded to two decimal places.
    ///
    /// This is a proximity hint only: it feeds the imminent-departure
    /// predicate and the range filter, and may show an "approaching"
    /// state before the route-progress index catches up. It never
    /// decides passage itself.
    pub fn distance_from_station(&self) -> Option<f64> {
        self.distances.last().map(|d| (d * 100.0).round() / 100.0)
    }
}

/// Display filters, as configured on the board's filter panel.
///
/// Filters compose with AND semantics: a row is shown only if it
/// survives every configured filter.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Hide rows for trains that have already passed, or are offline.
    #[serde(default)]
    pub only_approaching: bool,
    /// Hide rows further away than this many distance units.
    pub max_range: Option<f64>,
    /// Hide rows whose expected arrival is more than this many minutes
    /// away from now, comparing times-of-day only (see
    /// `time::timetable_offset_mins`).
    pub max_time_mins: Option<i64>,
    /// Revision counter, bumped whenever the user edits the filters.
    /// Only used for change detection.
    #[serde(default)]
    pub revision: u32,
}

/// Which way a train heads when leaving the station, for arrow display.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
    Up,
    Down,
}

/// Everything the presentation layer needs to know about one row.
///
/// Recomputed from scratch on every refresh tick; never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DerivedRowStatus {
    /// Day-disambiguated expected arrival.
    pub expected_arrival: NaiveDateTime,
    /// Day-disambiguated expected departure.
    pub expected_departure: NaiveDateTime,
    /// now − expected arrival, in whole minutes. Negative means not yet
    /// due.
    pub arrival_delay_mins: i64,
    /// now − expected departure, in whole minutes.
    pub departure_delay_mins: i64,
    /// Whether the train has already passed this station.
    pub has_passed_station: bool,
    /// Whether the "about to depart" state should show right now.
    pub must_depart_now: bool,
    /// Latest distance sample, rounded to 2 dp. None when offline.
    pub distance_from_station: Option<f64>,
    /// True when no telemetry was available for the train.
    pub offline: bool,
    /// Whether the row survives the display filters.
    pub visible: bool,
    /// Direction arrow, where the reference tables know one.
    pub heading: Option<Heading>,
    /// Badge colour for the train's type.
    pub badge_colour: String,
}

/// Compact fingerprint for change detection across refresh ticks.
///
/// Replaces the old deep-equality comparison of full row snapshots:
/// each input carries a version/sequence counter, and a row only needs
/// re-deriving (and re-rendering) when one of them moved. Like the
/// snapshot comparison it replaces, this deliberately ignores the
/// clock - a pure tick with unchanged data is exactly the case worth
/// skipping.
///
/// Optional: correctness never depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowFingerprint {
    pub schedule_version: u32,
    pub telemetry_seq: Option<u64>,
    pub filter_revision: u32,
}

impl RowFingerprint {
    pub fn new(stop: &ScheduledStop, telemetry: Option<&LiveTelemetry>, filter: &FilterCriteria) -> Self {
        Self {
            schedule_version: stop.schedule_version,
            telemetry_seq: telemetry.map(|t| t.seq),
            filter_revision: filter.revision,
        }
    }
}
