//! API types.

use chrono::prelude::*;
use serde_derive::{Serialize, Deserialize};
use stw_tafel::types::{DerivedRowStatus, FilterCriteria, LiveTelemetry, ScheduledStop};

/// One timetable row, plus whatever telemetry the upstream source had
/// for its train (nothing, if the train is offline).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BoardRow {
    pub stop: ScheduledStop,
    pub telemetry: Option<LiveTelemetry>,
}

/// A board snapshot to derive row statuses for.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BoardQuery {
    /// Server-local clock to derive against. When absent, the service
    /// uses its own clock shifted by the configured timezone offset.
    pub now: Option<NaiveDateTime>,
    #[serde(default)]
    pub filter: FilterCriteria,
    pub rows: Vec<BoardRow>,
}

/// One derived row of the response.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DerivedRow {
    /// Running number of the train the row belongs to.
    pub train_number: String,
    pub status: DerivedRowStatus,
}

/// The result of a board derivation query. Only rows that survived the
/// display filters are included.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BoardResponse {
    /// The clock the derivation ran against.
    pub now: NaiveDateTime,
    pub rows: Vec<DerivedRow>,
}
