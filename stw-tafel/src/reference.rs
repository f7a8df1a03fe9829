//! Injected reference data: per-station direction sets, badge colours,
//! and departure-proximity thresholds.
//!
//! These used to live as hard-coded globals next to the board's view
//! code; making them plain data handed to the deriver keeps the
//! derivation testable in isolation and lets deployments ship their own
//! tables.

use std::collections::HashMap;
use serde_derive::{Serialize, Deserialize};

use crate::types::Heading;

/// Badge colour used for train types missing from the table.
pub const DEFAULT_BADGE_COLOUR: &str = "purple";
/// Distance below which a train counts as "at the station" for the
/// imminent-departure predicate, unless a per-station override says
/// otherwise.
pub const DEFAULT_PROXIMITY_THRESHOLD: f64 = 1.5;

/// The destination sets for one dispatch post: a train leaving the post
/// towards a destination listed in `left` gets a left arrow, and so on.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DirectionSets {
    #[serde(default)]
    pub left: Vec<u32>,
    #[serde(default)]
    pub right: Vec<u32>,
    #[serde(default)]
    pub up: Vec<u32>,
    #[serde(default)]
    pub down: Vec<u32>,
}

/// Static lookup tables injected into the deriver.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ReferenceData {
    /// Direction sets, keyed by post id.
    #[serde(default)]
    pub directions: HashMap<u32, DirectionSets>,
    /// Badge colour by train type.
    #[serde(default)]
    pub badge_colours: HashMap<String, String>,
    /// Per-station overrides of the departure proximity threshold.
    ///
    /// One freight post needed a looser threshold than the usual 1.5
    /// units; this table replaces the special case it used to be.
    #[serde(default)]
    pub proximity_overrides: HashMap<u32, f64>,
}

impl ReferenceData {
    /// Loads reference data from a JSON document.
    pub fn from_json_slice(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }

    /// Which way a train heads when leaving `point_id` for `to_post_id`.
    ///
    /// Ids arrive as strings from the schedule source; one that fails
    /// to parse, or a post without direction data, just means no arrow.
    pub fn heading(&self, point_id: &str, to_post_id: &str) -> Option<Heading> {
        let point: u32 = point_id.parse().ok()?;
        let to: u32 = to_post_id.parse().ok()?;
        let dirs = self.directions.get(&point)?;
        if dirs.left.contains(&to) {
            Some(Heading::Left)
        }
        else if dirs.right.contains(&to) {
            Some(Heading::Right)
        }
        else if dirs.up.contains(&to) {
            Some(Heading::Up)
        }
        else if dirs.down.contains(&to) {
            Some(Heading::Down)
        }
        else {
            None
        }
    }

    /// Badge colour for a train type.
    pub fn badge_colour(&self, train_type: &str) -> &str {
        self.badge_colours.get(train_type)
            .map(|c| c as &str)
            .unwrap_or(DEFAULT_BADGE_COLOUR)
    }

    /// Departure proximity threshold in force at the given post.
    pub fn proximity_threshold(&self, point_id: &str) -> f64 {
        point_id.parse::<u32>().ok()
            .and_then(|id| self.proximity_overrides.get(&id).copied())
            .unwrap_or(DEFAULT_PROXIMITY_THRESHOLD)
    }
}
