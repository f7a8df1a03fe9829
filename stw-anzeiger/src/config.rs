//! Standard configuration module.

use serde_derive::Deserialize;
use stw_util::{ConfigExt, crate_name};

/// `stw-anzeiger` configuration.
#[derive(Deserialize, Debug)]
pub struct Config {
    /// Address to listen on.
    pub listen: String,
    /// Path to a reference-data JSON file (direction sets, badge
    /// colours, proximity overrides). Compiled-in defaults when unset.
    pub reference_file: Option<String>,
    /// Timezone offset of the observed server, in hours from UTC. Used
    /// for queries that don't carry their own clock.
    #[serde(default)]
    pub server_tz_offset: i32,
}

impl ConfigExt for Config {
    fn crate_name() -> &'static str {
        crate_name!()
    }
}
