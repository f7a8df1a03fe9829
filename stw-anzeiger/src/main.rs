//! Serves derived dispatch-board rows over HTTP: feed it a board
//! snapshot (scheduled stops plus live telemetry), get back what each
//! row should display.

pub mod errors;
pub mod config;
pub mod ctx;
pub mod types;

use log::*;
use stw_util::ConfigExt;
use self::config::Config;
use self::ctx::App;
use errors::Result;

fn main() -> Result<()> {
    stw_util::setup_logging()?;
    info!("stw-anzeiger, at your service");
    info!("loading config");
    let cfg = Config::load()?;
    let app = App::new(&cfg)?;
    stw_util::http::start_server(&cfg.listen, app);
}
