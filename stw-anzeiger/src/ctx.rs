//! Main app context.

use rouille::{Request, Response, router};
use log::*;
use std::fs;
use stw_tafel::derive_row_status;
use stw_tafel::reference::ReferenceData;
use stw_tafel::time::server_now;
use stw_util::user_agent;
use stw_util::http::HttpServer;

use crate::config::Config;
use crate::types::*;
use crate::errors::*;

pub struct App {
    /// Injected lookup tables: direction sets, badge colours and
    /// proximity-threshold overrides.
    reference: ReferenceData,
    /// Fallback timezone offset for queries without their own clock.
    tz_offset: i32,
}

impl HttpServer for App {
    type Error = AnzeigerError;

    fn on_request(&self, req: &Request) -> AnzeigerResult<Response> {
        router!(req,
            (GET) (/) => {
                Ok(Response::text(user_agent!()))
            },
            (POST) (/board/derive) => {
                self.derive_board(req)
                    .map(|x| Response::json(&x))
            },
            _ => {
                Err(AnzeigerError::InvalidPath)
            }
        )
    }
}

impl App {
    pub fn new(cfg: &Config) -> AnzeigerResult<Self> {
        let reference = match cfg.reference_file {
            Some(ref path) => {
                info!("loading reference data from {}", path);
                let data = fs::read(path)?;
                ReferenceData::from_json_slice(&data)?
            },
            None => {
                warn!("no reference file configured, using built-in defaults");
                ReferenceData::default()
            }
        };
        Ok(Self { reference, tz_offset: cfg.server_tz_offset })
    }

    /// Runs the row status derivation over a whole board snapshot,
    /// keeping only the rows that survive the display filters.
    fn derive_board(&self, req: &Request) -> AnzeigerResult<BoardResponse> {
        let body = req.data().ok_or(AnzeigerError::NoBody)?;
        let query: BoardQuery = serde_json::from_reader(body)?;
        let now = query.now.unwrap_or_else(|| server_now(self.tz_offset));
        let mut rows = vec![];
        for row in &query.rows {
            let status = derive_row_status(&row.stop, row.telemetry.as_ref(), &self.reference, now, &query.filter);
            if !status.visible {
                continue;
            }
            rows.push(DerivedRow {
                train_number: row.stop.train_number.clone(),
                status,
            });
        }
        Ok(BoardResponse { now, rows })
    }
}
