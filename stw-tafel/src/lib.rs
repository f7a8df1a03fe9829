//! Core derivation logic for a train dispatch board.
//!
//! Given what the timetable says about a stop, what the live telemetry
//! says about the train (if anything), and a reference clock, this crate
//! works out what a board row should display: expected arrival and
//! departure instants, delays, whether the train has already passed the
//! station, whether it is about to depart, and whether the row survives
//! the configured display filters.
//!
//! Everything here is a pure function of its inputs, re-run on every
//! data refresh tick. No I/O, no state between evaluations.

pub mod types;
pub mod time;
pub mod reference;
pub mod derive;
#[cfg(test)] mod tests;

pub use crate::derive::derive_row_status;
pub use crate::types::DerivedRowStatus;
