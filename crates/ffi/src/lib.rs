//! C ABI for the swell simulation
//!
//! Hosts create a [`SwellSimInstance`](instance::SwellSimInstance), edit its
//! land grid and storm list, call `swell_sim_build` once per frame and read
//! rays back through the query functions. Every fallible function returns a
//! [`SwellSimErrorCode`](error::SwellSimErrorCode) and records a message for
//! `swell_sim_get_last_error`.

pub mod error;
pub mod field;
mod helpers;
pub mod instance;
pub mod land;
pub mod queries;
pub mod storms;
