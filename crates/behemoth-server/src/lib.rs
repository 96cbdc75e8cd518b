//! # Behemoth Server Library
//!
//! Start-up pieces of the server binary: dependency initialization with
//! retries, wiring of the services, logging and metrics set-up.

pub mod di;
pub mod infra;
pub mod startup;
pub mod telemetry;
