//! Portable power station model
//!
//! A single [`domain::PowerStation`] tracks battery energy, input power and
//! connected outputs, and derives charge percentage, output totals, time
//! remaining and operating status from them.

pub mod config;
pub mod domain;
pub mod scenario;
pub mod telemetry;

pub use domain::{PowerStation, StationStatus, TimeRemaining};
