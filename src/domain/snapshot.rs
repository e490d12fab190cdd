use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::{StationStatus, TimeRemaining};

/// Every reading and derived value of a station at a single point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSnapshot {
    /// Rated battery capacity (Wh)
    pub battery_capacity_wh: f64,

    /// Energy left in the battery (Wh)
    pub capacity_left_wh: f64,

    /// Charge level, one decimal place
    pub battery_percentage: f64,

    /// Last reported input power (W)
    pub input_w: f64,

    /// Sum of all connected outputs (W)
    pub total_output_w: f64,

    /// Input minus output (positive = charging)
    pub net_w: f64,

    /// Draw per connected output (W)
    pub outputs: BTreeMap<String, f64>,

    pub time_remaining: TimeRemaining,

    pub status: StationStatus,

    pub timestamp: DateTime<Utc>,
}

impl StationSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for StationSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "charge {}% | in {} W | out {} W | time {} | {}",
            self.battery_percentage,
            self.input_w,
            self.total_output_w,
            self.time_remaining,
            self.status
        )
    }
}
