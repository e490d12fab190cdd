use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Station operating status
///
/// Derived from the live input power and the aggregate output draw, never stored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StationStatus {
    /// Input above its rating, or aggregate output above its rating
    Overload,
    /// Outputs drawing power with no input at all
    Discharging,
    /// Input exceeds aggregate output
    Charging,
    Idle,
}

impl StationStatus {
    /// Resolve the status from raw power figures, highest priority first:
    /// overload, discharging, charging, idle.
    pub fn from_power(
        input_w: f64,
        output_w: f64,
        maximum_input_w: f64,
        maximum_output_w: f64,
    ) -> Self {
        let net_w = input_w - output_w;

        if input_w > maximum_input_w || output_w > maximum_output_w {
            StationStatus::Overload
        } else if output_w > 0.0 && input_w == 0.0 {
            StationStatus::Discharging
        } else if net_w > 0.0 {
            StationStatus::Charging
        } else {
            StationStatus::Idle
        }
    }

    pub fn is_overload(&self) -> bool {
        matches!(self, StationStatus::Overload)
    }
}
