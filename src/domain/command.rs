use serde::{Deserialize, Serialize};

use super::PowerStation;

/// A single mutation of a station, as carried by scripted scenarios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StationCommand {
    Input { voltage: f64, current: f64 },
    Connect { id: String },
    UpdateOutput { id: String, voltage: f64, current: f64 },
    Disconnect { id: String },
    SetBatteryLevel { capacity_left_wh: f64 },
}

impl StationCommand {
    pub fn input(voltage: f64, current: f64) -> Self {
        StationCommand::Input { voltage, current }
    }

    pub fn connect(id: &str) -> Self {
        StationCommand::Connect { id: id.to_string() }
    }

    pub fn update_output(id: &str, voltage: f64, current: f64) -> Self {
        StationCommand::UpdateOutput {
            id: id.to_string(),
            voltage,
            current,
        }
    }

    pub fn disconnect(id: &str) -> Self {
        StationCommand::Disconnect { id: id.to_string() }
    }
}

impl PowerStation {
    pub fn apply(&mut self, command: &StationCommand) {
        match command {
            StationCommand::Input { voltage, current } => self.update_input(*voltage, *current),
            StationCommand::Connect { id } => self.connect_output(id.as_str()),
            StationCommand::UpdateOutput { id, voltage, current } => {
                self.update_output(id, *voltage, *current)
            }
            StationCommand::Disconnect { id } => self.disconnect_output(id),
            StationCommand::SetBatteryLevel { capacity_left_wh } => {
                self.update_battery_level(*capacity_left_wh)
            }
        }
    }
}
