use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::{StationError, StationSnapshot, StationStatus, TimeRemaining};

/// Portable power station model
///
/// Tracks the energy left in the battery, the last reported input power and
/// the draw of every connected output. Everything else (percentage, totals,
/// time remaining, status) is derived on read.
///
/// Energy accounting is per update: each `update_input` call adds its power
/// figure straight to the stored energy, as if one call covered one hour.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerStation {
    battery_capacity_wh: f64,
    maximum_input_w: f64,
    maximum_output_w: f64,
    capacity_left_wh: f64,
    current_input_w: f64,
    outputs: BTreeMap<String, f64>,
}

impl PowerStation {
    /// Create a fully charged station with nothing connected.
    ///
    /// Ratings are not validated; a zero capacity yields non-finite
    /// percentages. Use [`PowerStation::try_new`] to reject bad ratings.
    pub fn new(battery_capacity_wh: f64, maximum_input_w: f64, maximum_output_w: f64) -> Self {
        Self {
            battery_capacity_wh,
            maximum_input_w,
            maximum_output_w,
            capacity_left_wh: battery_capacity_wh,
            current_input_w: 0.0,
            outputs: BTreeMap::new(),
        }
    }

    /// Create a station, rejecting ratings that are not finite and positive
    pub fn try_new(
        battery_capacity_wh: f64,
        maximum_input_w: f64,
        maximum_output_w: f64,
    ) -> Result<Self, StationError> {
        Ok(Self::new(
            StationError::check_rating("battery_capacity_wh", battery_capacity_wh)?,
            StationError::check_rating("maximum_input_w", maximum_input_w)?,
            StationError::check_rating("maximum_output_w", maximum_output_w)?,
        ))
    }

    /// Record the input power (`voltage * current`).
    ///
    /// The reading is always stored. Above the input rating the battery is
    /// not replenished; otherwise the power is added to the stored energy,
    /// capped at full capacity and never reducing it.
    pub fn update_input(&mut self, voltage: f64, current: f64) {
        let power_w = voltage * current;
        self.current_input_w = power_w;

        if power_w > self.maximum_input_w {
            warn!(
                input_w = power_w,
                maximum_input_w = self.maximum_input_w,
                "input above rating, battery not replenished"
            );
            return;
        }

        // A non-positive reading must not drain the battery; NaN passes through
        let gained_wh = if power_w < 0.0 { 0.0 } else { power_w };
        let charged_wh = self.capacity_left_wh + gained_wh;
        self.capacity_left_wh = if charged_wh > self.battery_capacity_wh {
            self.battery_capacity_wh
        } else {
            charged_wh
        };
        debug!(input_w = power_w, capacity_left_wh = self.capacity_left_wh, "input updated");
    }

    /// Connect an output, or reset an already connected one, at 0 W
    pub fn connect_output(&mut self, id: impl Into<String>) {
        let id = id.into();
        debug!(output = %id, "output connected");
        self.outputs.insert(id, 0.0);
    }

    /// Set the draw of a connected output; unknown ids are ignored
    pub fn update_output(&mut self, id: &str, voltage: f64, current: f64) {
        match self.outputs.get_mut(id) {
            Some(draw) => {
                *draw = voltage * current;
                debug!(output = %id, output_w = *draw, "output updated");
            }
            None => debug!(output = %id, "ignoring update for unconnected output"),
        }
    }

    /// Remove an output entirely; unknown ids are ignored
    pub fn disconnect_output(&mut self, id: &str) {
        if let Some(last_w) = self.outputs.remove(id) {
            debug!(output = %id, last_w, "output disconnected");
        }
    }

    /// Override the stored energy. The value is taken as-is, without clamping.
    pub fn update_battery_level(&mut self, capacity_left_wh: f64) {
        debug!(capacity_left_wh, "battery level overridden");
        self.capacity_left_wh = capacity_left_wh;
    }

    /// Charge level in percent, rounded to one decimal place
    pub fn battery_percentage(&self) -> f64 {
        round_to_tenth(self.capacity_left_wh / self.battery_capacity_wh * 100.0)
    }

    /// Sum of the draw of all connected outputs (W), unrounded
    pub fn total_output_power(&self) -> f64 {
        self.outputs.values().sum()
    }

    /// Input power minus total output power (W); positive means charging
    pub fn net_power(&self) -> f64 {
        self.current_input_w - self.total_output_power()
    }

    /// Time until full or empty at the current net power
    pub fn time_remaining(&self) -> TimeRemaining {
        TimeRemaining::estimate(self.capacity_left_wh, self.net_power())
    }

    /// Operating status derived from input and output power against the ratings
    pub fn status(&self) -> StationStatus {
        StationStatus::from_power(
            self.current_input_w,
            self.total_output_power(),
            self.maximum_input_w,
            self.maximum_output_w,
        )
    }

    pub fn battery_capacity(&self) -> f64 {
        self.battery_capacity_wh
    }

    pub fn maximum_input(&self) -> f64 {
        self.maximum_input_w
    }

    pub fn maximum_output(&self) -> f64 {
        self.maximum_output_w
    }

    pub fn capacity_left(&self) -> f64 {
        self.capacity_left_wh
    }

    pub fn current_input_power(&self) -> f64 {
        self.current_input_w
    }

    /// Draw of one output, `None` when it is not connected
    pub fn output_power(&self, id: &str) -> Option<f64> {
        self.outputs.get(id).copied()
    }

    pub fn is_connected(&self, id: &str) -> bool {
        self.outputs.contains_key(id)
    }

    /// Connected outputs and their draw, ordered by id
    pub fn outputs(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.outputs.iter().map(|(id, w)| (id.as_str(), *w))
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Capture every reading and derived value at this instant
    pub fn snapshot(&self) -> StationSnapshot {
        StationSnapshot {
            battery_capacity_wh: self.battery_capacity_wh,
            capacity_left_wh: self.capacity_left_wh,
            battery_percentage: self.battery_percentage(),
            input_w: self.current_input_w,
            total_output_w: self.total_output_power(),
            net_w: self.net_power(),
            outputs: self.outputs.clone(),
            time_remaining: self.time_remaining(),
            status: self.status(),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Round to one decimal place on the exact binary value.
///
/// Exact ties (quarters such as 0.25) round away from zero.
fn round_to_tenth(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return (value * 10.0).round() / 10.0;
    }
    format!("{:.1}", value).parse().unwrap_or(value)
}
