use serde::{Serialize, Serializer};
use std::fmt;

/// Rendering used when net power is exactly zero
pub const INDEFINITE_LABEL: &str = "99:59";

/// Rendering used when the arithmetic produced NaN, infinity or an out-of-range estimate
pub const UNDEFINED_LABEL: &str = "--:--";

/// Estimated time until the battery is full or empty at the current net power
///
/// Minutes are not carried into hours, so an estimate may render as `01:60`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRemaining {
    /// Net power is zero; nothing is draining or charging
    Indefinite,
    Estimate { hours: i64, minutes: i64 },
    /// Capacity or power was not a finite number, or the hours overflow `i64`
    Undefined,
}

impl TimeRemaining {
    /// Estimate from the energy left (Wh) and the signed net power (W).
    ///
    /// The sign of `net_power_w` is ignored; a station that is charging and
    /// one that is draining at the same rate report the same figure.
    pub fn estimate(capacity_left_wh: f64, net_power_w: f64) -> Self {
        if net_power_w == 0.0 {
            return TimeRemaining::Indefinite;
        }

        let rate = net_power_w.abs();
        let hours = (capacity_left_wh / rate).floor();
        // Half-up rounding of the leftover fraction of an hour
        let minutes = ((capacity_left_wh % rate) / rate * 60.0 + 0.5).floor();

        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
        let representable = (i64::MIN as f64)..(i64::MAX as f64);
        if !representable.contains(&hours) || !representable.contains(&minutes) {
            return TimeRemaining::Undefined;
        }

        TimeRemaining::Estimate {
            hours: hours as i64,
            minutes: minutes as i64,
        }
    }

    pub fn is_indefinite(&self) -> bool {
        matches!(self, TimeRemaining::Indefinite)
    }

    /// Total minutes for an estimate, `None` otherwise or on overflow
    pub fn total_minutes(&self) -> Option<i64> {
        match self {
            TimeRemaining::Estimate { hours, minutes } => {
                hours.checked_mul(60).and_then(|m| m.checked_add(*minutes))
            }
            _ => None,
        }
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeRemaining::Indefinite => f.write_str(INDEFINITE_LABEL),
            TimeRemaining::Estimate { hours, minutes } => write!(f, "{:02}:{:02}", hours, minutes),
            TimeRemaining::Undefined => f.write_str(UNDEFINED_LABEL),
        }
    }
}

impl Serialize for TimeRemaining {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
