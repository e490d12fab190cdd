//! Built-in demonstration scenarios
//!
//! Each scenario is a list of labelled steps. A step applies its commands to
//! a station, then records a snapshot and compares the resulting status
//! against the expected one, if any.

use std::str::FromStr;
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{PowerStation, StationCommand, StationSnapshot, StationStatus};

#[derive(Debug, Error, PartialEq)]
pub enum ScenarioError {
    #[error("Unknown scenario: {0} (expected walkthrough, status-check or all)")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Scenario {
    /// Charge, plug in a phone, check the estimate, unplug
    Walkthrough,
    /// Visit every status in turn
    StatusCheck,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioStep {
    pub label: String,
    pub commands: Vec<StationCommand>,
    pub expect: Option<StationStatus>,
}

impl ScenarioStep {
    fn new(label: &str, commands: Vec<StationCommand>, expect: Option<StationStatus>) -> Self {
        Self {
            label: label.to_string(),
            commands,
            expect,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StepReport {
    pub label: String,
    pub expected: Option<StationStatus>,
    pub snapshot: StationSnapshot,
}

impl StepReport {
    /// True when the step had no expectation or the status matched it
    pub fn matched(&self) -> bool {
        self.expected.map_or(true, |s| s == self.snapshot.status)
    }
}

impl Scenario {
    pub const ALL: [Scenario; 2] = [Scenario::Walkthrough, Scenario::StatusCheck];

    /// Resolve a configured name; `all` selects every scenario
    pub fn select(name: &str) -> Result<Vec<Scenario>, ScenarioError> {
        if name.eq_ignore_ascii_case("all") {
            return Ok(Self::ALL.to_vec());
        }
        Scenario::from_str(name)
            .map(|s| vec![s])
            .map_err(|_| ScenarioError::Unknown(name.to_string()))
    }

    pub fn steps(&self) -> Vec<ScenarioStep> {
        use StationCommand as C;
        use StationStatus::*;

        match self {
            Scenario::Walkthrough => vec![
                ScenarioStep::new("initial charge", vec![], Some(Idle)),
                ScenarioStep::new("charging at 220 V x 2 A", vec![C::input(220.0, 2.0)], Some(Charging)),
                ScenarioStep::new(
                    "phone connected at 30 V x 2 A",
                    vec![C::connect("phone"), C::update_output("phone", 30.0, 2.0)],
                    Some(Charging),
                ),
                ScenarioStep::new("phone disconnected", vec![C::disconnect("phone")], Some(Charging)),
            ],
            Scenario::StatusCheck => vec![
                ScenarioStep::new("nothing connected", vec![], Some(Idle)),
                ScenarioStep::new("charging at 220 V x 2 A", vec![C::input(220.0, 2.0)], Some(Charging)),
                ScenarioStep::new(
                    "laptop on battery only",
                    vec![
                        C::connect("laptop"),
                        C::update_output("laptop", 20.0, 3.0),
                        C::input(0.0, 0.0),
                    ],
                    Some(Discharging),
                ),
                // Heater is not connected yet, so this draw is ignored
                ScenarioStep::new(
                    "heater update before connecting",
                    vec![C::update_output("heater", 220.0, 5.0)],
                    Some(Discharging),
                ),
                ScenarioStep::new(
                    "heater connected at 220 V x 5 A",
                    vec![C::connect("heater"), C::update_output("heater", 220.0, 5.0)],
                    Some(Overload),
                ),
                ScenarioStep::new(
                    "everything disconnected",
                    vec![C::disconnect("laptop"), C::disconnect("heater"), C::input(0.0, 0.0)],
                    Some(Idle),
                ),
            ],
        }
    }

    /// Apply every step to `station` in order and report the state after each
    pub fn run(&self, station: &mut PowerStation) -> Vec<StepReport> {
        self.steps()
            .into_iter()
            .map(|step| {
                for cmd in &step.commands {
                    station.apply(cmd);
                }
                let report = StepReport {
                    label: step.label,
                    expected: step.expect,
                    snapshot: station.snapshot(),
                };
                if report.snapshot.status.is_overload() {
                    warn!(
                        scenario = %self,
                        step = %report.label,
                        input_w = report.snapshot.input_w,
                        total_output_w = report.snapshot.total_output_w,
                        "station overloaded"
                    );
                }
                if report.matched() {
                    info!(scenario = %self, step = %report.label, status = %report.snapshot.status, "step complete");
                } else {
                    warn!(
                        scenario = %self,
                        step = %report.label,
                        status = %report.snapshot.status,
                        expected = ?report.expected,
                        "step status mismatch"
                    );
                }
                report
            })
            .collect()
    }
}
