//! End-to-end behaviour of the station through its public API

use power_station::domain::{PowerStation, StationCommand, StationStatus, TimeRemaining};
use proptest::prelude::*;
use rstest::{fixture, rstest};

#[fixture]
fn station() -> PowerStation {
    PowerStation::new(2000.0, 500.0, 800.0)
}

#[rstest]
fn initial_state_is_full_and_idle(station: PowerStation) {
    assert_eq!(station.battery_percentage(), 100.0);
    assert_eq!(station.status(), StationStatus::Idle);
    assert_eq!(station.time_remaining().to_string(), "99:59");
}

#[rstest]
fn charging_from_full_stays_full(mut station: PowerStation) {
    station.update_input(220.0, 2.0);
    assert_eq!(station.capacity_left(), 2000.0);
    assert_eq!(station.status(), StationStatus::Charging);
}

#[rstest]
fn laptop_on_battery_discharges(mut station: PowerStation) {
    station.connect_output("laptop");
    station.update_output("laptop", 20.0, 3.0);
    station.update_input(0.0, 0.0);
    assert_eq!(station.total_output_power(), 60.0);
    assert_eq!(station.current_input_power(), 0.0);
    assert_eq!(station.status(), StationStatus::Discharging);
}

#[rstest]
fn connected_heater_overloads_output(mut station: PowerStation) {
    station.connect_output("heater");
    station.update_output("heater", 220.0, 5.0);
    assert!(station.total_output_power() > station.maximum_output());
    assert_eq!(station.status(), StationStatus::Overload);
}

#[rstest]
#[case::idle(&[], StationStatus::Idle)]
#[case::charging(&[("in", 220.0, 2.0)], StationStatus::Charging)]
#[case::input_overload(&[("in", 230.0, 3.0)], StationStatus::Overload)]
#[case::discharging(&[("fan", 12.0, 2.0)], StationStatus::Discharging)]
#[case::balanced(&[("in", 12.0, 2.0), ("fan", 12.0, 2.0)], StationStatus::Idle)]
#[case::input_below_output(&[("in", 10.0, 2.0), ("fan", 12.0, 2.0)], StationStatus::Idle)]
#[case::overload_while_charging(&[("in", 220.0, 2.0), ("oven", 230.0, 4.0)], StationStatus::Overload)]
fn status_priority(
    mut station: PowerStation,
    #[case] readings: &[(&str, f64, f64)],
    #[case] expected: StationStatus,
) {
    for &(id, voltage, current) in readings {
        if id == "in" {
            station.update_input(voltage, current);
        } else {
            station.connect_output(id);
            station.update_output(id, voltage, current);
        }
    }
    assert_eq!(station.status(), expected);
}

#[rstest]
fn balanced_power_reports_indefinite_time(mut station: PowerStation) {
    station.update_input(12.0, 5.0);
    station.connect_output("fridge");
    station.update_output("fridge", 12.0, 5.0);
    assert_eq!(station.net_power(), 0.0);
    assert_eq!(station.time_remaining(), TimeRemaining::Indefinite);
    assert_eq!(station.time_remaining().to_string(), "99:59");
}

#[rstest]
fn scripted_commands_drive_the_station(mut station: PowerStation) {
    let script: Vec<StationCommand> = serde_json::from_str(
        r#"[
            {"op":"set_battery_level","capacity_left_wh":1000.0},
            {"op":"connect","id":"lamp"},
            {"op":"update_output","id":"lamp","voltage":12.0,"current":5.0},
            {"op":"input","voltage":0.0,"current":0.0}
        ]"#,
    )
    .unwrap();

    for cmd in &script {
        station.apply(cmd);
    }

    assert_eq!(station.battery_percentage(), 50.0);
    assert_eq!(station.status(), StationStatus::Discharging);
    assert_eq!(station.time_remaining().to_string(), "16:40");
}

fn output_id() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

proptest! {
    #[test]
    fn percentage_stays_in_range(level in 0.0f64..=2000.0) {
        let mut station = PowerStation::new(2000.0, 500.0, 800.0);
        station.update_battery_level(level);
        let pct = station.battery_percentage();
        prop_assert!((0.0..=100.0).contains(&pct));
    }

    #[test]
    fn input_keeps_capacity_within_bounds(
        start in 0.0f64..=2000.0,
        readings in prop::collection::vec((-50.0f64..250.0, -5.0f64..5.0), 0..20),
    ) {
        let mut station = PowerStation::new(2000.0, 500.0, 800.0);
        station.update_battery_level(start);
        let mut previous = station.capacity_left();
        for (voltage, current) in readings {
            station.update_input(voltage, current);
            let now = station.capacity_left();
            prop_assert!(now >= previous, "capacity dropped from {} to {}", previous, now);
            prop_assert!(now <= 2000.0);
            previous = now;
        }
    }

    #[test]
    fn connected_output_contributes_zero(id in output_id(), others in prop::collection::vec((output_id(), 0.0f64..100.0), 0..5)) {
        let mut station = PowerStation::new(2000.0, 500.0, 800.0);
        for (other, watts) in &others {
            station.connect_output(other.as_str());
            station.update_output(other, *watts, 1.0);
        }
        station.disconnect_output(&id);
        let before = station.total_output_power();
        station.connect_output(id.as_str());
        prop_assert_eq!(station.output_power(&id), Some(0.0));
        prop_assert_eq!(station.total_output_power(), before);
    }

    #[test]
    fn disconnect_removes_whole_contribution(id in output_id(), voltage in 1.0f64..240.0, current in 0.1f64..10.0) {
        let mut station = PowerStation::new(2000.0, 500.0, 800.0);
        station.connect_output("base");
        station.update_output("base", 12.0, 1.0);
        station.connect_output(id.as_str());
        station.update_output(&id, voltage, current);
        station.disconnect_output(&id);
        let expected = if id == "base" { 0.0 } else { 12.0 };
        prop_assert_eq!(station.total_output_power(), expected);
        prop_assert!(!station.is_connected(&id));
    }

    #[test]
    fn update_on_unconnected_id_is_ignored(id in output_id(), voltage in -240.0f64..240.0, current in -10.0f64..10.0) {
        let mut station = PowerStation::new(2000.0, 500.0, 800.0);
        station.connect_output("base-load");
        station.update_output("base-load", 12.0, 2.0);
        let before = station.clone();
        station.update_output(&id, voltage, current);
        prop_assert_eq!(station, before);
    }

    #[test]
    fn overload_always_wins(input in 501.0f64..5000.0, outputs in prop::collection::vec(0.0f64..1000.0, 0..4)) {
        let mut station = PowerStation::new(2000.0, 500.0, 800.0);
        for (i, watts) in outputs.iter().enumerate() {
            let id = format!("out{i}");
            station.connect_output(id.as_str());
            station.update_output(&id, *watts, 1.0);
        }
        station.update_input(input, 1.0);
        prop_assert_eq!(station.status(), StationStatus::Overload);
    }
}
