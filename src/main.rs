use anyhow::Result;
use power_station::{config, scenario, telemetry};
use config::Config;
use scenario::Scenario;
use telemetry::init_tracing;
use tracing::{info, warn};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;
    init_tracing(&cfg.telemetry);

    let scenarios = Scenario::select(&cfg.demo.scenario)?;
    info!(
        battery_capacity_wh = cfg.station.battery_capacity_wh,
        maximum_input_w = cfg.station.maximum_input_w,
        maximum_output_w = cfg.station.maximum_output_w,
        "starting power station demo"
    );

    let mut mismatches = 0usize;
    for scenario in scenarios {
        // Every scenario starts from a fresh, fully charged station
        let mut station = cfg.station.build()?;
        println!("== {scenario}");

        for report in scenario.run(&mut station) {
            if cfg.demo.print_json {
                println!("{}", report.snapshot.to_json()?);
            } else {
                let mark = match report.expected {
                    Some(expected) if !report.matched() => format!(" (expected {expected})"),
                    _ => String::new(),
                };
                println!("{:<36} {}{}", report.label, report.snapshot, mark);
            }
            if !report.matched() {
                mismatches += 1;
            }
        }
    }

    if mismatches > 0 {
        warn!(mismatches, "demo finished with unexpected statuses");
        anyhow::bail!("{mismatches} step(s) ended in an unexpected status");
    }

    info!("demo complete");
    Ok(())
}
