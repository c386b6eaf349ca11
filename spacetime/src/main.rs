use spacetime::{ScenarioConfig, Scenario};
use spacetime::{bench_gravity, bench_energy_drift};

use anyhow::Result;
use clap::Parser;
use log::info;

use std::path::PathBuf;
use std::sync::mpsc;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, long, default_value = "two_body.yaml")]
    file_name: String,

    /// Published frames to log before stopping
    #[arg(long, default_value_t = 600)]
    frames: usize,

    /// Print the benchmark report instead of running a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    ScenarioConfig::from_path(config_path)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_gravity();
        bench_energy_drift(1000);
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(&scenario_cfg)?;
    let energy_interval = scenario.engine.energy_interval;
    info!("loaded '{}' with {} bodies", args.file_name, scenario.universe.len());

    let (tx, rx) = mpsc::channel();
    let mut driver = scenario.into_driver().with_updates(tx);
    driver.start()?;

    for update in rx.iter().take(args.frames) {
        if (update.step - 1) % energy_interval == 0 {
            info!(
                "step {:6}  kinetic {:+.6e}  potential {:+.6e}  total {:+.6e}  com {:?}",
                update.step,
                update.total_kinetic_energy,
                update.total_potential_energy,
                update.total_energy(),
                update.center_of_mass.map(|c| (c.x(), c.y(), c.z())),
            );
        }
    }

    let universe = driver.stop()?;
    let totals = universe.energy_history().totals();
    if let (Some(first), Some(last)) = (totals.first(), totals.last()) {
        info!("energy over the kept history: {first:+.6e} -> {last:+.6e}");
    }

    Ok(())
}
