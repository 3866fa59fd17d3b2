//! cloudwaste — smart waste-collection telemetry over a cellular network.
//!
//! Simulates smart bins reporting their fill level and collection trucks
//! reporting GPS fixes to a cloud collector, then prints packet delivery
//! ratio and end-to-end delay with the pass/fail verdicts.  The defaults
//! reproduce the Nlongkak (Yaoundé) deployment: 50 bins, 3 trucks, 2 base
//! stations, 120 s.
//!
//! ```text
//! cloudwaste --bins 80 --loss-rate 0.02 --replications 8 --output out/
//! RUST_LOG=debug cloudwaste --config scenario.toml
//! ```

mod cli;
mod report;
mod run;
mod scenario;


use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::info;

use cli::Cli;
use run::OutputTarget;
use scenario::ScenarioFile;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut file = match &cli.config {
        Some(path) => {
            info!("Scenario file: {}", path.display());
            ScenarioFile::load(path)?
        }
        None => ScenarioFile::default(),
    };
    cli.apply(&mut file);
    file.validate()?;
    anyhow::ensure!(cli.replications >= 1, "--replications must be at least 1");

    let scenario = &file.scenario;
    if !cli.json {
        println!("=== CloudWaste — Yaoundé smart waste management ===");
        println!(
            "Bins: {}  |  Trucks: {}  |  Base stations: {}  |  Sim time: {} s",
            scenario.bins.count, scenario.trucks.count, scenario.base_stations, scenario.stop_secs,
        );
        println!();
    }

    let output = cli.output.clone().map(|dir| OutputTarget { dir, format: cli.format });

    let t0 = Instant::now();
    let results = run::run_replications(&file, cli.replications, output.as_ref())?;
    info!("{} replication(s) finished in {:.2?}", results.len(), t0.elapsed());

    let mean = run::mean(&results);
    if cli.json {
        println!("{}", report::to_json(&results, mean)?);
        return Ok(());
    }

    for rep in &results {
        print!("{}", report::format_replication(rep));
    }
    if results.len() > 1 {
        println!();
        print!("{}", report::format_mean(&mean));
    }
    Ok(())
}
