//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::scenario::ScenarioFile;

/// Simulate smart waste bins and collection trucks reporting over a
/// cellular network to a cloud collector.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML scenario file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of smart bins
    #[arg(long)]
    pub bins: Option<usize>,

    /// Number of collection trucks
    #[arg(long)]
    pub trucks: Option<usize>,

    /// Simulated run length in seconds
    #[arg(long, value_name = "SECS")]
    pub sim_time: Option<f64>,

    /// Master RNG seed (replication `i` uses `seed + i`)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of base stations
    #[arg(long)]
    pub base_stations: Option<usize>,

    /// Radio packet loss probability in [0, 1]
    #[arg(long)]
    pub loss_rate: Option<f64>,

    /// Independent runs, executed in parallel
    #[arg(short, long, default_value_t = 1)]
    pub replications: u32,

    /// Directory for the report trace and flow table
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output backend used with `--output`
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Print results as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    #[cfg(feature = "sqlite")]
    Sqlite,
}

impl Cli {
    /// Overlay the flags that were given on top of `file`.
    pub fn apply(&self, file: &mut ScenarioFile) {
        let scenario = &mut file.scenario;
        if let Some(n) = self.bins {
            scenario.bins.count = n;
        }
        if let Some(n) = self.trucks {
            scenario.trucks.count = n;
        }
        if let Some(t) = self.sim_time {
            scenario.stop_secs = t;
        }
        if let Some(s) = self.seed {
            scenario.seed = s;
        }
        if let Some(n) = self.base_stations {
            scenario.base_stations = n;
        }
        if let Some(p) = self.loss_rate {
            file.cellular.loss_rate = p;
        }
    }
}
