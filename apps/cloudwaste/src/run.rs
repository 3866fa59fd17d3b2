//! Replication runner.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use rayon::prelude::*;
use serde::Serialize;

use cw_flow::{FlowSnapshot, NetworkSummary};
use cw_net::CellularNetwork;
use cw_output::{CsvWriter, OutputObserver, OutputWriter};
use cw_sim::{NoopObserver, Sim, SimBuilder};

use crate::cli::OutputFormat;
use crate::scenario::ScenarioFile;

/// Where and how each replication writes its trace.
#[derive(Clone, Debug)]
pub struct OutputTarget {
    pub dir:    PathBuf,
    pub format: OutputFormat,
}

impl OutputTarget {
    /// A single run writes into `dir`; replications get one `seed-<n>`
    /// subdirectory each.
    pub fn dir_for(&self, seed: u64, replications: u32) -> PathBuf {
        if replications <= 1 {
            self.dir.clone()
        } else {
            self.dir.join(format!("seed-{seed}"))
        }
    }
}

/// Outcome of one replication.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Replication {
    pub seed:    u64,
    pub summary: NetworkSummary,
}

/// Run `replications` independent simulations with seeds
/// `seed, seed + 1, ...` on rayon's pool.  Results come back in seed order.
pub fn run_replications(
    file:         &ScenarioFile,
    replications: u32,
    output:       Option<&OutputTarget>,
) -> Result<Vec<Replication>> {
    let base = file.scenario.seed;
    (0..replications)
        .into_par_iter()
        .map(|i| {
            let seed = base.wrapping_add(u64::from(i));
            run_one(file, seed, output.map(|t| (t, t.dir_for(seed, replications))))
        })
        .collect()
}

/// Run a single replication with `seed` replacing the file's seed.
pub fn run_one(
    file:   &ScenarioFile,
    seed:   u64,
    output: Option<(&OutputTarget, PathBuf)>,
) -> Result<Replication> {
    let mut config = file.scenario.clone();
    config.seed = seed;
    let mut sim = SimBuilder::cellular(config, file.cellular.clone())?
        .build()
        .with_context(|| format!("building scenario with seed {seed}"))?;

    let flows = match output {
        None => sim.run(&mut NoopObserver)?,
        Some((target, dir)) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
            let flows = match target.format {
                OutputFormat::Csv => run_with_writer(&mut sim, CsvWriter::new(&dir)?)?,
                #[cfg(feature = "sqlite")]
                OutputFormat::Sqlite => {
                    run_with_writer(&mut sim, cw_output::SqliteWriter::new(&dir)?)?
                }
            };
            info!("seed {seed}: output written to {}", dir.display());
            flows
        }
    };

    Ok(Replication { seed, summary: flows.aggregate() })
}

fn run_with_writer<W: OutputWriter>(sim: &mut Sim<CellularNetwork>, writer: W) -> Result<FlowSnapshot> {
    let mut observer = OutputObserver::new(writer);
    let flows = sim.run(&mut observer)?;
    if let Some(e) = observer.take_error() {
        return Err(e).context("failed to write simulation output");
    }
    Ok(flows)
}

/// Mean delivery ratio and delay over all replications.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct MeanSummary {
    pub replications:          usize,
    pub packet_delivery_ratio: f64,
    pub mean_delay_ms:         f64,
}

pub fn mean(results: &[Replication]) -> MeanSummary {
    if results.is_empty() {
        return MeanSummary::default();
    }
    let n = results.len() as f64;
    MeanSummary {
        replications:          results.len(),
        packet_delivery_ratio: results.iter().map(|r| r.summary.packet_delivery_ratio).sum::<f64>() / n,
        mean_delay_ms:         results.iter().map(|r| r.summary.mean_delay_ms).sum::<f64>() / n,
    }
}
