//! Scenario file loading.
//!
//! A scenario file is TOML with two optional tables:
//!
//! ```toml
//! [scenario]
//! seed      = 7
//! stop_secs = 300.0
//!
//! [scenario.bins]
//! count = 80
//!
//! [cellular]
//! loss_rate = 0.02
//! ```
//!
//! Every missing field falls back to the built-in defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use cw_core::ScenarioConfig;
use cw_net::CellularConfig;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioFile {
    pub scenario: ScenarioConfig,
    pub cellular: CellularConfig,
}

impl ScenarioFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario file '{}'", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid scenario file '{}'", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reject bad settings before any replication starts.
    pub fn validate(&self) -> Result<()> {
        self.scenario.validate()?;
        self.cellular.validate()?;
        Ok(())
    }
}
