// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Optional JSON config file. Command-line flags win over file values, file
//! values win over built-in defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use findprod_core::Strategy;
use serde::Deserialize;

/// Report rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

/// Values a config file may set. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Input generator seed.
    pub seed: Option<u64>,
    /// Inclusive upper bound for generated elements.
    pub max_random: Option<i32>,
    /// Strategies to run, in order.
    pub strategies: Option<Vec<Strategy>>,
    /// Report format.
    pub format: Option<OutputFormat>,
}

impl FileConfig {
    /// Reads and parses `path`. An empty file is the empty config.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(&bytes).with_context(|| format!("parsing config {}", path.display()))
    }
}
