//! YAML configuration for diagram generation.
//!
//! Every value can also be given on the command line; CLI flags win.
//!
//! ```yaml
//! generation:
//!   database: Shop
//!   schema: dbo
//!   exclude_pattern: "Id$"
//!   hide_excluded: true
//! render:
//!   simple_nodes: false
//!   layout: tb
//!   graph_name: shop
//! ```

use crate::error::{Error, Result};
use crate::graph::{GenerationOptions, Layout};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which tables to read and which columns to hide
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Database to read from the catalog
    pub database: Option<String>,
    /// Only tables in this schema
    pub schema: Option<String>,
    /// Regex tested against column names
    pub exclude_pattern: Option<String>,
    /// Hide columns matching `exclude_pattern` in detailed nodes
    pub hide_excluded: bool,
}

/// How the document is rendered
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Table names only, no column rows
    pub simple_nodes: bool,
    pub layout: Layout,
    /// Name of the emitted digraph (defaults to the database name)
    pub graph_name: Option<String>,
}

/// Complete YAML configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generation: GenerationConfig,
    pub render: RenderConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::configuration(format!("invalid {}: {}", path.display(), e)))
    }

    /// Build generation options, failing on a missing database or a bad
    /// exclusion pattern
    pub fn generation_options(&self) -> Result<GenerationOptions> {
        let database = self
            .generation
            .database
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| Error::configuration("no database selected"))?;

        GenerationOptions::new(
            database,
            self.generation.schema.as_deref(),
            self.generation.exclude_pattern.as_deref(),
            self.generation.hide_excluded,
        )
    }
}
