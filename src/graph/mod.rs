//! Graphviz diagram generation.
//!
//! This module provides:
//! - Generation options and the column-name exclusion filter
//! - A deterministic DOT generator with simple and detailed node modes
//! - Layout direction for the rendered diagram

mod dot;
mod options;

pub use dot::{generate, DotGenerator};
pub use options::{is_excluded, GenerationOptions};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Layout direction for diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Left to right
    #[default]
    LR,
    /// Top to bottom
    TB,
}

impl Layout {
    /// Value of the DOT `rankdir` attribute
    pub fn rankdir(self) -> &'static str {
        match self {
            Layout::LR => "LR",
            Layout::TB => "TB",
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lr" | "left-right" | "horizontal" => Ok(Layout::LR),
            "tb" | "td" | "top-bottom" | "top-down" | "vertical" => Ok(Layout::TB),
            _ => Err(format!("Unknown layout: {}. Valid options: lr, tb", s)),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::LR => write!(f, "lr"),
            Layout::TB => write!(f, "tb"),
        }
    }
}
