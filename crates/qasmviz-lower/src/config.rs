//! Lowering configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How rotation angles are rendered into `displayArgs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatMode {
    /// Evaluate and reduce to a sixteenth-fraction of π, else two decimals.
    #[default]
    Numeric,
    /// Reproduce the expression's structure without evaluating it.
    Symbolic,
}

impl fmt::Display for FormatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatMode::Numeric => write!(f, "numeric"),
            FormatMode::Symbolic => write!(f, "symbolic"),
        }
    }
}

impl FromStr for FormatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "numeric" => Ok(FormatMode::Numeric),
            "symbolic" => Ok(FormatMode::Symbolic),
            other => Err(format!("unknown format mode: '{other}'")),
        }
    }
}

/// Options fixed once per lowering run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LowerConfig {
    /// Angle formatting strategy.
    pub format: FormatMode,
    /// Accept `c = measure q;` statements. When disabled they are rejected
    /// as unexpected statements.
    pub measurement: bool,
}

impl Default for LowerConfig {
    fn default() -> Self {
        Self {
            format: FormatMode::Numeric,
            measurement: true,
        }
    }
}

impl LowerConfig {
    /// Set the angle formatting strategy.
    #[must_use]
    pub fn with_format(mut self, format: FormatMode) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable measurement support.
    #[must_use]
    pub fn with_measurement(mut self, enabled: bool) -> Self {
        self.measurement = enabled;
        self
    }
}
