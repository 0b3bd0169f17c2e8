//! Settings file loading.
//!
//! ```yaml
//! lower:
//!   format: symbolic
//!   measurement: false
//! style: BlackAndWhiteDark
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use qasmviz_circuit::Style;
use qasmviz_lower::{FormatMode, LowerConfig};
use serde::{Deserialize, Serialize};

/// Everything a run can be configured with.
///
/// Missing sections fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub lower: LowerConfig,
    pub style: Style,
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        serde_yaml_ng::from_str(&text)
            .with_context(|| format!("Invalid settings file: {}", path.display()))
    }

    /// Apply command-line overrides on top of file values.
    #[must_use]
    pub fn with_overrides(
        mut self,
        format: Option<FormatMode>,
        no_measure: bool,
        style: Option<Style>,
    ) -> Self {
        if let Some(format) = format {
            self.lower.format = format;
        }
        if no_measure {
            self.lower.measurement = false;
        }
        if let Some(style) = style {
            self.style = style;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_settings(yaml: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full() {
        let file = write_settings(
            "lower:\n  format: symbolic\n  measurement: false\nstyle: BlackAndWhiteDark\n",
        );
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.lower.format, FormatMode::Symbolic);
        assert!(!settings.lower.measurement);
        assert_eq!(settings.style, Style::BlackAndWhiteDark);
    }

    #[test]
    fn test_load_partial() {
        let file = write_settings("lower:\n  format: symbolic\n");
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.lower.format, FormatMode::Symbolic);
        assert!(settings.lower.measurement);
        assert_eq!(settings.style, Style::Default);
    }

    #[test]
    fn test_load_invalid() {
        let file = write_settings("lower:\n  format: fancy\n");
        let err = Settings::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid settings file"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read settings file"));
    }

    #[test]
    fn test_overrides_win() {
        let file = write_settings("lower:\n  format: symbolic\nstyle: BlackAndWhite\n");
        let settings = Settings::load(file.path())
            .unwrap()
            .with_overrides(Some(FormatMode::Numeric), true, None);
        assert_eq!(settings.lower.format, FormatMode::Numeric);
        assert!(!settings.lower.measurement);
        assert_eq!(settings.style, Style::BlackAndWhite);
    }
}
