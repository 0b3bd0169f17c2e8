//! Hand-off envelope for the external circuit renderer.
//!
//! Drawing is not done here. A [`RenderRequest`] pairs a finished
//! [`CircuitModel`] with the name of one of the renderer's built-in visual
//! styles, and serializes to the JSON the renderer entry point consumes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::circuit::CircuitModel;
use crate::error::CircuitResult;

/// Named visual style from the renderer's style catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Style {
    #[default]
    Default,
    BlackAndWhite,
    BlackAndWhiteDark,
}

impl Style {
    /// The catalog key the renderer looks the style up by.
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Default => "Default",
            Style::BlackAndWhite => "BlackAndWhite",
            Style::BlackAndWhiteDark => "BlackAndWhiteDark",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "default" => Ok(Style::Default),
            "blackandwhite" => Ok(Style::BlackAndWhite),
            "blackandwhitedark" => Ok(Style::BlackAndWhiteDark),
            other => Err(format!("unknown style: '{other}'")),
        }
    }
}

/// A circuit paired with the style it should be drawn in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub circuit: CircuitModel,
    pub style: Style,
}

impl RenderRequest {
    pub fn new(circuit: CircuitModel, style: Style) -> Self {
        Self { circuit, style }
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> CircuitResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> CircuitResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_from_str() {
        assert_eq!("default".parse::<Style>().unwrap(), Style::Default);
        assert_eq!(
            "black-and-white".parse::<Style>().unwrap(),
            Style::BlackAndWhite
        );
        assert_eq!(
            "BlackAndWhiteDark".parse::<Style>().unwrap(),
            Style::BlackAndWhiteDark
        );
        assert!("neon".parse::<Style>().is_err());
    }

    #[test]
    fn test_request_json() {
        let request = RenderRequest::new(CircuitModel::default(), Style::BlackAndWhite);
        let value: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(value["style"], "BlackAndWhite");
        assert_eq!(value["circuit"]["qubits"], serde_json::json!([]));
    }
}
