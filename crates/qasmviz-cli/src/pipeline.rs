//! Source to render-request pipeline.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use qasmviz_circuit::{GateKind, RenderRequest};
use qasmviz_lower::lower;
use qasmviz_syntax::parse;
use tracing::debug;

use crate::settings::Settings;

/// Input path that reads standard input instead of a file.
pub const STDIN: &str = "-";

/// Read the program source from a file or stdin.
pub fn read_source(input: &str) -> Result<String> {
    if input == STDIN {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read from stdin")?;
        return Ok(source);
    }

    let path = Path::new(input);
    if !path.exists() {
        anyhow::bail!("File not found: {input}");
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {input}"))
}

/// Parse and lower `source`, pairing the circuit with the configured style.
pub fn build_request(source: &str, settings: &Settings) -> Result<RenderRequest> {
    let program = parse(source).map_err(|e| anyhow::anyhow!("Parse error: {e}"))?;
    debug!(nodes = program.children.len(), "parsed program");
    let circuit =
        lower(&program, &settings.lower).map_err(|e| anyhow::anyhow!("Lowering error: {e}"))?;
    Ok(RenderRequest::new(circuit, settings.style))
}

/// Serialize the request and write it to `output`, or stdout when absent.
pub fn write_request(request: &RenderRequest, output: Option<&str>, pretty: bool) -> Result<()> {
    let json = if pretty {
        request.to_json_pretty()?
    } else {
        request.to_json()?
    };

    match output {
        Some(path) => {
            fs::write(path, json + "\n").with_context(|| format!("Failed to write file: {path}"))
        }
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

/// Run the whole pipeline and report a summary on stderr.
pub fn execute(input: &str, output: Option<&str>, settings: &Settings, pretty: bool) -> Result<()> {
    let source = read_source(input)?;
    let request = build_request(&source, settings)?;
    write_request(&request, output, pretty)?;

    let circuit = &request.circuit;
    eprintln!(
        "{} {}: {} qubits, {} operations ({} measured), style {}",
        style("✓").green().bold(),
        style(input).green(),
        circuit.num_qubits(),
        circuit.num_operations(),
        circuit.count_gate(GateKind::Measure),
        style(request.style).yellow()
    );
    if let Some(path) = output {
        eprintln!("  Output: {}", style(path).green());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qasmviz_circuit::Style;
    use qasmviz_lower::FormatMode;

    const SOURCE: &str = r#"OPENQASM 2.0;
qreg q[2];
creg c[2];
rz(3*pi/4) q[0];
cx q[0], q[1];
c[0] = measure q[0];
"#;

    #[test]
    fn test_build_request() {
        let request = build_request(SOURCE, &Settings::default()).unwrap();
        assert_eq!(request.style, Style::Default);
        assert_eq!(request.circuit.num_qubits(), 2);
        assert_eq!(request.circuit.num_operations(), 3);
        assert_eq!(
            request.circuit.operations()[0].display_args.as_deref(),
            Some("3π/4")
        );
    }

    #[test]
    fn test_build_request_symbolic() {
        let settings = Settings::default().with_overrides(
            Some(FormatMode::Symbolic),
            false,
            Some(Style::BlackAndWhite),
        );
        let request = build_request(SOURCE, &settings).unwrap();
        assert_eq!(request.style, Style::BlackAndWhite);
        assert_eq!(
            request.circuit.operations()[0].display_args.as_deref(),
            Some("3×π/4")
        );
    }

    #[test]
    fn test_build_request_errors() {
        let err = build_request("qreg q[1]\nh q[0];", &Settings::default()).unwrap_err();
        assert!(err.to_string().starts_with("Parse error"));

        let err = build_request("qreg q[1];\nh q[0];", &Settings::default()).unwrap_err();
        assert!(err.to_string().starts_with("Lowering error"));

        let settings = Settings::default().with_overrides(None, true, None);
        let err = build_request(SOURCE, &settings).unwrap_err();
        assert!(err.to_string().contains("Unexpected statement"));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_source("/nonexistent/input.qasm").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_write_request_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("circuit.json");
        let request = build_request(SOURCE, &Settings::default()).unwrap();
        write_request(&request, path.to_str(), false).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["style"], "Default");
        assert_eq!(value["circuit"]["qubits"][0]["numChildren"], 1);
        assert_eq!(value["circuit"]["operations"][2]["gate"], "Measure");
    }
}
