//! qasmviz Command-Line Interface
//!
//! Reads an `OpenQASM` program, lowers it to a circuit model, and writes the
//! renderer hand-off as JSON.
//!
//! ```text
//! qasmviz bell.qasm --style black-and-white -o bell.json
//! cat bell.qasm | qasmviz - --mode symbolic --pretty
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::Parser;
use console::style;
use qasmviz_circuit::Style;
use qasmviz_lower::FormatMode;
use tracing_subscriber::EnvFilter;

mod pipeline;
mod settings;

use settings::Settings;

/// qasmviz - lower OpenQASM programs into renderable circuit models
#[derive(Parser, Debug)]
#[command(name = "qasmviz")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Input file (`-` for stdin)
    input: String,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,

    /// Angle formatting (numeric, symbolic)
    #[arg(short, long)]
    mode: Option<FormatMode>,

    /// Reject measurement statements
    #[arg(long)]
    no_measure: bool,

    /// Renderer style (default, black-and-white, black-and-white-dark)
    #[arg(short, long)]
    style: Option<Style>,

    /// YAML settings file; flags override its values
    #[arg(short, long, env = "QASMVIZ_CONFIG")]
    config: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn settings(&self) -> anyhow::Result<Settings> {
        let base = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        Ok(base.with_overrides(self.mode, self.no_measure, self.style))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = cli.settings().and_then(|settings| {
        pipeline::execute(&cli.input, cli.output.as_deref(), &settings, cli.pretty)
    });

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
