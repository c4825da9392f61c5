use std::path::{Path, PathBuf};

use clap::Parser;
use miette::{IntoDiagnostic, WrapErr};
use weathermap::{MetricValues, parse_values, weathermap_svg};

/// Render a network weathermap to SVG
#[derive(Parser, Debug)]
#[command(name = "weathermap")]
#[command(about = "Render a weathermap configuration and metric values to SVG", long_about = None)]
struct Args {
    /// Weathermap configuration (JSON)
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Current metric values as a JSON object; without it everything is unmeasured
    #[arg(short, long, value_name = "VALUES")]
    values: Option<PathBuf>,

    /// Output SVG file (stdout when omitted)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

fn read(path: &Path) -> miette::Result<String> {
    std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))
}

fn main() -> miette::Result<()> {
    // Logs go to stderr so the SVG can be piped from stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let values = match &args.values {
        Some(path) => parse_values(&path.display().to_string(), &read(path)?)?,
        None => MetricValues::new(),
    };
    let source = read(&args.config)?;
    let svg = weathermap_svg(&args.config.display().to_string(), &source, &values)?;

    match &args.output {
        Some(path) => std::fs::write(path, svg)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write {}", path.display()))?,
        None => print!("{svg}"),
    }
    Ok(())
}
