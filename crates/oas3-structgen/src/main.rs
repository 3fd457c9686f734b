use std::{
  ffi::OsStr,
  path::{Path, PathBuf},
};

use clap::Parser;

use crate::generator::orchestrator::Orchestrator;

mod generator;
mod reserved;

/// OpenAPI to Rust struct generator
///
/// Flattens the schema graph of an OpenAPI 3.x document into named models
/// and renders each one as a serde-annotated Rust struct.
#[derive(Parser, Debug)]
#[command(name = "oas3-structgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Path to the OpenAPI specification file (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  input: PathBuf,

  /// Directory where the generated Rust modules will be written
  #[arg(short, long, value_name = "DIR")]
  output: PathBuf,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  quiet: bool,
}

macro_rules! log_info {
  ($cli:expr, $($arg:tt)*) => {
    if !$cli.quiet {
      println!($($arg)*);
    }
  };
}

macro_rules! log_verbose {
  ($cli:expr, $($arg:tt)*) => {
    if $cli.verbose && !$cli.quiet {
      println!($($arg)*);
    }
  };
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  let spec = load_spec(&cli.input).await?;
  log_verbose!(cli, "Loaded spec: {} {}", spec.info.title, spec.info.version);

  let orchestrator = Orchestrator::new(spec);
  let (files, stats) = orchestrator.generate()?;

  log_verbose!(
    cli,
    "Flattened {} schemas into {} models",
    stats.flat_entries,
    stats.models_resolved
  );

  tokio::fs::create_dir_all(&cli.output).await?;
  for (filename, code) in &files {
    log_info!(cli, "Generating: {filename}");
    tokio::fs::write(cli.output.join(filename), code).await?;
  }

  log_info!(cli, "Wrote {} files to {}", files.len(), cli.output.display());

  Ok(())
}

async fn load_spec(path: &Path) -> anyhow::Result<oas3::Spec> {
  let content = tokio::fs::read_to_string(path).await?;

  match path.extension().and_then(OsStr::to_str) {
    Some("yaml" | "yml") => Ok(oas3::from_yaml(&content)?),
    _ => Ok(oas3::from_json(&content)?),
  }
}
