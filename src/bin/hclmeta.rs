use clap::{command, Parser};
use hclmeta::{
    config::{Config, OutputFormat},
    formatter::render,
    loader::{load_module_with, OsFileSystem},
    InternalResult,
};
use std::{io, path::PathBuf, process::ExitCode};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Module directory to read
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Produce JSON-formatted output
    #[arg(long)]
    json: bool,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug mode
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> InternalResult<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if cli.json {
        config.output.format = OutputFormat::Json;
    }
    debug!("config: {:?}", config);
    Ok(config)
}

/// Exit code 1 means the module was read but has error diagnostics.
fn run(cli: &Cli) -> InternalResult<ExitCode> {
    let config = load_config(cli)?;
    let module = load_module_with(&OsFileSystem, &cli.dir, &config.loader);
    render(io::stdout().lock(), &module, &config.output)?;

    Ok(if module.has_errors() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
