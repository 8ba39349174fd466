//! Station extraction CLI
//!
//! Reads a UML XMI model, prints every instance of the target class and
//! saves them as JSON.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use xmi_stations::config::{DEFAULT_CLASS, DEFAULT_INPUT, DEFAULT_OUTPUT};
use xmi_stations::{ExtractConfig, ExtractError, Outcome};

#[derive(Parser)]
#[command(name = "xmi-stations")]
#[command(version, about = "Extract UML class instances from an XMI model into JSON")]
struct Cli {
    /// XMI model to read
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// JSON file to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Name of the UML class whose instances are extracted
    #[arg(short, long = "class", default_value = DEFAULT_CLASS)]
    class_name: String,

    /// Log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ExtractConfig::new(cli.input, cli.output).with_class(cli.class_name);

    let result = xmi_stations::run(&config);
    match &result {
        Ok(outcome) => print!("{}", outcome.report(&config.class_name)),
        Err(e) => eprintln!("Error: {e}"),
    }
    ExitCode::from(exit_status(&result))
}

/// Soft outcomes (nothing found) succeed; parse and IO failures do not.
fn exit_status(result: &Result<Outcome, ExtractError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
