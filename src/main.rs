mod terminal;
#[cfg(feature = "gtk-ui")]
mod window;

use anyhow::Result;
use calcpad::buffer::DEFAULT_ERROR_MARKER;
use calcpad::{calculate, DisplayBuffer};
use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "calcpad", version, about = "A four-function calculator")]
struct Cli {
    /// Evaluate one expression, print the result and exit.
    #[arg(short, long)]
    expr: Option<String>,

    /// Text shown on the display when an expression cannot be evaluated.
    #[arg(long, env = "CALCPAD_ERROR_MARKER", default_value = DEFAULT_ERROR_MARKER)]
    error_marker: String,

    /// Open the keypad window instead of reading from the terminal.
    #[cfg(feature = "gtk-ui")]
    #[arg(long)]
    gui: bool,
}

#[cfg(feature = "gtk-ui")]
fn run_gui(cli: &Cli, buffer: &DisplayBuffer) -> Option<Result<()>> {
    if cli.gui {
        Some(window::run(buffer.clone()))
    } else {
        None
    }
}

#[cfg(not(feature = "gtk-ui"))]
fn run_gui(_cli: &Cli, _buffer: &DisplayBuffer) -> Option<Result<()>> {
    None
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Some(ref expr) = cli.expr {
        return Ok(match calculate(expr) {
            Ok(number) => {
                println!("{}", number);
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("{}: {}", cli.error_marker, err);
                ExitCode::FAILURE
            }
        });
    }

    let mut buffer = DisplayBuffer::with_error_marker(cli.error_marker.clone());

    if let Some(result) = run_gui(&cli, &buffer) {
        result?;
        return Ok(ExitCode::SUCCESS);
    }

    terminal::run(io::stdin().lock(), io::stdout().lock(), &mut buffer)?;
    Ok(ExitCode::SUCCESS)
}
