//! TellMe console harness
//!
//! Runs a deployed model locally with the fixed-ranking engine.
//!
//! # Commands
//!
//! - `predict [DATA]`: score one JSON request and print the response
//! - `eval`: publish the evaluation score
//! - `check <FILE>`: compare a predictions.txt file against the model
//! - no command: read one request per line from stdin until EOF

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use host::model::{Model, ModelDirs, TellMeModel};
use host::regression::{check_predictions, load_cases};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "tellme-console")]
#[command(version)]
#[command(about = "Run the TellMe command recommender from the console")]
struct Cli {
    /// Model base directory holding data/ (defaults to the executable's directory)
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Score one JSON request
    Predict {
        /// Request payload; empty means no clicked commands
        #[arg(default_value = "")]
        data: String,
    },
    /// Publish the evaluation score
    Eval,
    /// Compare recorded predictions with the current model
    Check {
        /// Tab-separated file of request and expected response
        #[arg(default_value = "predictions.txt")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let dirs = match cli.base_dir {
        Some(base_dir) => ModelDirs::new(base_dir),
        None => ModelDirs::from_executable().context("Cannot locate executable directory")?,
    };
    let model = TellMeModel::load_local(dirs.clone())
        .with_context(|| format!("Failed to load model from {}", dirs.base_dir.display()))?;

    match cli.command {
        Some(Command::Predict { data }) => println!("{}", model.predict(&data)?),
        Some(Command::Eval) => {
            let score = model.eval()?;
            println!("-----------Result-----------");
            println!("precision: {}", score.precision);
            println!("recall: {}", score.recall);
            println!("----------------------------");
        }
        Some(Command::Check { file }) => {
            let cases = load_cases(&file)?;
            let report = check_predictions(&model, &cases);
            for failure in &report.failures {
                println!("line {}: {}", failure.line, failure.reason);
            }
            println!("{}/{} cases passed", report.passed(), report.total);
            if !report.is_success() {
                bail!("{} prediction cases failed", report.failures.len());
            }
        }
        None => interactive(&model)?,
    }

    Ok(())
}

fn interactive(model: &dyn Model) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        writeln!(stdout, "Enter the input for the prediction:")?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        match model.predict(&line?) {
            Ok(output) => writeln!(stdout, "{}", output)?,
            Err(e) => error!(error = %e, "Prediction failed"),
        }
    }
}
