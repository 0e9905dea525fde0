mod case;
mod cli;
mod config;
mod judge;
mod outcome;
mod report;
mod results;
mod run;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "conformance",
    version,
    about = "Table-driven conformance cases for funarray"
)]
struct Cli {
    /// Directory holding `*.toml` case files.
    #[arg(long, global = true, default_value = "conformance/cases")]
    cases: PathBuf,
    /// Directory for `<case_id>.json` records.
    #[arg(long, global = true, default_value = "conformance/results")]
    results: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    List,
    Run { case_id: Option<String> },
    Report,
    Clean { case_id: Option<String> },
}

fn main() -> Result<()> {
    funarray::logging::init();
    let cli = Cli::parse();
    match cli.command {
        Command::List => cli::list_cases(&cli.cases),
        Command::Run { case_id } => cli::run_cases(&cli.cases, &cli.results, case_id.as_deref()),
        Command::Report => cli::report(&cli.results),
        Command::Clean { case_id } => cli::clean(&cli.results, case_id.as_deref()),
    }
}
