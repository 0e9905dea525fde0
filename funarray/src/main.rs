//! Command-line front end for the array combinators.
//!
//! Each `call` takes an operation name and a JSON argument tuple, runs it
//! under the limits from `funarray.toml`, and prints the JSON result.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use funarray::call::{LimitExceeded, invoke};
use funarray::contract::{Operation, signature_label};
use funarray::exit_codes;
use funarray::io::config::{DEFAULT_CONFIG_FILE, FunArrayConfig, load_config, write_config};
use funarray::logging;
use serde::Serialize;
use serde_json::Value;

#[derive(Parser)]
#[command(
    name = "funarray",
    version,
    about = "Immutable array combinators over JSON values"
)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one operation and print its result as JSON.
    Call {
        /// Operation name, e.g. `permute` or `takeWhilePrefix`.
        op: String,
        /// One JSON value per argument.
        #[arg(conflicts_with = "args", allow_hyphen_values = true)]
        values: Vec<String>,
        /// The whole argument tuple as a single JSON array.
        #[arg(long)]
        args: Option<String>,
    },
    /// List operations with their argument shapes.
    Ops {
        /// Print each operation's argument schema instead.
        #[arg(long)]
        schema: bool,
    },
    /// Print the effective config, or write it to the config path.
    Config {
        /// Write the effective config (defaults for missing fields).
        #[arg(long)]
        write: bool,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        let code = if err.downcast_ref::<LimitExceeded>().is_some() {
            exit_codes::LIMIT
        } else {
            exit_codes::INVALID
        };
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Call { op, values, args } => cmd_call(&cli.config, &op, &values, args),
        Command::Ops { schema } => cmd_ops(schema),
        Command::Config { write } => cmd_config(&cli.config, write),
    }
}

fn cmd_call(config: &Path, op: &str, values: &[String], args: Option<String>) -> Result<()> {
    let cfg = load_config(config)?;
    let Some(operation) = Operation::from_name(op) else {
        bail!("unknown operation '{op}' (see `funarray ops`)");
    };
    let tuple = match args {
        Some(raw) => match serde_json::from_str::<Value>(&raw).context("parse --args")? {
            Value::Array(items) => items,
            other => bail!("--args must be a JSON array, got {other}"),
        },
        None => values
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                serde_json::from_str(raw).with_context(|| format!("parse argument {}", i + 1))
            })
            .collect::<Result<Vec<Value>>>()?,
    };
    let result = invoke(operation, &tuple, &cfg.limits)?;
    print_json(&result, cfg.output.pretty)
}

fn cmd_ops(schema: bool) -> Result<()> {
    for op in Operation::ALL {
        if schema {
            println!(
                "{}",
                serde_json::to_string(&op.schema()).context("serialize schema")?
            );
        } else {
            println!("{}({})", op.name(), signature_label(*op));
        }
    }
    Ok(())
}

fn cmd_config(config: &Path, write: bool) -> Result<()> {
    let cfg: FunArrayConfig = load_config(config)?;
    if write {
        write_config(config, &cfg)?;
        println!("{}", config.display());
        return Ok(());
    }
    print!(
        "{}",
        toml::to_string_pretty(&cfg).context("serialize config toml")?
    );
    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("serialize result")?;
    println!("{payload}");
    Ok(())
}
