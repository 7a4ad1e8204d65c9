use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;

use salary_cli::settings::Settings;
use salary_cli::utils::parse_decimal;
use salary_cli::{commands, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Greek salary tax calculator.
///
/// Converts between gross and net salary using the income tax table, the
/// solidarity contribution (eisfora) table and the child reduction. Results
/// are printed to stdout as JSON; logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "salary-calc", version, about)]
struct Cli {
    /// TOML settings file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive; overrides the settings file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Break a gross salary down into taxes and net salary.
    Parts {
        /// Gross salary (commas allowed as thousands separators).
        #[arg(long, value_parser = parse_decimal)]
        salary: Decimal,

        /// Insurance contribution deducted before tax.
        #[arg(long, value_parser = parse_decimal, default_value = "0")]
        insurance: Decimal,

        /// Number of dependent children.
        #[arg(long, default_value_t = 0)]
        kids: u32,
    },

    /// Find the gross salary that yields a net salary.
    Gross {
        /// Target net salary.
        #[arg(long, value_parser = parse_decimal)]
        net: Decimal,

        /// Insurance contribution deducted before tax.
        #[arg(long, value_parser = parse_decimal, default_value = "0")]
        insurance: Decimal,

        /// Number of dependent children.
        #[arg(long, default_value_t = 0)]
        kids: u32,

        /// Decimal places of net salary accuracy.
        #[arg(long)]
        precision: Option<u32>,

        /// Maximum number of search steps.
        #[arg(long)]
        max_iterations: Option<u32>,
    },

    /// Break down every row of a CSV file with `salary,insurance,kids` columns.
    Batch {
        /// Path to the CSV file.
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize result")?;
    println!("{json}");
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load_or_default(cli.config.as_deref())
        .context("failed to load settings")?;
    if let Some(level) = cli.log_level {
        settings.logging.level = level;
    }
    logging::init_logging(&settings.logging)?;

    match cli.command {
        Command::Parts {
            salary,
            insurance,
            kids,
        } => print_json(&commands::parts(salary, insurance, kids)),
        Command::Gross {
            net,
            insurance,
            kids,
            precision,
            max_iterations,
        } => {
            let config = settings.search_config_with(precision, max_iterations);
            print_json(&commands::gross(net, insurance, kids, config)?)
        }
        Command::Batch { file } => print_json(&commands::batch(&file)?),
    }
}
