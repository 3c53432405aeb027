mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::allocate::AllocateArgs;
use commands::distribute::DistributeArgs;
use commands::status::StatusArgs;

/// Repayment allocation for flat-interest, guarantor-backed loans
#[derive(Parser)]
#[command(
    name = "lsv",
    version,
    about = "Repayment allocation for flat-interest, guarantor-backed loans",
    long_about = "A CLI for the loan-servicing repayment engine. Splits payments into \
                  interest, guarantor-pledge reimbursement, and principal reduction with \
                  decimal precision, distributes reimbursements proportionally among \
                  guarantors, and reports repayment progress."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate a payment across interest, guarantor reimbursement, and principal
    Allocate(AllocateArgs),
    /// Split a reimbursement amount among active guarantors
    Distribute(DistributeArgs),
    /// Show a loan's repayment progress against its ceilings
    Status(StatusArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Allocate(args) => commands::allocate::run_allocate(args),
        Commands::Distribute(args) => commands::distribute::run_distribute(args),
        Commands::Status(args) => commands::status::run_status(args),
        Commands::Version => {
            println!("lsv {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
