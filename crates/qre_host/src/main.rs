mod format;
mod report;
mod table;

use anyhow::Result;
use clap::{Parser, Subcommand};
use qre_core::params::CodeType;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full resource report for one modulus size.
    Estimate {
        #[arg(long, default_value_t = 2048)]
        n: u64,
        #[arg(long, default_value = "3dcolor")]
        code: String,
        #[arg(long, default_value_t = 1.0)]
        bias: f64,
    },
    /// LaTeX table for the article supplemental material.
    Table {
        #[arg(long, default_value = "3dcolor")]
        code: String,
        #[arg(long)]
        controlled: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Estimate { n, code, bias } => {
            let code: CodeType = code.parse()?;
            report::run_estimate(code, n, bias)?;
        }
        Commands::Table { code, controlled } => {
            let code: CodeType = code.parse()?;
            table::run_table(code, !controlled)?;
        }
    }
    Ok(())
}
