mod cli;
mod dashboard;
mod error;
mod export;
mod fmt;
mod ratios;
mod sales;
mod settings;
mod spreadsheet;
mod statements;
mod table;
mod taxonomy;
mod terminal;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init {
            company_code,
            period,
            data_dir,
        } => cli::init::run(company_code, period, data_dir),
        Commands::Statements {
            ledger,
            output,
            period,
            match_policy,
        } => cli::statements::run(ledger, output, period, match_policy),
        Commands::Sales {
            input,
            output,
            period,
        } => cli::sales::run(input, output, period),
        Commands::All { ledger, period } => cli::all::run(ledger, period),
        Commands::Demo { dir } => cli::demo::run(dir),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
