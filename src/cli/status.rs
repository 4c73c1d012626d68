use colored::Colorize;

use crate::error::Result;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();

    println!("Company code:  {}", settings.company_code);
    println!("Period:        {}", settings.period);
    println!("Match policy:  {}", settings.match_policy.name());
    println!("Data dir:      {}", settings.data_dir);
    println!();

    for (label, dir) in [
        ("input", settings.input_dir()),
        ("output", settings.output_dir()),
        ("temp", settings.temp_dir()),
    ] {
        let mark = if dir.exists() {
            "ok".green()
        } else {
            "missing".red()
        };
        println!("  {label:<7} {} [{mark}]", dir.display());
    }

    let tb = settings.trial_balance_path();
    println!();
    if tb.exists() {
        println!("Trial balance for {} is ready: {}", settings.period, tb.display());
    } else {
        println!(
            "No trial balance for {} yet. Extract one from the ERP or pass --ledger.",
            settings.period
        );
    }
    Ok(())
}
