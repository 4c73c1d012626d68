use std::path::PathBuf;

use comfy_table::{Cell, Table};

use crate::dashboard;
use crate::error::Result;
use crate::fmt::{amount, pct};
use crate::sales::{analyze, collect_input_files, SalesAnalysis};
use crate::settings::{load_settings, validate_period};

pub fn run(input: Option<String>, output: Option<String>, period: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(p) = period {
        validate_period(&p)?;
        settings.period = p;
    }
    let input_dir = input.map(PathBuf::from).unwrap_or_else(|| settings.input_dir());
    let output_dir = output.map(PathBuf::from).unwrap_or_else(|| settings.output_dir());

    let files = collect_input_files(&input_dir)?;
    if files.is_empty() {
        println!("No spreadsheet files found in {}", input_dir.display());
    }
    let analysis = analyze(&files, &settings.period)?;
    println!("{} file(s) analyzed", analysis.files_analyzed);

    if !analysis.monthly_sales.is_empty() {
        println!();
        println!("{}", format_monthly(&analysis));
        println!();
    }

    let path = dashboard::write(&analysis, &settings.company_code, &settings.period, &output_dir)?;
    println!("Wrote {}", path.display());
    Ok(())
}

pub fn format_monthly(analysis: &SalesAnalysis) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Month", "Sales", "Growth"]);
    for (month, sales) in &analysis.monthly_sales {
        let growth = analysis
            .growth_rates
            .get(month)
            .map(|g| pct(*g))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(month),
            Cell::new(amount(*sales)),
            Cell::new(growth),
        ]);
    }
    format!("Monthly Sales\n{table}")
}
