use std::path::{Path, PathBuf};

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::export::write_reports;
use crate::fmt::{amount, pct};
use crate::ratios::{compute_ratios, Ratios};
use crate::settings::{load_settings, validate_period, Settings};
use crate::statements::{build_statements, Node};
use crate::table::normalize;
use crate::taxonomy::MatchPolicy;

pub fn run(
    ledger: Option<String>,
    output: Option<String>,
    period: Option<String>,
    match_policy: Option<String>,
) -> Result<()> {
    let mut settings = load_settings();
    if let Some(p) = period {
        validate_period(&p)?;
        settings.period = p;
    }
    let policy = super::resolve_policy(&settings, match_policy.as_deref())?;
    let ledger_path = match ledger {
        Some(path) => PathBuf::from(path),
        None => {
            let default = settings.trial_balance_path();
            if !default.exists() {
                return Err(crate::error::CloseoutError::Load(format!(
                    "no trial balance for {} at {}; extract one from the ERP or pass --ledger",
                    settings.period,
                    default.display()
                )));
            }
            default
        }
    };
    let output_dir = output
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.output_dir());

    run_pipeline(&settings, &ledger_path, &output_dir, policy)
}

/// The statements pipeline: load, normalize, build, compute, print, export.
/// Also driven by `closeout demo` and `closeout all`.
pub fn run_pipeline(
    settings: &Settings,
    ledger_path: &Path,
    output_dir: &Path,
    policy: MatchPolicy,
) -> Result<()> {
    let table = crate::spreadsheet::read_table(ledger_path)?;
    let ledger = normalize(&table);
    if ledger.is_empty() {
        println!(
            "{} contains no ledger rows; statements will be all zeros.",
            ledger_path.display()
        );
    }

    let statements = build_statements(&ledger, policy);
    let ratios = compute_ratios(&statements);

    println!("{}", format_statement("Balance Sheet", &settings.period, &statements.balance_sheet));
    println!();
    println!("{}", format_statement("Income Statement", &settings.period, &statements.income_statement));
    println!();
    println!("{}", format_ratios(&ratios));
    println!();

    let paths = write_reports(output_dir, &settings.period, &statements, &ratios)?;
    for path in &paths {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Pure formatting functions (statement data → String)
// ---------------------------------------------------------------------------

fn add_statement_rows(table: &mut Table, node: &Node, depth: usize) {
    if let Node::Group(children) = node {
        for (name, child) in children {
            let indent = "  ".repeat(depth);
            match child {
                Node::Leaf(v) => {
                    table.add_row(vec![
                        Cell::new(format!("{indent}{name}")),
                        Cell::new(amount(*v)),
                    ]);
                }
                Node::Group(_) => {
                    table.add_row(vec![
                        Cell::new(format!("{indent}{}", name.as_str().bold())),
                        Cell::new(""),
                    ]);
                    add_statement_rows(table, child, depth + 1);
                    table.add_row(vec![
                        Cell::new(format!("{indent}Total {}", name.to_lowercase())),
                        Cell::new(amount(child.total())),
                    ]);
                }
            }
        }
    }
}

pub fn format_statement(title: &str, period: &str, statement: &Node) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Item", "Amount"]);
    add_statement_rows(&mut table, statement, 0);
    format!("{title} ({period})\n{table}")
}

pub fn format_ratios(ratios: &Ratios) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Ratio", "Percent"]);
    for (name, value) in ratios.rows() {
        table.add_row(vec![Cell::new(name), Cell::new(pct(value))]);
    }
    format!("Financial Ratios\n{table}")
}
