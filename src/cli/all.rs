use colored::Colorize;

use crate::error::Result;

/// Run both pipelines back to back. They are independent: a failure in one
/// is reported but does not block the other.
pub fn run(ledger: Option<String>, period: Option<String>) -> Result<()> {
    println!("Step 1: sales analysis");
    let sales_ok = report_step(super::sales::run(None, None, period.clone()));

    println!();
    println!("Step 2: financial statements");
    let statements_ok = report_step(super::statements::run(ledger, None, period, None));

    println!();
    println!("Summary:");
    println!("  Sales analysis:       {}", status_label(sales_ok));
    println!("  Financial statements: {}", status_label(statements_ok));
    Ok(())
}

fn report_step(result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Step failed: {e}");
            false
        }
    }
}

fn status_label(ok: bool) -> String {
    if ok {
        "ok".green().to_string()
    } else {
        "failed".red().to_string()
    }
}
