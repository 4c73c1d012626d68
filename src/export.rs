//! Tabular export of the derived statements and ratios.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::ratios::Ratios;
use crate::statements::{Node, StatementSet};

fn write_rows(path: &Path, header: [&str; 2], rows: &[(String, f64)]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header)?;
    for (name, value) in rows {
        let formatted = format!("{value:.2}");
        writer.write_record([name.as_str(), formatted.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_statement(path: &Path, statement: &Node) -> Result<()> {
    write_rows(path, ["Item", "Amount"], &statement.flatten())
}

/// Write balance sheet, income statement and ratios as one CSV per report.
/// Returns the written paths in order.
pub fn write_reports(
    output_dir: &Path,
    period: &str,
    statements: &StatementSet,
    ratios: &Ratios,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    let bs_path = output_dir.join(format!("balance_sheet_{period}.csv"));
    write_statement(&bs_path, &statements.balance_sheet)?;

    let is_path = output_dir.join(format!("income_statement_{period}.csv"));
    write_statement(&is_path, &statements.income_statement)?;

    let ratio_path = output_dir.join(format!("ratios_{period}.csv"));
    let ratio_rows: Vec<(String, f64)> = ratios
        .rows()
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();
    write_rows(&ratio_path, ["Ratio", "Percent"], &ratio_rows)?;

    Ok(vec![bs_path, is_path, ratio_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratios::compute_ratios;
    use crate::statements::build_statements;
    use crate::table::{Ledger, LedgerRow};
    use crate::taxonomy::MatchPolicy;

    fn sample_statements() -> StatementSet {
        let ledger = Ledger {
            rows: vec![
                LedgerRow {
                    account_name: "Cash".to_string(),
                    debit: 1000.0,
                    credit: 0.0,
                },
                LedgerRow {
                    account_name: "Sales Revenue".to_string(),
                    debit: 0.0,
                    credit: 2000.0,
                },
            ],
        };
        build_statements(&ledger, MatchPolicy::SumPerKeyword)
    }

    #[test]
    fn test_write_reports_creates_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let statements = sample_statements();
        let ratios = compute_ratios(&statements);
        let paths = write_reports(dir.path(), "2025.06", &statements, &ratios).unwrap();
        assert_eq!(paths.len(), 3);
        for path in &paths {
            assert!(path.exists(), "missing {}", path.display());
        }
        assert!(paths[0].ends_with("balance_sheet_2025.06.csv"));
    }

    #[test]
    fn test_statement_csv_contains_flattened_paths() {
        let dir = tempfile::tempdir().unwrap();
        let statements = sample_statements();
        let ratios = compute_ratios(&statements);
        write_reports(dir.path(), "2025.06", &statements, &ratios).unwrap();

        let content =
            std::fs::read_to_string(dir.path().join("balance_sheet_2025.06.csv")).unwrap();
        assert!(content.starts_with("Item,Amount\n"));
        assert!(content.contains("Assets.Current assets.Cash and cash equivalents,1000.00"));
    }

    #[test]
    fn test_ratio_csv_has_all_five_ratios() {
        let dir = tempfile::tempdir().unwrap();
        let statements = sample_statements();
        let ratios = compute_ratios(&statements);
        write_reports(dir.path(), "2025.06", &statements, &ratios).unwrap();

        let content = std::fs::read_to_string(dir.path().join("ratios_2025.06.csv")).unwrap();
        for name in [
            "Current ratio",
            "Debt ratio",
            "Operating margin",
            "Net margin",
            "Return on equity",
        ] {
            assert!(content.contains(name), "missing {name}");
        }
    }
}
