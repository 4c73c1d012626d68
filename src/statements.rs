//! Statement builder: classifies normalized ledger rows into the line-item
//! taxonomy and assembles the balance sheet and income statement.

use crate::table::Ledger;
use crate::taxonomy::{LineItem, MatchPolicy, Sign, TaxonomyNode, BALANCE_SHEET, INCOME_STATEMENT, TAX_EXPENSE};

/// A statement node: an amount, or a named group of further nodes.
/// Groups keep insertion order (accounting order, not alphabetical).
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(f64),
    Group(Vec<(String, Node)>),
}

impl Node {
    /// Recursive sum of every leaf under this node.
    pub fn total(&self) -> f64 {
        match self {
            Node::Leaf(v) => *v,
            Node::Group(children) => children.iter().map(|(_, c)| c.total()).sum(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        match self {
            Node::Leaf(_) => None,
            Node::Group(children) => children
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, c)| c),
        }
    }

    pub fn get_path(&self, path: &[&str]) -> Option<&Node> {
        let mut node = self;
        for name in path {
            node = node.get(name)?;
        }
        Some(node)
    }

    /// Leaf amount at `path`, or 0 when the path is absent or a group.
    pub fn amount_at(&self, path: &[&str]) -> f64 {
        match self.get_path(path) {
            Some(Node::Leaf(v)) => *v,
            _ => 0.0,
        }
    }

    /// Total of the node at `path`, or 0 when absent.
    pub fn total_at(&self, path: &[&str]) -> f64 {
        self.get_path(path).map_or(0.0, Node::total)
    }

    /// Flatten into (dot-joined path, amount) rows, depth-first in
    /// statement order.
    pub fn flatten(&self) -> Vec<(String, f64)> {
        let mut rows = Vec::new();
        self.flatten_into(None, &mut rows);
        rows
    }

    fn flatten_into(&self, prefix: Option<&str>, rows: &mut Vec<(String, f64)>) {
        match self {
            Node::Leaf(v) => {
                rows.push((prefix.unwrap_or_default().to_string(), *v));
            }
            Node::Group(children) => {
                for (name, child) in children {
                    let path = match prefix {
                        Some(p) => format!("{p}.{name}"),
                        None => name.clone(),
                    };
                    child.flatten_into(Some(&path), rows);
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatementSet {
    pub balance_sheet: Node,
    pub income_statement: Node,
}

/// Sum of balances of all rows whose account name contains `keyword`.
fn keyword_total(ledger: &Ledger, keyword: &str) -> f64 {
    ledger
        .rows
        .iter()
        .filter(|row| row.account_name.to_lowercase().contains(keyword))
        .map(|row| row.balance())
        .sum()
}

/// Matched balance for one line item under the given policy.
///
/// `SumPerKeyword` sums once per keyword, so a row whose name contains two
/// keywords of the same item is counted twice; inherited behavior, pinned
/// by tests. `FirstMatchWins` counts each row at most once per item.
pub fn line_item_amount(ledger: &Ledger, item: &LineItem, policy: MatchPolicy) -> f64 {
    let raw = match policy {
        MatchPolicy::SumPerKeyword => item
            .keywords
            .iter()
            .map(|kw| keyword_total(ledger, kw))
            .sum(),
        MatchPolicy::FirstMatchWins => ledger
            .rows
            .iter()
            .filter(|row| {
                let name = row.account_name.to_lowercase();
                item.keywords.iter().any(|kw| name.contains(kw))
            })
            .map(|row| row.balance())
            .sum(),
    };
    match item.sign {
        Sign::Natural => raw,
        Sign::Absolute => raw.abs(),
    }
}

fn build_group(nodes: &[TaxonomyNode], ledger: &Ledger, policy: MatchPolicy) -> Node {
    let children = nodes
        .iter()
        .map(|node| match node {
            TaxonomyNode::Branch(name, inner) => {
                (name.to_string(), build_group(inner, ledger, policy))
            }
            TaxonomyNode::Item(item) => (
                item.name.to_string(),
                Node::Leaf(line_item_amount(ledger, item, policy)),
            ),
        })
        .collect();
    Node::Group(children)
}

/// Assemble both statements from a normalized ledger. Pure: same ledger and
/// policy always yield the same structures.
pub fn build_statements(ledger: &Ledger, policy: MatchPolicy) -> StatementSet {
    let balance_sheet = build_group(BALANCE_SHEET, ledger, policy);

    let base = build_group(INCOME_STATEMENT, ledger, policy);

    let sales = base.amount_at(&["Revenue", "Sales"]);
    let other_income = base.amount_at(&["Revenue", "Other income"]);
    let cogs = base.amount_at(&["Expenses", "Cost of goods sold"]);
    let selling_admin = base.total_at(&["Expenses", "Selling & admin"]);
    let financial = base.amount_at(&["Expenses", "Financial expenses"]);

    let gross_profit = sales - cogs;
    let operating_income = gross_profit - selling_admin;
    let pre_tax_income = operating_income + other_income - financial;
    let tax_expense = line_item_amount(ledger, &TAX_EXPENSE, policy);
    let net_income = pre_tax_income - tax_expense;

    let mut children = match base {
        Node::Group(children) => children,
        Node::Leaf(_) => Vec::new(),
    };
    children.push(("Gross profit".to_string(), Node::Leaf(gross_profit)));
    children.push(("Operating income".to_string(), Node::Leaf(operating_income)));
    children.push(("Pre-tax income".to_string(), Node::Leaf(pre_tax_income)));
    children.push(("Tax expense".to_string(), Node::Leaf(tax_expense)));
    children.push(("Net income".to_string(), Node::Leaf(net_income)));

    StatementSet {
        balance_sheet,
        income_statement: Node::Group(children),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::LedgerRow;

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

    #[test]
    fn test_basic_classification_scenario() {
        let l = ledger(&[
            ("Cash", 1000.0, 0.0),
            ("Accounts Payable", 0.0, 400.0),
            ("Sales Revenue", 0.0, 2000.0),
            ("COGS", 1200.0, 0.0),
        ]);
        let st = build_statements(&l, MatchPolicy::SumPerKeyword);

        let bs = &st.balance_sheet;
        assert_eq!(
            bs.amount_at(&["Assets", "Current assets", "Cash and cash equivalents"]),
            1000.0
        );
        // Credit-heavy items keep the natural sign: debit - credit.
        assert_eq!(
            bs.amount_at(&["Liabilities", "Current liabilities", "Trade payables"]),
            -400.0
        );

        let is = &st.income_statement;
        assert_eq!(is.amount_at(&["Revenue", "Sales"]), 2000.0);
        assert_eq!(is.amount_at(&["Expenses", "Cost of goods sold"]), 1200.0);
        assert_eq!(is.amount_at(&["Gross profit"]), 800.0);
        assert_eq!(is.amount_at(&["Operating income"]), 800.0);
        assert_eq!(is.amount_at(&["Net income"]), 800.0);
    }

    #[test]
    fn test_empty_ledger_yields_all_zeros() {
        let st = build_statements(&Ledger::default(), MatchPolicy::SumPerKeyword);
        for (_, v) in st.balance_sheet.flatten() {
            assert_eq!(v, 0.0);
        }
        for (_, v) in st.income_statement.flatten() {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn test_unmatched_rows_are_silently_ignored() {
        let l = ledger(&[("Suspense clearing 999", 77.0, 0.0)]);
        let st = build_statements(&l, MatchPolicy::SumPerKeyword);
        assert_eq!(st.balance_sheet.total(), 0.0);
    }

    #[test]
    fn test_duplicate_account_names_are_summed() {
        let l = ledger(&[("Cash", 100.0, 0.0), ("Cash", 200.0, 50.0)]);
        let st = build_statements(&l, MatchPolicy::SumPerKeyword);
        assert_eq!(
            st.balance_sheet
                .amount_at(&["Assets", "Current assets", "Cash and cash equivalents"]),
            250.0
        );
    }

    #[test]
    fn test_sum_per_keyword_double_counts_overlapping_keywords() {
        // "Cash and Bank Deposit" contains both the "cash" and "deposit"
        // keywords of the same line item, so the default policy counts the
        // row twice. Known inherited behavior.
        let l = ledger(&[("Cash and Bank Deposit", 500.0, 0.0)]);
        let st = build_statements(&l, MatchPolicy::SumPerKeyword);
        assert_eq!(
            st.balance_sheet
                .amount_at(&["Assets", "Current assets", "Cash and cash equivalents"]),
            1000.0
        );
    }

    #[test]
    fn test_first_match_wins_counts_each_row_once() {
        let l = ledger(&[("Cash and Bank Deposit", 500.0, 0.0)]);
        let st = build_statements(&l, MatchPolicy::FirstMatchWins);
        assert_eq!(
            st.balance_sheet
                .amount_at(&["Assets", "Current assets", "Cash and cash equivalents"]),
            500.0
        );
    }

    #[test]
    fn test_builder_is_pure() {
        let l = ledger(&[
            ("Cash", 1000.0, 0.0),
            ("Sales Revenue", 0.0, 2000.0),
            ("Salaries expense", 300.0, 0.0),
        ]);
        let a = build_statements(&l, MatchPolicy::SumPerKeyword);
        let b = build_statements(&l, MatchPolicy::SumPerKeyword);
        assert_eq!(a, b);
    }

    #[test]
    fn test_gross_profit_plus_cogs_equals_sales() {
        let l = ledger(&[
            ("Sales Revenue", 0.0, 5000.0),
            ("COGS", 3100.0, 0.0),
            ("Rent expense", 400.0, 0.0),
        ]);
        let st = build_statements(&l, MatchPolicy::SumPerKeyword);
        let is = &st.income_statement;
        let sales = is.amount_at(&["Revenue", "Sales"]);
        let cogs = is.amount_at(&["Expenses", "Cost of goods sold"]);
        assert_eq!(is.amount_at(&["Gross profit"]) + cogs, sales);
    }

    #[test]
    fn test_income_statement_subtotal_chain() {
        let l = ledger(&[
            ("Sales Revenue", 0.0, 10000.0),
            ("COGS", 6000.0, 0.0),
            ("Salaries expense", 1500.0, 0.0),
            ("Rent expense", 500.0, 0.0),
            ("Interest income", 0.0, 200.0),
            ("Interest expense", 300.0, 0.0),
            ("Income tax expense", 400.0, 0.0),
        ]);
        let st = build_statements(&l, MatchPolicy::SumPerKeyword);
        let is = &st.income_statement;

        assert_eq!(is.amount_at(&["Gross profit"]), 4000.0);
        // SG&A = 1500 + 500
        assert_eq!(is.amount_at(&["Operating income"]), 2000.0);
        // Other income is stored as an absolute value: 200.
        assert_eq!(is.amount_at(&["Pre-tax income"]), 2000.0 + 200.0 - 300.0);
        assert_eq!(is.amount_at(&["Tax expense"]), 400.0);
        assert_eq!(is.amount_at(&["Net income"]), 1500.0);
    }

    #[test]
    fn test_revenue_sign_is_absolute() {
        let l = ledger(&[("Sales Revenue", 0.0, 2000.0)]);
        let st = build_statements(&l, MatchPolicy::SumPerKeyword);
        assert_eq!(
            st.income_statement.amount_at(&["Revenue", "Sales"]),
            2000.0
        );
    }

    #[test]
    fn test_flatten_produces_dot_joined_paths() {
        let l = ledger(&[("Cash", 100.0, 0.0)]);
        let st = build_statements(&l, MatchPolicy::SumPerKeyword);
        let rows = st.balance_sheet.flatten();
        assert!(rows
            .iter()
            .any(|(path, v)| path == "Assets.Current assets.Cash and cash equivalents"
                && *v == 100.0));
        // Statement order is preserved: assets before liabilities.
        let first = &rows[0].0;
        assert!(first.starts_with("Assets."), "got {first}");
    }

    #[test]
    fn test_missing_path_reads_as_zero() {
        let st = build_statements(&Ledger::default(), MatchPolicy::SumPerKeyword);
        assert_eq!(st.balance_sheet.amount_at(&["No such", "path"]), 0.0);
        assert_eq!(st.balance_sheet.total_at(&["No such"]), 0.0);
    }
}
