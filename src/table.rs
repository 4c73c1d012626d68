//! Raw tabular data and the trial-balance normalizer.

/// One cell of a raw table, as read from a spreadsheet or CSV export.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Numeric coercion; anything that does not parse becomes 0.
    pub fn to_number(&self) -> f64 {
        match self {
            Cell::Empty => 0.0,
            Cell::Number(v) => *v,
            Cell::Text(s) => parse_amount(s),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(v) => {
                if *v == v.floor() && v.abs() < 1e15 {
                    format!("{}", *v as i64)
                } else {
                    format!("{v}")
                }
            }
        }
    }
}

/// A grid with named columns. Column names come from the first non-empty row
/// of the source sheet; data rows follow in source order.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// One normalized trial-balance line. Account names are not unique; rows for
/// the same account are summed during classification.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub account_name: String,
    pub debit: f64,
    pub credit: f64,
}

impl LedgerRow {
    pub fn balance(&self) -> f64 {
        self.debit - self.credit
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub rows: Vec<LedgerRow>,
}

impl Ledger {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// Column-name fragments used to locate the account / debit / credit columns.
// ERP exports mix Korean and English headers depending on logon language.
const ACCOUNT_COLUMN_KEYWORDS: &[&str] = &["계정", "과목", "account", "item"];
const DEBIT_COLUMN_KEYWORDS: &[&str] = &["차변", "debit", "dr"];
const CREDIT_COLUMN_KEYWORDS: &[&str] = &["대변", "credit", "cr"];

pub fn parse_amount(raw: &str) -> f64 {
    let s = raw
        .replace(',', "")
        .replace('"', "")
        .replace('$', "")
        .replace('₩', "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return -inner.trim().parse::<f64>().unwrap_or(0.0);
    }
    s.parse().unwrap_or(0.0)
}

fn find_column(columns: &[String], keywords: &[&str]) -> Option<usize> {
    columns.iter().position(|name| {
        let lower = name.to_lowercase();
        keywords.iter().any(|kw| lower.contains(kw))
    })
}

/// Normalize a raw trial-balance export into a `Ledger`.
///
/// Fully-empty rows and columns are dropped, the account/debit/credit columns
/// are located by fuzzy header match, and amounts are coerced to numbers
/// (unparseable cells become 0). Never fails: a missing account column means
/// every row gets an empty account name and classification later matches
/// nothing; missing debit/credit columns yield zeros.
pub fn normalize(table: &RawTable) -> Ledger {
    // Drop columns where header and every cell are empty.
    let keep: Vec<usize> = (0..table.columns.len())
        .filter(|&i| {
            !table.columns[i].trim().is_empty()
                || table
                    .rows
                    .iter()
                    .any(|row| row.get(i).map_or(false, |c| !c.is_empty()))
        })
        .collect();
    let columns: Vec<String> = keep.iter().map(|&i| table.columns[i].clone()).collect();

    let account_idx = find_column(&columns, ACCOUNT_COLUMN_KEYWORDS);
    let debit_idx = find_column(&columns, DEBIT_COLUMN_KEYWORDS);
    let credit_idx = find_column(&columns, CREDIT_COLUMN_KEYWORDS);

    let mut rows = Vec::new();
    for row in &table.rows {
        let cells: Vec<&Cell> = keep
            .iter()
            .map(|&i| row.get(i).unwrap_or(&Cell::Empty))
            .collect();
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        let account_name = account_idx
            .and_then(|i| cells.get(i))
            .map(|c| c.to_text())
            .unwrap_or_default();
        let debit = debit_idx
            .and_then(|i| cells.get(i))
            .map(|c| c.to_number())
            .unwrap_or(0.0);
        let credit = credit_idx
            .and_then(|i| cells.get(i))
            .map(|c| c.to_number())
            .unwrap_or(0.0);
        rows.push(LedgerRow {
            account_name,
            debit,
            credit,
        });
    }

    Ledger { rows }
}
