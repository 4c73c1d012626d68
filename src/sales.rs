//! Sales trend analysis over a folder of monthly spreadsheet exports.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::spreadsheet::{is_spreadsheet_file, read_workbook};
use crate::table::RawTable;

// Column-name fragments that mark a sales figure column.
const SALES_COLUMN_KEYWORDS: &[&str] = &["매출", "sales"];

#[derive(Debug, Clone, Default)]
pub struct SalesAnalysis {
    /// "YYYY.MM" -> total sales for that month.
    pub monthly_sales: BTreeMap<String, f64>,
    /// "YYYY.MM" -> growth vs the previous month, percent. The first month
    /// has no entry; a non-positive previous month reports 0.
    pub growth_rates: BTreeMap<String, f64>,
    /// "YYYY Qn" -> total sales for that quarter.
    pub quarterly: BTreeMap<String, f64>,
    /// "MM" -> average sales for that calendar month across years.
    pub seasonality: BTreeMap<String, f64>,
    pub files_analyzed: usize,
}

fn file_checksum(path: &Path) -> Result<String> {
    let data = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

/// Collect spreadsheet files from the input folder, skipping files with
/// identical content (re-saved ERP exports under a new name are common).
pub fn collect_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if !dir.exists() {
        return Ok(files);
    }
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_spreadsheet_file(&path) {
            files.push(path);
        }
    }
    files.sort();

    let mut seen = Vec::new();
    let mut unique = Vec::new();
    for path in files {
        let checksum = file_checksum(&path)?;
        if seen.contains(&checksum) {
            continue;
        }
        seen.push(checksum);
        unique.push(path);
    }
    Ok(unique)
}

/// Extract "YYYY.MM" from a filename. Handles 2025.05 / 2025-05 / 2025_05,
/// 202505, and the swapped 05.2025 form; anything else falls back to the
/// configured period.
pub fn month_from_filename(filename: &str, fallback: &str) -> String {
    let patterns = [
        r"(\d{4})[._-](\d{2})",
        r"(\d{4})(\d{2})",
        r"(\d{2})[._-](\d{4})",
    ];
    for (i, pattern) in patterns.iter().enumerate() {
        let re = Regex::new(pattern).unwrap();
        if let Some(caps) = re.captures(filename) {
            let (year, month) = if i == 2 {
                (caps[2].to_string(), caps[1].to_string())
            } else {
                (caps[1].to_string(), caps[2].to_string())
            };
            return format!("{year}.{month}");
        }
    }
    fallback.to_string()
}

/// Sum every column whose header marks it as a sales figure.
fn sheet_sales_total(table: &RawTable) -> f64 {
    let sales_cols: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .filter(|(_, name)| {
            let lower = name.to_lowercase();
            SALES_COLUMN_KEYWORDS.iter().any(|kw| lower.contains(kw))
        })
        .map(|(i, _)| i)
        .collect();

    table
        .rows
        .iter()
        .flat_map(|row| sales_cols.iter().map(move |&i| row.get(i)))
        .flatten()
        .map(|cell| cell.to_number())
        .sum()
}

/// Read every collected workbook and derive the trend series.
pub fn analyze(files: &[PathBuf], fallback_period: &str) -> Result<SalesAnalysis> {
    let mut monthly_sales: BTreeMap<String, f64> = BTreeMap::new();
    let mut files_analyzed = 0usize;

    for path in files {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let month = month_from_filename(filename, fallback_period);
        match read_workbook(path) {
            Ok(sheets) => {
                for (_, table) in &sheets {
                    *monthly_sales.entry(month.clone()).or_default() +=
                        sheet_sales_total(table);
                }
                files_analyzed += 1;
            }
            Err(e) => {
                eprintln!("Skipping {filename}: {e}");
            }
        }
    }

    Ok(SalesAnalysis {
        growth_rates: growth_rates(&monthly_sales),
        quarterly: quarterly_totals(&monthly_sales),
        seasonality: seasonality(&monthly_sales),
        monthly_sales,
        files_analyzed,
    })
}

fn growth_rates(monthly: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    let mut rates = BTreeMap::new();
    let mut prev: Option<f64> = None;
    for (month, &sales) in monthly {
        if let Some(prev_sales) = prev {
            let rate = if prev_sales > 0.0 {
                (sales - prev_sales) / prev_sales * 100.0
            } else {
                0.0
            };
            rates.insert(month.clone(), rate);
        }
        prev = Some(sales);
    }
    rates
}

fn quarterly_totals(monthly: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    let mut quarters = BTreeMap::new();
    for (month, &sales) in monthly {
        let Some((year, mm)) = month.split_once('.') else {
            continue;
        };
        let Ok(m) = mm.parse::<u32>() else { continue };
        if !(1..=12).contains(&m) {
            continue;
        }
        let q = (m - 1) / 3 + 1;
        *quarters.entry(format!("{year} Q{q}")).or_default() += sales;
    }
    quarters
}

fn seasonality(monthly: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for (month, &sales) in monthly {
        let Some((_, mm)) = month.split_once('.') else {
            continue;
        };
        let entry = sums.entry(mm.to_string()).or_insert((0.0, 0));
        entry.0 += sales;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(mm, (total, count))| (mm, total / count as f64))
        .collect()
}
