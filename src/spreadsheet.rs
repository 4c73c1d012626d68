//! Spreadsheet ingestion: XLSX/XLS via calamine, CSV via the csv crate,
//! both surfaced as `RawTable`s with the first non-empty row as header.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{CloseoutError, Result};
use crate::table::{Cell, RawTable};

pub fn is_spreadsheet_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase()).as_deref(),
        Some("xlsx") | Some("xls") | Some("xlsm") | Some("csv")
    )
}

/// Read the first sheet of a spreadsheet (or a CSV file) as a table.
/// A missing or unreadable file is a load failure reported to the caller.
pub fn read_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(CloseoutError::Load(format!(
            "{} does not exist",
            path.display()
        )));
    }
    let mut sheets = read_workbook(path)?;
    if sheets.is_empty() {
        return Err(CloseoutError::Load(format!(
            "{} contains no sheets",
            path.display()
        )));
    }
    Ok(sheets.remove(0).1)
}

/// Read every sheet of a workbook as (sheet name, table) pairs. CSV files
/// come back as a single sheet named after the file stem.
pub fn read_workbook(path: &Path) -> Result<Vec<(String, RawTable)>> {
    if !path.exists() {
        return Err(CloseoutError::Load(format!(
            "{} does not exist",
            path.display()
        )));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if ext == "csv" {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sheet")
            .to_string();
        return Ok(vec![(stem, csv_to_table(path)?)]);
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| CloseoutError::Spreadsheet(format!("{}: {e}", path.display())))?;
    let names = workbook.sheet_names().to_owned();
    let mut sheets = Vec::new();
    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| CloseoutError::Spreadsheet(format!("{name}: {e}")))?;
        sheets.push((name, range_to_table(range.rows())));
    }
    Ok(sheets)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            if s.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}

fn range_to_table<'a, I>(rows: I) -> RawTable
where
    I: Iterator<Item = &'a [Data]>,
{
    let mut table = RawTable::default();
    let mut found_header = false;
    for row in rows {
        let cells: Vec<Cell> = row.iter().map(cell_from_data).collect();
        if !found_header {
            if cells.iter().all(|c| c.is_empty()) {
                continue;
            }
            table.columns = cells.iter().map(|c| c.to_text()).collect();
            found_header = true;
            continue;
        }
        table.rows.push(cells);
    }
    table
}

fn csv_to_table(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let mut table = RawTable::default();
    let mut found_header = false;
    for result in rdr.records() {
        let record = result?;
        let cells: Vec<Cell> = record
            .iter()
            .map(|field| {
                let trimmed = field.trim();
                if trimmed.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(trimmed.to_string())
                }
            })
            .collect();
        if !found_header {
            if cells.iter().all(|c| c.is_empty()) {
                continue;
            }
            table.columns = cells.iter().map(|c| c.to_text()).collect();
            found_header = true;
            continue;
        }
        table.rows.push(cells);
    }
    Ok(table)
}
