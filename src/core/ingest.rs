//! Spreadsheet loading. CSV goes through the `csv` crate, Excel through
//! `calamine`; anything else is rejected up front.

use crate::domain::model::Table;
use crate::utils::error::{PipelineError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::collections::HashMap;
use std::path::Path;

/// Loads the trial-balance file into a [`Table`], dispatching on extension.
pub fn load_table(path: &Path) -> Result<Table> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => load_csv(path),
        "xlsx" | "xls" => load_excel(path),
        other => Err(PipelineError::UnsupportedFile {
            extension: other.to_string(),
        }),
    }
}

fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = HashMap::new();
        for (column, cell) in columns.iter().zip(record.iter()) {
            row.insert(column.clone(), infer_cell(cell));
        }
        rows.push(row);
    }

    tracing::debug!(rows = rows.len(), columns = columns.len(), "loaded CSV file");
    Ok(Table { columns, rows })
}

fn load_excel(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PipelineError::ConfigError {
            message: format!("workbook '{}' has no worksheets", path.display()),
        })??;

    let mut row_iter = range.rows();
    let columns: Vec<String> = row_iter
        .next()
        .map(|header| header.iter().map(cell_to_text).collect())
        .unwrap_or_default();

    let mut rows = Vec::new();
    for cells in row_iter {
        let mut row = HashMap::new();
        for (column, cell) in columns.iter().zip(cells.iter()) {
            row.insert(column.clone(), cell_to_value(cell));
        }
        rows.push(row);
    }

    tracing::debug!(rows = rows.len(), columns = columns.len(), "loaded Excel file");
    Ok(Table { columns, rows })
}

/// CSV cells arrive as text; numeric-looking cells are promoted to numbers
/// so the sample shown to the model matches what a spreadsheet reader sees.
fn infer_cell(cell: &str) -> serde_json::Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return serde_json::Value::Null;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return serde_json::Value::Number(int.into());
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(float) {
            return serde_json::Value::Number(number);
        }
    }
    serde_json::Value::String(trimmed.to_string())
}

fn cell_to_value(cell: &Data) -> serde_json::Value {
    match cell {
        Data::Empty => serde_json::Value::Null,
        Data::String(s) => serde_json::Value::String(s.clone()),
        Data::Int(i) => serde_json::Value::Number((*i).into()),
        Data::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Data::Bool(b) => serde_json::Value::Bool(*b),
        other => serde_json::Value::String(cell_to_text_data(other)),
    }
}

fn cell_to_text(cell: &Data) -> String {
    cell_to_text_data(cell).trim().to_string()
}

fn cell_to_text_data(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
