//! Stage 2: project the three identified columns and have the completion
//! service clean every row. The rows used downstream are exactly what the
//! model returns; no local rule engine reproduces the cleaning.

use crate::domain::model::{CleanedAccount, ColumnMap, Table};
use crate::domain::ports::TextCompletion;
use crate::llm::{extract, prompts};
use crate::utils::error::{PipelineError, Result};

/// Cleans the trial-balance rows through the completion service.
///
/// Hard precondition: all three column names must be present in the
/// `ColumnMap` and exist in the table. A missing mapping is a dependency
/// failure the rest of the pipeline cannot recover from, so this stage
/// raises instead of degrading.
pub async fn clean_rows<C: TextCompletion>(
    completion: &C,
    table: &Table,
    columns: &ColumnMap,
) -> Result<Vec<CleanedAccount>> {
    let account_col = require(&columns.account_number_column, "account_number_column")?;
    let name_col = require(&columns.account_name_column, "account_name_column")?;
    let balance_col = require(&columns.closing_balance_column, "closing_balance_column")?;

    for column in [account_col, name_col, balance_col] {
        if !table.columns.iter().any(|c| c == column) {
            return Err(PipelineError::ConfigError {
                message: format!("column '{}' not found in the input file", column),
            });
        }
    }

    // Project only the three columns, everything cast to text and blanks to
    // empty strings, mirroring what the cleaning prompt describes.
    let projected: Vec<serde_json::Map<String, serde_json::Value>> = table
        .rows
        .iter()
        .map(|row| {
            [account_col, name_col, balance_col]
                .iter()
                .map(|&column| {
                    let text = row.get(column).map(value_to_text).unwrap_or_default();
                    (column.clone(), serde_json::Value::String(text))
                })
                .collect()
        })
        .collect();

    let rows_json = serde_json::to_string_pretty(&projected)?;
    let prompt = prompts::clean_rows(account_col, name_col, balance_col, &rows_json);

    let response = completion.complete(&prompt).await?;

    let candidate =
        extract::extract_array(&response).ok_or_else(|| PipelineError::ResponseExtraction {
            stage: "row normalization",
            expected: "JSON list",
            raw: response.clone(),
        })?;

    let cleaned: Vec<CleanedAccount> =
        serde_json::from_str(candidate).map_err(|_| PipelineError::ResponseExtraction {
            stage: "row normalization",
            expected: "JSON list of cleaned accounts",
            raw: response.clone(),
        })?;

    tracing::info!("✅ cleaned {} trial-balance rows", cleaned.len());
    Ok(cleaned)
}

fn require<'a>(value: &'a Option<String>, field: &str) -> Result<&'a String> {
    value.as_ref().ok_or_else(|| PipelineError::MissingColumn {
        field: field.to_string(),
    })
}

fn value_to_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
