//! Stage 1: ask the completion service which source columns hold the account
//! number, account name and closing balance.

use crate::domain::model::{ColumnMap, Table};
use crate::domain::ports::TextCompletion;
use crate::llm::{extract, prompts};

/// How many rows accompany the header list in the identification prompt.
const SAMPLE_ROWS: usize = 2;

/// Identifies the three relevant columns. Never fails the run: transport and
/// parse failures produce a `ColumnMap` with null fields and an `error`
/// description, with the raw response preserved for diagnostics.
pub async fn identify<C: TextCompletion>(completion: &C, table: &Table) -> ColumnMap {
    let sample = table.sample(SAMPLE_ROWS);
    let sample_json = match serde_json::to_string_pretty(&sample) {
        Ok(json) => json,
        Err(e) => return ColumnMap::failed(e.to_string(), None),
    };

    let prompt = prompts::identify_columns(&sample_json);

    let response = match completion.complete(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("column identification call failed: {}", e);
            return ColumnMap::failed(e.to_string(), None);
        }
    };

    let Some(candidate) = extract::extract_object(&response) else {
        tracing::warn!("no JSON object in column identification response");
        return ColumnMap::failed(
            "No JSON object found in LLM response".to_string(),
            Some(response.clone()),
        );
    };

    match serde_json::from_str::<ColumnMap>(candidate) {
        Ok(map) => {
            tracing::info!("✅ identified columns from input file");
            map
        }
        Err(_) => ColumnMap::failed(
            "Invalid JSON in extracted block".to_string(),
            Some(response.clone()),
        ),
    }
}
