//! Stage 3: split each closing balance into a debit/credit pair. The sign
//! rule lives in the prompt; the model's arithmetic is trusted, not
//! recomputed here.

use crate::domain::model::{CleanedAccount, DebitCreditAccount};
use crate::domain::ports::TextCompletion;
use crate::llm::{extract, prompts};
use serde::Serialize;

#[derive(Serialize)]
struct SplitterRow<'a> {
    #[serde(rename = "Account Number")]
    account_number: &'a str,
    #[serde(rename = "Account Name")]
    account_name: &'a str,
    #[serde(rename = "Ending Balance")]
    ending_balance: f64,
}

/// Produces the debit/credit rows. Degrades to an empty list on transport or
/// parse failure; the pipeline carries on with whatever came back.
pub async fn to_debit_credit<C: TextCompletion>(
    completion: &C,
    accounts: &[CleanedAccount],
) -> Vec<DebitCreditAccount> {
    let wire_rows: Vec<SplitterRow> = accounts
        .iter()
        .map(|account| SplitterRow {
            account_number: &account.account_number,
            account_name: &account.account_name,
            ending_balance: account.closing_balance,
        })
        .collect();

    let accounts_json = match serde_json::to_string_pretty(&wire_rows) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("failed to serialize splitter input: {}", e);
            return Vec::new();
        }
    };

    let prompt = prompts::split_debit_credit(&accounts_json);

    let response = match completion.complete(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("❌ debit/credit split call failed: {}", e);
            return Vec::new();
        }
    };

    let Some(candidate) = extract::extract_array(&response) else {
        tracing::warn!("❌ no JSON list in debit/credit split response");
        return Vec::new();
    };

    match serde_json::from_str::<Vec<DebitCreditAccount>>(candidate) {
        Ok(rows) => {
            tracing::info!("✅ split {} accounts into debit/credit pairs", rows.len());
            rows
        }
        Err(e) => {
            tracing::warn!("❌ error decoding debit/credit split response: {}", e);
            Vec::new()
        }
    }
}
