//! Stage 4: bucket the debit/credit rows into the five fundamental
//! accounting categories. The splitter output is dumped to the artifact sink
//! first as a diagnostic trail; nothing downstream reads it back.

use crate::domain::model::{ClassificationResult, DebitCreditAccount};
use crate::domain::ports::{ArtifactSink, TextCompletion};
use crate::llm::{extract, prompts};

/// Fixed name of the pre-classification dump, overwritten on every run.
pub const TRIAL_BALANCE_ARTIFACT: &str = "trial_balance.json";

/// Classifies the trial balance. Degrades to an empty result on transport or
/// parse failure — the pipeline proceeds with empty categories and zero
/// totals rather than aborting.
pub async fn classify<C: TextCompletion, A: ArtifactSink>(
    completion: &C,
    artifacts: &A,
    accounts: &[DebitCreditAccount],
) -> ClassificationResult {
    let trial_balance_json = match serde_json::to_string_pretty(accounts) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("failed to serialize classifier input: {}", e);
            return ClassificationResult::default();
        }
    };

    // Diagnostic side effect only; a sink failure is logged, never fatal.
    match artifacts
        .write_artifact(TRIAL_BALANCE_ARTIFACT, trial_balance_json.as_bytes())
        .await
    {
        Ok(()) => tracing::info!("✅ trial balance data saved to {}", TRIAL_BALANCE_ARTIFACT),
        Err(e) => tracing::warn!("could not write {}: {}", TRIAL_BALANCE_ARTIFACT, e),
    }

    let prompt = prompts::classify(&trial_balance_json);

    let response = match completion.complete(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("❌ classification call failed: {}", e);
            return ClassificationResult::default();
        }
    };

    let Some(candidate) = extract::extract_object(&response) else {
        tracing::warn!("❌ no JSON object in classification response");
        return ClassificationResult::default();
    };

    match serde_json::from_str::<ClassificationResult>(candidate) {
        Ok(result) => {
            tracing::info!("✅ successfully parsed classification response");
            result
        }
        Err(e) => {
            tracing::warn!("❌ error decoding classification JSON: {}", e);
            ClassificationResult::default()
        }
    }
}
