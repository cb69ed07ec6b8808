//! Stage 5 (balance sheet): render the balance sheet from the segregated
//! data plus the net profit carried over from the P&L stage. Whether the two
//! sides actually balance is demanded of the model, never checked here.

use crate::domain::model::{BalanceSheetInput, RenderedStatement};
use crate::domain::ports::TextCompletion;
use crate::llm::prompts;

/// The balance-sheet explanation heading uses the markdown form.
pub const EXPLANATION_MARKER: &str = "### Explanation:";

/// Renders the balance sheet. Same degrade policy as the P&L renderer: a
/// completion failure becomes a formatted error body, not an `Err`.
pub async fn render<C: TextCompletion>(
    completion: &C,
    balance_sheet: &BalanceSheetInput,
    net_profit: f64,
) -> RenderedStatement {
    let financial_data = serde_json::json!({
        "assets": balance_sheet.assets,
        "liabilities": balance_sheet.liabilities,
        "equity": balance_sheet.equity,
        "net_profit": net_profit,
        "total_assets": balance_sheet.totals.assets,
        "total_liabilities": balance_sheet.totals.liabilities,
        "total_equity": balance_sheet.totals.equity,
    });
    let financial_data_json =
        serde_json::to_string_pretty(&financial_data).unwrap_or_else(|_| "{}".to_string());

    tracing::info!("✅ financial data extracted for balance sheet");

    let prompt = prompts::balance_sheet(&financial_data_json);

    match completion.complete(&prompt).await {
        Ok(text) => RenderedStatement::split_on(&text, EXPLANATION_MARKER),
        Err(e) => {
            tracing::warn!("❌ balance sheet rendering call failed: {}", e);
            RenderedStatement {
                body: format!("❌ Error generating balance sheet: {}", e),
                explanation: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BalanceSheetTotals, BalanceType, ClassifiedEntry};
    use crate::utils::error::{PipelineError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingCompletion {
        response: Result<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingCompletion {
        fn ok(response: &str) -> Self {
            Self {
                response: Ok(response.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextCompletion for RecordingCompletion {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(PipelineError::ConfigError {
                    message: "service unavailable".to_string(),
                }),
            }
        }
    }

    fn balance_sheet_input() -> BalanceSheetInput {
        BalanceSheetInput {
            assets: vec![ClassifiedEntry {
                account_number: "1001".to_string(),
                account_name: "Cash".to_string(),
                amount: 5000.0,
                balance_type: BalanceType::Debit,
            }],
            liabilities: vec![],
            equity: vec![],
            totals: BalanceSheetTotals {
                assets: 5000.0,
                liabilities: 0.0,
                equity: 0.0,
            },
        }
    }

    #[tokio::test]
    async fn test_prompt_merges_carried_over_net_profit() {
        let completion = RecordingCompletion::ok("| table |");
        render(&completion, &balance_sheet_input(), 8000.0).await;

        let prompts = completion.prompts.lock().unwrap();
        assert!(prompts[0].contains("\"net_profit\": 8000.0"));
        assert!(prompts[0].contains("\"total_assets\": 5000.0"));
    }

    #[tokio::test]
    async fn test_statement_splits_on_markdown_explanation_heading() {
        let completion =
            RecordingCompletion::ok("| table |\n\n### Explanation: assets equal equity.");
        let statement = render(&completion, &balance_sheet_input(), 8000.0).await;

        assert_eq!(statement.body, "| table |");
        assert_eq!(
            statement.explanation.as_deref(),
            Some("assets equal equity.")
        );
    }

    #[tokio::test]
    async fn test_transport_failure_degrades_to_error_body() {
        let completion = RecordingCompletion {
            response: Err(PipelineError::ConfigError {
                message: "unused".to_string(),
            }),
            prompts: Mutex::new(Vec::new()),
        };
        let statement = render(&completion, &balance_sheet_input(), 8000.0).await;
        assert!(statement.body.contains("Error generating balance sheet"));
    }
}
