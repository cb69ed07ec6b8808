//! Stage 5 (P&L): render the Profit & Loss statement. Net profit is the one
//! value computed locally; it is embedded literally in the prompt so the
//! rendered figure cannot drift from the local arithmetic.

use crate::domain::model::{PnlInput, RenderedStatement};
use crate::domain::ports::TextCompletion;
use crate::llm::prompts;

/// Marker separating the statement table from the model's commentary.
pub const EXPLANATION_MARKER: &str = "Explanation:";

/// Renders the P&L statement and returns it with the locally computed net
/// profit. A completion failure degrades to a formatted error body; the net
/// profit is still returned for the balance-sheet stage.
pub async fn render<C: TextCompletion>(
    completion: &C,
    pnl: &PnlInput,
) -> (RenderedStatement, f64) {
    let net_profit = pnl.net_profit();

    let financial_data = serde_json::json!({
        "expenses": pnl.expenses,
        "revenue": pnl.revenue,
        "total_expenses": pnl.totals.expenses,
        "total_revenue": pnl.totals.revenue,
        "net_profit": net_profit,
    });
    let financial_data_json =
        serde_json::to_string_pretty(&financial_data).unwrap_or_else(|_| "{}".to_string());

    tracing::info!("✅ financial data extracted for profit and loss statement");

    let prompt = prompts::profit_and_loss(
        &financial_data_json,
        pnl.totals.revenue,
        pnl.totals.expenses,
        net_profit,
    );

    let statement = match completion.complete(&prompt).await {
        Ok(text) => RenderedStatement::split_on(&text, EXPLANATION_MARKER),
        Err(e) => {
            tracing::warn!("❌ P&L rendering call failed: {}", e);
            RenderedStatement {
                body: format!("❌ Error generating Profit & Loss statement: {}", e),
                explanation: None,
            }
        }
    };

    (statement, net_profit)
}
