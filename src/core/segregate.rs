//! Stage 5 (local): partition the classification into balance-sheet and P&L
//! inputs. Pure projection — totals are copied, never recomputed, and no
//! external call is made.

use crate::domain::model::{
    BalanceSheetInput, BalanceSheetTotals, ClassificationResult, PnlInput, PnlTotals,
};

/// Splits the classified data into its two statement inputs.
pub fn split_statements(classified: &ClassificationResult) -> (BalanceSheetInput, PnlInput) {
    let balance_sheet = BalanceSheetInput {
        assets: classified.assets.clone(),
        liabilities: classified.liabilities.clone(),
        equity: classified.equity.clone(),
        totals: BalanceSheetTotals {
            assets: classified.totals.assets,
            liabilities: classified.totals.liabilities,
            equity: classified.totals.equity,
        },
    };

    let profit_and_loss = PnlInput {
        expenses: classified.expenses.clone(),
        revenue: classified.revenue.clone(),
        totals: PnlTotals {
            expenses: classified.totals.expenses,
            revenue: classified.totals.revenue,
        },
    };

    tracing::info!("✅ segregated balance sheet and P&L data");
    (balance_sheet, profit_and_loss)
}
