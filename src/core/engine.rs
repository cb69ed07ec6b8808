//! Orchestration of the full trial-balance run. Strictly linear: the output
//! of each stage is the literal input to the next, one blocking completion
//! call at a time, no overlap and no retry.

use crate::core::{balance_sheet, classify, columns, ingest, normalize, pnl, segregate, split};
use crate::domain::model::StatementBundle;
use crate::domain::ports::{ArtifactSink, TextCompletion};
use crate::utils::error::Result;
use std::fmt;
use std::path::Path;

/// Pipeline states, in execution order. Precondition failures abort the run
/// (`Failed`); everything else degrades in place and the run reaches `Done`
/// with partially-empty output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Identifying,
    Cleaning,
    Splitting,
    Classifying,
    Segregating,
    RenderingPnl,
    RenderingBalanceSheet,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Identifying => "identifying columns",
            Stage::Cleaning => "cleaning rows",
            Stage::Splitting => "splitting debit/credit",
            Stage::Classifying => "classifying accounts",
            Stage::Segregating => "segregating statements",
            Stage::RenderingPnl => "rendering P&L",
            Stage::RenderingBalanceSheet => "rendering balance sheet",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

pub struct StatementEngine<C: TextCompletion, A: ArtifactSink> {
    completion: C,
    artifacts: A,
}

impl<C: TextCompletion, A: ArtifactSink> StatementEngine<C, A> {
    pub fn new(completion: C, artifacts: A) -> Self {
        Self {
            completion,
            artifacts,
        }
    }

    /// Runs the whole pipeline against one input file.
    ///
    /// Returns `Err` only for precondition failures: unreadable or
    /// unsupported input, a column map with missing fields, or a row
    /// normalization response with no extractable list. Splitter,
    /// classifier and renderer failures degrade in place.
    pub async fn run(&self, input: &Path) -> Result<StatementBundle> {
        match self.execute(input).await {
            Ok(bundle) => Ok(bundle),
            Err(error) => {
                tracing::error!(stage = %Stage::Failed, "pipeline aborted: {}", error);
                Err(error)
            }
        }
    }

    async fn execute(&self, input: &Path) -> Result<StatementBundle> {
        tracing::info!(stage = %Stage::Idle, "🚀 starting trial-balance run for {}", input.display());

        let table = ingest::load_table(input)?;

        tracing::info!(stage = %Stage::Identifying, "step 1: identifying columns");
        let column_map = columns::identify(&self.completion, &table).await;
        if let Some(error) = &column_map.error {
            tracing::warn!("column identification degraded: {}", error);
        }

        tracing::info!(stage = %Stage::Cleaning, "step 2: cleaning rows");
        let cleaned = normalize::clean_rows(&self.completion, &table, &column_map).await?;

        tracing::info!(stage = %Stage::Splitting, "step 3: splitting balances into debit/credit");
        let debit_credit = split::to_debit_credit(&self.completion, &cleaned).await;

        tracing::info!(stage = %Stage::Classifying, "step 4: classifying accounts");
        let classified =
            classify::classify(&self.completion, &self.artifacts, &debit_credit).await;

        tracing::info!(stage = %Stage::Segregating, "step 5: segregating statement inputs");
        let (balance_sheet_input, pnl_input) = segregate::split_statements(&classified);

        tracing::info!(stage = %Stage::RenderingPnl, "step 6: generating profit & loss statement");
        let (profit_and_loss, net_profit) = pnl::render(&self.completion, &pnl_input).await;

        tracing::info!(stage = %Stage::RenderingBalanceSheet, "step 7: generating balance sheet");
        let balance_sheet =
            balance_sheet::render(&self.completion, &balance_sheet_input, net_profit).await;

        tracing::info!(stage = %Stage::Done, "✅ financial statements generated");
        Ok(StatementBundle {
            profit_and_loss,
            net_profit,
            balance_sheet,
        })
    }
}
