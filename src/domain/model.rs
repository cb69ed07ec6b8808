use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A loaded spreadsheet: header order plus one value-map per row.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<HashMap<String, serde_json::Value>>,
}

impl Table {
    /// The first `n` rows as ordered column→value objects, used as the
    /// sample shown to the completion service.
    pub fn sample(&self, n: usize) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .take(n)
            .map(|row| {
                self.columns
                    .iter()
                    .map(|col| {
                        (
                            col.clone(),
                            row.get(col).cloned().unwrap_or(serde_json::Value::Null),
                        )
                    })
                    .collect()
            })
            .collect()
    }
}

/// Which source columns hold the three fields the pipeline cares about.
/// Identification failures are carried in `error`, never raised.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnMap {
    pub account_number_column: Option<String>,
    pub account_name_column: Option<String>,
    pub closing_balance_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl ColumnMap {
    pub fn failed(error: String, raw_response: Option<String>) -> Self {
        Self {
            error: Some(error),
            raw_response,
            ..Self::default()
        }
    }
}

/// One normalized trial-balance row. `account_number` is digits-only and
/// `closing_balance` has currency symbols stripped after cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedAccount {
    pub account_number: String,
    pub account_name: String,
    pub closing_balance: f64,
}

/// Splitter wire format. Exactly one of debit/credit is non-zero per the
/// sign rule; a zero balance leaves both at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebitCreditAccount {
    #[serde(rename = "Account Number")]
    pub account_number: String,
    #[serde(rename = "Account Name")]
    pub account_name: String,
    #[serde(rename = "Debit")]
    pub debit: f64,
    #[serde(rename = "Credit")]
    pub credit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceType {
    #[serde(rename = "Dr.")]
    Debit,
    #[serde(rename = "Cr.")]
    Credit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedEntry {
    #[serde(rename = "accountNumber")]
    pub account_number: String,
    #[serde(rename = "accountName")]
    pub account_name: String,
    pub amount: f64,
    #[serde(rename = "balanceType")]
    pub balance_type: BalanceType,
}

/// Per-category sums plus grand debit/credit totals, as reported by the
/// classifier. All fields are required on the wire; a response missing any
/// of them fails the parse instead of defaulting to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub assets: f64,
    pub liabilities: f64,
    pub equity: f64,
    pub expenses: f64,
    pub revenue: f64,
    pub debits: f64,
    pub credits: f64,
}

/// The five-bucket classification of the trial balance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub assets: Vec<ClassifiedEntry>,
    pub liabilities: Vec<ClassifiedEntry>,
    pub equity: Vec<ClassifiedEntry>,
    pub expenses: Vec<ClassifiedEntry>,
    pub revenue: Vec<ClassifiedEntry>,
    pub totals: Totals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetTotals {
    pub assets: f64,
    pub liabilities: f64,
    pub equity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetInput {
    pub assets: Vec<ClassifiedEntry>,
    pub liabilities: Vec<ClassifiedEntry>,
    pub equity: Vec<ClassifiedEntry>,
    pub totals: BalanceSheetTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PnlTotals {
    pub expenses: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PnlInput {
    pub expenses: Vec<ClassifiedEntry>,
    pub revenue: Vec<ClassifiedEntry>,
    pub totals: PnlTotals,
}

impl PnlInput {
    /// Net profit is the one fully-owned computation in the pipeline and is
    /// always derived locally, never taken from a completion.
    pub fn net_profit(&self) -> f64 {
        self.totals.revenue - self.totals.expenses
    }
}

/// A rendered statement split into its table body and the optional prose
/// commentary that follows the explanation marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedStatement {
    pub body: String,
    pub explanation: Option<String>,
}

impl RenderedStatement {
    /// Splits raw completion text on the first occurrence of `marker`.
    pub fn split_on(text: &str, marker: &str) -> Self {
        match text.split_once(marker) {
            Some((body, explanation)) => Self {
                body: body.trim().to_string(),
                explanation: Some(explanation.trim().to_string()).filter(|s| !s.is_empty()),
            },
            None => Self {
                body: text.trim().to_string(),
                explanation: None,
            },
        }
    }
}

/// Final output of one end-to-end run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementBundle {
    pub profit_and_loss: RenderedStatement,
    pub net_profit: f64,
    pub balance_sheet: RenderedStatement,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_profit_is_exact_local_arithmetic() {
        let pnl = PnlInput {
            expenses: vec![],
            revenue: vec![],
            totals: PnlTotals {
                expenses: 2000.0,
                revenue: 10000.0,
            },
        };
        assert_eq!(pnl.net_profit(), 8000.0);
    }

    #[test]
    fn test_split_on_marker() {
        let statement = RenderedStatement::split_on(
            "| Net Profit | 8000 |\n\nExplanation: revenue exceeded expenses.",
            "Explanation:",
        );
        assert_eq!(statement.body, "| Net Profit | 8000 |");
        assert_eq!(
            statement.explanation.as_deref(),
            Some("revenue exceeded expenses.")
        );
    }

    #[test]
    fn test_split_without_marker_keeps_whole_body() {
        let statement = RenderedStatement::split_on("just a table", "Explanation:");
        assert_eq!(statement.body, "just a table");
        assert!(statement.explanation.is_none());
    }

    #[test]
    fn test_debit_credit_wire_keys() {
        let account = DebitCreditAccount {
            account_number: "1001".to_string(),
            account_name: "Cash".to_string(),
            debit: 5000.0,
            credit: 0.0,
        };
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["Account Number"], "1001");
        assert_eq!(json["Debit"], 5000.0);
        assert_eq!(json["Credit"], 0.0);
    }

    #[test]
    fn test_balance_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&BalanceType::Debit).unwrap(),
            "\"Dr.\""
        );
        assert_eq!(
            serde_json::to_string(&BalanceType::Credit).unwrap(),
            "\"Cr.\""
        );
    }

    #[test]
    fn test_totals_require_all_fields() {
        // A totals object missing "credits" must fail the parse rather than
        // defaulting to zero.
        let incomplete = serde_json::json!({
            "assets": 1.0, "liabilities": 1.0, "equity": 0.0,
            "expenses": 0.0, "revenue": 0.0, "debits": 1.0
        });
        assert!(serde_json::from_value::<Totals>(incomplete).is_err());
    }

    #[test]
    fn test_table_sample_preserves_column_order() {
        let mut row = HashMap::new();
        row.insert("B".to_string(), serde_json::json!(2));
        row.insert("A".to_string(), serde_json::json!(1));
        let table = Table {
            columns: vec!["B".to_string(), "A".to_string()],
            rows: vec![row],
        };

        let sample = table.sample(2);
        assert_eq!(sample.len(), 1);
        let keys: Vec<&String> = sample[0].keys().collect();
        assert_eq!(keys, vec!["B", "A"]);
    }
}
