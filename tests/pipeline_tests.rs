use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tb_statements::core::classify::TRIAL_BALANCE_ARTIFACT;
use tb_statements::{
    ArtifactSink, DebitCreditAccount, PipelineError, Result, StatementEngine, TextCompletion,
};
use tokio::sync::Mutex;

/// Completion double that replays a fixed script of responses, one per call.
enum ScriptedReply {
    Text(&'static str),
    Fail,
}

#[derive(Clone)]
struct ScriptedCompletion {
    replies: Arc<std::sync::Mutex<VecDeque<ScriptedReply>>>,
    calls: Arc<std::sync::Mutex<Vec<String>>>,
}

impl ScriptedCompletion {
    fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Arc::new(std::sync::Mutex::new(replies.into())),
            calls: Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl TextCompletion for ScriptedCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.calls.lock().unwrap().push(prompt.to_string());
        match self.replies.lock().unwrap().pop_front() {
            Some(ScriptedReply::Text(text)) => Ok(text.to_string()),
            Some(ScriptedReply::Fail) => Err(PipelineError::ConfigError {
                message: "scripted transport failure".to_string(),
            }),
            None => panic!("completion called more times than scripted"),
        }
    }
}

#[derive(Clone, Default)]
struct MemoryArtifacts {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

#[async_trait]
impl ArtifactSink for MemoryArtifacts {
    async fn write_artifact(&self, name: &str, data: &[u8]) -> Result<()> {
        self.files
            .lock()
            .await
            .insert(name.to_string(), data.to_vec());
        Ok(())
    }
}

fn three_row_csv() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(b"Acct,Name,Balance\n1001,Cash,5000\n4001,Sales,-10000\n5001,Rent,2000\n")
        .unwrap();
    file
}

const COLUMNS_REPLY: &str = r#"```json
{"account_number_column": "Acct", "account_name_column": "Name", "closing_balance_column": "Balance"}
```"#;

const CLEANED_REPLY: &str = r#"```json
[
  {"account_number": "1001", "account_name": "Cash", "closing_balance": 5000.0},
  {"account_number": "4001", "account_name": "Sales", "closing_balance": -10000.0},
  {"account_number": "5001", "account_name": "Rent", "closing_balance": 2000.0}
]
```"#;

const SPLIT_REPLY: &str = r#"```json
[
  {"Account Number": "1001", "Account Name": "Cash", "Debit": 5000.0, "Credit": 0},
  {"Account Number": "4001", "Account Name": "Sales", "Debit": 0, "Credit": 10000.0},
  {"Account Number": "5001", "Account Name": "Rent", "Debit": 2000.0, "Credit": 0}
]
```"#;

const CLASSIFIED_REPLY: &str = r#"```json
{
  "assets": [
    {"accountNumber": "1001", "accountName": "Cash", "amount": 5000.0, "balanceType": "Dr."}
  ],
  "liabilities": [],
  "equity": [],
  "expenses": [
    {"accountNumber": "5001", "accountName": "Rent", "amount": 2000.0, "balanceType": "Dr."}
  ],
  "revenue": [
    {"accountNumber": "4001", "accountName": "Sales", "amount": 10000.0, "balanceType": "Cr."}
  ],
  "totals": {
    "assets": 5000.0, "liabilities": 0.0, "equity": 0.0,
    "expenses": 2000.0, "revenue": 10000.0,
    "debits": 7000.0, "credits": 10000.0
  }
}
```"#;

// The scripted "model" deliberately reports a drifted net profit figure.
const PNL_REPLY: &str =
    "| **Net Profit** | **₹9,999.00** |\n\nExplanation: sales comfortably covered rent.";

const BALANCE_SHEET_REPLY: &str =
    "| Assets | ₹5,000.00 |\n\n### Explanation: both sides balance.";

#[tokio::test]
async fn test_end_to_end_three_row_scenario() {
    let file = three_row_csv();
    let completion = ScriptedCompletion::new(vec![
        ScriptedReply::Text(COLUMNS_REPLY),
        ScriptedReply::Text(CLEANED_REPLY),
        ScriptedReply::Text(SPLIT_REPLY),
        ScriptedReply::Text(CLASSIFIED_REPLY),
        ScriptedReply::Text(PNL_REPLY),
        ScriptedReply::Text(BALANCE_SHEET_REPLY),
    ]);
    let artifacts = MemoryArtifacts::default();
    let engine = StatementEngine::new(completion, artifacts.clone());

    let bundle = engine.run(file.path()).await.unwrap();

    // Net profit is local arithmetic: 10000 − 2000, exactly, regardless of
    // the drifted figure in the rendered text.
    assert_eq!(bundle.net_profit, 8000.0);

    assert_eq!(bundle.profit_and_loss.body, "| **Net Profit** | **₹9,999.00** |");
    assert_eq!(
        bundle.profit_and_loss.explanation.as_deref(),
        Some("sales comfortably covered rent.")
    );
    assert_eq!(bundle.balance_sheet.body, "| Assets | ₹5,000.00 |");
    assert_eq!(
        bundle.balance_sheet.explanation.as_deref(),
        Some("both sides balance.")
    );

    // The classifier dumped its input as a diagnostic artifact.
    let files = artifacts.files.lock().await;
    let dump = files.get(TRIAL_BALANCE_ARTIFACT).expect("diagnostic dump");
    let rows: Vec<DebitCreditAccount> = serde_json::from_slice(dump).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].debit, 5000.0);
    assert_eq!(rows[1].credit, 10000.0);
}

#[tokio::test]
async fn test_classifier_prose_degrades_but_run_completes() {
    let file = three_row_csv();
    let completion = ScriptedCompletion::new(vec![
        ScriptedReply::Text(COLUMNS_REPLY),
        ScriptedReply::Text(CLEANED_REPLY),
        ScriptedReply::Text(SPLIT_REPLY),
        ScriptedReply::Text("I am not sure how to categorize these accounts."),
        ScriptedReply::Text("| empty P&L |"),
        ScriptedReply::Text("| empty balance sheet |"),
    ]);
    let engine = StatementEngine::new(completion, MemoryArtifacts::default());

    // Degrade-in-place: the run reaches Done with an all-zero picture.
    let bundle = engine.run(file.path()).await.unwrap();
    assert_eq!(bundle.net_profit, 0.0);
    assert_eq!(bundle.profit_and_loss.body, "| empty P&L |");
}

#[tokio::test]
async fn test_splitter_transport_failure_degrades_but_run_completes() {
    let file = three_row_csv();
    let completion = ScriptedCompletion::new(vec![
        ScriptedReply::Text(COLUMNS_REPLY),
        ScriptedReply::Text(CLEANED_REPLY),
        ScriptedReply::Fail,
        ScriptedReply::Text("no accounts to categorize"),
        ScriptedReply::Text("| empty P&L |"),
        ScriptedReply::Text("| empty balance sheet |"),
    ]);
    let engine = StatementEngine::new(completion, MemoryArtifacts::default());

    let bundle = engine.run(file.path()).await.unwrap();
    assert_eq!(bundle.net_profit, 0.0);
}

#[tokio::test]
async fn test_normalizer_prose_is_fatal() {
    let file = three_row_csv();
    let completion = ScriptedCompletion::new(vec![
        ScriptedReply::Text(COLUMNS_REPLY),
        ScriptedReply::Text("Here is some cleaning advice instead of data."),
    ]);
    let engine = StatementEngine::new(completion, MemoryArtifacts::default());

    let err = engine.run(file.path()).await.unwrap_err();
    assert!(matches!(err, PipelineError::ResponseExtraction { .. }));
}

#[tokio::test]
async fn test_unidentifiable_columns_fail_at_the_normalizer() {
    let file = three_row_csv();
    // Column identification degrades in place; the hard stop happens at the
    // normalizer's missing-column precondition.
    let completion = ScriptedCompletion::new(vec![ScriptedReply::Text(
        "No idea which column is which, sorry.",
    )]);
    let engine = StatementEngine::new(completion, MemoryArtifacts::default());

    let err = engine.run(file.path()).await.unwrap_err();
    assert!(matches!(err, PipelineError::MissingColumn { .. }));
}

#[tokio::test]
async fn test_unsupported_extension_fails_before_any_call() {
    let completion = ScriptedCompletion::new(vec![]);
    let engine = StatementEngine::new(completion, MemoryArtifacts::default());

    let err = engine.run(Path::new("ledger.txt")).await.unwrap_err();
    assert!(matches!(err, PipelineError::UnsupportedFile { .. }));
}

#[tokio::test]
async fn test_pipeline_is_single_flight_and_ordered() {
    let file = three_row_csv();
    let completion = ScriptedCompletion::new(vec![
        ScriptedReply::Text(COLUMNS_REPLY),
        ScriptedReply::Text(CLEANED_REPLY),
        ScriptedReply::Text(SPLIT_REPLY),
        ScriptedReply::Text(CLASSIFIED_REPLY),
        ScriptedReply::Text(PNL_REPLY),
        ScriptedReply::Text(BALANCE_SHEET_REPLY),
    ]);
    let engine = StatementEngine::new(completion.clone(), MemoryArtifacts::default());

    engine.run(file.path()).await.unwrap();

    let calls = completion.calls.lock().unwrap();
    assert_eq!(calls.len(), 6);
    assert!(calls[0].contains("identify"));
    assert!(calls[1].contains("Clean the **Account Number** column"));
    assert!(calls[2].contains("Debit"));
    assert!(calls[3].contains("five fundamental accounting categories"));
    assert!(calls[4].contains("Profit and Loss Statement Generation Task"));
    assert!(calls[5].contains("Balance Sheet Generation Task"));
}
