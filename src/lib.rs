pub mod config;
pub mod core;
pub mod domain;
pub mod llm;
pub mod utils;

pub use crate::config::{cli::LocalArtifacts, CliConfig};
pub use crate::core::{Stage, StatementEngine};
pub use crate::domain::model::{
    BalanceSheetInput, ClassificationResult, CleanedAccount, ColumnMap, DebitCreditAccount,
    PnlInput, RenderedStatement, StatementBundle, Table,
};
pub use crate::domain::ports::{ArtifactSink, NullArtifacts, TextCompletion};
pub use crate::llm::MistralClient;
pub use crate::utils::error::{PipelineError, Result};
