pub mod cli;

use crate::llm::DEFAULT_MODEL;
use crate::utils::error::{PipelineError, Result};
use crate::utils::validation::{
    validate_input_extension, validate_non_empty_string, validate_path, validate_url, Validate,
};
use clap::Parser;

pub const API_KEY_ENV: &str = "MISTRAL_API_KEY";

#[derive(Debug, Clone, Parser)]
#[command(name = "tb-statements")]
#[command(about = "Generates a P&L statement and balance sheet from a trial-balance spreadsheet")]
pub struct CliConfig {
    /// Trial-balance spreadsheet (CSV or Excel).
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// API key for the completion service; falls back to MISTRAL_API_KEY.
    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, default_value = "https://api.mistral.ai")]
    pub api_base_url: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Resolves the credential from the flag or the environment. Absence is
    /// a precondition failure: the pipeline must not start without it.
    pub fn resolved_api_key(&self) -> Result<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| PipelineError::ConfigError {
                message: format!("missing API key: pass --api-key or set {}", API_KEY_ENV),
            })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_input_extension(&self.input)?;
        validate_path("output_path", &self.output_path)?;
        validate_non_empty_string("model", &self.model)?;
        validate_url("api_base_url", &self.api_base_url)?;
        Ok(())
    }
}
