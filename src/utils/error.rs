use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Unsupported file type '{extension}': only CSV and Excel files are supported")]
    UnsupportedFile { extension: String },

    #[error("Missing required column mapping: {field}")]
    MissingColumn { field: String },

    #[error("No usable {expected} in completion response during {stage}: {raw}")]
    ResponseExtraction {
        stage: &'static str,
        expected: &'static str,
        raw: String,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
