use crate::utils::error::{PipelineError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Allowed spreadsheet extensions for the input file.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "xlsx", "xls"];

pub fn validate_input_extension(path: &str) -> Result<()> {
    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()) => Ok(()),
        Some(ext) => Err(PipelineError::UnsupportedFile {
            extension: ext.to_string(),
        }),
        None => Err(PipelineError::UnsupportedFile {
            extension: String::new(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PipelineError::ConfigError {
            message: format!("{} cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PipelineError::ConfigError {
            message: format!("{} cannot be empty", field_name),
        });
    }

    if path.contains('\0') {
        return Err(PipelineError::ConfigError {
            message: format!("{} contains null bytes", field_name),
        });
    }

    Ok(())
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    match url::Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PipelineError::ConfigError {
                message: format!("{}: unsupported URL scheme: {}", field_name, scheme),
            }),
        },
        Err(e) => Err(PipelineError::ConfigError {
            message: format!("{}: invalid URL format: {}", field_name, e),
        }),
    }
}
