//! Error types for configuration loading, validation and application

use std::path::PathBuf;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use rawmem_core::{AllocError, CompareError};

/// Unified configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File not found error.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Configuration validation error.
    #[error("Invalid configuration:\n{}", format_validation_errors(.0))]
    Validation(#[source] ValidationErrors),

    /// Figment parsing error.
    #[error("Configuration parsing error: {0}")]
    Parsing(#[from] figment::Error),

    /// I/O error.
    #[error("Configuration I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The process-wide allocator could not be installed.
    #[error("Failed to apply allocator settings: {0}")]
    Allocator(#[from] AllocError),

    /// The configured compare strategy could not be selected.
    #[error("Failed to apply compare strategy: {0}")]
    Compare(#[from] CompareError),
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut output = String::new();
    write_validation_errors(&mut output, "", errors);
    output
}

fn write_validation_errors(output: &mut String, prefix: &str, errors: &ValidationErrors) {
    use std::fmt::Write;

    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));
    for (field, kind) in fields {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errors) => {
                let _ = writeln!(output, "Field '{}':", path);
                for error in errors {
                    let message = match &error.message {
                        Some(msg) => msg.to_string(),
                        None => error.code.to_string(),
                    };
                    let _ = writeln!(output, "  - {}", message);
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                write_validation_errors(output, &path, nested);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    write_validation_errors(output, &format!("{path}[{index}]"), nested);
                }
            }
        }
    }
}

impl From<ValidationErrors> for ConfigError {
    fn from(errors: ValidationErrors) -> Self {
        ConfigError::Validation(errors)
    }
}
