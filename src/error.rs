//! Error types for transcript lookups and searches

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for locator operations
pub type Result<T> = std::result::Result<T, LocatorError>;

/// Errors that can occur while loading transcripts or building a report
#[derive(Debug, Error)]
pub enum LocatorError {
    /// Input document or arguments are structurally unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Input document is not valid JSON of the expected shape
    #[error("Invalid input: {0}")]
    Parse(#[from] serde_json::Error),
    /// Requested quarter is not in the collection
    #[error("Quarter {quarter} not found!{}", available_hint(.available))]
    NotFound {
        quarter: String,
        available: Vec<String>,
    },
    /// Configuration file could not be parsed
    #[error("Invalid configuration in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LocatorError {
    /// Process exit status for this error.
    ///
    /// A missing quarter exits with 1; everything else is an input problem
    /// and exits with 2, the same status clap uses for usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            LocatorError::NotFound { .. } => 1,
            _ => 2,
        }
    }
}

fn available_hint(available: &[String]) -> String {
    if available.is_empty() {
        " (input contains no transcripts)".to_string()
    } else {
        format!(" Available quarters: {}", available.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_quarter_and_alternatives() {
        let err = LocatorError::NotFound {
            quarter: "Q3 2025".to_string(),
            available: vec!["Q1 2025".to_string(), "Q2 2025".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Quarter Q3 2025 not found! Available quarters: Q1 2025, Q2 2025"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn not_found_in_empty_collection() {
        let err = LocatorError::NotFound {
            quarter: "Q3 2025".to_string(),
            available: vec![],
        };
        assert_eq!(
            err.to_string(),
            "Quarter Q3 2025 not found! (input contains no transcripts)"
        );
    }

    #[test]
    fn input_errors_exit_with_two() {
        let err = LocatorError::InvalidInput("empty word".to_string());
        assert_eq!(err.exit_code(), 2);

        let err: LocatorError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.exit_code(), 2);
    }
}
