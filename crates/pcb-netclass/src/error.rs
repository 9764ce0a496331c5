//! Error types for configuration loading and validation

use std::path::PathBuf;
use thiserror::Error;

/// Every problem found in a configuration document, collected in one pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Configuration validation failed with {} error(s):\n{}",
    .violations.len(),
    bullet_list(.violations)
)]
pub struct ValidationError {
    violations: Vec<String>,
}

impl ValidationError {
    pub(crate) fn new(violations: Vec<String>) -> Self {
        debug_assert!(!violations.is_empty());
        Self { violations }
    }

    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

fn bullet_list(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| format!("  - {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Failure to load a configuration document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {format} syntax in {origin}: {message}")]
    Parse {
        format: &'static str,
        origin: String,
        message: String,
    },

    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to write configuration file: {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
