//! Common types and utilities for the mock API server
//!
//! This crate contains the error type and the request/response values
//! shared by the fake server, the fixture and the CLI.

mod message;

pub use message::{parse_method, FakeRequest, FakeResponse};

use thiserror::Error;

/// Errors that can occur while driving a fake server
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Fake server has been restored; request to {url} was not intercepted")]
    Restored { url: String },

    #[error("Invalid URL pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    #[error("Invalid HTTP method '{0}'")]
    InvalidMethod(String),

    #[error("Unknown request id: {0}")]
    UnknownRequest(usize),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FixtureError {
    pub fn restored(url: impl Into<String>) -> Self {
        Self::Restored { url: url.into() }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn invalid_header(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Result type for fixture operations
pub type Result<T> = std::result::Result<T, FixtureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restored_display() {
        let err = FixtureError::restored("test-v1.json");
        assert_eq!(
            err.to_string(),
            "Fake server has been restored; request to test-v1.json was not intercepted"
        );
    }

    #[test]
    fn test_invalid_pattern_display() {
        let err = FixtureError::invalid_pattern("(", "unclosed group");
        assert_eq!(err.to_string(), "Invalid URL pattern '(': unclosed group");
    }
}
