//! URL patterns for fake server rules

use mock_api_server_common::{FakeRequest, FixtureError, Result};
use regex::Regex;
use std::fmt;

/// How a rule selects request URLs
#[derive(Debug, Clone)]
pub enum UrlPattern {
    /// Equal to the full URL, or to the URL without its query string
    Exact(String),

    /// Regular expression tested (unanchored) against the full URL
    Regex(Regex),
}

impl UrlPattern {
    /// Compile a regex pattern
    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self::Regex)
            .map_err(|e| FixtureError::invalid_pattern(pattern, e.to_string()))
    }

    pub fn matches(&self, request: &FakeRequest) -> bool {
        match self {
            Self::Exact(url) => *url == request.url || url == request.path(),
            Self::Regex(regex) => regex.is_match(&request.url),
        }
    }
}

impl From<&str> for UrlPattern {
    fn from(url: &str) -> Self {
        Self::Exact(url.to_string())
    }
}

impl From<String> for UrlPattern {
    fn from(url: String) -> Self {
        Self::Exact(url)
    }
}

impl From<Regex> for UrlPattern {
    fn from(regex: Regex) -> Self {
        Self::Regex(regex)
    }
}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(url) => write!(f, "{}", url),
            Self::Regex(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_ignores_query_string() {
        let pattern = UrlPattern::from("test-v1.json");
        assert!(pattern.matches(&FakeRequest::get("test-v1.json")));
        assert!(pattern.matches(&FakeRequest::get("test-v1.json?alt=json")));
        assert!(!pattern.matches(&FakeRequest::get("/test-v1.json")));
        assert!(!pattern.matches(&FakeRequest::get("test-v2.json")));
    }

    #[test]
    fn test_exact_with_query_requires_full_match() {
        let pattern = UrlPattern::from("test-v1.json?alt=json");
        assert!(pattern.matches(&FakeRequest::get("test-v1.json?alt=json")));
        assert!(!pattern.matches(&FakeRequest::get("test-v1.json")));
    }

    #[test]
    fn test_regex_is_unanchored() {
        let pattern = UrlPattern::regex(r"test-v\d+\.json").unwrap();
        assert!(pattern.matches(&FakeRequest::get("https://www.example.com/test-v2.json")));
        assert!(!pattern.matches(&FakeRequest::get("test-vx.json")));
        assert_eq!(pattern.to_string(), r"/test-v\d+\.json/");
    }

    #[test]
    fn test_invalid_regex() {
        let result = UrlPattern::regex("test-(v1");
        assert!(matches!(result, Err(FixtureError::InvalidPattern { .. })));
    }
}
