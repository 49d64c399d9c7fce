//! Client Configuration

use serde::{Deserialize, Serialize};

use crate::domain::DEFAULT_PAGE_SIZE;
use crate::error::{Error, Result};

/// Where the backend lives and how it pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Absolute API root, e.g. `https://records.example.org/api/`
    pub base_url: String,
    /// Records per page; must match the backend's paginator
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid base_url {:?}: {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!("unsupported scheme {:?}", url.scheme())));
        }
        Ok(())
    }

    /// Base URL with exactly one trailing slash, so joins stay under it
    pub fn normalized_base(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config = ClientConfig::from_json(r#"{"base_url": "https://example.org/api"}"#).unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.normalized_base(), "https://example.org/api/");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(ClientConfig::from_json(r#"{"page_size": 0}"#), Err(Error::Config(_))));
        assert!(ClientConfig::new("/api/").validate().is_err());
        assert!(ClientConfig::new("ftp://example.org/api/").validate().is_err());
    }
}
