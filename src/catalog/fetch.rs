//! Fetching catalog manifests and template sources.
//!
//! A reference is either a URL (fetched over HTTP with a blocking client) or a
//! local file path (read from disk). Fetches block the calling thread; there
//! is no retry layer — a fetch succeeds or fails outright.

use std::fs;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{Result, StencilError};

/// Fetches references over HTTP/HTTPS or from the local filesystem.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a fetcher with the default 30-second timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent("stencil")
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Whether a reference is a fetchable URL rather than a file path.
    pub fn is_url(reference: &str) -> bool {
        reference.starts_with("http://") || reference.starts_with("https://")
    }

    /// Fetch a reference to bytes.
    pub fn fetch(&self, reference: &str) -> Result<Vec<u8>> {
        if Self::is_url(reference) {
            self.fetch_url(reference)
        } else {
            fs::read(reference).map_err(|e| StencilError::Fetch {
                reference: reference.to_string(),
                message: e.to_string(),
            })
        }
    }

    /// Fetch a reference to text.
    pub fn fetch_text(&self, reference: &str) -> Result<String> {
        let bytes = self.fetch(reference)?;
        String::from_utf8(bytes).map_err(|_| StencilError::Fetch {
            reference: reference.to_string(),
            message: "content is not valid UTF-8".to_string(),
        })
    }

    fn fetch_url(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| StencilError::Fetch {
                reference: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(StencilError::Fetch {
                reference: url.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let bytes = response.bytes().map_err(|e| StencilError::Fetch {
            reference: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}
