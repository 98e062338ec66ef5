//! Crawler settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Browser-like user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36";

/// Tunable crawler settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// User-Agent header applied to every fetch.
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum locations per classification chunk.
    pub chunk_size: usize,
    /// Number of classification workers.
    pub workers: usize,
    /// Path of the persisted result store.
    pub store_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            chunk_size: 10,
            workers: 4,
            store_path: PathBuf::from("results.json"),
        }
    }
}
