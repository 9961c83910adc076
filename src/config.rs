use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the places provider credential
pub const API_KEY_ENV: &str = "GOOGLE_PLACES_API_KEY";

/// Environment variable overriding the listen address
pub const BIND_ENV: &str = "LEGACY_LEADS_BIND";

/// Configuration for the lead server and its clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Places provider credential; without it the aggregator runs in mock mode
    #[serde(default)]
    pub places_api_key: Option<String>,

    /// Base URL of the places provider
    #[serde(default = "default_places_base_url")]
    pub places_base_url: String,

    /// Keyword filter for nearby searches
    #[serde(default = "default_search_keyword")]
    pub search_keyword: String,

    /// Timeout for each website fetch attempt
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Fetch time above which a website is penalized as slow
    #[serde(default = "default_slow_threshold_ms")]
    pub slow_threshold_ms: u64,

    /// Maximum number of concurrent outbound lookups
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Cap on businesses per page, applied before detail lookups
    #[serde(default)]
    pub result_limit: Option<usize>,

    /// Chain name fragments excluded on top of the built-in list
    #[serde(default)]
    pub extra_chains: Vec<String>,
}

/// Default value for bind_addr
fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

/// Default value for places_base_url
fn default_places_base_url() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}

/// Default value for search_keyword
fn default_search_keyword() -> String {
    "restaurant OR local business".to_string()
}

/// Default value for fetch_timeout_secs
fn default_fetch_timeout_secs() -> u64 {
    10
}

/// Default value for slow_threshold_ms
fn default_slow_threshold_ms() -> u64 {
    3000
}

/// Default value for max_concurrency
fn default_max_concurrency() -> usize {
    16
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            places_api_key: None,
            places_base_url: default_places_base_url(),
            search_keyword: default_search_keyword(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            slow_threshold_ms: default_slow_threshold_ms(),
            max_concurrency: default_max_concurrency(),
            result_limit: None,
            extra_chains: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup; empty values are ignored
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup(API_KEY_ENV) {
            self.places_api_key = Some(key);
        }
        if let Some(bind) = lookup(BIND_ENV) {
            self.bind_addr = bind;
        }
        self
    }

    /// Provider credential, treating an empty key as absent
    pub fn api_key(&self) -> Option<&str> {
        self.places_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn slow_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_threshold_ms)
    }

    /// Concurrency bound, never below one
    pub fn concurrency(&self) -> usize {
        self.max_concurrency.max(1)
    }
}
