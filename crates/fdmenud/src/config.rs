//! Configuration management for fdmenud.
//!
//! Loads settings from /etc/fdmenu/config.toml or uses defaults. Every field
//! carries its own default so a partial file works, and a missing file means
//! "run with defaults", not a startup failure.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use tracing::warn;

/// Config file path
pub const CONFIG_PATH: &str = "/etc/fdmenu/config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub day: DayConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

/// Upstream meal-locator API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_tenant_id")]
    pub tenant_id: u32,

    /// Fixed timeOffset protocol constant the upstream expects.
    #[serde(default = "default_time_offset")]
    pub time_offset: u32,

    /// Per-attempt timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Linear backoff base: wait base * attempt_number between attempts.
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

/// Menu pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Offset applied when resolving "today" for undated requests.
    /// The district runs on US Eastern time.
    #[serde(default = "default_utc_offset")]
    pub utc_offset_hours: i32,

    /// Manually curated menu dataset; consulted when the live pipeline
    /// yields nothing. Missing file means an empty store.
    #[serde(default = "default_fallback_path")]
    pub fallback_path: String,
}

/// Day-number service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayConfig {
    /// Base day-number API (returns `{ "dayNumber": ... }`).
    #[serde(default = "default_day_api_url")]
    pub api_url: String,

    /// Per-school day offsets, applied when an individual school's count
    /// drifts from the district's (snow day, emergency closure).
    #[serde(default)]
    pub offsets: HashMap<String, i64>,

    /// Date-keyed per-school overrides: "closed" or "day-N".
    #[serde(default)]
    pub overrides: HashMap<String, HashMap<String, String>>,
}

fn default_listen_addr() -> String {
    "127.0.0.1:7810".to_string()
}

fn default_base_url() -> String {
    "https://apiservicelocators.fdmealplanner.com/api/v1/data-locator-webapi".to_string()
}

fn default_tenant_id() -> u32 {
    3
}

fn default_time_offset() -> u32 {
    300
}

fn default_request_timeout() -> u64 {
    8
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_base_ms() -> u64 {
    250
}

fn default_cache_ttl() -> u64 {
    120
}

fn default_utc_offset() -> i32 {
    -5
}

fn default_fallback_path() -> String {
    "/etc/fdmenu/manual-menus.json".to_string()
}

fn default_day_api_url() -> String {
    "https://script.google.com/macros/s/AKfycbyAHJSmnXM_-bPSuBJmS2xHSbsFN5lOZoZTECd0MHQmGUWDJsx90bKzoN0mF0f0cM7t/exec"
        .to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            tenant_id: default_tenant_id(),
            time_offset: default_time_offset(),
            request_timeout_secs: default_request_timeout(),
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl(),
            utc_offset_hours: default_utc_offset(),
            fallback_path: default_fallback_path(),
        }
    }
}

impl Default for DayConfig {
    fn default() -> Self {
        Self {
            api_url: default_day_api_url(),
            offsets: HashMap::new(),
            overrides: HashMap::new(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let path = std::env::var("FDMENU_CONFIG").unwrap_or_else(|_| CONFIG_PATH.to_string());
        Self::load_from_path(&path).unwrap_or_else(|e| {
            warn!("Config not found, using defaults: {}", e);
            Config::default()
        })
    }

    /// Load config from specific path
    pub fn load_from_path(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
