//! HTTP client for the fdmenu daemon.

use anyhow::{bail, Context, Result};
use fdmenu_common::{DayResponse, ErrorResponse, HealthResponse, MenuResponse};
use std::time::Duration;

const DEFAULT_SERVER: &str = "http://127.0.0.1:7810";

/// Resolve the daemon address.
///
/// Priority:
/// 1. Explicit --server flag
/// 2. $FDMENUD_SERVER environment variable
/// 3. http://127.0.0.1:7810 (default)
pub fn discover_server(explicit: Option<&str>) -> String {
    if let Some(server) = explicit {
        return server.trim_end_matches('/').to_string();
    }
    if let Ok(server) = std::env::var("FDMENUD_SERVER") {
        return server.trim_end_matches('/').to_string();
    }
    DEFAULT_SERVER.to_string()
}

pub struct DaemonClient {
    base_url: String,
    http: reqwest::Client,
}

impl DaemonClient {
    pub fn new(base_url: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { base_url, http })
    }

    pub async fn menu(
        &self,
        account: &str,
        date: Option<&str>,
        lang: Option<&str>,
    ) -> Result<MenuResponse> {
        let mut query: Vec<(&str, &str)> = vec![("account", account)];
        if let Some(date) = date {
            query.push(("date", date));
        }
        if let Some(lang) = lang {
            query.push(("lang", lang));
        }
        self.get_json("/fdmenu", &query).await
    }

    pub async fn day(&self) -> Result<DayResponse> {
        self.get_json("/school-day", &[]).await
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        self.get_json("/v1/health", &[]).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Is fdmenud running? Failed to reach {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorResponse>()
                .await
                .map(|e| e.error)
                .unwrap_or_else(|_| "no detail".to_string());
            bail!("daemon returned {}: {}", status, detail);
        }

        response
            .json()
            .await
            .with_context(|| format!("Unexpected response from {}", url))
    }
}
