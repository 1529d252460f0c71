//! Upstream meal-locator client.
//!
//! Builds the deterministic locator URL, sends the GET with the headers the
//! upstream expects, and retries with linear backoff. A 2xx response whose
//! body does not parse is a fetch failure, not a silent empty result.

use crate::config::UpstreamConfig;
use crate::extract::{Locale, RawMenuEntry};
use chrono::{Datelike, NaiveDate};
use fdmenu_common::MenuError;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// One validated menu request. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct MenuQuery {
    /// Original `accountId/locationId/mealPeriodId` string; cache key part.
    pub account: String,
    pub account_id: String,
    pub location_id: String,
    pub meal_period_id: String,
    pub date: NaiveDate,
    /// None means the caller gave no locale; behaves as English.
    pub locale: Option<Locale>,
}

impl MenuQuery {
    /// Split and validate the account string. Anything other than exactly
    /// three non-empty parts is rejected before any network activity.
    pub fn parse(account: &str, date: NaiveDate, locale: Option<Locale>) -> Result<Self, MenuError> {
        let parts: Vec<&str> = account.split('/').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(MenuError::InvalidQuery(
                "account must be in format accountId/locationId/mealPeriodId".to_string(),
            ));
        }
        Ok(Self {
            account: account.to_string(),
            account_id: parts[0].to_string(),
            location_id: parts[1].to_string(),
            meal_period_id: parts[2].to_string(),
            date,
            locale,
        })
    }

    /// Cache key: account string + ISO date + locale tag (default "en").
    pub fn cache_key(&self) -> String {
        format!(
            "{}/{}/{}",
            self.account,
            self.date.format("%Y-%m-%d"),
            self.locale.map(|l| l.tag()).unwrap_or("en")
        )
    }
}

/// Failure classification for one upstream fetch (after all retries).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("upstream status {0}")]
    Status(u16),

    #[error("unparsable upstream body: {0}")]
    Body(String),
}

/// Envelope around the upstream JSON; only `result[0]` matters.
#[derive(Debug, Default, Deserialize)]
struct UpstreamEnvelope {
    #[serde(default)]
    result: Vec<RawMenuEntry>,
}

/// HTTP client for the meal-locator API.
pub struct MenuFetchClient {
    http: reqwest::Client,
    base_url: String,
    tenant_id: u32,
    time_offset: u32,
    max_attempts: u32,
    backoff_base: Duration,
}

impl MenuFetchClient {
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("fdmenud/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tenant_id: config.tenant_id,
            time_offset: config.time_offset,
            max_attempts: config.max_attempts.max(1),
            backoff_base: Duration::from_millis(config.backoff_base_ms),
        })
    }

    /// Fetch the per-day record for a query. Up to `max_attempts` tries with
    /// linear backoff (base * attempt number) between them; the last error
    /// wins when every attempt fails.
    pub async fn fetch(&self, query: &MenuQuery) -> Result<RawMenuEntry, FetchError> {
        let url = self.build_url(query);
        debug!("fetching upstream menu: {}", url);

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.attempt(&url, query.locale).await {
                Ok(entry) => return Ok(entry),
                Err(err) if attempt < self.max_attempts => {
                    let delay = self.backoff_base * attempt;
                    warn!(
                        "upstream attempt {}/{} failed ({}), retrying in {:?}",
                        attempt, self.max_attempts, err, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    warn!("upstream fetch failed after {} attempts: {}", attempt, err);
                    return Err(err);
                }
            }
        }
    }

    async fn attempt(&self, url: &str, locale: Option<Locale>) -> Result<RawMenuEntry, FetchError> {
        let mut request = self
            .http
            .get(url)
            .header("accept", "application/json")
            .header("x-requested-with", "XMLHttpRequest");
        if let Some(locale) = locale {
            request = request.header("Accept-Language", locale.tag());
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let envelope: UpstreamEnvelope = response
            .json()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        // An absent result array is an empty placeholder entry, not an error.
        Ok(envelope.result.into_iter().next().unwrap_or_default())
    }

    /// Deterministic locator URL. The date travels as three space-separated
    /// numeric tokens (percent-encoded), repeated for start/end/selected.
    fn build_url(&self, query: &MenuQuery) -> String {
        let date = &query.date;
        let formatted = format!("{}%20{}%20{}", date.month(), date.day(), date.year());
        let mut url = format!(
            "{base}/{tenant}/meals?accountId={account}&endDate={date}&isActive=true&isStandalone\
             &locationId={location}&mealPeriodId={meal}&menuId=0&monthId={month}\
             &selectedDate={date}&startDate={date}&tenantId={tenant}&timeOffset={offset}&year={year}",
            base = self.base_url,
            tenant = self.tenant_id,
            account = query.account_id,
            location = query.location_id,
            meal = query.meal_period_id,
            date = formatted,
            month = date.month(),
            offset = self.time_offset,
            year = date.year(),
        );
        // Locale hint; harmless where the upstream ignores it.
        if let Some(locale) = query.locale {
            url.push_str("&language=");
            url.push_str(locale.tag());
        }
        url
    }
}
