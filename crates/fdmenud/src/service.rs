//! Menu service orchestration.
//!
//! Composes validation, cache, upstream fetch, extraction, and the manual
//! fallback into the one externally exposed "get menu items" operation.
//! Upstream flakiness never reaches the caller while a fallback entry
//! exists; only a malformed query is the caller's problem.

use crate::cache::{self, MenuCache};
use crate::config::{MenuConfig, UpstreamConfig};
use crate::extract::{extract_items, Locale};
use crate::fallback::ManualFallbackStore;
use crate::upstream::{FetchError, MenuFetchClient, MenuQuery};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use fdmenu_common::{schools, MenuError};
use std::path::Path;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

pub struct MenuService {
    client: MenuFetchClient,
    cache: RwLock<MenuCache>,
    fallback: ManualFallbackStore,
    utc_offset_hours: i32,
}

impl MenuService {
    pub fn new(
        upstream: &UpstreamConfig,
        menu: &MenuConfig,
        fallback: ManualFallbackStore,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            client: MenuFetchClient::new(upstream)?,
            cache: RwLock::new(MenuCache::new(Duration::from_secs(menu.cache_ttl_secs))),
            fallback,
            utc_offset_hours: menu.utc_offset_hours,
        })
    }

    /// Convenience constructor that loads the fallback dataset from the
    /// configured path.
    pub fn from_config(upstream: &UpstreamConfig, menu: &MenuConfig) -> anyhow::Result<Self> {
        let fallback = ManualFallbackStore::load(Path::new(&menu.fallback_path))?;
        Self::new(upstream, menu, fallback)
    }

    /// Resolve the menu for an account string, optional ISO date, and
    /// optional locale tag.
    ///
    /// Order of precedence: fresh cache entry, then live fetch+extract, then
    /// the manual fallback when the live pipeline yields nothing. A fetch
    /// failure after retries surfaces as `Upstream` only when no fallback
    /// entry applies.
    pub async fn get_menu(
        &self,
        account: &str,
        date: Option<&str>,
        lang: Option<&str>,
    ) -> Result<Vec<String>, MenuError> {
        let locale = lang.map(Locale::from_tag);
        let date = self.resolve_date(date);
        let query = MenuQuery::parse(account, date, locale)?;
        let key = query.cache_key();

        let fetched: Result<Vec<String>, FetchError> =
            cache::get_or_fetch(&self.cache, &key, || async {
                let entry = self.client.fetch(&query).await?;
                Ok(extract_items(&entry, locale.unwrap_or(Locale::English)))
            })
            .await;

        match fetched {
            Ok(items) if !items.is_empty() => Ok(items),
            Ok(_) => {
                debug!("live pipeline empty for {}, consulting fallback", key);
                Ok(self.fallback_items(&query))
            }
            Err(err) => {
                warn!("upstream unavailable for {}: {}", key, err);
                let items = self.fallback_items(&query);
                if items.is_empty() {
                    Err(MenuError::Upstream(err.to_string()))
                } else {
                    Ok(items)
                }
            }
        }
    }

    /// Manual fallback lookup. School and meal come from the static account
    /// table; an unrecognized triple means no fallback match.
    fn fallback_items(&self, query: &MenuQuery) -> Vec<String> {
        let Some((school, meal)) = schools::school_meal_for_triple(
            &query.account_id,
            &query.location_id,
            &query.meal_period_id,
        ) else {
            return Vec::new();
        };
        let date = query.date.format("%Y-%m-%d").to_string();
        let locale = query.locale.map(|l| l.tag()).unwrap_or("en");
        self.fallback.lookup(&date, school, meal, locale)
    }

    /// Parse the request date: plain ISO date first, then a full timestamp
    /// shifted into district-local time. Absent or unparsable dates mean
    /// "today" in district-local time.
    fn resolve_date(&self, date: Option<&str>) -> NaiveDate {
        if let Some(raw) = date {
            if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                return parsed;
            }
            if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
                return parsed.with_timezone(&self.local_offset()).date_naive();
            }
            debug!("unparsable date {:?}, defaulting to today", raw);
        }
        Utc::now().with_timezone(&self.local_offset()).date_naive()
    }

    fn local_offset(&self) -> FixedOffset {
        let secs = self.utc_offset_hours.clamp(-23, 23) * 3600;
        FixedOffset::east_opt(secs).unwrap_or_else(|| {
            FixedOffset::east_opt(0).expect("zero UTC offset is valid")
        })
    }
}
