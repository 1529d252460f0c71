//! School day-number service.
//!
//! Widgets ask the daemon for "what day is it" instead of calculating
//! locally, so individual school closures can be corrected centrally. The
//! base number comes from the district's day API; per-school offsets and
//! date-keyed overrides are applied on top. High schools run an A/B cycle,
//! elementary schools a 1-6 cycle.

use crate::config::DayConfig;
use chrono::{FixedOffset, Utc};
use fdmenu_common::{schools, DayNumber, DayResponse, MenuError, SchoolDay};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::{debug, warn};

/// Override form "day-N".
static DAY_OVERRIDE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^day-(\d+)$").unwrap());

/// The base API answers with a number, a numeric string, or the literal
/// "No School Today".
#[derive(Debug, Deserialize)]
struct BaseDayPayload {
    #[serde(rename = "dayNumber")]
    day_number: Option<serde_json::Value>,
}

pub struct DayService {
    http: reqwest::Client,
    api_url: String,
    offsets: HashMap<String, i64>,
    overrides: HashMap<String, HashMap<String, String>>,
    utc_offset_hours: i32,
}

impl DayService {
    pub fn new(config: &DayConfig, utc_offset_hours: i32) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(8))
            .user_agent(concat!("fdmenud/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            offsets: config.offsets.clone(),
            overrides: config.overrides.clone(),
            utc_offset_hours,
        })
    }

    /// Fetch the base day and compute every school's adjusted day.
    pub async fn school_days(&self) -> Result<DayResponse, MenuError> {
        let base = self.fetch_base_day().await?;
        let date = self.today();
        debug!("base day {:?} for {}", base, date);

        let mut per_school = BTreeMap::new();
        for school in schools::SCHOOLS {
            per_school.insert(school.to_string(), self.school_day(base, school, &date));
        }

        Ok(DayResponse {
            status: "success".to_string(),
            date,
            base_day: match base {
                Some(n) => DayNumber::Number(n),
                None => DayNumber::closed(),
            },
            schools: per_school,
        })
    }

    /// Adjusted day for one school: date override first, then offset over
    /// the base. A base of None means the district is closed.
    fn school_day(&self, base: Option<i64>, school: &str, date: &str) -> SchoolDay {
        if let Some(raw) = self
            .overrides
            .get(school)
            .and_then(|dates| dates.get(date))
        {
            if raw == "closed" {
                return SchoolDay {
                    day_number: DayNumber::closed(),
                    day_key: None,
                    source: "override".to_string(),
                };
            }
            if let Some(n) = DAY_OVERRIDE
                .captures(raw)
                .and_then(|caps| caps[1].parse::<i64>().ok())
            {
                return SchoolDay {
                    day_number: DayNumber::Number(n),
                    day_key: Some(day_key(n, school)),
                    source: "override".to_string(),
                };
            }
            warn!("ignoring malformed day override {:?} for {}", raw, school);
        }

        let Some(base) = base else {
            return SchoolDay {
                day_number: DayNumber::closed(),
                day_key: None,
                source: "base".to_string(),
            };
        };

        let offset = self.offsets.get(school).copied().unwrap_or(0);
        let adjusted = base + offset;
        SchoolDay {
            day_number: DayNumber::Number(adjusted),
            day_key: Some(day_key(adjusted, school)),
            source: if offset == 0 { "base" } else { "offset" }.to_string(),
        }
    }

    /// Single-attempt fetch of the base day number. None means "no school".
    async fn fetch_base_day(&self) -> Result<Option<i64>, MenuError> {
        let response = self
            .http
            .get(&self.api_url)
            .send()
            .await
            .map_err(|e| MenuError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MenuError::Upstream(format!(
                "day API status {}",
                response.status().as_u16()
            )));
        }

        let payload: BaseDayPayload = response
            .json()
            .await
            .map_err(|e| MenuError::Upstream(e.to_string()))?;

        Ok(parse_base_day(payload.day_number.as_ref()))
    }

    fn today(&self) -> String {
        let secs = self.utc_offset_hours.clamp(-23, 23) * 3600;
        let offset = FixedOffset::east_opt(secs)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero UTC offset is valid"));
        Utc::now()
            .with_timezone(&offset)
            .date_naive()
            .format("%Y-%m-%d")
            .to_string()
    }
}

/// Normalize the base-day payload: numbers and numeric strings count, the
/// "No School Today" literal (and anything unparsable) means closed.
fn parse_base_day(value: Option<&serde_json::Value>) -> Option<i64> {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Cycle day key: high schools alternate A/B by parity, elementary schools
/// cycle 1-6.
fn day_key(day_number: i64, school: &str) -> String {
    if schools::is_high_school(school) {
        if day_number % 2 == 1 { "A" } else { "B" }.to_string()
    } else {
        ((day_number - 1).rem_euclid(6) + 1).to_string()
    }
}
