//! Wire types shared between fdmenud and its clients.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Successful `/fdmenu` payload: normalized display names in menu order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuResponse {
    pub items: Vec<String>,
}

/// Error payload for any non-2xx daemon response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `/v1/health` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// A day number is either a cycle number or the literal `"closed"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayNumber {
    Number(i64),
    Label(String),
}

impl DayNumber {
    pub fn closed() -> Self {
        DayNumber::Label("closed".to_string())
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, DayNumber::Label(s) if s == "closed")
    }
}

/// Per-school adjusted day, as served by `/school-day`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolDay {
    pub day_number: DayNumber,
    /// Cycle key: `A`/`B` for the high schools, `1`–`6` for elementary.
    pub day_key: Option<String>,
    /// Where the number came from: `base`, `offset`, or `override`.
    pub source: String,
}

/// `/school-day` payload. BTreeMap keeps school ordering stable in output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayResponse {
    pub status: String,
    /// ISO date the numbers apply to.
    pub date: String,
    pub base_day: DayNumber,
    pub schools: BTreeMap<String, SchoolDay>,
}
