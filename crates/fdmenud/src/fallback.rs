//! Manually curated menu fallback.
//!
//! A hand-entered dataset consulted only when the live pipeline yields
//! nothing. Loaded once at startup from a JSON file shaped
//! `{ isoDate: { school: { meal: { locale: [items] } } } }` and read-only
//! for the lifetime of the process.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

pub type LocaleItems = HashMap<String, Vec<String>>;
pub type MealTable = HashMap<String, LocaleItems>;
pub type SchoolTable = HashMap<String, MealTable>;

/// Static date/school/meal/locale-keyed menu lookup.
#[derive(Debug, Default, Clone)]
pub struct ManualFallbackStore {
    table: HashMap<String, SchoolTable>,
}

impl ManualFallbackStore {
    /// Load the dataset. A missing file is an empty store, not an error;
    /// a file that exists but does not parse is a startup failure.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("No manual fallback dataset at {:?}, starting empty", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fallback dataset {:?}", path))?;
        let table = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse fallback dataset {:?}", path))?;
        let store = Self { table };
        info!(
            "Loaded manual fallback dataset: {} dated entries",
            store.table.len()
        );
        Ok(store)
    }

    /// Build a store directly from a parsed table (tests, embedded data).
    pub fn from_table(table: HashMap<String, SchoolTable>) -> Self {
        Self { table }
    }

    /// Items for an exact (date, school, meal, locale); falls back to the
    /// "en" entry for the same slot, then to empty.
    pub fn lookup(&self, date: &str, school: &str, meal: &str, locale: &str) -> Vec<String> {
        let Some(locales) = self
            .table
            .get(date)
            .and_then(|schools| schools.get(school))
            .and_then(|meals| meals.get(meal))
        else {
            return Vec::new();
        };
        locales
            .get(locale)
            .or_else(|| locales.get("en"))
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_store() -> ManualFallbackStore {
        let json = r#"{
            "2026-01-12": {
                "AMD": {
                    "lunch": {
                        "en": ["Cheese Pizza", "Garden Salad", "Milk"],
                        "es": ["Pizza de Queso", "Ensalada", "Leche"]
                    },
                    "breakfast": {
                        "en": ["Bagel", "Milk"]
                    }
                }
            }
        }"#;
        ManualFallbackStore::from_table(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn exact_locale_match_wins() {
        let store = sample_store();
        assert_eq!(
            store.lookup("2026-01-12", "AMD", "lunch", "es"),
            vec!["Pizza de Queso", "Ensalada", "Leche"]
        );
    }

    #[test]
    fn missing_locale_falls_back_to_en() {
        let store = sample_store();
        assert_eq!(
            store.lookup("2026-01-12", "AMD", "breakfast", "es"),
            vec!["Bagel", "Milk"]
        );
    }

    #[test]
    fn unknown_slots_yield_empty() {
        let store = sample_store();
        assert!(store.lookup("2026-01-13", "AMD", "lunch", "en").is_empty());
        assert!(store.lookup("2026-01-12", "Park", "lunch", "en").is_empty());
        assert!(store.lookup("2026-01-12", "AMD", "dinner", "en").is_empty());
    }

    #[test]
    fn loads_from_file_and_tolerates_absence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"2026-02-02": {{"Park": {{"lunch": {{"en": ["Hamburger"]}}}}}}}}"#
        )
        .unwrap();
        let store = ManualFallbackStore::load(file.path()).unwrap();
        assert_eq!(
            store.lookup("2026-02-02", "Park", "lunch", "en"),
            vec!["Hamburger"]
        );

        let absent = ManualFallbackStore::load(Path::new("/nonexistent/menus.json")).unwrap();
        assert!(absent.is_empty());
    }

    #[test]
    fn malformed_file_is_a_startup_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(ManualFallbackStore::load(file.path()).is_err());
    }
}
