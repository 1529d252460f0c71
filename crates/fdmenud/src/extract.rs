//! Menu entry extraction.
//!
//! An upstream "menu day" record carries its components in one of three
//! shapes: an embedded markup blob (variant A), a structured component list
//! (variant B), or a single comma-delimited string (variant C). Exactly one
//! shape wins per entry, tried in that order, stopping at the first that
//! yields at least one normalized item. A parse failure in one variant is
//! the same as that variant yielding nothing.

use crate::normalize::normalize_name;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Requested display locale. Anything that is not Spanish behaves as English.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    English,
    Spanish,
}

impl Locale {
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("es") {
            Locale::Spanish
        } else {
            Locale::English
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Spanish => "es",
        }
    }
}

/// One per-day record from the upstream `result` array. All three variant
/// payloads may coexist; extraction consults them in fixed priority order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMenuEntry {
    /// Variant A: embedded markup describing component nodes.
    #[serde(default)]
    pub xml_menu_recipes: Option<String>,
    /// Variant B: structured component list.
    #[serde(default)]
    pub all_menu_recipes: Option<Vec<MenuComponent>>,
    /// Variant C: comma-delimited names.
    #[serde(default)]
    pub menu_recipes: Option<String>,
}

/// A component object from variant B. Field names upstream vary in case,
/// hence the aliases; the show flag arrives as either a string or a number.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuComponent {
    #[serde(default, alias = "IsShowOnMenu")]
    pub is_show_on_menu: Option<Value>,
    #[serde(default)]
    pub spanish_alternate_name: Option<String>,
    #[serde(default)]
    pub english_alternate_name: Option<String>,
    #[serde(default)]
    pub component_name: Option<String>,
    #[serde(default, alias = "ComponentEnglishName")]
    pub component_english_name: Option<String>,
}

/// The three record shapes, in extraction priority order.
enum MenuVariant<'a> {
    Markup(&'a str),
    Components(&'a [MenuComponent]),
    CommaList(&'a str),
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("markup parse failed: {0}")]
    Markup(String),
}

impl RawMenuEntry {
    fn variants(&self) -> Vec<MenuVariant<'_>> {
        let mut variants = Vec::new();
        if let Some(xml) = self.xml_menu_recipes.as_deref() {
            if !xml.trim().is_empty() {
                variants.push(MenuVariant::Markup(xml));
            }
        }
        if let Some(components) = self.all_menu_recipes.as_deref() {
            if !components.is_empty() {
                variants.push(MenuVariant::Components(components));
            }
        }
        if let Some(list) = self.menu_recipes.as_deref() {
            if !list.trim().is_empty() {
                variants.push(MenuVariant::CommaList(list));
            }
        }
        variants
    }
}

/// Extract the deduplicated, normalized display names for one entry.
///
/// Variants are tried A -> B -> C; a variant that errors or yields nothing
/// falls through to the next. An entry with no usable variant yields an
/// empty list, never an error.
pub fn extract_items(entry: &RawMenuEntry, locale: Locale) -> Vec<String> {
    for variant in entry.variants() {
        let items = match extract_variant(&variant, locale) {
            Ok(items) => items,
            Err(err) => {
                debug!("menu variant unusable, trying next: {}", err);
                Vec::new()
            }
        };
        if !items.is_empty() {
            return items;
        }
    }
    Vec::new()
}

fn extract_variant(variant: &MenuVariant<'_>, locale: Locale) -> Result<Vec<String>, ExtractError> {
    match variant {
        MenuVariant::Markup(xml) => extract_markup(xml, locale),
        MenuVariant::Components(components) => Ok(extract_components(components, locale)),
        MenuVariant::CommaList(list) => Ok(extract_comma_list(list)),
    }
}

/// Variant A: parse the markup blob and walk its component nodes in document
/// order. html5ever lowercases element and attribute names, so lookups here
/// use lowercase keys. Fields may arrive as attributes or as child elements
/// (the upstream emits both shapes), so `node_field` checks both.
fn extract_markup(xml: &str, locale: Locale) -> Result<Vec<String>, ExtractError> {
    use scraper::{Html, Selector};

    let fragment = Html::parse_fragment(xml);
    let everything =
        Selector::parse("*").map_err(|e| ExtractError::Markup(e.to_string()))?;

    let mut items = Vec::new();
    let mut seen = HashSet::new();
    for node in fragment.select(&everything) {
        // Only nodes explicitly flagged for display count.
        if node_field(&node, "isshowonmenu").as_deref() != Some("1") {
            continue;
        }
        let raw = match locale {
            Locale::Spanish => first_node_field(
                &node,
                &["componentspanishname", "componentenglishname", "componentname"],
            ),
            Locale::English => {
                first_node_field(&node, &["componentenglishname", "componentname"])
            }
        };
        push_unique(&mut items, &mut seen, normalize_name(&raw));
    }
    Ok(items)
}

/// A markup field, from the attribute form or a direct child element's text.
fn node_field(node: &scraper::ElementRef<'_>, name: &str) -> Option<String> {
    if let Some(value) = node.value().attr(name) {
        return Some(value.to_string());
    }
    node.children()
        .filter_map(scraper::ElementRef::wrap)
        .find(|child| child.value().name() == name)
        .map(|child| child.text().collect::<String>().trim().to_string())
}

/// First non-empty field along a locale preference chain.
fn first_node_field(node: &scraper::ElementRef<'_>, names: &[&str]) -> String {
    for name in names {
        if let Some(value) = node_field(node, name) {
            if !value.trim().is_empty() {
                return value;
            }
        }
    }
    String::new()
}

/// Variant B: structured component list with the alternate-name fields.
fn extract_components(components: &[MenuComponent], locale: Locale) -> Vec<String> {
    let mut items = Vec::new();
    let mut seen = HashSet::new();
    for c in components {
        if !show_flag_is_set(c.is_show_on_menu.as_ref()) {
            continue;
        }
        let raw = match locale {
            Locale::Spanish => first_nonempty(&[
                c.spanish_alternate_name.as_deref(),
                c.english_alternate_name.as_deref(),
                c.component_name.as_deref(),
                c.component_english_name.as_deref(),
            ]),
            Locale::English => first_nonempty(&[
                c.english_alternate_name.as_deref(),
                c.component_name.as_deref(),
                c.component_english_name.as_deref(),
            ]),
        };
        push_unique(&mut items, &mut seen, normalize_name(raw));
    }
    items
}

/// Variant C: comma-delimited names.
fn extract_comma_list(list: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut seen = HashSet::new();
    for piece in list.split(',') {
        push_unique(&mut items, &mut seen, normalize_name(piece));
    }
    items
}

/// The upstream show flag means true only when it stringifies to `"1"`.
fn show_flag_is_set(flag: Option<&Value>) -> bool {
    match flag {
        Some(Value::String(s)) => s == "1",
        Some(Value::Number(n)) => n.to_string() == "1",
        _ => false,
    }
}

fn first_nonempty<'a>(candidates: &[Option<&'a str>]) -> &'a str {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|s| !s.trim().is_empty())
        .unwrap_or("")
}

/// Append a normalized name, keeping first occurrence under case-insensitive
/// comparison and dropping empties.
fn push_unique(items: &mut Vec<String>, seen: &mut HashSet<String>, name: String) {
    if name.is_empty() {
        return;
    }
    if seen.insert(name.to_lowercase()) {
        items.push(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_with_markup(xml: &str) -> RawMenuEntry {
        RawMenuEntry {
            xml_menu_recipes: Some(xml.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn comma_list_normalizes_and_dedupes_in_order() {
        let entry = RawMenuEntry {
            menu_recipes: Some(
                "Pizza Cheese Pre-Made 8 Slices, Pizza Pepperoni Pre-Made 8 Slices, Zucchini Sauteed"
                    .to_string(),
            ),
            ..Default::default()
        };
        assert_eq!(
            extract_items(&entry, Locale::English),
            vec!["Cheese Pizza", "Pepperoni Pizza", "Zucchini Sauteed"]
        );
    }

    #[test]
    fn comma_list_drops_case_insensitive_duplicates() {
        let entry = RawMenuEntry {
            menu_recipes: Some("Milk, MILK, milk, Apple".to_string()),
            ..Default::default()
        };
        assert_eq!(extract_items(&entry, Locale::English), vec!["Milk", "Apple"]);
    }

    #[test]
    fn markup_respects_show_flag() {
        let xml = r#"<Menus>
            <Recipe IsShowOnMenu="1" ComponentEnglishName="Pizza Cheese"/>
            <Recipe IsShowOnMenu="0" ComponentEnglishName="Hidden Item"/>
            <Recipe ComponentEnglishName="Unflagged Item"/>
            <Recipe IsShowOnMenu="1" ComponentEnglishName="Milk"/>
        </Menus>"#;
        assert_eq!(
            extract_items(&entry_with_markup(xml), Locale::English),
            vec!["Cheese Pizza", "Milk"]
        );
    }

    #[test]
    fn markup_prefers_spanish_name_for_es() {
        let xml = r#"<Menus>
            <Recipe IsShowOnMenu="1" ComponentSpanishName="Leche" ComponentEnglishName="Milk"/>
            <Recipe IsShowOnMenu="1" ComponentEnglishName="Apple"/>
        </Menus>"#;
        assert_eq!(
            extract_items(&entry_with_markup(xml), Locale::Spanish),
            vec!["Leche", "Apple"]
        );
    }

    #[test]
    fn markup_single_node_root() {
        let xml = r#"<Recipe IsShowOnMenu="1" ComponentEnglishName="Turkey Sandwich"/>"#;
        assert_eq!(
            extract_items(&entry_with_markup(xml), Locale::English),
            vec!["Turkey Sandwich"]
        );
    }

    #[test]
    fn markup_accepts_child_element_field_form() {
        // Some upstream payloads carry fields as child elements instead of
        // attributes, notably on single-node roots.
        let xml = r#"<Recipe>
            <IsShowOnMenu>1</IsShowOnMenu>
            <ComponentEnglishName>Turkey Sandwich</ComponentEnglishName>
        </Recipe>"#;
        assert_eq!(
            extract_items(&entry_with_markup(xml), Locale::English),
            vec!["Turkey Sandwich"]
        );

        let hidden = r#"<Recipe>
            <IsShowOnMenu>0</IsShowOnMenu>
            <ComponentEnglishName>Hidden Item</ComponentEnglishName>
        </Recipe>"#;
        assert!(extract_items(&entry_with_markup(hidden), Locale::English).is_empty());
    }

    #[test]
    fn empty_markup_falls_through_to_components() {
        let entry = RawMenuEntry {
            xml_menu_recipes: Some("<Menus></Menus>".to_string()),
            all_menu_recipes: Some(vec![MenuComponent {
                is_show_on_menu: Some(Value::String("1".to_string())),
                english_alternate_name: Some("Hamburger".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        };
        assert_eq!(extract_items(&entry, Locale::English), vec!["Hamburger"]);
    }

    #[test]
    fn components_fall_through_to_comma_list_when_all_hidden() {
        let entry = RawMenuEntry {
            all_menu_recipes: Some(vec![MenuComponent {
                is_show_on_menu: Some(Value::String("0".to_string())),
                english_alternate_name: Some("Hidden".to_string()),
                ..Default::default()
            }]),
            menu_recipes: Some("Garden Salad".to_string()),
            ..Default::default()
        };
        assert_eq!(extract_items(&entry, Locale::English), vec!["Garden Salad"]);
    }

    #[test]
    fn numeric_show_flag_counts_as_set() {
        let entry = RawMenuEntry {
            all_menu_recipes: Some(vec![
                MenuComponent {
                    is_show_on_menu: Some(Value::Number(1.into())),
                    english_alternate_name: Some("Chicken Nuggets".to_string()),
                    ..Default::default()
                },
                MenuComponent {
                    is_show_on_menu: Some(Value::Number(2.into())),
                    english_alternate_name: Some("Not Shown".to_string()),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };
        assert_eq!(
            extract_items(&entry, Locale::English),
            vec!["Chicken Nuggets"]
        );
    }

    #[test]
    fn component_name_chain_skips_empty_fields() {
        let entry = RawMenuEntry {
            all_menu_recipes: Some(vec![MenuComponent {
                is_show_on_menu: Some(Value::String("1".to_string())),
                english_alternate_name: Some("".to_string()),
                component_name: Some("Garden Salad".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        };
        assert_eq!(extract_items(&entry, Locale::English), vec!["Garden Salad"]);
    }

    #[test]
    fn entry_with_nothing_usable_is_empty() {
        assert!(extract_items(&RawMenuEntry::default(), Locale::English).is_empty());
        let blank = RawMenuEntry {
            xml_menu_recipes: Some("   ".to_string()),
            menu_recipes: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(extract_items(&blank, Locale::English).is_empty());
    }

    #[test]
    fn upstream_json_deserializes_with_case_variant_fields() {
        let json = r#"{
            "allMenuRecipes": [
                {"IsShowOnMenu": "1", "ComponentEnglishName": "Milk"},
                {"isShowOnMenu": "1", "englishAlternateName": "Apple"}
            ]
        }"#;
        let entry: RawMenuEntry = serde_json::from_str(json).unwrap();
        assert_eq!(extract_items(&entry, Locale::English), vec!["Milk", "Apple"]);
    }
}
