//! Menu item name cleanup.
//!
//! Upstream catalog names arrive in kitchen-inventory form ("Pizza Cheese
//! Pre-Made 8 Slices"). This module rewrites them into display form. The
//! rewrite order matters: suffix strips run before the pizza reorder, and
//! title-casing runs last. Every step degrades to best-effort output and
//! never fails.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static VENDOR_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bPre-?Made\b.*$").unwrap());
static SIZE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b\d+\s*(?:Slices|Slice|ct)\b$").unwrap());
static TRAILING_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,\s*$").unwrap());
static TRAILING_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+-\s*$").unwrap());
static TRAILING_PAREN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\(.+\)$").unwrap());
static SPACED_SLASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+/+\s+").unwrap());
static LEADING_ADJECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:classic|traditional|fresh|hot|warm)\s+").unwrap());
static PIZZA_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^pizza\s+(.*)$").unwrap());
static PIZZA_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(.*)\s+pizza$").unwrap());

/// Rewrite a raw catalog name into its display form.
///
/// Empty (or all-whitespace) input yields an empty string. The transform is
/// idempotent: normalizing an already-normalized name is a no-op.
pub fn normalize_name(raw: &str) -> String {
    let s = WHITESPACE.replace_all(raw, " ");
    let s = s.trim();
    if s.is_empty() {
        return String::new();
    }

    let s = VENDOR_SUFFIX.replace(s, "");
    let s = SIZE_SUFFIX.replace(&s, "");
    let s = TRAILING_COMMA.replace(&s, "");
    let s = TRAILING_DASH.replace(&s, "");
    let s = TRAILING_PAREN.replace(&s, "");
    let s = SPACED_SLASH.replace(&s, " / ");

    // Suffix strips can leave irregular spacing behind.
    let s = WHITESPACE.replace_all(&s, " ");
    let s = s.trim();

    let s = LEADING_ADJECTIVE.replace(s, "");

    // "Pizza Cheese" reads backwards; flip it to "Cheese Pizza".
    let s = if let Some(caps) = PIZZA_PREFIX.captures(&s) {
        format!("{} Pizza", &caps[1])
    } else if let Some(caps) = PIZZA_SUFFIX.captures(&s) {
        format!("{} Pizza", &caps[1])
    } else {
        s.into_owned()
    };

    title_case(&s)
}

/// Uppercase the first character of each space-delimited word, lowercase the
/// rest. Zero-length words pass through.
fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_vendor_and_size_suffixes() {
        assert_eq!(normalize_name("Pizza Cheese Pre-Made 8 Slices"), "Cheese Pizza");
        assert_eq!(normalize_name("Pizza Pepperoni Pre-Made 8 Slices"), "Pepperoni Pizza");
        assert_eq!(normalize_name("Garlic Bread 2 ct"), "Garlic Bread");
        assert_eq!(normalize_name("Breadstick PreMade 12 Slices"), "Breadstick");
    }

    #[test]
    fn strips_leading_adjectives_once() {
        assert_eq!(normalize_name(" Classic Cheese Pizza "), "Cheese Pizza");
        assert_eq!(normalize_name("Fresh Garden Salad"), "Garden Salad");
        // Only the first adjective goes; "Fresh Fruit" keeps its second word.
        assert_eq!(normalize_name("Fresh Fresh Fruit"), "Fresh Fruit");
    }

    #[test]
    fn reorders_pizza_phrasing() {
        assert_eq!(normalize_name("Pizza Cheese"), "Cheese Pizza");
        assert_eq!(normalize_name("pepperoni pizza"), "Pepperoni Pizza");
    }

    #[test]
    fn plain_names_only_get_title_cased() {
        assert_eq!(normalize_name("Watermelon Sliced"), "Watermelon Sliced");
        assert_eq!(normalize_name("zucchini sauteed"), "Zucchini Sauteed");
        assert_eq!(normalize_name("MILK"), "Milk");
    }

    #[test]
    fn strips_trailing_punctuation_and_groups() {
        assert_eq!(normalize_name("Turkey Sandwich,"), "Turkey Sandwich");
        assert_eq!(normalize_name("Chicken Nuggets -"), "Chicken Nuggets");
        assert_eq!(normalize_name("Apple Slices (large)"), "Apple Slices");
        assert_eq!(normalize_name("Mac   /  Cheese"), "Mac / Cheese");
    }

    #[test]
    fn empty_and_whitespace_input() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("   "), "");
        assert_eq!(normalize_name("\t\n"), "");
    }

    #[test]
    fn idempotent_over_corpus() {
        let corpus = [
            "Pizza Cheese Pre-Made 8 Slices",
            " Classic Cheese Pizza ",
            "Watermelon Sliced",
            "Mac   /  Cheese",
            "Turkey Sandwich,",
            "Fresh Garden Salad",
            "Apple Slices (large)",
            "zucchini sauteed",
            "",
        ];
        for raw in corpus {
            let once = normalize_name(raw);
            assert_eq!(normalize_name(&once), once, "not idempotent for {:?}", raw);
        }
    }
}
