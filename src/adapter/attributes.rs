//! Markup-style configuration: string attributes named `data-<option>`
//! (lowercased) override options, which override defaults.

use crate::core::candidate::Candidate;
use crate::core::config::Config;
use crate::core::pipeline::parse_list;
use crate::source::SourceProvider;
use indexmap::IndexMap;

pub const ATTRIBUTE_PREFIX: &str = "data-";

/// A configuration plus the static list, if one was given.
#[derive(Debug, Clone, Default)]
pub struct WidgetSetup {
    pub config: Config,
    pub list: Option<Vec<Candidate>>,
}

pub fn attribute_name(option: &str) -> String {
    format!("{ATTRIBUTE_PREFIX}{}", option.to_lowercase())
}

impl Config {
    /// Applies `attributes` over `options`.
    ///
    /// Numeric attributes keep their leading integer; anything else (or a
    /// missing attribute) falls back to the option. Boolean attributes are
    /// true when present, whatever their text. `data-list` is split on
    /// commas; `data-source` names a remote target queried with `q`.
    pub fn from_attributes(attributes: &IndexMap<String, String>, options: Config) -> WidgetSetup {
        let mut config = options;
        let lookup = |option: &str| attributes.get(attribute_name(option).as_str());

        if let Some(min_chars) = lookup("minChars").and_then(|raw| parse_count(raw)) {
            config.min_chars = min_chars;
        }
        if let Some(max_items) = lookup("maxItems").and_then(|raw| parse_count(raw)) {
            config.max_items = max_items;
        }
        if lookup("autoFirst").is_some() {
            config.auto_first = true;
        }
        if lookup("showHint").is_some() {
            config.show_hint = true;
        }
        if let Some(target) = lookup("source").filter(|raw| !raw.is_empty()) {
            config.source = Some(SourceProvider::remote(target.clone()));
        }
        let list = lookup("list").map(|raw| parse_list(raw));

        if !attributes.is_empty() {
            tracing::debug!(count = attributes.len(), "attributes applied");
        }
        WidgetSetup { config, list }
    }
}

/// Leading integer of `raw`, after optional whitespace and sign. Negative
/// counts clamp to zero.
pub fn parse_count(raw: &str) -> Option<usize> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map(|(idx, _)| idx)
        .unwrap_or(digits.len());
    let value = digits[..end].parse::<usize>().ok()?;
    Some(if negative { 0 } else { value })
}

#[cfg(test)]
mod tests {
    use super::{attribute_name, parse_count};
    use crate::core::config::{Config, DEFAULT_MAX_ITEMS, DEFAULT_MIN_CHARS};
    use indexmap::IndexMap;

    fn attrs(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn names_are_prefixed_and_lowercased() {
        assert_eq!(attribute_name("minChars"), "data-minchars");
    }

    #[test]
    fn parses_leading_integer() {
        assert_eq!(parse_count("3"), Some(3));
        assert_eq!(parse_count(" 12px"), Some(12));
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count("-4"), Some(0));
        assert_eq!(parse_count("abc"), None);
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn attributes_override_options() {
        let options = Config::default().with_min_chars(4);
        let setup = Config::from_attributes(
            &attrs(&[("data-maxitems", "5"), ("data-autofirst", "false")]),
            options,
        );
        assert_eq!(setup.config.min_chars, 4);
        assert_eq!(setup.config.max_items, 5);
        assert!(setup.config.auto_first);
        assert!(!setup.config.show_hint);
        assert!(setup.list.is_none());
    }

    #[test]
    fn malformed_numbers_fall_back() {
        let setup = Config::from_attributes(
            &attrs(&[("data-minchars", "lots"), ("data-maxitems", "")]),
            Config::default(),
        );
        assert_eq!(setup.config.min_chars, DEFAULT_MIN_CHARS);
        assert_eq!(setup.config.max_items, DEFAULT_MAX_ITEMS);
    }

    #[test]
    fn list_and_source_attributes() {
        let setup = Config::from_attributes(
            &attrs(&[("data-list", "Ada, Java ,Rust"), ("data-source", "/langs")]),
            Config::default(),
        );
        let labels: Vec<String> = setup
            .list
            .unwrap_or_default()
            .into_iter()
            .map(|candidate| candidate.label)
            .collect();
        assert_eq!(labels, vec!["Ada", "Java", "Rust"]);
        assert!(setup.config.source.is_some());
    }
}
