use crate::adapter::attributes::WidgetSetup;
use crate::core::candidate::Candidate;
use crate::core::config::Config;
use crate::core::pipeline::parse_list;
use crate::core::search::{Matcher, Ranker};
use crate::source::{ExecTransport, SourceProvider};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported config format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Contains,
    StartsWith,
    EndsWith,
}

impl From<FilterKind> for Matcher {
    fn from(kind: FilterKind) -> Self {
        match kind {
            FilterKind::Contains => Matcher::contains(),
            FilterKind::StartsWith => Matcher::starts_with(),
            FilterKind::EndsWith => Matcher::ends_with(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKind {
    ByLength,
    Alphabetical,
    None,
}

impl From<SortKind> for Ranker {
    fn from(kind: SortKind) -> Self {
        match kind {
            SortKind::ByLength => Ranker::by_length(),
            SortKind::Alphabetical => Ranker::alphabetical(),
            SortKind::None => Ranker::none(),
        }
    }
}

/// Either `[a, b]` or `"a, b"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListSpec {
    Items(Vec<String>),
    Csv(String),
}

impl ListSpec {
    pub fn into_candidates(self) -> Vec<Candidate> {
        match self {
            ListSpec::Items(items) => items.into_iter().map(Candidate::plain).collect(),
            ListSpec::Csv(raw) => parse_list(raw.as_str()),
        }
    }
}

/// A program that answers queries: run with the target as last argument,
/// prints a JSON array on stdout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_target() -> String {
    "suggest".to_string()
}

/// Widget options as written in a YAML or JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetOptions {
    pub label: Option<String>,
    pub min_chars: Option<usize>,
    pub max_items: Option<usize>,
    pub auto_first: Option<bool>,
    pub show_hint: Option<bool>,
    pub filter: Option<FilterKind>,
    pub sort: Option<SortKind>,
    pub list: Option<ListSpec>,
    pub source: Option<SourceCommand>,
    /// Markup-style `data-*` attributes, applied last.
    pub attributes: IndexMap<String, String>,
}

impl WidgetOptions {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str, &Path) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let options = parse(raw.as_str(), path)?;
        tracing::debug!(path = %path.display(), "widget options loaded");
        Ok(options)
    }

    fn from_yaml_str(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_yaml::from_str(raw).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_json_str(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Options over defaults, then attributes over both.
    pub fn into_setup(self) -> WidgetSetup {
        let mut config = Config::default();
        if let Some(min_chars) = self.min_chars {
            config = config.with_min_chars(min_chars);
        }
        if let Some(max_items) = self.max_items {
            config = config.with_max_items(max_items);
        }
        if let Some(auto_first) = self.auto_first {
            config = config.with_auto_first(auto_first);
        }
        if let Some(show_hint) = self.show_hint {
            config = config.with_show_hint(show_hint);
        }
        if let Some(filter) = self.filter {
            config = config.with_matcher(filter.into());
        }
        if let Some(sort) = self.sort {
            config = config.with_ranker(sort.into());
        }
        if let Some(source) = self.source {
            let mut transport = ExecTransport::new(source.program).with_args(source.args);
            if let Some(timeout_ms) = source.timeout_ms {
                transport = transport.with_timeout_ms(timeout_ms);
            }
            config = config
                .with_source(SourceProvider::remote(source.target))
                .with_transport(Arc::new(transport));
        }

        let mut setup = Config::from_attributes(&self.attributes, config);
        if setup.list.is_none() {
            setup.list = self.list.map(ListSpec::into_candidates);
        }
        setup
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, FilterKind, ListSpec, WidgetOptions};
    use std::io::Write;

    fn write_temp(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("temp file");
        file.write_all(body.as_bytes()).expect("write");
        file
    }

    #[test]
    fn loads_yaml_options() {
        let file = write_temp(
            ".yaml",
            "min_chars: 1\nfilter: starts_with\nlist: [pear, peach]\nattributes:\n  data-maxitems: \"3\"\n",
        );
        let options = WidgetOptions::load(file.path()).expect("load");
        assert_eq!(options.filter, Some(FilterKind::StartsWith));
        assert_eq!(
            options.list,
            Some(ListSpec::Items(vec!["pear".to_string(), "peach".to_string()]))
        );

        let setup = options.into_setup();
        assert_eq!(setup.config.min_chars, 1);
        assert_eq!(setup.config.max_items, 3);
        assert!(setup.config.matcher.matches("pear", "pe"));
        assert!(!setup.config.matcher.matches("apple", "pl"));
        assert_eq!(setup.list.map(|list| list.len()), Some(2));
    }

    #[test]
    fn loads_json_with_csv_list() {
        let file = write_temp(".json", r#"{"list": "Ada, Rust", "show_hint": true}"#);
        let setup = WidgetOptions::load(file.path()).expect("load").into_setup();
        assert!(setup.config.show_hint);
        let labels: Vec<String> = setup
            .list
            .unwrap_or_default()
            .into_iter()
            .map(|candidate| candidate.label)
            .collect();
        assert_eq!(labels, vec!["Ada", "Rust"]);
    }

    #[test]
    fn attribute_list_wins_over_file_list() {
        let file = write_temp(
            ".yml",
            "list: [pear]\nattributes:\n  data-list: \"plum, fig\"\n",
        );
        let setup = WidgetOptions::load(file.path()).expect("load").into_setup();
        assert_eq!(setup.list.map(|list| list.len()), Some(2));
    }

    #[test]
    fn source_command_installs_transport() {
        let file = write_temp(".yaml", "source:\n  program: lookup\n  timeout_ms: 500\n");
        let setup = WidgetOptions::load(file.path()).expect("load").into_setup();
        assert!(setup.config.source.is_some());
        assert!(setup.config.transport.is_some());
    }

    #[test]
    fn rejects_unknown_extension_and_bad_input() {
        let file = write_temp(".toml", "min_chars = 1");
        assert!(matches!(
            WidgetOptions::load(file.path()),
            Err(ConfigError::UnsupportedFormat(_))
        ));

        let file = write_temp(".json", "{ nope");
        assert!(matches!(
            WidgetOptions::load(file.path()),
            Err(ConfigError::Json { .. })
        ));

        let file = write_temp(".yaml", "colour: red\n");
        assert!(matches!(
            WidgetOptions::load(file.path()),
            Err(ConfigError::Yaml { .. })
        ));

        assert!(matches!(
            WidgetOptions::load("/definitely/missing.yaml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
