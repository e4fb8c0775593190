use crate::core::candidate::Candidate;
use crate::core::search::{Matcher, Ranker};
use crate::core::value::Value;
use crate::source::provider::SourceProvider;
use crate::source::transport::Transport;
use crate::ui::item::ItemRenderer;
use std::fmt;
use std::sync::Arc;

pub type ReplaceFn = dyn Fn(&Candidate) -> String + Send + Sync;
pub type HintFn = dyn Fn(&Candidate) -> String + Send + Sync;
pub type DataFn = dyn Fn(Value, &str) -> Option<Candidate> + Send + Sync;

pub const DEFAULT_MIN_CHARS: usize = 2;
pub const DEFAULT_MAX_ITEMS: usize = 10;

/// Per-widget configuration. Built once, read-only afterwards.
#[derive(Clone)]
pub struct Config {
    pub min_chars: usize,
    pub max_items: usize,
    pub auto_first: bool,
    pub show_hint: bool,
    pub matcher: Matcher,
    pub ranker: Ranker,
    pub item_renderer: ItemRenderer,
    /// Text written into the field when a candidate is committed.
    pub replace: Arc<ReplaceFn>,
    /// Text shown on the hint surface for the highlighted candidate.
    pub hint: Arc<HintFn>,
    /// Maps one fetched payload to a candidate; `None` drops it.
    pub data: Arc<DataFn>,
    pub source: Option<SourceProvider>,
    pub transport: Option<Arc<dyn Transport>>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn with_auto_first(mut self, auto_first: bool) -> Self {
        self.auto_first = auto_first;
        self
    }

    pub fn with_show_hint(mut self, show_hint: bool) -> Self {
        self.show_hint = show_hint;
        self
    }

    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_ranker(mut self, ranker: Ranker) -> Self {
        self.ranker = ranker;
        self
    }

    pub fn with_item_renderer(mut self, item_renderer: ItemRenderer) -> Self {
        self.item_renderer = item_renderer;
        self
    }

    pub fn with_replace(
        mut self,
        replace: impl Fn(&Candidate) -> String + Send + Sync + 'static,
    ) -> Self {
        self.replace = Arc::new(replace);
        self
    }

    pub fn with_hint(mut self, hint: impl Fn(&Candidate) -> String + Send + Sync + 'static) -> Self {
        self.hint = Arc::new(hint);
        self
    }

    pub fn with_data(
        mut self,
        data: impl Fn(Value, &str) -> Option<Candidate> + Send + Sync + 'static,
    ) -> Self {
        self.data = Arc::new(data);
        self
    }

    pub fn with_source(mut self, source: SourceProvider) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_CHARS,
            max_items: DEFAULT_MAX_ITEMS,
            auto_first: false,
            show_hint: false,
            matcher: Matcher::default(),
            ranker: Ranker::default(),
            item_renderer: ItemRenderer::default(),
            replace: Arc::new(|candidate: &Candidate| candidate.value.clone()),
            hint: Arc::new(|candidate: &Candidate| candidate.label.clone()),
            data: Arc::new(|value: Value, _query: &str| Candidate::from_value(value)),
            source: None,
            transport: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("min_chars", &self.min_chars)
            .field("max_items", &self.max_items)
            .field("auto_first", &self.auto_first)
            .field("show_hint", &self.show_hint)
            .field("source", &self.source)
            .field("transport", &self.transport.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, DEFAULT_MAX_ITEMS, DEFAULT_MIN_CHARS};
    use crate::core::candidate::Candidate;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.min_chars, DEFAULT_MIN_CHARS);
        assert_eq!(config.max_items, DEFAULT_MAX_ITEMS);
        assert!(!config.auto_first);
        assert!(!config.show_hint);
        assert!(config.source.is_none());
        let candidate = Candidate::new("Pear (fruit)", "pear");
        assert_eq!((config.replace)(&candidate), "pear");
        assert_eq!((config.hint)(&candidate), "Pear (fruit)");
    }

    #[test]
    fn builder_overrides() {
        let config = Config::new()
            .with_min_chars(0)
            .with_max_items(3)
            .with_auto_first(true)
            .with_replace(|candidate| candidate.label.to_uppercase());
        assert_eq!(config.min_chars, 0);
        assert_eq!(config.max_items, 3);
        assert!(config.auto_first);
        assert_eq!((config.replace)(&Candidate::plain("fig")), "FIG");
    }
}
