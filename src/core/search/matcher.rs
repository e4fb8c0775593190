use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

pub type MatchFn = dyn Fn(&str, &str) -> bool + Send + Sync;

/// Inclusion predicate: `(candidate_text, query) -> bool`.
#[derive(Clone)]
pub struct Matcher(Arc<MatchFn>);

impl Matcher {
    pub fn new(f: impl Fn(&str, &str) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn contains() -> Self {
        Self::literal(Anchor::Anywhere)
    }

    pub fn starts_with() -> Self {
        Self::literal(Anchor::Start)
    }

    pub fn ends_with() -> Self {
        Self::literal(Anchor::End)
    }

    fn literal(anchor: Anchor) -> Self {
        let cache = PatternCache::new(anchor);
        Self::new(move |text, query| cache.is_match(text, query))
    }

    pub fn matches(&self, text: &str, query: &str) -> bool {
        (self.0)(text, query)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::contains()
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Matcher(..)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Anywhere,
    Start,
    End,
}

/// Case-insensitive literal containment of the trimmed query.
pub fn contains(text: &str, query: &str) -> bool {
    literal_match(text, query, Anchor::Anywhere)
}

pub fn starts_with(text: &str, query: &str) -> bool {
    literal_match(text, query, Anchor::Start)
}

pub fn ends_with(text: &str, query: &str) -> bool {
    literal_match(text, query, Anchor::End)
}

struct CachedPattern {
    query: String,
    pattern: Option<Regex>,
}

/// Keeps the pattern of the last query, so filtering a list compiles once.
struct PatternCache {
    anchor: Anchor,
    last: Mutex<Option<CachedPattern>>,
    #[cfg(test)]
    compiled: std::sync::atomic::AtomicUsize,
}

impl PatternCache {
    fn new(anchor: Anchor) -> Self {
        Self {
            anchor,
            last: Mutex::new(None),
            #[cfg(test)]
            compiled: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    fn is_match(&self, text: &str, query: &str) -> bool {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if last.as_ref().is_none_or(|cached| cached.query != query) {
            #[cfg(test)]
            self.compiled.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            *last = Some(CachedPattern {
                query: query.to_string(),
                pattern: literal_pattern(query, self.anchor),
            });
        }
        last.as_ref()
            .and_then(|cached| cached.pattern.as_ref())
            .is_some_and(|pattern| pattern.is_match(text))
    }
}

fn literal_match(text: &str, query: &str, anchor: Anchor) -> bool {
    match literal_pattern(query, anchor) {
        Some(pattern) => pattern.is_match(text),
        None => false,
    }
}

fn literal_pattern(query: &str, anchor: Anchor) -> Option<Regex> {
    let escaped = regex::escape(query.trim());
    let source = match anchor {
        Anchor::Anywhere => escaped,
        Anchor::Start => format!("^{escaped}"),
        Anchor::End => format!("{escaped}$"),
    };
    RegexBuilder::new(source.as_str())
        .case_insensitive(true)
        .build()
        .ok()
}

/// Char ranges `[start, end)` of every case-insensitive literal occurrence
/// of the trimmed query. Empty query yields no ranges.
pub fn find_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let Some(pattern) = literal_pattern(query, Anchor::Anywhere) else {
        return Vec::new();
    };
    pattern
        .find_iter(text)
        .filter(|found| !found.is_empty())
        .map(|found| {
            let start = text[..found.start()].chars().count();
            let len = found.as_str().chars().count();
            (start, start + len)
        })
        .collect()
}
