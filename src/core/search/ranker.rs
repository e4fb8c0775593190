use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

pub type CompareFn = dyn Fn(&str, &str) -> Ordering + Send + Sync;

/// Comparator deciding suggestion order. Must be a total order.
#[derive(Clone)]
pub struct Ranker(Arc<CompareFn>);

impl Ranker {
    pub fn new(f: impl Fn(&str, &str) -> Ordering + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn by_length() -> Self {
        Self::new(by_length)
    }

    pub fn alphabetical() -> Self {
        Self::new(|a: &str, b: &str| a.cmp(b))
    }

    /// Keeps source order; `sort_by` is stable.
    pub fn none() -> Self {
        Self::new(|_: &str, _: &str| Ordering::Equal)
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        (self.0)(a, b)
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::by_length()
    }
}

impl fmt::Debug for Ranker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ranker(..)")
    }
}

/// Shorter first, ties broken lexicographically.
pub fn by_length(a: &str, b: &str) -> Ordering {
    a.chars()
        .count()
        .cmp(&b.chars().count())
        .then_with(|| a.cmp(b))
}
