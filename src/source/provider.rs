use crate::core::candidate::Candidate;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// A GET-style request for a JSON body, issued through a
/// [`Transport`](crate::source::Transport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub target: String,
    pub options: IndexMap<String, String>,
}

impl RequestDescriptor {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            options: IndexMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn method(&self) -> &str {
        "GET"
    }
}

/// What a source provider hands back for one query.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceResponse {
    /// Final candidates, already filtered and ordered by the provider.
    Items(Vec<Candidate>),
    /// Candidates have to be fetched.
    Request(RequestDescriptor),
    /// Provider has nothing to say for this query; state stays as it is.
    Skip,
}

impl SourceResponse {
    pub fn items<I, C>(items: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Candidate>,
    {
        Self::Items(items.into_iter().map(Into::into).collect())
    }
}

pub type ProviderFn = dyn Fn(&str) -> SourceResponse + Send + Sync;

#[derive(Clone)]
pub struct SourceProvider(Arc<ProviderFn>);

impl SourceProvider {
    pub fn new(f: impl Fn(&str) -> SourceResponse + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Provider that always fetches from `target`, with the query passed as
    /// the `q` option.
    pub fn remote(target: impl Into<String>) -> Self {
        let target = target.into();
        Self::new(move |query| {
            SourceResponse::Request(RequestDescriptor::new(target.clone()).with_option("q", query))
        })
    }

    pub fn resolve(&self, query: &str) -> SourceResponse {
        (self.0)(query)
    }
}

impl fmt::Debug for SourceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SourceProvider(..)")
    }
}
