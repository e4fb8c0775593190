use crate::core::candidate::{Candidate, SuggestionSet};
use crate::core::config::Config;
use crate::source::provider::SourceResponse;
use crate::source::response::parse_body;
use crate::source::transport::FetchError;
use crate::task::{FetchCompletion, FetchExecutor, FetchInvocation, FetchRunState};
use regex::Regex;
use std::sync::{Arc, LazyLock};

static LIST_SEPARATOR: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s*,\s*").ok());

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// A new set to display; empty sets close the list.
    Ready(SuggestionSet),
    /// A fetch was issued; its result arrives through [`SuggestionPipeline::poll`].
    Pending { run_id: u64 },
    /// Below the threshold or nothing to draw from; close.
    Closed,
    /// Leave the current state as it is.
    Unchanged,
}

/// A fetch of the latest run that has come back.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedRun {
    pub run_id: u64,
    /// The query the fetch was issued for.
    pub query: String,
    /// [`Evaluation::Ready`] on success, [`Evaluation::Unchanged`] on failure.
    pub evaluation: Evaluation,
}

/// Source, matcher, ranker, truncation.
pub struct SuggestionPipeline {
    config: Arc<Config>,
    list: Vec<Candidate>,
    executor: Option<FetchExecutor>,
    runs: FetchRunState,
}

impl SuggestionPipeline {
    pub fn new(config: Arc<Config>) -> Self {
        let executor = config
            .transport
            .as_ref()
            .map(|transport| FetchExecutor::new(Arc::clone(transport)));
        Self {
            config,
            list: Vec::new(),
            executor,
            runs: FetchRunState::default(),
        }
    }

    pub fn with_executor(mut self, executor: FetchExecutor) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn with_list(mut self, list: Vec<Candidate>) -> Self {
        self.list = list;
        self
    }

    pub fn set_list(&mut self, list: Vec<Candidate>) {
        self.list = list;
    }

    pub fn list(&self) -> &[Candidate] {
        self.list.as_slice()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn runs(&self) -> &FetchRunState {
        &self.runs
    }

    pub fn evaluate(&mut self, query: &str) -> Evaluation {
        let run_id = self.runs.next_run_id();

        if query.chars().count() < self.config.min_chars {
            return Evaluation::Closed;
        }

        if let Some(source) = self.config.source.as_ref() {
            return match source.resolve(query) {
                SourceResponse::Items(items) => {
                    Evaluation::Ready(truncate(items, self.config.max_items))
                }
                SourceResponse::Request(request) => {
                    let Some(executor) = self.executor.as_ref() else {
                        tracing::warn!(
                            target = %request.target,
                            error = %FetchError::NoTransport,
                            "fetch skipped"
                        );
                        return Evaluation::Unchanged;
                    };
                    tracing::debug!(run_id, target = %request.target, query, "fetch issued");
                    executor.spawn(FetchInvocation::new(run_id, query, request));
                    self.runs.on_started(run_id);
                    Evaluation::Pending { run_id }
                }
                SourceResponse::Skip => Evaluation::Unchanged,
            };
        }

        if self.list.is_empty() {
            return Evaluation::Closed;
        }

        let mut items = self
            .list
            .iter()
            .filter(|candidate| self.config.matcher.matches(candidate.label.as_str(), query))
            .cloned()
            .collect::<Vec<_>>();
        items.sort_by(|a, b| self.config.ranker.compare(a.label.as_str(), b.label.as_str()));
        Evaluation::Ready(truncate(items, self.config.max_items))
    }

    /// Drains finished fetches. Returns the outcome of the latest run once
    /// its fetch has finished, whether it produced a set or failed.
    pub fn poll(&mut self) -> Option<FinishedRun> {
        let ready = self.executor.as_ref()?.drain_ready();
        let mut outcome = None;
        for completion in ready {
            let run_id = completion.run_id;
            let query = completion.query.clone();
            let current = self.runs.is_current(run_id);
            let evaluation = self.apply_completion(completion);
            if current {
                outcome = Some(FinishedRun {
                    run_id,
                    query,
                    evaluation,
                });
            }
        }
        outcome
    }

    /// Turns a finished fetch into a set. Stale runs and failures yield
    /// [`Evaluation::Unchanged`].
    pub fn apply_completion(&mut self, completion: FetchCompletion) -> Evaluation {
        self.runs.on_finished(completion.run_id);
        if !self.runs.is_current(completion.run_id) {
            tracing::debug!(
                run_id = completion.run_id,
                latest = self.runs.latest_run_id(),
                "stale fetch discarded"
            );
            return Evaluation::Unchanged;
        }

        let parsed = completion
            .result
            .and_then(|body| parse_body(body.as_str()));
        let payloads = match parsed {
            Ok(payloads) => payloads,
            Err(error) => {
                tracing::warn!(
                    run_id = completion.run_id,
                    query = %completion.query,
                    %error,
                    "fetch failed"
                );
                return Evaluation::Unchanged;
            }
        };

        let mut items = payloads
            .into_iter()
            .filter_map(|payload| (self.config.data)(payload, completion.query.as_str()))
            .collect::<Vec<_>>();
        items.sort_by(|a, b| self.config.ranker.compare(a.label.as_str(), b.label.as_str()));
        Evaluation::Ready(truncate(items, self.config.max_items))
    }
}

fn truncate(mut items: Vec<Candidate>, max_items: usize) -> SuggestionSet {
    items.truncate(max_items);
    SuggestionSet::new(items)
}

/// Splits a comma-separated list, trimming blanks around each separator.
pub fn parse_list(raw: &str) -> Vec<Candidate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    match LIST_SEPARATOR.as_ref() {
        Some(separator) => separator
            .split(trimmed)
            .filter(|item| !item.is_empty())
            .map(Candidate::plain)
            .collect(),
        None => trimmed
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(Candidate::plain)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Evaluation, SuggestionPipeline, parse_list};
    use crate::core::candidate::Candidate;
    use crate::core::config::Config;
    use crate::core::search::Matcher;
    use crate::source::provider::{SourceProvider, SourceResponse};
    use crate::source::transport::{FetchError, StaticTransport};
    use crate::task::{FetchCompletion, FetchExecutor};
    use std::sync::Arc;

    fn fruits() -> Vec<Candidate> {
        ["pear", "peach", "plum"]
            .into_iter()
            .map(Candidate::plain)
            .collect()
    }

    fn labels(evaluation: &Evaluation) -> Vec<String> {
        match evaluation {
            Evaluation::Ready(set) => set.labels().into_iter().map(String::from).collect(),
            other => panic!("expected ready set, got {other:?}"),
        }
    }

    #[test]
    fn static_list_is_filtered_and_ranked() {
        let mut pipeline = SuggestionPipeline::new(Arc::new(Config::default())).with_list(fruits());
        assert_eq!(labels(&pipeline.evaluate("pe")), vec!["pear", "peach"]);
    }

    #[test]
    fn below_threshold_closes_without_fetching() {
        let mut pipeline = SuggestionPipeline::new(Arc::new(Config::default())).with_list(fruits());
        assert_eq!(pipeline.evaluate("p"), Evaluation::Closed);
        assert_eq!(pipeline.evaluate(""), Evaluation::Closed);
    }

    #[test]
    fn threshold_counts_untrimmed_chars() {
        let mut pipeline = SuggestionPipeline::new(Arc::new(Config::default())).with_list(fruits());
        // " p" passes the length guard, the matcher then sees "p".
        assert_eq!(labels(&pipeline.evaluate(" p")), vec!["pear", "plum", "peach"]);
    }

    #[test]
    fn result_is_truncated() {
        let config = Config::default().with_max_items(1).with_min_chars(0);
        let mut pipeline = SuggestionPipeline::new(Arc::new(config)).with_list(fruits());
        assert_eq!(labels(&pipeline.evaluate("")), vec!["pear"]);

        let config = Config::default().with_max_items(0);
        let mut pipeline = SuggestionPipeline::new(Arc::new(config)).with_list(fruits());
        assert_eq!(labels(&pipeline.evaluate("pe")), Vec::<String>::new());
    }

    #[test]
    fn empty_list_without_source_closes() {
        let mut pipeline = SuggestionPipeline::new(Arc::new(Config::default()));
        assert_eq!(pipeline.evaluate("pe"), Evaluation::Closed);
    }

    #[test]
    fn custom_matcher_is_used() {
        let config = Config::default().with_matcher(Matcher::ends_with());
        let mut pipeline = SuggestionPipeline::new(Arc::new(config)).with_list(fruits());
        assert_eq!(labels(&pipeline.evaluate("ch")), vec!["peach"]);
    }

    #[test]
    fn sync_provider_skips_matcher_and_ranker() {
        let config = Config::default()
            .with_max_items(2)
            .with_source(SourceProvider::new(|_| {
                SourceResponse::items(["zucchini", "fig", "apple"])
            }));
        let mut pipeline = SuggestionPipeline::new(Arc::new(config)).with_list(fruits());
        assert_eq!(labels(&pipeline.evaluate("pe")), vec!["zucchini", "fig"]);
    }

    #[test]
    fn skipping_provider_leaves_state() {
        let config = Config::default().with_source(SourceProvider::new(|_| SourceResponse::Skip));
        let mut pipeline = SuggestionPipeline::new(Arc::new(config));
        assert_eq!(pipeline.evaluate("pe"), Evaluation::Unchanged);
    }

    #[test]
    fn request_without_transport_is_unchanged() {
        let config = Config::default().with_source(SourceProvider::remote("fruits"));
        let mut pipeline = SuggestionPipeline::new(Arc::new(config));
        assert_eq!(pipeline.evaluate("pe"), Evaluation::Unchanged);
    }

    #[test]
    fn fetched_body_is_ranked_and_truncated() {
        let transport = StaticTransport::new().with_body("fruits", r#"["peach","apricot","pear"]"#);
        let config = Config::default()
            .with_max_items(2)
            .with_source(SourceProvider::remote("fruits"));
        let mut pipeline = SuggestionPipeline::new(Arc::new(config))
            .with_executor(FetchExecutor::inline(Arc::new(transport)));

        assert_eq!(pipeline.evaluate("pe"), Evaluation::Pending { run_id: 1 });
        let finished = pipeline.poll().expect("completion");
        assert_eq!(finished.run_id, 1);
        assert_eq!(finished.query, "pe");
        assert_eq!(labels(&finished.evaluation), vec!["pear", "peach"]);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let config = Config::default().with_source(SourceProvider::remote("fruits"));
        let mut pipeline = SuggestionPipeline::new(Arc::new(config))
            .with_executor(FetchExecutor::inline(Arc::new(StaticTransport::new())));

        let Evaluation::Pending { run_id: first } = pipeline.evaluate("pe") else {
            panic!("expected pending");
        };
        let Evaluation::Pending { run_id: second } = pipeline.evaluate("pea") else {
            panic!("expected pending");
        };

        let late = FetchCompletion::ok(first, "pe", r#"["pear","peach"]"#);
        assert_eq!(pipeline.apply_completion(late), Evaluation::Unchanged);

        let fresh = FetchCompletion::ok(second, "pea", r#"["peach"]"#);
        assert_eq!(labels(&pipeline.apply_completion(fresh)), vec!["peach"]);
    }

    #[test]
    fn threshold_evaluation_invalidates_in_flight_fetch() {
        let config = Config::default().with_source(SourceProvider::remote("fruits"));
        let mut pipeline = SuggestionPipeline::new(Arc::new(config))
            .with_executor(FetchExecutor::inline(Arc::new(StaticTransport::new())));
        let Evaluation::Pending { run_id } = pipeline.evaluate("pe") else {
            panic!("expected pending");
        };
        assert_eq!(pipeline.evaluate("p"), Evaluation::Closed);
        let late = FetchCompletion::ok(run_id, "pe", r#"["pear"]"#);
        assert_eq!(pipeline.apply_completion(late), Evaluation::Unchanged);
    }

    #[test]
    fn failures_are_unchanged() {
        let config = Config::default().with_source(SourceProvider::remote("fruits"));
        let mut pipeline = SuggestionPipeline::new(Arc::new(config))
            .with_executor(FetchExecutor::inline(Arc::new(StaticTransport::new())));
        let Evaluation::Pending { run_id } = pipeline.evaluate("xy") else {
            panic!("expected pending");
        };
        let failed = FetchCompletion::failed(run_id, "xy", FetchError::Failed("503".into()));
        assert_eq!(pipeline.apply_completion(failed), Evaluation::Unchanged);

        let Evaluation::Pending { run_id } = pipeline.evaluate("xy") else {
            panic!("expected pending");
        };
        let garbage = FetchCompletion::ok(run_id, "xy", "<html>");
        assert_eq!(pipeline.apply_completion(garbage), Evaluation::Unchanged);
    }

    #[test]
    fn comma_separated_lists() {
        let parsed = parse_list(" pear ,peach,  plum ");
        let labels: Vec<&str> = parsed.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["pear", "peach", "plum"]);
        assert!(parse_list("  ").is_empty());
        assert_eq!(parse_list("fig").len(), 1);
    }

    #[test]
    fn failed_latest_fetch_is_reported_as_finished() {
        let transport = StaticTransport::new().with_failure("fruits", "503");
        let config = Config::default().with_source(SourceProvider::remote("fruits"));
        let mut pipeline = SuggestionPipeline::new(Arc::new(config))
            .with_executor(FetchExecutor::inline(Arc::new(transport)));

        let Evaluation::Pending { run_id } = pipeline.evaluate("xy") else {
            panic!("expected pending");
        };
        let finished = pipeline.poll().expect("finished run");
        assert_eq!(finished.run_id, run_id);
        assert_eq!(finished.query, "xy");
        assert_eq!(finished.evaluation, Evaluation::Unchanged);
        assert_eq!(pipeline.poll(), None);
    }

    #[test]
    fn stale_fetch_is_not_reported() {
        let transport = StaticTransport::new().with_body("fruits", r#"["pear"]"#);
        let config = Config::default().with_source(SourceProvider::remote("fruits"));
        let mut pipeline = SuggestionPipeline::new(Arc::new(config))
            .with_executor(FetchExecutor::inline(Arc::new(transport)));

        assert!(matches!(pipeline.evaluate("pe"), Evaluation::Pending { .. }));
        assert_eq!(pipeline.evaluate("p"), Evaluation::Closed);
        assert_eq!(pipeline.poll(), None);
    }
}
