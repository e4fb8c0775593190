use proptest::prelude::*;
use suggestbox::core::navigation::NavigationState;
use suggestbox::core::pipeline::{Evaluation, SuggestionPipeline};
use suggestbox::core::search::{Matcher, Ranker};
use suggestbox::{Candidate, Config, SuggestionSet};
use std::cmp::Ordering;
use std::sync::Arc;

fn word() -> impl Strategy<Value = String> {
    "[a-cA-C .*()+?]{0,8}"
}

fn pipeline(list: &[String], min_chars: usize, max_items: usize) -> SuggestionPipeline {
    let config = Config::default()
        .with_min_chars(min_chars)
        .with_max_items(max_items);
    SuggestionPipeline::new(Arc::new(config))
        .with_list(list.iter().cloned().map(Candidate::plain).collect())
}

proptest! {
    #[test]
    fn short_queries_close(list in prop::collection::vec(word(), 0..12), query in "[a-c]{0,3}") {
        let mut pipeline = pipeline(&list, 4, 10);
        prop_assert_eq!(pipeline.evaluate(&query), Evaluation::Closed);
    }

    #[test]
    fn static_results_match_and_fit(
        list in prop::collection::vec(word(), 1..30),
        query in word(),
        max_items in 1usize..8,
    ) {
        let mut pipeline = pipeline(&list, 0, max_items);
        let matcher = Matcher::default();
        if let Evaluation::Ready(set) = pipeline.evaluate(&query) {
            prop_assert!(set.len() <= max_items);
            for candidate in set.iter() {
                prop_assert!(matcher.matches(candidate.label.as_str(), &query));
            }
        }
    }

    #[test]
    fn navigation_cycles_through_gap(len in 1usize..10, start in 0usize..11) {
        let items = (0..len).map(|n| Candidate::plain(format!("item{n}"))).collect();
        let mut nav = NavigationState::new(false);
        nav.replace(SuggestionSet::new(items));
        let start = (start < len).then_some(start);
        nav.goto(start);

        nav.next();
        nav.previous();
        prop_assert_eq!(nav.highlight(), start);

        for _ in 0..=len {
            nav.previous();
        }
        prop_assert_eq!(nav.highlight(), start);

        for _ in 0..=len {
            nav.next();
        }
        prop_assert_eq!(nav.highlight(), start);
    }

    #[test]
    fn by_length_is_a_total_order(a in word(), b in word()) {
        let ranker = Ranker::by_length();
        let forward = ranker.compare(&a, &b);
        prop_assert_eq!(forward, ranker.compare(&b, &a).reverse());
        prop_assert_eq!(forward == Ordering::Equal, a == b);
    }
}
