use crate::core::search::find_ranges;
use crate::ui::highlight::render_text_spans;
use crate::ui::span::Span;
use crate::ui::theme::Theme;
use std::fmt;
use std::sync::Arc;

pub type RenderFn = dyn Fn(&str, &str) -> Vec<Span> + Send + Sync;

/// Turns `(candidate_text, query)` into the spans of one list item.
#[derive(Clone)]
pub struct ItemRenderer(Arc<RenderFn>);

impl ItemRenderer {
    pub fn new(f: impl Fn(&str, &str) -> Vec<Span> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn render(&self, text: &str, query: &str) -> Vec<Span> {
        (self.0)(text, query)
    }
}

impl Default for ItemRenderer {
    fn default() -> Self {
        Self::new(mark_matches)
    }
}

impl fmt::Debug for ItemRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ItemRenderer(..)")
    }
}

/// Wraps every literal, case-insensitive occurrence of the trimmed query in
/// the theme's mark style.
pub fn mark_matches(text: &str, query: &str) -> Vec<Span> {
    let theme = Theme::default_theme();
    let ranges = find_ranges(text, query);
    render_text_spans(text, ranges.as_slice(), theme.item, theme.mark)
}

#[cfg(test)]
mod tests {
    use super::{ItemRenderer, mark_matches};

    #[test]
    fn marks_every_occurrence() {
        let spans = mark_matches("Banana", "AN");
        let marked: Vec<&str> = spans
            .iter()
            .filter(|span| span.style.underline)
            .map(|span| span.text.as_str())
            .collect();
        assert_eq!(marked, vec!["an", "an"]);
    }

    #[test]
    fn empty_query_renders_plain_text() {
        let spans = ItemRenderer::default().render("pear", "");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "pear");
        assert!(!spans[0].style.underline);
    }
}
