use crate::core::candidate::{Candidate, SuggestionSet};
use crate::core::notify::WidgetEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Closed,
    /// `highlight == None` is the unselected state.
    Open { highlight: Option<usize> },
}

/// Open/closed/highlight state over the current suggestion set.
///
/// Transitions queue [`WidgetEvent`]s; the owner drains them with
/// [`NavigationState::drain_events`] and forwards them to observers.
#[derive(Debug, Clone)]
pub struct NavigationState {
    state: NavState,
    set: SuggestionSet,
    marks: Vec<bool>,
    auto_first: bool,
    announcement: Option<String>,
    events: Vec<WidgetEvent>,
}

impl NavigationState {
    pub fn new(auto_first: bool) -> Self {
        Self {
            state: NavState::Closed,
            set: SuggestionSet::empty(),
            marks: Vec::new(),
            auto_first,
            announcement: None,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, NavState::Open { .. })
    }

    pub fn highlight(&self) -> Option<usize> {
        match self.state {
            NavState::Open { highlight } => highlight,
            NavState::Closed => None,
        }
    }

    pub fn suggestions(&self) -> &SuggestionSet {
        &self.set
    }

    pub fn highlighted(&self) -> Option<&Candidate> {
        self.highlight().and_then(|index| self.set.get(index))
    }

    /// Whether the item carries the selected mark.
    pub fn is_marked(&self, index: usize) -> bool {
        self.marks.get(index).copied().unwrap_or(false)
    }

    /// Last status announcement, the text of the most recently highlighted
    /// item.
    pub fn announcement(&self) -> Option<&str> {
        self.announcement.as_deref()
    }

    pub fn drain_events(&mut self) -> Vec<WidgetEvent> {
        std::mem::take(&mut self.events)
    }

    /// Swaps in a new set: highlight resets, an empty set closes, anything
    /// else opens.
    pub fn replace(&mut self, set: SuggestionSet) {
        self.marks = vec![false; set.len()];
        self.set = set;
        if let NavState::Open { highlight } = &mut self.state {
            *highlight = None;
        }

        if self.set.is_empty() {
            self.close();
            return;
        }
        if self.is_open() {
            if self.auto_first {
                self.goto(Some(0));
            }
        } else {
            self.open();
        }
    }

    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        self.state = NavState::Open { highlight: None };
        if self.auto_first && !self.set.is_empty() {
            self.goto(Some(0));
        }
        self.events.push(WidgetEvent::Opened);
    }

    pub fn close(&mut self) {
        let was_open = self.is_open();
        self.marks.iter_mut().for_each(|mark| *mark = false);
        self.state = NavState::Closed;
        if was_open {
            self.events.push(WidgetEvent::Closed);
        }
    }

    pub fn next(&mut self) -> bool {
        let Some(count) = self.navigable_len() else {
            return false;
        };
        let target = match self.highlight() {
            Some(index) if index + 1 < count => Some(index + 1),
            Some(_) => None,
            None => Some(0),
        };
        self.goto(target)
    }

    pub fn previous(&mut self) -> bool {
        let Some(count) = self.navigable_len() else {
            return false;
        };
        let target = match self.highlight() {
            Some(0) => None,
            Some(index) => Some(index - 1),
            None => Some(count - 1),
        };
        self.goto(target)
    }

    /// Jumps straight to `index`. Out-of-range targets, or any target while
    /// closed, leave the state untouched.
    pub fn goto(&mut self, index: Option<usize>) -> bool {
        if !self.is_open() {
            return false;
        }
        if index.is_some_and(|index| index >= self.set.len()) {
            return false;
        }

        if let Some(previous) = self.highlight() {
            if let Some(mark) = self.marks.get_mut(previous) {
                *mark = false;
            }
        }
        self.state = NavState::Open { highlight: index };

        let text = index
            .and_then(|index| self.set.get(index))
            .map(|candidate| candidate.label.clone());
        if let Some(index) = index {
            if let Some(mark) = self.marks.get_mut(index) {
                *mark = true;
            }
            self.announcement = text.clone();
        }
        self.events.push(WidgetEvent::HighlightChanged { index, text });
        true
    }

    /// Puts the selected mark on an item without moving the highlight.
    pub fn mark(&mut self, index: usize) {
        if let Some(mark) = self.marks.get_mut(index) {
            *mark = true;
        }
    }

    fn navigable_len(&self) -> Option<usize> {
        if !self.is_open() || self.set.is_empty() {
            return None;
        }
        Some(self.set.len())
    }
}

#[cfg(test)]
mod tests {
    use super::{NavState, NavigationState};
    use crate::core::candidate::{Candidate, SuggestionSet};
    use crate::core::notify::WidgetEvent;

    fn set(items: &[&str]) -> SuggestionSet {
        SuggestionSet::new(items.iter().map(|item| Candidate::plain(*item)).collect())
    }

    fn opened(items: &[&str]) -> NavigationState {
        let mut nav = NavigationState::new(false);
        nav.replace(set(items));
        nav.drain_events();
        nav
    }

    #[test]
    fn replace_opens_unselected() {
        let mut nav = NavigationState::new(false);
        nav.replace(set(&["pear", "peach"]));
        assert_eq!(nav.state(), NavState::Open { highlight: None });
        assert_eq!(nav.drain_events(), vec![WidgetEvent::Opened]);
    }

    #[test]
    fn replace_with_empty_set_closes() {
        let mut nav = opened(&["pear"]);
        nav.replace(SuggestionSet::empty());
        assert_eq!(nav.state(), NavState::Closed);
        assert_eq!(nav.drain_events(), vec![WidgetEvent::Closed]);
    }

    #[test]
    fn auto_first_highlights_first_item() {
        let mut nav = NavigationState::new(true);
        nav.replace(set(&["pear", "peach"]));
        assert_eq!(nav.highlight(), Some(0));
        assert!(nav.is_marked(0));

        nav.next();
        nav.replace(set(&["plum", "peach"]));
        assert_eq!(nav.highlight(), Some(0));
        assert_eq!(nav.announcement(), Some("plum"));
    }

    #[test]
    fn next_wraps_through_unselected_gap() {
        let mut nav = opened(&["pear", "peach"]);
        let mut seen = Vec::new();
        for _ in 0..3 {
            nav.next();
            seen.push(nav.highlight());
        }
        assert_eq!(seen, vec![Some(0), Some(1), None]);
    }

    #[test]
    fn previous_from_unselected_goes_to_last() {
        let mut nav = opened(&["pear", "peach", "plum"]);
        nav.previous();
        assert_eq!(nav.highlight(), Some(2));
        nav.goto(Some(0));
        nav.previous();
        assert_eq!(nav.highlight(), None);
    }

    #[test]
    fn goto_moves_mark_and_announces() {
        let mut nav = opened(&["pear", "peach"]);
        nav.goto(Some(1));
        assert!(nav.is_marked(1));
        nav.goto(Some(0));
        assert!(!nav.is_marked(1));
        assert!(nav.is_marked(0));
        assert_eq!(nav.announcement(), Some("pear"));
        let events = nav.drain_events();
        assert_eq!(
            events.last(),
            Some(&WidgetEvent::HighlightChanged {
                index: Some(0),
                text: Some("pear".to_string()),
            })
        );
    }

    #[test]
    fn invalid_operations_are_no_ops() {
        let mut nav = NavigationState::new(false);
        assert!(!nav.next());
        assert!(!nav.previous());
        assert!(!nav.goto(Some(0)));
        assert!(nav.drain_events().is_empty());

        let mut nav = opened(&["pear"]);
        assert!(!nav.goto(Some(5)));
        assert_eq!(nav.highlight(), None);
        assert!(nav.drain_events().is_empty());
    }

    #[test]
    fn close_resets_highlight_and_is_idempotent() {
        let mut nav = opened(&["pear", "peach"]);
        nav.next();
        nav.drain_events();
        nav.close();
        nav.close();
        assert_eq!(nav.highlight(), None);
        assert!(!nav.is_open());
        assert_eq!(nav.drain_events(), vec![WidgetEvent::Closed]);

        nav.open();
        assert_eq!(nav.highlight(), None);
    }
}
