use crate::core::config::ReplaceFn;
use crate::core::navigation::NavigationState;
use crate::core::notify::{Notifier, Origin, PreSelect, WidgetEvent};

/// The field side of a commit.
pub trait FieldSurface {
    fn replace_value(&mut self, value: String);
    fn clear_hint(&mut self);
}

/// Two-phase commit: a cancelable pre-select hook, then replace, close and
/// the `Selected` notification.
pub struct SelectionController<'a> {
    pub nav: &'a mut NavigationState,
    pub notifier: &'a mut Notifier,
    pub replace: &'a ReplaceFn,
}

impl SelectionController<'_> {
    /// Commits `explicit`, or the highlighted item when `None`.
    ///
    /// Returns `false` without notifying anyone when there is nothing to
    /// commit, and `false` after the pre-select notification when a hook
    /// vetoed it.
    pub fn commit(
        &mut self,
        field: &mut dyn FieldSurface,
        explicit: Option<usize>,
        origin: Origin,
    ) -> bool {
        let Some(index) = explicit.or_else(|| self.nav.highlight()) else {
            return false;
        };
        let Some(candidate) = self.nav.suggestions().get(index).cloned() else {
            return false;
        };

        self.nav.mark(index);
        let intent = PreSelect {
            index,
            text: candidate.label.clone(),
            data: candidate.data.clone(),
            origin,
        };
        if !self.notifier.allow(&intent) {
            tracing::debug!(index, text = %intent.text, "selection vetoed");
            return false;
        }

        field.replace_value((self.replace)(&candidate));
        field.clear_hint();
        self.nav.close();
        let events = self.nav.drain_events();
        self.notifier.emit_all(events);
        self.notifier.emit(&WidgetEvent::Selected {
            index,
            text: candidate.label,
            data: candidate.data,
            origin,
        });
        true
    }
}
