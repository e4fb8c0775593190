use crate::core::WidgetId;
use crate::core::candidate::{Candidate, SuggestionSet};
use crate::core::config::Config;
use crate::core::navigation::NavigationState;
use crate::core::notify::{Notifier, Origin, PreSelect, WidgetEvent};
use crate::core::pipeline::{Evaluation, SuggestionPipeline, parse_list};
use crate::core::registry::Registry;
use crate::core::selection::SelectionController;
use crate::runtime::{Command, KeyBindings};
use crate::task::FetchExecutor;
use crate::terminal::{CursorPos, KeyEvent, MouseButton, PointerPress};
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;
use crate::widgets::components::scroll::ScrollState;
use crate::widgets::inputs::input_field::{EditOutcome, InputField};
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, TextEditState,
};
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

/// A text field with a suggestion list attached.
///
/// Owns the field, the pipeline and the navigation state, and maps host
/// events (edits, keys, pointer presses, focus changes, ticks) onto them.
/// Observers registered with [`Autocomplete::on_event`] see every
/// transition in the order it happened.
pub struct Autocomplete {
    id: WidgetId,
    label: String,
    config: Arc<Config>,
    field: InputField,
    pipeline: SuggestionPipeline,
    nav: NavigationState,
    notifier: Notifier,
    scroll: ScrollState,
    key_bindings: KeyBindings,
    theme: Theme,
    registry: Option<Registry>,
    focused: bool,
    /// Query the current set was computed for.
    query: String,
    pending: Option<u64>,
}

impl Autocomplete {
    pub fn new(id: impl Into<WidgetId>, label: impl Into<String>, config: Config) -> Self {
        let config = Arc::new(config);
        Self {
            id: id.into(),
            label: label.into(),
            pipeline: SuggestionPipeline::new(Arc::clone(&config)),
            nav: NavigationState::new(config.auto_first),
            config,
            field: InputField::new(),
            notifier: Notifier::new(),
            scroll: ScrollState::new(None),
            key_bindings: KeyBindings::new(),
            theme: Theme::default_theme(),
            registry: None,
            focused: false,
            query: String::new(),
            pending: None,
        }
    }

    pub fn with_list(mut self, list: Vec<Candidate>) -> Self {
        self.pipeline.set_list(list);
        self
    }

    /// Comma-separated list, e.g. `"Ada, Java, Rust"`.
    pub fn with_list_str(self, raw: &str) -> Self {
        self.with_list(parse_list(raw))
    }

    pub fn with_executor(mut self, executor: FetchExecutor) -> Self {
        self.pipeline = SuggestionPipeline::new(Arc::clone(&self.config))
            .with_list(self.pipeline.list().to_vec())
            .with_executor(executor);
        self
    }

    pub fn with_registry(mut self, registry: Registry) -> Self {
        registry.register(self.id.clone(), self.label.clone());
        self.registry = Some(registry);
        self
    }

    pub fn with_key_bindings(mut self, key_bindings: KeyBindings) -> Self {
        self.key_bindings = key_bindings;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Caps how many list rows are drawn at once; the window follows the
    /// highlight.
    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.scroll.max_visible = Some(max_visible.max(1));
        self
    }

    pub fn on_event(&mut self, observer: impl FnMut(&WidgetEvent) + Send + 'static) {
        self.notifier.on_event(observer);
    }

    pub fn on_pre_select(&mut self, hook: impl FnMut(&PreSelect) -> bool + Send + 'static) {
        self.notifier.on_pre_select(hook);
    }

    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn value(&self) -> &str {
        self.field.value()
    }

    pub fn field(&self) -> &InputField {
        &self.field
    }

    pub fn is_open(&self) -> bool {
        self.nav.is_open()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn highlight(&self) -> Option<usize> {
        self.nav.highlight()
    }

    pub fn suggestions(&self) -> &SuggestionSet {
        self.nav.suggestions()
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.nav.is_marked(index)
    }

    /// Text of the most recently highlighted item, as announced to
    /// assistive output.
    pub fn status(&self) -> Option<&str> {
        self.nav.announcement()
    }

    pub fn hint(&self) -> Option<&str> {
        self.field.hint()
    }

    /// Run id of the fetch the widget is waiting on.
    pub fn pending_fetch(&self) -> Option<u64> {
        self.pending
    }

    /// Sets the field without evaluating, like a programmatic value write.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.field.set_value(value);
    }

    pub fn set_list(&mut self, list: Vec<Candidate>) {
        self.pipeline.set_list(list);
        if self.focused {
            self.evaluate();
        }
    }

    pub fn set_list_str(&mut self, raw: &str) {
        self.set_list(parse_list(raw));
    }

    pub fn evaluate(&mut self) {
        let query = self.field.value().to_string();
        match self.pipeline.evaluate(query.as_str()) {
            Evaluation::Ready(set) => {
                self.pending = None;
                self.apply_set(set, query);
            }
            Evaluation::Pending { run_id } => self.pending = Some(run_id),
            Evaluation::Closed => {
                self.pending = None;
                self.close();
            }
            // Any earlier fetch is stale now.
            Evaluation::Unchanged => self.pending = None,
        }
    }

    pub fn open(&mut self) {
        self.nav.open();
        self.flush();
    }

    pub fn close(&mut self) {
        self.nav.close();
        self.flush();
    }

    pub fn next(&mut self) -> bool {
        let moved = self.nav.next();
        self.flush();
        moved
    }

    pub fn previous(&mut self) -> bool {
        let moved = self.nav.previous();
        self.flush();
        moved
    }

    pub fn goto(&mut self, index: Option<usize>) -> bool {
        let moved = self.nav.goto(index);
        self.flush();
        moved
    }

    /// Commits `index`, or the highlighted item.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        self.commit(index, Origin::Api)
    }

    pub fn on_input(&mut self) -> InteractionResult {
        self.evaluate();
        InteractionResult::handled()
    }

    pub fn on_focus(&mut self) {
        self.focused = true;
    }

    pub fn on_blur(&mut self) -> InteractionResult {
        self.focused = false;
        self.close();
        InteractionResult::redraw()
    }

    /// The enclosing form was submitted.
    pub fn on_submit(&mut self) -> InteractionResult {
        self.close();
        InteractionResult::redraw()
    }

    /// Pointer press on a list row, addressed by its index in the set.
    pub fn on_item_press(&mut self, index: usize, button: MouseButton) -> InteractionResult {
        if !self.nav.is_open() || button != MouseButton::Left {
            return InteractionResult::ignored();
        }
        if index >= self.nav.suggestions().len() {
            return InteractionResult::ignored();
        }
        self.commit(Some(index), Origin::Pointer);
        InteractionResult::consumed()
    }

    /// Maps a line of [`Drawable::draw`] output to the item drawn there.
    pub fn item_index_at_line(&self, line: usize) -> Option<usize> {
        if !self.nav.is_open() || line == 0 {
            return None;
        }
        let (start, end) = self.scroll.visible_range(self.nav.suggestions().len());
        let index = start + line - 1;
        (index < end).then_some(index)
    }

    pub fn dispose(self) {
        if let Some(registry) = self.registry.as_ref() {
            registry.unregister(&self.id);
        }
    }

    fn commit(&mut self, index: Option<usize>, origin: Origin) -> bool {
        let committed = SelectionController {
            nav: &mut self.nav,
            notifier: &mut self.notifier,
            replace: self.config.replace.as_ref(),
        }
        .commit(&mut self.field, index, origin);
        if committed {
            self.scroll.reset();
        }
        committed
    }

    fn apply_set(&mut self, set: SuggestionSet, query: String) {
        tracing::debug!(widget = %self.id, query, count = set.len(), "suggestions applied");
        self.query = query;
        if self.config.show_hint {
            self.field.set_hint(None);
        }
        self.scroll.reset();
        self.nav.replace(set);
        self.flush();
    }

    /// Forwards queued navigation events and keeps the window and hint in
    /// step with the highlight.
    fn flush(&mut self) {
        let events = self.nav.drain_events();
        for event in &events {
            if let WidgetEvent::HighlightChanged {
                index: Some(index), ..
            } = event
            {
                self.reveal(*index);
            }
        }
        self.notifier.emit_all(events);
    }

    fn reveal(&mut self, index: usize) {
        let total = self.nav.suggestions().len();
        self.scroll.ensure_visible(index, total);
        if !self.config.show_hint {
            return;
        }
        if let Some(candidate) = self.nav.suggestions().get(index) {
            let hint = (self.config.hint)(candidate);
            self.field.set_hint(Some(hint));
        }
    }

    fn input_line(&self, ctx: &RenderContext) -> (SpanLine, Option<CursorPos>) {
        let prompt = if self.label.is_empty() {
            String::new()
        } else {
            format!("{}: ", self.label)
        };
        let mut line = vec![Span::styled(prompt.clone(), self.theme.prompt).no_wrap()];
        line.push(Span::new(self.field.value()).no_wrap());
        if let Some(suffix) = self.field.hint_suffix() {
            line.push(Span::styled(suffix, self.theme.hint).no_wrap());
        }

        let cursor = ctx.focused.then(|| {
            let before: String = self.field.value().chars().take(self.field.cursor()).collect();
            let col = UnicodeWidthStr::width(prompt.as_str()) + UnicodeWidthStr::width(before.as_str());
            CursorPos {
                col: col.min(u16::MAX as usize) as u16,
                row: 0,
            }
        });
        (line, cursor)
    }

    fn item_line(&self, index: usize, candidate: &Candidate) -> SpanLine {
        let highlighted = self.nav.highlight() == Some(index);
        let marker = if highlighted {
            Span::styled("❯ ", self.theme.cursor).no_wrap()
        } else {
            Span::new("  ").no_wrap()
        };
        let mut line = vec![marker];
        let spans = self
            .config
            .item_renderer
            .render(candidate.label.as_str(), self.query.as_str());
        if self.nav.is_marked(index) {
            line.extend(spans.into_iter().map(|mut span| {
                span.style = span.style.merge(self.theme.highlighted);
                span
            }));
        } else {
            line.extend(spans);
        }
        line
    }
}

impl Drawable for Autocomplete {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let (input, cursor) = self.input_line(ctx);
        let mut lines = vec![input];

        if self.nav.is_open() {
            let set = self.nav.suggestions();
            let (start, end) = self.scroll.visible_range(set.len());
            for index in start..end {
                if let Some(candidate) = set.get(index) {
                    lines.push(self.item_line(index, candidate));
                }
            }
            if let Some(footer) = self.scroll.footer(set.len()) {
                lines.push(vec![Span::styled(footer, self.theme.footer).no_wrap()]);
            }
            if ctx.show_status {
                if let Some(status) = self.nav.announcement() {
                    lines.push(vec![Span::styled(status, self.theme.status).no_wrap()]);
                }
            }
        }

        DrawOutput { lines, cursor }
    }
}

impl Interactive for Autocomplete {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        let open = self.nav.is_open();
        match self.key_bindings.resolve(key) {
            Some(Command::Select) if open && self.nav.highlight().is_some() => {
                self.commit(None, Origin::Key);
                return InteractionResult::consumed();
            }
            Some(Command::Close) if open => {
                self.close();
                return InteractionResult::redraw();
            }
            Some(Command::Previous) if open => {
                self.previous();
                return InteractionResult::consumed();
            }
            Some(Command::Next) if open => {
                self.next();
                return InteractionResult::consumed();
            }
            Some(Command::TextAction(action)) => return self.on_text_action(action),
            _ => {}
        }

        match self.field.apply_key(key) {
            EditOutcome::Edited => self.on_text_edited(),
            EditOutcome::Moved => InteractionResult::handled(),
            EditOutcome::Ignored => InteractionResult::ignored(),
        }
    }

    fn on_pointer(&mut self, press: PointerPress, ctx: &RenderContext) -> InteractionResult {
        let Some(line) = press.row.checked_sub(ctx.origin_row) else {
            return InteractionResult::ignored();
        };
        match self.item_index_at_line(line as usize) {
            Some(index) => self.on_item_press(index, press.button),
            None => InteractionResult::ignored(),
        }
    }

    fn text_editing(&mut self) -> Option<TextEditState<'_>> {
        Some(self.field.edit_state())
    }

    fn on_text_edited(&mut self) -> InteractionResult {
        self.on_input()
    }

    fn on_tick(&mut self) -> InteractionResult {
        let Some(finished) = self.pipeline.poll() else {
            return InteractionResult::ignored();
        };
        if self.pending == Some(finished.run_id) {
            self.pending = None;
        }
        match finished.evaluation {
            Evaluation::Ready(set) => {
                self.apply_set(set, finished.query);
                InteractionResult::redraw()
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        self.draw(&RenderContext::new(u16::MAX)).cursor
    }
}
