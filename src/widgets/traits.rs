use crate::terminal::{CursorPos, KeyEvent, PointerPress};
use crate::ui::frame::RenderFrame;
use crate::ui::span::{Span, SpanLine};
use crate::widgets::inputs::text_edit;

// ---------------------------------------------------------------------------
// Render context & output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub focused: bool,
    pub width: u16,
    /// Top row of the widget on screen, used to map pointer rows to items.
    pub origin_row: u16,
    pub show_status: bool,
}

impl RenderContext {
    pub fn new(width: u16) -> Self {
        Self {
            focused: true,
            width,
            origin_row: 0,
            show_status: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

impl DrawOutput {
    pub fn plain_lines(lines: Vec<String>) -> Self {
        Self {
            lines: lines
                .into_iter()
                .map(|line| vec![Span::new(line).no_wrap()])
                .collect(),
            cursor: None,
        }
    }
}

impl From<DrawOutput> for RenderFrame {
    fn from(output: DrawOutput) -> Self {
        RenderFrame {
            lines: output.lines,
            cursor: output.cursor,
        }
    }
}

pub trait Drawable {
    fn id(&self) -> &str;
    fn draw(&self, ctx: &RenderContext) -> DrawOutput;
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

/// What an event handler did with an event.
///
/// `prevent_default` tells the host the key must not reach its own
/// handling (form submit on Enter, caret jumps on Up/Down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub prevent_default: bool,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    /// Acted on, but the host may still see the event.
    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            prevent_default: false,
        }
    }

    pub fn consumed() -> Self {
        Self {
            handled: true,
            request_render: true,
            prevent_default: true,
        }
    }

    pub fn redraw() -> Self {
        Self {
            handled: false,
            request_render: true,
            prevent_default: false,
        }
    }

    pub fn merge(&mut self, other: Self) {
        self.handled |= other.handled;
        self.request_render |= other.request_render;
        self.prevent_default |= other.prevent_default;
    }
}

// ---------------------------------------------------------------------------
// TextAction & TextEditState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAction {
    DeleteWordLeft,
    DeleteWordRight,
}

pub struct TextEditState<'a> {
    pub value: &'a mut String,
    pub cursor: &'a mut usize,
}

impl TextAction {
    pub(crate) fn apply(self, state: &mut TextEditState<'_>) -> bool {
        match self {
            Self::DeleteWordLeft => text_edit::delete_word_left(state.value, state.cursor),
            Self::DeleteWordRight => text_edit::delete_word_right(state.value, state.cursor),
        }
    }
}

// ---------------------------------------------------------------------------
// Interactive
// ---------------------------------------------------------------------------

pub trait Interactive {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult;

    fn on_pointer(&mut self, _press: PointerPress, _ctx: &RenderContext) -> InteractionResult {
        InteractionResult::ignored()
    }

    fn text_editing(&mut self) -> Option<TextEditState<'_>> {
        None
    }
    fn on_text_edited(&mut self) -> InteractionResult {
        InteractionResult::handled()
    }
    fn on_text_action(&mut self, action: TextAction) -> InteractionResult {
        let Some(mut state) = self.text_editing() else {
            return InteractionResult::ignored();
        };
        if action.apply(&mut state) {
            self.on_text_edited()
        } else {
            InteractionResult::ignored()
        }
    }

    fn on_tick(&mut self) -> InteractionResult {
        InteractionResult::ignored()
    }
    fn cursor_pos(&self) -> Option<CursorPos> {
        None
    }
}
