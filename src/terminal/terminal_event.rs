use crate::terminal::input_event::{KeyEvent, PointerPress, TerminalSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Pointer(PointerPress),
    Resize(TerminalSize),
    FocusGained,
    FocusLost,
    Tick,
}
