pub mod backend;
pub mod input_event;
pub mod terminal_event;

pub use backend::Terminal;
pub use input_event::{
    CursorPos, KeyCode, KeyEvent, KeyModifiers, MouseButton, PointerPress, TerminalSize,
};
pub use terminal_event::TerminalEvent;
