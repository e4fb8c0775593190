use crate::widgets::traits::TextAction;

/// What a key means to the suggestion widget once bindings are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select,
    Close,
    Previous,
    Next,
    TextAction(TextAction),
}
