use crate::core::selection::FieldSurface;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::widgets::inputs::text_edit;
use crate::widgets::traits::TextEditState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The value changed.
    Edited,
    /// Only the caret moved.
    Moved,
    Ignored,
}

/// Single-line text field with a caret and an optional ghost hint.
#[derive(Debug, Clone, Default)]
pub struct InputField {
    value: String,
    cursor: usize,
    hint: Option<String>,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Caret position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the value and puts the caret at the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = text_edit::char_count(&self.value);
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn set_hint(&mut self, hint: Option<String>) {
        self.hint = hint;
    }

    /// The part of the hint that completes the current value, if the hint
    /// extends it.
    pub fn hint_suffix(&self) -> Option<&str> {
        let hint = self.hint.as_deref()?;
        let typed = self.value.chars().count();
        let prefix_len = hint.char_indices().nth(typed).map(|(idx, _)| idx)?;
        let (prefix, suffix) = hint.split_at(prefix_len);
        prefix.eq_ignore_ascii_case(&self.value).then_some(suffix)
    }

    pub fn edit_state(&mut self) -> TextEditState<'_> {
        TextEditState {
            value: &mut self.value,
            cursor: &mut self.cursor,
        }
    }

    pub fn apply_key(&mut self, key: KeyEvent) -> EditOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT)
        {
            return EditOutcome::Ignored;
        }
        let edited = match key.code {
            KeyCode::Char(ch) => {
                text_edit::insert_char(&mut self.value, &mut self.cursor, ch);
                true
            }
            KeyCode::Backspace => text_edit::backspace_char(&mut self.value, &mut self.cursor),
            KeyCode::Delete => text_edit::delete_char(&mut self.value, &mut self.cursor),
            KeyCode::Left => {
                return moved(text_edit::move_left(&mut self.cursor, &self.value));
            }
            KeyCode::Right => {
                return moved(text_edit::move_right(&mut self.cursor, &self.value));
            }
            KeyCode::Home => {
                let changed = self.cursor != 0;
                self.cursor = 0;
                return moved(changed);
            }
            KeyCode::End => {
                let end = text_edit::char_count(&self.value);
                let changed = self.cursor != end;
                self.cursor = end;
                return moved(changed);
            }
            _ => return EditOutcome::Ignored,
        };
        if edited {
            EditOutcome::Edited
        } else {
            EditOutcome::Ignored
        }
    }
}

fn moved(changed: bool) -> EditOutcome {
    if changed {
        EditOutcome::Moved
    } else {
        EditOutcome::Ignored
    }
}

impl FieldSurface for InputField {
    fn replace_value(&mut self, value: String) {
        self.set_value(value);
    }

    fn clear_hint(&mut self) {
        self.hint = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{EditOutcome, InputField};
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::plain(code)
    }

    #[test]
    fn typing_edits_and_moves_caret() {
        let mut field = InputField::new();
        assert_eq!(field.apply_key(key(KeyCode::Char('p'))), EditOutcome::Edited);
        assert_eq!(field.apply_key(key(KeyCode::Char('e'))), EditOutcome::Edited);
        assert_eq!(field.value(), "pe");
        assert_eq!(field.apply_key(key(KeyCode::Home)), EditOutcome::Moved);
        assert_eq!(field.apply_key(key(KeyCode::Left)), EditOutcome::Ignored);
        assert_eq!(field.apply_key(key(KeyCode::Backspace)), EditOutcome::Ignored);
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn control_chords_are_not_text() {
        let mut field = InputField::new();
        let chord = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(field.apply_key(chord), EditOutcome::Ignored);
        assert_eq!(field.value(), "");
    }

    #[test]
    fn hint_suffix_completes_typed_prefix() {
        let mut field = InputField::new();
        field.set_value("Pe");
        field.set_hint(Some("peach".to_string()));
        assert_eq!(field.hint_suffix(), Some("ach"));
        field.set_hint(Some("plum".to_string()));
        assert_eq!(field.hint_suffix(), None);
        field.set_hint(Some("p".to_string()));
        assert_eq!(field.hint_suffix(), None);
    }
}
