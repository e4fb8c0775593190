use crate::terminal::CursorPos;
use crate::ui::span::SpanLine;

/// One full screen's worth of lines plus where the caret goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

impl RenderFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: SpanLine) {
        self.lines.push(line);
    }

    /// Appends `other` below this frame, shifting its cursor down.
    pub fn append(&mut self, other: RenderFrame) {
        let offset = self.lines.len() as u16;
        if let Some(cursor) = other.cursor {
            self.cursor = Some(CursorPos {
                col: cursor.col,
                row: cursor.row.saturating_add(offset),
            });
        }
        self.lines.extend(other.lines);
    }
}

#[cfg(test)]
mod tests {
    use super::RenderFrame;
    use crate::terminal::CursorPos;
    use crate::ui::span::Span;

    #[test]
    fn append_offsets_cursor() {
        let mut frame = RenderFrame::new();
        frame.push(vec![Span::new("title")]);
        let mut field = RenderFrame::new();
        field.push(vec![Span::new("pe")]);
        field.cursor = Some(CursorPos { col: 2, row: 0 });
        frame.append(field);
        assert_eq!(frame.lines.len(), 2);
        assert_eq!(frame.cursor, Some(CursorPos { col: 2, row: 1 }));
    }
}
