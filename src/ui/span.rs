use crate::ui::style::Style;
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    NoWrap,
    Wrap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
    pub wrap_mode: WrapMode,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::default(),
            wrap_mode: WrapMode::Wrap,
        }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            wrap_mode: WrapMode::Wrap,
        }
    }

    pub fn no_wrap(mut self) -> Self {
        self.wrap_mode = WrapMode::NoWrap;
        self
    }
}

pub type SpanLine = Vec<Span>;

pub fn line_text(line: &[Span]) -> String {
    line.iter().map(|span| span.text.as_str()).collect()
}

/// Cuts a line so its display width fits `max_width` columns.
pub fn clip_line(line: SpanLine, max_width: usize) -> SpanLine {
    let mut used = 0usize;
    let mut out = SpanLine::new();
    for span in line {
        if used >= max_width {
            break;
        }
        let mut text = String::new();
        for ch in span.text.chars().filter(|ch| !matches!(ch, '\n' | '\r')) {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if used.saturating_add(ch_width) > max_width {
                used = max_width;
                break;
            }
            text.push(ch);
            used = used.saturating_add(ch_width);
        }
        if !text.is_empty() {
            out.push(Span {
                text,
                style: span.style,
                wrap_mode: span.wrap_mode,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{Span, clip_line, line_text};

    #[test]
    fn clip_respects_wide_chars() {
        let line = vec![Span::new("ab"), Span::new("漢字x")];
        assert_eq!(line_text(&clip_line(line.clone(), 4)), "ab漢");
        assert_eq!(line_text(&clip_line(line.clone(), 5)), "ab漢");
        assert_eq!(line_text(&clip_line(line, 10)), "ab漢字x");
    }
}
