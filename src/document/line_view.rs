use std::borrow::Cow;

/// Snapshot of one paragraph taken for a single navigation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineView<'a> {
    paragraph: usize,
    raw: Cow<'a, str>,
}

impl<'a> LineView<'a> {
    pub fn new(paragraph: usize, raw: impl Into<Cow<'a, str>>) -> Self {
        Self {
            paragraph,
            raw: raw.into(),
        }
    }

    pub fn paragraph(&self) -> usize {
        self.paragraph
    }

    /// Paragraph text as the host reported it, line terminators included
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Paragraph text without trailing carriage returns and line feeds
    pub fn text(&self) -> &str {
        self.raw.trim_end_matches(['\r', '\n'])
    }

    /// Char length of the stripped text
    pub fn len(&self) -> usize {
        self.text().chars().count()
    }

    /// Char length including line terminators
    pub fn raw_len(&self) -> usize {
        self.raw().chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    /// Whether the line holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }

    /// Text between two char offsets of the stripped line
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let text = self.text();
        let byte_at = |idx: usize| {
            text.char_indices()
                .nth(idx)
                .map(|(byte_idx, _)| byte_idx)
                .unwrap_or(text.len())
        };
        let (start, end) = (byte_at(start), byte_at(end));
        &text[start..end.max(start)]
    }
}
