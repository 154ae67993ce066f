use std::path::{Path, PathBuf};

use miette::Result;

use super::{Direction, Document, LineView, Selection, TextPosition};
use crate::navigator::Span;

/// In-memory document where every line is a paragraph
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// Path to the file (if loaded from disk)
    file_path: Option<PathBuf>,
    /// Paragraph texts
    paragraphs: Vec<String>,
    /// Current caret or selection
    selection: Selection,
    /// Last unit read back after a move
    last_announcement: Option<(Span, String)>,
    /// How many times navigation ran into the start or end of the document
    exhausted_count: usize,
}

impl TextBuffer {
    /// Create a new buffer holding a single empty paragraph
    pub fn new() -> Self {
        Self::from_paragraphs(vec![String::new()])
    }

    /// Create buffer from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| miette::miette!("Failed to read file {}: {}", path.display(), e))?;

        let mut buffer = Self::from_string(&content);
        buffer.file_path = Some(path.to_path_buf());
        Ok(buffer)
    }

    /// Create buffer from string, one paragraph per line
    pub fn from_string(content: &str) -> Self {
        Self::from_paragraphs(Self::extract_lines(content))
    }

    /// Create buffer from raw paragraph texts, kept exactly as given
    pub fn from_paragraphs<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut paragraphs: Vec<String> = paragraphs.into_iter().map(Into::into).collect();
        if paragraphs.is_empty() {
            paragraphs.push(String::new());
        }

        Self {
            file_path: None,
            paragraphs,
            selection: Selection::default(),
            last_announcement: None,
            exhausted_count: 0,
        }
    }

    fn extract_lines(content: &str) -> Vec<String> {
        if content.is_empty() {
            vec![String::new()]
        } else {
            content.lines().map(|s| s.to_string()).collect()
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn content(&self) -> String {
        self.paragraphs.join("\n")
    }

    /// Char count of a paragraph with line terminators stripped
    fn paragraph_char_count(&self, paragraph: usize) -> usize {
        self.paragraphs
            .get(paragraph)
            .map(|text| LineView::new(paragraph, text.as_str()).len())
            .unwrap_or(0)
    }

    /// Place a collapsed caret, clamped to the document
    pub fn set_caret(&mut self, paragraph: usize, offset: usize) {
        let paragraph = paragraph.min(self.paragraphs.len() - 1);
        let offset = offset.min(self.paragraph_char_count(paragraph));
        self.selection = Selection::caret(TextPosition::new(paragraph, offset));
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Caret position (the leading edge of the selection)
    pub fn caret(&self) -> TextPosition {
        self.selection.start
    }

    pub fn last_announcement(&self) -> Option<&(Span, String)> {
        self.last_announcement.as_ref()
    }

    pub fn exhausted_count(&self) -> usize {
        self.exhausted_count
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for TextBuffer {
    fn selection(&self) -> Selection {
        self.selection
    }

    fn paragraph_text(&self, paragraph: usize) -> Option<&str> {
        self.paragraphs.get(paragraph).map(String::as_str)
    }

    fn adjacent_paragraph(&self, paragraph: usize, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Backward => paragraph.checked_sub(1),
            Direction::Forward => {
                Some(paragraph + 1).filter(|&next| next < self.paragraphs.len())
            }
        }
    }

    fn apply_move(&mut self, span: &Span) {
        self.selection = Selection::caret(span.start_position());
    }

    fn announce_span(&mut self, span: &Span, text: &str) {
        self.last_announcement = Some((*span, text.to_string()));
    }

    fn notify_exhausted(&mut self) {
        self.exhausted_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_empty_buffer() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.paragraph_count(), 1);
        assert_eq!(buffer.caret(), TextPosition::new(0, 0));
        assert_eq!(buffer.paragraph_text(0), Some(""));
    }

    #[test]
    fn test_from_string() {
        let buffer = TextBuffer::from_string("# Hello\n\nWorld");
        assert_eq!(buffer.paragraph_count(), 3);
        assert_eq!(buffer.paragraph_text(0), Some("# Hello"));
        assert_eq!(buffer.paragraph_text(1), Some(""));
        assert_eq!(buffer.paragraph_text(2), Some("World"));
        assert_eq!(buffer.paragraph_text(3), None);
        assert_eq!(buffer.content(), "# Hello\n\nWorld");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "first line\r\nsecond line\r\n").unwrap();

        let buffer = TextBuffer::from_file(file.path()).unwrap();
        assert_eq!(buffer.paragraph_count(), 2);
        assert_eq!(buffer.paragraph_text(1), Some("second line"));
        assert_eq!(buffer.file_path(), Some(file.path()));
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TextBuffer::from_file(dir.path().join("missing.txt")).is_err());
    }

    #[test]
    fn test_adjacent_paragraph() {
        let buffer = TextBuffer::from_string("a\nb\nc");
        assert_eq!(buffer.adjacent_paragraph(0, Direction::Backward), None);
        assert_eq!(buffer.adjacent_paragraph(0, Direction::Forward), Some(1));
        assert_eq!(buffer.adjacent_paragraph(2, Direction::Backward), Some(1));
        assert_eq!(buffer.adjacent_paragraph(2, Direction::Forward), None);
    }

    #[test]
    fn test_set_caret_clamps() {
        let mut buffer = TextBuffer::from_paragraphs(["héllo\r\n", "x"]);
        buffer.set_caret(0, 99);
        assert_eq!(buffer.caret(), TextPosition::new(0, 5));
        buffer.set_caret(7, 3);
        assert_eq!(buffer.caret(), TextPosition::new(1, 1));
    }

    #[test]
    fn test_apply_move_and_announce() {
        let mut buffer = TextBuffer::from_string("hello world");
        let span = Span::new(0, 6, 11);
        buffer.apply_move(&span);
        buffer.announce_span(&span, "world");

        assert_eq!(buffer.caret(), TextPosition::new(0, 6));
        assert!(buffer.selection().is_collapsed());
        assert_eq!(
            buffer.last_announcement(),
            Some(&(span, "world".to_string()))
        );

        buffer.notify_exhausted();
        assert_eq!(buffer.exhausted_count(), 1);
    }
}
