pub mod buffer;
pub mod cursor;
pub mod line_view;

pub use buffer::TextBuffer;
pub use cursor::{Direction, Selection, TextPosition};
pub use line_view::LineView;

use crate::navigator::Span;

/// Capabilities the navigator needs from the document hosting the caret
///
/// Paragraphs are addressed by index. Everything the host does with a finished
/// move (placing the caret, speaking the unit, beeping) goes through this trait.
pub trait Document {
    /// Current caret or selection
    fn selection(&self) -> Selection;

    /// Text of a paragraph, possibly ending in `\r`/`\n`
    fn paragraph_text(&self, paragraph: usize) -> Option<&str>;

    /// The paragraph next to `paragraph` in `direction`, if there is one
    fn adjacent_paragraph(&self, paragraph: usize, direction: Direction) -> Option<usize>;

    /// Commit a navigation result by moving the live caret to `span.start`
    fn apply_move(&mut self, span: &Span);

    /// Read back the unit now under the caret
    fn announce_span(&mut self, _span: &Span, _text: &str) {}

    /// Signal that no further unit exists in the requested direction
    fn notify_exhausted(&mut self) {}
}
