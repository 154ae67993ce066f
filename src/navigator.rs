use tracing::{debug, trace};

use crate::document::{Direction, Document, LineView, TextPosition};
use crate::segmenter::SegmentationPolicy;

/// Upper bound on the paragraphs inspected by one navigation step
pub const DEFAULT_MAX_PARAGRAPH_CROSSINGS: usize = 100;

/// Unit of text within one paragraph, as char offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub paragraph: usize,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(paragraph: usize, start: usize, end: usize) -> Self {
        Self {
            paragraph,
            start,
            end,
        }
    }

    pub fn start_position(&self) -> TextPosition {
        TextPosition::new(self.paragraph, self.start)
    }

    pub fn end_position(&self) -> TextPosition {
        TextPosition::new(self.paragraph, self.end)
    }

    /// Zero-width spans occur when the caret lands on the end of a line
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Result of one navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The caret moved; the span is the unit now under it
    Moved(Span),
    /// Nothing further in the requested direction
    BoundaryExhausted,
}

/// Where the caret sits relative to the line being searched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Caret {
    /// Entering the line from the previous paragraph
    BeforeStart,
    At(usize),
    /// Entering the line from the next paragraph, at its raw length
    AfterEnd,
}

/// What inspecting a single paragraph produced
#[derive(Debug)]
enum Inspection {
    Found { span: Span, text: String },
    NoBoundaryInDirection,
    MissingParagraph,
}

/// Moves a document's caret by one unit of a segmentation policy
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    policy: &'a SegmentationPolicy,
    max_paragraph_crossings: usize,
}

impl<'a> Navigator<'a> {
    pub fn new(policy: &'a SegmentationPolicy) -> Self {
        Self {
            policy,
            max_paragraph_crossings: DEFAULT_MAX_PARAGRAPH_CROSSINGS,
        }
    }

    /// Limit the paragraphs inspected per step (at least one)
    pub fn with_max_paragraph_crossings(mut self, max: usize) -> Self {
        self.max_paragraph_crossings = max.max(1);
        self
    }

    pub fn policy(&self) -> &SegmentationPolicy {
        self.policy
    }

    /// Move the caret to the next unit boundary in `direction`.
    ///
    /// Searches the caret's paragraph first, then keeps crossing into adjacent
    /// paragraphs while they are blank or have no boundary left in that direction.
    /// On success the document gets `apply_move` followed by `announce_span`;
    /// reaching either end of the document, or running out of crossings, calls
    /// `notify_exhausted` instead.
    pub fn move_by_unit<D>(&self, document: &mut D, direction: Direction) -> NavigationOutcome
    where
        D: Document + ?Sized,
    {
        let origin = document.selection().collapse(direction.is_forward());
        let mut paragraph = origin.paragraph;
        let mut caret = Caret::At(origin.offset);

        for attempt in 0..self.max_paragraph_crossings {
            match self.inspect(&*document, paragraph, caret, direction) {
                Inspection::Found { span, text } => {
                    debug!(
                        policy = %self.policy,
                        ?direction,
                        attempt,
                        paragraph = span.paragraph,
                        start = span.start,
                        end = span.end,
                        "moved by unit"
                    );
                    document.apply_move(&span);
                    document.announce_span(&span, &text);
                    return NavigationOutcome::Moved(span);
                }
                Inspection::MissingParagraph => {
                    debug!(paragraph, "host has no text for paragraph");
                    return Self::exhausted(document);
                }
                Inspection::NoBoundaryInDirection => {}
            }

            let Some(next) = document.adjacent_paragraph(paragraph, direction) else {
                debug!(?direction, paragraph, "reached edge of document");
                return Self::exhausted(document);
            };

            trace!(from = paragraph, to = next, attempt, "crossing paragraph");
            paragraph = next;
            caret = match direction {
                Direction::Forward => Caret::BeforeStart,
                Direction::Backward => Caret::AfterEnd,
            };
        }

        debug!(
            max = self.max_paragraph_crossings,
            "gave up after inspecting the maximum number of paragraphs"
        );
        Self::exhausted(document)
    }

    fn exhausted<D>(document: &mut D) -> NavigationOutcome
    where
        D: Document + ?Sized,
    {
        document.notify_exhausted();
        NavigationOutcome::BoundaryExhausted
    }

    fn inspect<D>(
        &self,
        document: &D,
        paragraph: usize,
        caret: Caret,
        direction: Direction,
    ) -> Inspection
    where
        D: Document + ?Sized,
    {
        let Some(raw) = document.paragraph_text(paragraph) else {
            return Inspection::MissingParagraph;
        };
        let line = LineView::new(paragraph, raw);
        if line.is_blank() {
            return Inspection::NoBoundaryInDirection;
        }

        let boundaries = self.policy.boundaries(line.text());
        let Some(index) = select_boundary(&boundaries, caret, line.raw_len(), direction) else {
            return Inspection::NoBoundaryInDirection;
        };

        let start = boundaries[index];
        // Read up to the following boundary so the unit is not a zero-width point
        let end = boundaries.get(index + 1).copied().unwrap_or(start);
        Inspection::Found {
            span: Span::new(paragraph, start, end),
            text: line.slice(start, end).to_string(),
        }
    }
}

/// Index of the boundary the caret moves to, if any lies in `direction`.
///
/// Forward picks the first boundary strictly after the caret, backward the last
/// one strictly before it. `raw_len` counts line terminators, so a line ending
/// in one is entered backward at its end boundary.
fn select_boundary(
    boundaries: &[usize],
    caret: Caret,
    raw_len: usize,
    direction: Direction,
) -> Option<usize> {
    let index = match (direction, caret) {
        (Direction::Forward, Caret::BeforeStart) => 0,
        (Direction::Forward, Caret::At(offset)) => boundaries.partition_point(|&b| b <= offset),
        (Direction::Forward, Caret::AfterEnd) => boundaries.len(),
        (Direction::Backward, Caret::BeforeStart) => return None,
        (Direction::Backward, Caret::At(offset)) => {
            boundaries.partition_point(|&b| b < offset).checked_sub(1)?
        }
        (Direction::Backward, Caret::AfterEnd) => {
            boundaries.partition_point(|&b| b < raw_len).checked_sub(1)?
        }
    };

    (index < boundaries.len()).then_some(index)
}
