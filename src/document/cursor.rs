use crate::error::NavigationError;

/// Position in a document (0-indexed paragraph, char offset within it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextPosition {
    pub paragraph: usize,
    pub offset: usize,
}

impl TextPosition {
    pub fn new(paragraph: usize, offset: usize) -> Self {
        Self { paragraph, offset }
    }
}

/// Caret or selection held by the host.
///
/// A collapsed selection (start == end) is a plain caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: TextPosition,
    pub end: TextPosition,
}

impl Selection {
    pub fn new(start: TextPosition, end: TextPosition) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    pub fn caret(position: TextPosition) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Collapse to the trailing edge when `to_end`, otherwise to the leading edge
    pub fn collapse(&self, to_end: bool) -> TextPosition {
        if to_end { self.end } else { self.start }
    }
}

/// Direction of a navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    /// Map a gesture's main key name to a direction
    pub fn from_key_name(key: &str) -> Result<Self, NavigationError> {
        match key {
            "leftArrow" => Ok(Direction::Backward),
            "rightArrow" => Ok(Direction::Forward),
            _ => Err(NavigationError::UnrecognizedKey(key.to_string())),
        }
    }

    pub fn is_forward(self) -> bool {
        self == Direction::Forward
    }
}
