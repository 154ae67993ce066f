use std::fmt;

use itertools::Itertools;
use regex::Regex;

use crate::error::ConfigError;

/// Default set of characters that split bulky words, on top of whitespace
pub const DEFAULT_BULKY_PUNCTUATION: &str = "():";

/// How a line of text is split into navigable units
#[derive(Debug, Clone)]
pub enum SegmentationPolicy {
    /// Word processor style words: alphanumeric runs and punctuation runs
    Word,
    /// Words further split at `snake_case` underscores and `camelCase` humps
    FineWord,
    /// Runs of text separated only by whitespace and a configured punctuation set
    BulkyWord(BulkyMatcher),
}

impl SegmentationPolicy {
    /// Bulky word policy with the given separator characters
    pub fn bulky(punctuation: &str) -> Result<Self, ConfigError> {
        Ok(Self::BulkyWord(BulkyMatcher::new(punctuation)?))
    }

    /// Short name used in logs and the CLI
    pub fn name(&self) -> &'static str {
        match self {
            SegmentationPolicy::Word => "word",
            SegmentationPolicy::FineWord => "fine word",
            SegmentationPolicy::BulkyWord(_) => "bulky word",
        }
    }

    /// Compute the boundaries of `text` under this policy
    pub fn boundaries(&self, text: &str) -> Vec<usize> {
        boundaries(text, self)
    }
}

impl fmt::Display for SegmentationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compiled matcher for bulky word starts.
///
/// A bulky word starts at any character that is neither whitespace nor one of the
/// configured separators, when it opens the line or follows such a separator.
#[derive(Debug, Clone)]
pub struct BulkyMatcher {
    punctuation: String,
    regex: Regex,
}

impl BulkyMatcher {
    pub fn new(punctuation: &str) -> Result<Self, ConfigError> {
        // Separators go into a character class, so every metacharacter must be literal.
        let separators = format!(r"\s{}", regex::escape(punctuation));
        let pattern = format!(r"(?:^|[{separators}])([^{separators}])");
        let regex = Regex::new(&pattern).map_err(|source| ConfigError::Punctuation {
            punctuation: punctuation.to_string(),
            source,
        })?;

        Ok(Self {
            punctuation: punctuation.to_string(),
            regex,
        })
    }

    /// The configured separator characters (whitespace is always a separator too)
    pub fn punctuation(&self) -> &str {
        &self.punctuation
    }

    /// Byte offsets of every bulky word start in `text`
    fn word_starts<'a>(&'a self, text: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.start())
    }
}

/// Compute the sorted, deduplicated char offsets at which units of `text` begin.
///
/// The result always contains `0` and the char length of `text`.
pub fn boundaries(text: &str, policy: &SegmentationPolicy) -> Vec<usize> {
    let chars: Vec<char> = text.chars().collect();

    let starts: Vec<usize> = match policy {
        SegmentationPolicy::Word => word_starts(&chars, false),
        SegmentationPolicy::FineWord => word_starts(&chars, true),
        SegmentationPolicy::BulkyWord(matcher) => {
            let byte_starts: Vec<usize> = matcher.word_starts(text).collect();
            byte_offsets_to_chars(text, &byte_starts)
        }
    };

    std::iter::once(0)
        .chain(starts)
        .chain(std::iter::once(chars.len()))
        .sorted_unstable()
        .dedup()
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_punctuation(c: char) -> bool {
    !is_word_char(c) && !c.is_whitespace()
}

fn word_starts(chars: &[char], fine: bool) -> Vec<usize> {
    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            is_word_start(prev, c) || (fine && is_fine_word_start(prev, c))
        })
        .map(|(i, _)| i)
        .collect()
}

fn is_word_start(prev: Option<char>, c: char) -> bool {
    match prev {
        None => true,
        Some(p) if is_word_char(c) => !is_word_char(p),
        Some(p) if is_punctuation(c) => !is_punctuation(p),
        Some(_) => false,
    }
}

fn is_fine_word_start(prev: Option<char>, c: char) -> bool {
    match prev {
        Some('_') => is_word_char(c) && c != '_',
        Some(p) => p.is_lowercase() && c.is_uppercase(),
        None => false,
    }
}

/// Convert sorted byte offsets into char offsets in a single pass
fn byte_offsets_to_chars(text: &str, byte_offsets: &[usize]) -> Vec<usize> {
    let mut offsets = byte_offsets.iter().peekable();
    let mut result = Vec::with_capacity(byte_offsets.len());

    for (char_idx, (byte_idx, _)) in text.char_indices().enumerate() {
        while offsets.next_if(|&&b| b == byte_idx).is_some() {
            result.push(char_idx);
        }
        if offsets.peek().is_none() {
            break;
        }
    }

    result
}
