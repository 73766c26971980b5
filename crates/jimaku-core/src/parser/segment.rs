//! # Segmenter
//!
//! Cuts a normalized title into the ordered, non-overlapping spans every
//! extractor competes over. Bracket pairs delimit segments, runs between
//! brackets are segments of their own, and `★` separates segments at the
//! top level. Titles without any of those fall back to one segment per
//! whitespace-delimited word.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Range;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::normalize::Normalized;

bitflags! {
    /// Characters that sub-split a segment on request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Separators: u8 {
        const SLASH = 1;
        const AMPERSAND = 1 << 1;
        const WHITESPACE = 1 << 2;
        const UNDERSCORE = 1 << 3;
        const PLUS = 1 << 4;
        const COMMA = 1 << 5;

        /// Splits tag lists such as `CHS&CHT`, `简繁 内封` or `GB_MP4` into words.
        const WORDS = Self::SLASH.bits()
            | Self::AMPERSAND.bits()
            | Self::WHITESPACE.bits()
            | Self::UNDERSCORE.bits()
            | Self::PLUS.bits()
            | Self::COMMA.bits();
    }
}

impl Separators {
    fn matches(self, c: char) -> bool {
        (self.contains(Self::SLASH) && c == '/')
            || (self.contains(Self::AMPERSAND) && c == '&')
            || (self.contains(Self::WHITESPACE) && c.is_whitespace())
            || (self.contains(Self::UNDERSCORE) && c == '_')
            || (self.contains(Self::PLUS) && c == '+')
            || (self.contains(Self::COMMA) && (c == ',' || c == '、'))
    }
}

/// Bracket style that delimits a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bracket {
    /// `[...]`, also `【...】` before normalization.
    Square,
    /// `(...)`, also `（...）` before normalization.
    Round,
}

impl Bracket {
    fn open(c: char) -> Option<Self> {
        match c {
            '[' => Some(Self::Square),
            '(' => Some(Self::Round),
            _ => None,
        }
    }

    fn pair(self) -> (char, char) {
        match self {
            Self::Square => ('[', ']'),
            Self::Round => ('(', ')'),
        }
    }
}

/// One atomic span of a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Position in the segment list.
    pub index: usize,
    /// Delimiting bracket, `None` for bare text between brackets.
    pub bracket: Option<Bracket>,
    /// Everything the segment owns, delimiters included.
    pub span: Range<usize>,
    /// Trimmed content, delimiters excluded.
    pub content: Range<usize>,
}

impl Segment {
    /// Returns `true` if the segment carries no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns `true` if the segment is bracket-delimited.
    #[must_use]
    pub fn is_bracketed(&self) -> bool {
        self.bracket.is_some()
    }
}

/// Separators that close a bare segment at the top level.
const HARD_SEPARATORS: &[char] = &['★', '☆'];

/// The ordered segment list of one title, plus its sub-split cache.
#[derive(Debug)]
pub struct Segments {
    text: String,
    items: Vec<Segment>,
    parts: RefCell<HashMap<(usize, Separators), Vec<Range<usize>>>>,
}

impl Segments {
    /// All segments in title order.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.items.iter()
    }

    /// Segments that carry text.
    pub fn non_empty(&self) -> impl Iterator<Item = &Segment> {
        self.items.iter().filter(|s| !s.is_empty())
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the title produced no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Segment by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.items.get(index)
    }

    /// The normalized text of a segment's content.
    #[must_use]
    pub fn content(&self, segment: &Segment) -> &str {
        &self.text[segment.content.clone()]
    }

    /// The normalized text of any range.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> &str {
        &self.text[range]
    }

    /// Index of the release-group tag: a leading bracketed segment, when the
    /// title has anything after it.
    #[must_use]
    pub fn group_index(&self) -> Option<usize> {
        let mut filled = self.non_empty();
        let first = filled.next()?;
        (first.is_bracketed() && filled.next().is_some()).then_some(first.index)
    }

    /// Sub-splits a segment's content on the given separators.
    ///
    /// Returns trimmed, non-empty ranges in title coordinates. Results are
    /// cached per segment and separator set.
    #[must_use]
    pub fn parts(&self, index: usize, separators: Separators) -> Vec<Range<usize>> {
        let Some(segment) = self.items.get(index) else {
            return Vec::new();
        };
        if let Some(cached) = self.parts.borrow().get(&(index, separators)) {
            return cached.clone();
        }

        let mut parts = Vec::new();
        let mut start = segment.content.start;
        for (offset, c) in self.content(segment).char_indices() {
            if separators.matches(c) {
                let at = segment.content.start + offset;
                push_trimmed(&self.text, start..at, &mut parts);
                start = at + c.len_utf8();
            }
        }
        push_trimmed(&self.text, start..segment.content.end, &mut parts);

        self.parts
            .borrow_mut()
            .insert((index, separators), parts.clone());
        parts
    }
}

/// Splits a normalized title into segments.
#[must_use]
pub fn segment(normalized: &Normalized<'_>) -> Segments {
    let text = normalized.as_str();
    let mut items = split_brackets(text);

    let single_bare = items.iter().filter(|s| !s.is_empty()).count() <= 1
        && items.iter().all(|s| !s.is_bracketed());
    if single_bare && !text.contains(HARD_SEPARATORS) {
        items = split_whitespace(text);
    }

    Segments {
        text: text.to_string(),
        items,
        parts: RefCell::new(HashMap::new()),
    }
}

fn split_brackets(text: &str) -> Vec<Segment> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut resume = 0;

    for (idx, c) in text.char_indices() {
        if idx < resume {
            continue;
        }

        if let Some(bracket) = Bracket::open(c) {
            if let Some(close) = find_close(text, idx, bracket) {
                push_segment(text, &mut items, None, start..idx, start..idx);
                push_segment(
                    text,
                    &mut items,
                    Some(bracket),
                    idx..close + 1,
                    idx + 1..close,
                );
                start = close + 1;
                resume = close + 1;
            }
        } else if HARD_SEPARATORS.contains(&c) {
            let end = idx + c.len_utf8();
            push_segment(text, &mut items, None, start..end, start..idx);
            start = end;
        }
    }
    push_segment(text, &mut items, None, start..text.len(), start..text.len());

    items
}

fn split_whitespace(text: &str) -> Vec<Segment> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut in_word = false;

    for (idx, c) in text.char_indices() {
        let space = c.is_whitespace();
        if space && in_word {
            push_segment(text, &mut items, None, start..idx, start..idx);
            start = idx;
        }
        in_word = !space;
    }
    push_segment(text, &mut items, None, start..text.len(), start..text.len());

    items
}

/// Finds the byte offset of the bracket closing the one opened at `open`.
fn find_close(text: &str, open: usize, bracket: Bracket) -> Option<usize> {
    let (opener, closer) = bracket.pair();
    let mut depth = 0usize;
    for (idx, c) in text[open..].char_indices() {
        if c == opener {
            depth += 1;
        } else if c == closer {
            depth -= 1;
            if depth == 0 {
                return Some(open + idx);
            }
        }
    }
    None
}

fn push_segment(
    text: &str,
    items: &mut Vec<Segment>,
    bracket: Option<Bracket>,
    span: Range<usize>,
    content: Range<usize>,
) {
    if span.is_empty() {
        return;
    }
    items.push(Segment {
        index: items.len(),
        bracket,
        span,
        content: trim_range(text, content),
    });
}

fn push_trimmed(text: &str, range: Range<usize>, parts: &mut Vec<Range<usize>>) {
    let trimmed = trim_range(text, range);
    if !trimmed.is_empty() {
        parts.push(trimmed);
    }
}

fn trim_range(text: &str, range: Range<usize>) -> Range<usize> {
    let slice = &text[range.clone()];
    let start = range.start + (slice.len() - slice.trim_start().len());
    let end = range.end - (slice.len() - slice.trim_end().len());
    start..end.max(start)
}
