use std::ops::Range;

/// How sure an extractor is about a match. Lower sorts first and wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Confidence {
    /// An unambiguous keyword or a clearly marked number (`[20]`, `第02话`, ` - 10`).
    Explicit,
    /// A form that implies the value indirectly, e.g. `1920x1080`.
    Derived,
    /// A bare token that merely looks right.
    Heuristic,
    /// The opaque-label fallback.
    Fallback,
}

/// One proposed value for a result field, keyed by where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<T> {
    pub value: T,
    /// Index of the source segment.
    pub segment: usize,
    /// Matched bytes in normalized-title coordinates.
    pub span: Range<usize>,
    pub confidence: Confidence,
}

impl<T> Candidate<T> {
    pub fn new(value: T, segment: usize, span: Range<usize>, confidence: Confidence) -> Self {
        Self {
            value,
            segment,
            span,
            confidence,
        }
    }

    /// Returns `true` if both candidates claim some of the same bytes.
    pub fn overlaps(&self, span: &Range<usize>) -> bool {
        self.span.start < span.end && span.start < self.span.end
    }

    /// Precedence key: stronger confidence first, then earlier in the title.
    pub fn rank(&self) -> (Confidence, usize, usize) {
        (self.confidence, self.segment, self.span.start)
    }
}
