//! Subtitle-kind extractor.

use super::candidate::{Candidate, Confidence};
use super::dictionary::Tag;
use super::segment::Segments;
use super::tags;
use crate::types::SubtitleKind;

/// Proposes every subtitle-kind keyword, in title order.
pub fn extract(segments: &Segments) -> Vec<Candidate<SubtitleKind>> {
    tags::scan(segments)
        .into_iter()
        .filter_map(|hit| match hit.tag {
            Tag::Kind(kind) => Some(Candidate::new(
                kind,
                hit.segment,
                hit.span,
                Confidence::Explicit,
            )),
            _ => None,
        })
        .collect()
}
