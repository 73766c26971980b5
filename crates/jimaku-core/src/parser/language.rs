//! Subtitle-language extractor.

use super::candidate::{Candidate, Confidence};
use super::dictionary::Tag;
use super::segment::Segments;
use super::tags;
use crate::types::SubtitleLanguage;

/// Proposes every language the title declares, in title order.
///
/// Duplicates are kept here and collapse when the result set is built.
pub fn extract(segments: &Segments) -> Vec<Candidate<SubtitleLanguage>> {
    tags::scan(segments)
        .into_iter()
        .filter_map(|hit| match hit.tag {
            Tag::Language(lang) => Some(Candidate::new(
                lang,
                hit.segment,
                hit.span,
                Confidence::Explicit,
            )),
            _ => None,
        })
        .collect()
}
