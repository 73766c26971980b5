//! # Title Parser
//!
//! Normalizer → Segmenter → four independent extractors → Arbitrator.
//! Extractors only propose [`Candidate`]s; every precedence decision lives
//! in the [`arbiter`].

pub mod arbiter;
pub mod candidate;
pub mod dictionary;
pub mod episode;
pub mod kind;
pub mod language;
pub mod normalize;
pub mod resolution;
pub mod segment;
pub mod tags;

use tracing::trace;

pub use arbiter::{Candidates, arbitrate};
pub use candidate::{Candidate, Confidence};
pub use normalize::{Normalized, normalize};
pub use segment::{Bracket, Segment, Segments, Separators, segment};

use crate::types::ParseResult;

/// Parses one release title.
///
/// Never fails: fields that cannot be found fall back to the empty language
/// set, [`Resolution::Unknown`](crate::types::Resolution::Unknown), no
/// subtitle kind, and an opaque episode label.
///
/// # Examples
/// ```
/// use jimaku_core::parser::parse;
///
/// let result = parse("[Lilith-Raws] 怪人的沙拉碗 / Henjin no Salad Bowl - 10 [Baha][WebDL 1080p AVC AAC][CHT]");
///
/// assert_eq!(result.episode_range_string(), "10..10");
/// assert_eq!(result.languages_string(), "CHT");
/// assert_eq!(result.resolution_string(), "1080P");
/// assert_eq!(result.subtitle_kind, None);
/// ```
#[must_use]
pub fn parse(title: &str) -> ParseResult {
    let normalized = normalize(title);
    let segments = segment(&normalized);

    let candidates = Candidates {
        episodes: episode::extract(&normalized, &segments),
        languages: language::extract(&segments),
        resolutions: resolution::extract(&segments),
        kinds: kind::extract(&segments),
    };
    trace!(
        segments = segments.len(),
        episodes = candidates.episodes.len(),
        languages = candidates.languages.len(),
        resolutions = candidates.resolutions.len(),
        kinds = candidates.kinds.len(),
        "extracted candidates"
    );

    arbitrate(&normalized, &segments, candidates)
}
