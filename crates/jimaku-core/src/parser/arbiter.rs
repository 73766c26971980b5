//! # Arbitrator
//!
//! Turns the four candidate lists into one [`ParseResult`]. Keyword fields
//! are settled first; their spans are then claimed so an episode number
//! can never be read out of a resolution or a tag. The episode field takes
//! the best-ranked unclaimed candidate, or the opaque fallback.

use std::collections::BTreeSet;
use std::ops::Range;

use tracing::debug;

use super::candidate::Candidate;
use super::episode;
use super::normalize::Normalized;
use super::segment::Segments;
use crate::types::{EpisodeRange, ParseResult, Resolution, SubtitleKind, SubtitleLanguage};

/// Every candidate the extractors proposed for one title.
#[derive(Debug, Default)]
pub struct Candidates {
    pub episodes: Vec<Candidate<EpisodeRange>>,
    pub languages: Vec<Candidate<SubtitleLanguage>>,
    pub resolutions: Vec<Candidate<Resolution>>,
    pub kinds: Vec<Candidate<SubtitleKind>>,
}

/// Resolves the candidates into the final result.
pub fn arbitrate(
    normalized: &Normalized<'_>,
    segments: &Segments,
    candidates: Candidates,
) -> ParseResult {
    let Candidates {
        episodes,
        languages,
        resolutions,
        kinds,
    } = candidates;

    let claims: Vec<(usize, Range<usize>)> = languages
        .iter()
        .map(|c| (c.segment, c.span.clone()))
        .chain(resolutions.iter().map(|c| (c.segment, c.span.clone())))
        .chain(kinds.iter().map(|c| (c.segment, c.span.clone())))
        .collect();

    let resolution = pick_resolution(resolutions);
    let subtitle_kind = kinds
        .into_iter()
        .min_by_key(|c| (c.segment, c.span.start))
        .map(|c| c.value);
    let subtitle_languages: BTreeSet<SubtitleLanguage> =
        languages.into_iter().map(|c| c.value).collect();
    let episode_range = pick_episode(normalized, segments, episodes, &claims);

    ParseResult {
        episode_range,
        subtitle_languages,
        resolution,
        subtitle_kind,
    }
}

fn pick_resolution(candidates: Vec<Candidate<Resolution>>) -> Resolution {
    let Some(best) = candidates.iter().min_by_key(|c| c.rank()) else {
        return Resolution::Unknown;
    };

    let dropped = candidates.iter().filter(|c| c.value != best.value).count();
    if dropped > 0 {
        debug!(
            kept = %best.value,
            dropped,
            "conflicting resolution candidates dropped"
        );
    }

    best.value
}

fn pick_episode(
    normalized: &Normalized<'_>,
    segments: &Segments,
    candidates: Vec<Candidate<EpisodeRange>>,
    claims: &[(usize, Range<usize>)],
) -> EpisodeRange {
    let total = candidates.len();
    let mut unclaimed: Vec<_> = candidates
        .into_iter()
        .filter(|c| !claims.iter().any(|(_, span)| c.overlaps(span)))
        .collect();
    if unclaimed.len() < total {
        debug!(
            dropped = total - unclaimed.len(),
            "episode candidates overlapping other fields dropped"
        );
    }

    // Ranges outrank single episodes of the same confidence
    unclaimed.sort_by_key(|c| {
        (
            c.confidence,
            c.value.is_single(),
            c.segment,
            c.span.start,
        )
    });

    let mut ranked = unclaimed.into_iter();
    if let Some(best) = ranked.next() {
        let dropped = ranked.filter(|c| c.value != best.value).count();
        if dropped > 0 {
            debug!(
                kept = %best.value,
                dropped,
                "conflicting episode candidates dropped"
            );
        }
        return best.value;
    }

    let claimed: Vec<usize> = claims.iter().map(|(segment, _)| *segment).collect();
    let fallback = episode::fallback(normalized, segments, &claimed);
    debug!(label = %fallback.value, "no numeric episode, using opaque label");
    fallback.value
}
