//! # Episode-Range Extractor
//!
//! Finds numeric episode tokens segment by segment. A digit run only counts
//! when it stands on its own: glued letters (`1080p`, `x264`, `10bit`),
//! decimals (`5.1`), sizes (`500 MB`), months (`01月`), seasons
//! (`Season 2`) and bare years are rejected. Ranges (`01-12`, `1~25 Fin`,
//! `EP01-EP12`) are proposed ahead of single episodes; a `+` suffix
//! (`01-06TV+特典映像`) is carried over verbatim. When nothing numeric
//! survives, the Arbitrator asks [`fallback`] for an opaque label.
//!
//! The token grammar lives in [`EpisodePatterns`]; this module adds the
//! context checks a pattern cannot express.

use std::cmp::Reverse;
use std::ops::Range;

use tracing::warn;

use super::candidate::{Candidate, Confidence};
use super::dictionary::{EPISODE_PATTERNS, EPISODE_WORDS, EpisodePatterns, is_noise_word};
use super::normalize::Normalized;
use super::segment::{Segment, Segments, Separators};
use crate::types::{EpisodeLabel, EpisodeRange};

/// A run of ASCII digits, offsets relative to the segment content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    start: usize,
    end: usize,
    value: u32,
    width: usize,
}

/// What precedes a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lead {
    /// `第`, `#`, `E`, `EP`, `Episode`.
    Marker,
    /// The ` - 10` separator fansub titles put before the episode.
    Dash,
    Plain,
}

/// What follows a run, up to the end of the episode token.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Tail {
    end: usize,
    version: Option<u8>,
    /// `集`, `话`, `END`, `Fin` and friends.
    marker: bool,
    suffix: Option<Range<usize>>,
}

const NON_EPISODE_WORDS: &[&str] = &[
    "S", "SEASON", "PART", "VOL", "VER", "VERSION", "COUR", "NO", "ARC", "MOVIE", "FILM",
];

/// Proposes every numeric episode range the title could mean.
pub fn extract(normalized: &Normalized<'_>, segments: &Segments) -> Vec<Candidate<EpisodeRange>> {
    let patterns = match &*EPISODE_PATTERNS {
        Ok(patterns) => patterns,
        Err(err) => {
            warn!(error = %err, "episode patterns unavailable, skipping numeric episodes");
            return Vec::new();
        }
    };

    let group = segments.group_index();
    let mut candidates = Vec::new();

    for segment in segments.non_empty() {
        if group == Some(segment.index) {
            continue;
        }
        extract_segment(patterns, normalized, segments, segment, &mut candidates);
    }

    candidates
}

fn extract_segment(
    patterns: &EpisodePatterns,
    normalized: &Normalized<'_>,
    segments: &Segments,
    segment: &Segment,
    out: &mut Vec<Candidate<EpisodeRange>>,
) {
    let text = segments.content(segment);
    let base = segment.content.start;
    // Leads look past the segment start so whitespace-split titles keep context
    let prefix = segments.slice(0..segment.content.end);
    let runs = digit_runs(patterns, text);
    let mut used = vec![false; runs.len()];

    // Step 1: ranges
    for (i, first) in runs.iter().enumerate() {
        if used[i] {
            continue;
        }
        let Some(j) = range_end(patterns, text, &runs, i) else {
            continue;
        };
        let last = runs[j];
        let (Some(lead), Some(tail)) = (
            lead(prefix, base + first.start),
            tail(patterns, text, last.end),
        ) else {
            continue;
        };
        if first.value > last.value || (is_year(*first) && is_year(last)) {
            continue;
        }

        let width = first.width.max(last.width);
        let begin = EpisodeLabel::numeric(first.value, width);
        let end = label(last, tail.version).padded_to(width);
        let mut range = EpisodeRange::range(begin, end);
        if let Some(ref suffix) = tail.suffix {
            range = range.with_suffix(normalized.original_slice(base + suffix.start..base + suffix.end));
        }

        let confidence = confidence(patterns, text, *first, lead, &tail);
        used[i] = true;
        used[j] = true;
        out.push(Candidate::new(
            range,
            segment.index,
            base + first.start..base + tail.end,
            confidence,
        ));
    }

    // Steps 2 and 3: single episodes, with or without a suffix
    for (i, run) in runs.iter().enumerate() {
        if used[i] {
            continue;
        }
        let (Some(lead), Some(tail)) = (
            lead(prefix, base + run.start),
            tail(patterns, text, run.end),
        ) else {
            continue;
        };
        if is_year(*run) && lead != Lead::Marker && !tail.marker {
            continue;
        }

        let mut range = EpisodeRange::single(label(*run, tail.version));
        if let Some(ref suffix) = tail.suffix {
            range = range.with_suffix(normalized.original_slice(base + suffix.start..base + suffix.end));
        }

        let confidence = confidence(patterns, text, *run, lead, &tail);
        out.push(Candidate::new(
            range,
            segment.index,
            base + run.start..base + tail.end,
            confidence,
        ));
    }
}

/// Step 4: an opaque label for titles without any usable episode number.
///
/// Takes the longest text segment that claims no other field and is not
/// technical noise, preferring bare text over bracketed text, then the
/// longest `/`-separated part of it. The label is sliced from the original
/// title so its glyphs survive normalization.
pub fn fallback(
    normalized: &Normalized<'_>,
    segments: &Segments,
    claimed: &[usize],
) -> Candidate<EpisodeRange> {
    let group = segments.group_index();
    let eligible = |s: &&Segment| {
        !claimed.contains(&s.index)
            && group != Some(s.index)
            && segments.content(s).chars().any(char::is_alphabetic)
            && !is_noise_segment(segments, s)
    };
    let longest = |s: &&Segment| Reverse(segments.content(s).chars().count());

    let chosen = segments
        .non_empty()
        .filter(|s| !s.is_bracketed())
        .filter(eligible)
        .min_by_key(longest)
        .or_else(|| {
            segments
                .non_empty()
                .filter(|s| s.is_bracketed())
                .filter(eligible)
                .min_by_key(longest)
        })
        .or_else(|| group.and_then(|idx| segments.get(idx)));

    let Some(segment) = chosen else {
        let title = normalized.original().trim();
        return Candidate::new(
            EpisodeRange::opaque(title),
            0,
            0..normalized.as_str().len(),
            Confidence::Fallback,
        );
    };

    let part = segments
        .parts(segment.index, Separators::SLASH)
        .into_iter()
        .min_by_key(|r| Reverse(segments.slice(r.clone()).chars().count()))
        .unwrap_or_else(|| segment.content.clone());

    let label = normalized.original_slice(part.clone()).trim();
    Candidate::new(
        EpisodeRange::opaque(label),
        segment.index,
        part,
        Confidence::Fallback,
    )
}

fn is_noise_segment(segments: &Segments, segment: &Segment) -> bool {
    segments
        .parts(segment.index, Separators::WORDS)
        .into_iter()
        .map(|r| segments.slice(r))
        .all(|word| is_noise_word(word) || !word.chars().any(char::is_alphabetic))
}

fn digit_runs(patterns: &EpisodePatterns, text: &str) -> Vec<Run> {
    patterns
        .number
        .find_iter(text)
        // Longer runs are hashes, dates or ids
        .filter(|m| m.len() <= 4)
        .filter_map(|m| {
            Some(Run {
                start: m.start(),
                end: m.end(),
                value: m.as_str().parse().ok()?,
                width: m.len(),
            })
        })
        .collect()
}

/// Index of the run closing a range that opens at `runs[i]`.
fn range_end(patterns: &EpisodePatterns, text: &str, runs: &[Run], i: usize) -> Option<usize> {
    let first = runs[i];
    let caps = patterns.range.captures(&text[first.start..])?;
    let end = caps.name("end")?;
    let (start, stop) = (first.start + end.start(), first.start + end.end());
    runs.iter()
        .position(|r| r.start == start && r.end == stop)
        .filter(|&j| j > i)
}

fn label(run: Run, version: Option<u8>) -> EpisodeLabel {
    match version {
        Some(version) => EpisodeLabel::NumericWithVersion {
            value: run.value,
            width: run.width,
            version,
        },
        None => EpisodeLabel::numeric(run.value, run.width),
    }
}

fn is_year(run: Run) -> bool {
    run.width == 4 && (1900..=2099).contains(&run.value)
}

/// Trailing ASCII letters of `text`, uppercased.
fn last_word_upper(text: &str) -> String {
    let start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic())
        .last()
        .map_or(text.len(), |(idx, _)| idx);
    text[start..].to_ascii_uppercase()
}

fn lead(text: &str, start: usize) -> Option<Lead> {
    let before = &text[..start];
    let Some(prev) = before.chars().next_back() else {
        return Some(Lead::Plain);
    };

    match prev {
        '第' | '#' => Some(Lead::Marker),
        c if c.is_ascii_alphabetic() => {
            EPISODE_WORDS.contains(&last_word_upper(before).as_str()).then_some(Lead::Marker)
        }
        '.' => {
            let word = last_word_upper(&before[..before.len() - 1]);
            EPISODE_WORDS.contains(&word.as_str()).then_some(Lead::Marker)
        }
        '-' => match before[..before.len() - 1].chars().next_back() {
            Some(c) if c.is_whitespace() => Some(Lead::Dash),
            Some(c) if c.is_alphanumeric() => None,
            _ => Some(Lead::Plain),
        },
        c if c.is_whitespace() => {
            let trimmed = before.trim_end();
            if let Some(rest) = trimmed.strip_suffix('-') {
                return match rest.chars().next_back() {
                    None => Some(Lead::Dash),
                    Some(c) if c.is_whitespace() => Some(Lead::Dash),
                    _ => Some(Lead::Plain),
                };
            }
            let word = last_word_upper(trimmed);
            if EPISODE_WORDS.contains(&word.as_str()) {
                Some(Lead::Marker)
            } else if NON_EPISODE_WORDS.contains(&word.as_str()) {
                None
            } else {
                Some(Lead::Plain)
            }
        }
        c if c.is_alphanumeric() => None,
        _ => Some(Lead::Plain),
    }
}

fn tail(patterns: &EpisodePatterns, text: &str, end: usize) -> Option<Tail> {
    let rest = &text[end..];
    let caps = patterns.tail.captures(rest)?;
    let len = caps.get(0).map_or(0, |m| m.end());
    if patterns.rejected_after.is_match(&rest[len..]) {
        return None;
    }

    Some(Tail {
        end: end + len,
        version: caps.name("version").and_then(|m| m.as_str().parse().ok()),
        marker: caps.name("mark").is_some(),
        suffix: caps.name("suffix").map(|m| end + m.start()..end + m.end()),
    })
}

fn confidence(patterns: &EpisodePatterns, text: &str, first: Run, lead: Lead, tail: &Tail) -> Confidence {
    if lead != Lead::Plain || tail.marker {
        return Confidence::Explicit;
    }
    let alone_before = text[..first.start].trim().is_empty();
    let alone_after = patterns.qualifiers_only.is_match(&text[tail.end..]);
    if alone_before && alone_after {
        Confidence::Explicit
    } else {
        Confidence::Heuristic
    }
}
