//! Resolution extractor.
//!
//! Explicit tiers (`1080p`, `4K`) are `Explicit` candidates; pixel forms
//! (`1920x1080`) are `Derived`, so an explicit tier wins any disagreement.

use tracing::warn;

use super::candidate::{Candidate, Confidence};
use super::dictionary::{RESOLUTION_PATTERNS, lookup_dimensions};
use super::segment::Segments;
use crate::types::Resolution;

/// Proposes every resolution token in the title.
pub fn extract(segments: &Segments) -> Vec<Candidate<Resolution>> {
    let patterns = match &*RESOLUTION_PATTERNS {
        Ok(patterns) => patterns,
        Err(err) => {
            warn!(error = %err, "resolution patterns unavailable, skipping resolution");
            return Vec::new();
        }
    };

    let mut candidates = Vec::new();
    for segment in segments.non_empty() {
        let content = segments.content(segment);
        let base = segment.content.start;

        for caps in patterns.tier.captures_iter(content) {
            let found = if let Some(lines) = caps.name("lines") {
                lines
                    .as_str()
                    .parse()
                    .ok()
                    .and_then(Resolution::from_lines)
                    // include the trailing p/i
                    .map(|res| (res, lines.start()..lines.end() + 1))
            } else {
                caps.name("uhd").map(|m| (Resolution::UHD4K, m.range()))
            };

            if let Some((res, range)) = found {
                candidates.push(Candidate::new(
                    res,
                    segment.index,
                    base + range.start..base + range.end,
                    Confidence::Explicit,
                ));
            }
        }

        for caps in patterns.dimensions.captures_iter(content) {
            let (Some(w), Some(h)) = (caps.name("w"), caps.name("h")) else {
                continue;
            };
            let (Ok(width), Ok(height)) = (w.as_str().parse(), h.as_str().parse()) else {
                continue;
            };
            if let Some(res) = lookup_dimensions(width, height) {
                candidates.push(Candidate::new(
                    res,
                    segment.index,
                    base + w.start()..base + h.end(),
                    Confidence::Derived,
                ));
            }
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::normalize::normalize;
    use crate::parser::segment::segment;

    fn resolutions(title: &str) -> Vec<(Resolution, Confidence)> {
        let normalized = normalize(title);
        let segments = segment(&normalized);
        extract(&segments)
            .into_iter()
            .map(|c| (c.value, c.confidence))
            .collect()
    }

    #[test]
    fn explicit_tiers_case_insensitive() {
        assert_eq!(
            resolutions("[G] T - 01 [1080p]"),
            vec![(Resolution::FHD1080, Confidence::Explicit)]
        );
        assert_eq!(
            resolutions("[G] T - 01 [1080P]"),
            vec![(Resolution::FHD1080, Confidence::Explicit)]
        );
        assert_eq!(
            resolutions("[G] T - 01 [720p]"),
            vec![(Resolution::HD720, Confidence::Explicit)]
        );
        assert_eq!(
            resolutions("[G] T - 01 [4k]"),
            vec![(Resolution::UHD4K, Confidence::Explicit)]
        );
        assert_eq!(
            resolutions("[G] T - 01 [2160p]"),
            vec![(Resolution::UHD4K, Confidence::Explicit)]
        );
    }

    #[test]
    fn pixel_dimensions() {
        assert_eq!(
            resolutions("[G] T - 25 (B-Global 3840x2160 HEVC AAC MKV)"),
            vec![(Resolution::UHD4K, Confidence::Derived)]
        );
        assert_eq!(
            resolutions("[G] T - 01 [1920×1080]"),
            vec![(Resolution::FHD1080, Confidence::Derived)]
        );
        assert_eq!(
            resolutions("[G] T - 01 [1280X720]"),
            vec![(Resolution::HD720, Confidence::Derived)]
        );
    }

    #[test]
    fn unknown_dimensions_are_ignored() {
        assert!(resolutions("[G] T - 01 [1000x1000]").is_empty());
    }

    #[test]
    fn tokens_inside_words_are_ignored() {
        assert!(resolutions("[G] T - 01 [x1080pz]").is_empty());
        assert!(resolutions("[G] T - 01 [HEVC-10bit]").is_empty());
    }

    #[test]
    fn no_token() {
        assert!(resolutions("[G] T - 01 [CHS]").is_empty());
    }
}
