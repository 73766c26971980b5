use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::episode::EpisodeRange;
use super::kind::SubtitleKind;
use super::language::SubtitleLanguage;
use super::resolution::Resolution;

/// Metadata extracted from one release title.
///
/// Every field degrades independently: an opaque episode label, an empty
/// language set, `Resolution::Unknown`, or no subtitle kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Episode(s) the release covers.
    pub episode_range: EpisodeRange,

    /// Declared subtitle languages.
    pub subtitle_languages: BTreeSet<SubtitleLanguage>,

    /// Video resolution tier.
    pub resolution: Resolution,

    /// Subtitle delivery, if the title says.
    pub subtitle_kind: Option<SubtitleKind>,
}

impl ParseResult {
    /// Canonical episode rendering, e.g. `"01..25"`.
    #[must_use]
    pub fn episode_range_string(&self) -> String {
        self.episode_range.to_string()
    }

    /// Canonical resolution rendering, e.g. `"1080P"`.
    #[must_use]
    pub fn resolution_string(&self) -> String {
        self.resolution.to_string()
    }

    /// Languages sorted by code and joined with `", "`, e.g. `"CHS, CHT, JPN"`.
    #[must_use]
    pub fn languages_string(&self) -> String {
        let mut codes: Vec<&str> = self.subtitle_languages.iter().map(|l| l.code()).collect();
        codes.sort_unstable();
        codes.join(", ")
    }

    /// Returns `true` if the title declared the given language.
    #[must_use]
    pub fn has_language(&self, language: SubtitleLanguage) -> bool {
        self.subtitle_languages.contains(&language)
    }
}

impl std::fmt::Display for ParseResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ParseResult(ep={}", self.episode_range)?;
        write!(f, ", langs=[{}]", self.languages_string())?;
        write!(f, ", res={}", self.resolution)?;
        if let Some(kind) = self.subtitle_kind {
            write!(f, ", kind={kind}")?;
        }
        write!(f, ")")
    }
}
