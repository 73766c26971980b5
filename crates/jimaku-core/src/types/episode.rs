use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{JimakuError, Result};

/// One end of an episode range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpisodeLabel {
    /// Plain episode number: "09", "12", "1084".
    Numeric {
        /// The episode number.
        value: u32,
        /// Digits the number was written with, zero padding included.
        width: usize,
    },

    /// Re-released episode: "01v2". The version does not change identity.
    NumericWithVersion {
        /// The episode number.
        value: u32,
        /// Digits the number was written with, zero padding included.
        width: usize,
        /// The version number (e.g., v2 = 2).
        version: u8,
    },

    /// Free text used when the title carries no episode number at all.
    Opaque(String),
}

impl EpisodeLabel {
    /// Creates a numeric label keeping the written padding width.
    #[must_use]
    pub fn numeric(value: u32, width: usize) -> Self {
        Self::Numeric { value, width }
    }

    /// Returns the numeric episode value, if any.
    #[must_use]
    pub fn value(&self) -> Option<u32> {
        match self {
            Self::Numeric { value, .. } | Self::NumericWithVersion { value, .. } => Some(*value),
            Self::Opaque(_) => None,
        }
    }

    /// Returns the release version, if one was written.
    #[must_use]
    pub fn version(&self) -> Option<u8> {
        match self {
            Self::NumericWithVersion { version, .. } => Some(*version),
            _ => None,
        }
    }

    /// Returns the padding width of a numeric label.
    #[must_use]
    pub fn width(&self) -> Option<usize> {
        match self {
            Self::Numeric { width, .. } | Self::NumericWithVersion { width, .. } => Some(*width),
            Self::Opaque(_) => None,
        }
    }

    /// Re-pads a numeric label. Opaque labels are returned unchanged.
    #[must_use]
    pub fn padded_to(self, new_width: usize) -> Self {
        match self {
            Self::Numeric { value, .. } => Self::Numeric {
                value,
                width: new_width,
            },
            Self::NumericWithVersion { value, version, .. } => Self::NumericWithVersion {
                value,
                width: new_width,
                version,
            },
            opaque @ Self::Opaque(_) => opaque,
        }
    }

    fn parse_numeric(text: &str) -> Option<Self> {
        if text.is_empty() || text.len() > 9 || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value = text.parse().ok()?;
        Some(Self::numeric(value, text.len()))
    }
}

impl fmt::Display for EpisodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric { value, width } | Self::NumericWithVersion { value, width, .. } => {
                write!(f, "{value:0width$}")
            }
            Self::Opaque(text) => f.write_str(text),
        }
    }
}

/// The episodes a release covers.
///
/// A single episode is a range whose bounds are equal. The canonical
/// rendering is `"{begin}..{end}"`, followed by any extra-content suffix
/// (`"01..06+特典映像"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeRange {
    /// First episode.
    pub begin: EpisodeLabel,
    /// Last episode, inclusive.
    pub end: EpisodeLabel,
    /// Bonus content attached to the end label, e.g. `"+特典映像"`.
    pub suffix: Option<String>,
}

impl EpisodeRange {
    /// A single episode.
    #[must_use]
    pub fn single(label: EpisodeLabel) -> Self {
        Self {
            begin: label.clone(),
            end: label,
            suffix: None,
        }
    }

    /// An inclusive range.
    ///
    /// Numeric bounds must be ordered. Development builds assert this;
    /// release builds swap reversed bounds.
    #[must_use]
    pub fn range(begin: EpisodeLabel, end: EpisodeLabel) -> Self {
        if let (Some(b), Some(e)) = (begin.value(), end.value()) {
            debug_assert!(b <= e, "episode range begins after it ends: {b} > {e}");
            if b > e {
                return Self {
                    begin: end,
                    end: begin,
                    suffix: None,
                };
            }
        }
        Self {
            begin,
            end,
            suffix: None,
        }
    }

    /// An opaque label used for both bounds.
    #[must_use]
    pub fn opaque(text: impl Into<String>) -> Self {
        Self::single(EpisodeLabel::Opaque(text.into()))
    }

    /// Attaches an extra-content suffix to the end label.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.suffix = (!suffix.is_empty()).then_some(suffix);
        self
    }

    /// Returns `true` if begin and end are the same episode.
    #[must_use]
    pub fn is_single(&self) -> bool {
        match (self.begin.value(), self.end.value()) {
            (Some(b), Some(e)) => b == e,
            _ => self.begin == self.end,
        }
    }

    /// Returns `true` if the range came from the opaque fallback.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        matches!(self.begin, EpisodeLabel::Opaque(_))
    }

    /// Number of episodes covered, when both bounds are numeric.
    #[must_use]
    pub fn len(&self) -> Option<u32> {
        self.end
            .value()?
            .checked_sub(self.begin.value()?)
            .map(|span| span + 1)
    }
}

impl fmt::Display for EpisodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.begin, self.end)?;
        if let Some(ref suffix) = self.suffix {
            f.write_str(suffix)?;
        }
        Ok(())
    }
}

impl FromStr for EpisodeRange {
    type Err = JimakuError;

    /// Reads a canonical `"{begin}..{end}"` rendering back.
    ///
    /// Numeric labels keep their padding; anything else becomes opaque.
    /// Version suffixes are not part of the canonical form and are not
    /// recovered.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || JimakuError::MalformedEpisodeRange {
            input: s.to_string(),
        };

        let (begin, end) = s.split_once("..").ok_or_else(malformed)?;
        if begin.is_empty() || end.is_empty() {
            return Err(malformed());
        }

        let begin_label =
            EpisodeLabel::parse_numeric(begin).unwrap_or_else(|| EpisodeLabel::Opaque(begin.into()));

        let digits = end.bytes().take_while(u8::is_ascii_digit).count();
        let (end_label, suffix) = match end[digits..].starts_with('+') {
            true if digits > 0 => (
                EpisodeLabel::parse_numeric(&end[..digits]).ok_or_else(malformed)?,
                Some(end[digits..].to_string()),
            ),
            _ => (
                EpisodeLabel::parse_numeric(end).unwrap_or_else(|| EpisodeLabel::Opaque(end.into())),
                None,
            ),
        };

        if let (Some(b), Some(e)) = (begin_label.value(), end_label.value()) {
            if b > e {
                return Err(malformed());
            }
        }

        Ok(Self {
            begin: begin_label,
            end: end_label,
            suffix,
        })
    }
}
