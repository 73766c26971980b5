use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{JimakuError, Result};

/// How subtitles are delivered with the video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubtitleKind {
    /// Burned into the picture (内嵌).
    Embedded,
    /// Muxed into the container as selectable tracks (内封).
    Closed,
    /// Shipped as separate subtitle files (外挂).
    External,
}

impl SubtitleKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Embedded => "Embedded",
            Self::Closed => "Closed",
            Self::External => "External",
        }
    }
}

impl fmt::Display for SubtitleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubtitleKind {
    type Err = JimakuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "embedded" => Ok(Self::Embedded),
            "closed" => Ok(Self::Closed),
            "external" => Ok(Self::External),
            _ => Err(JimakuError::UnknownKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_roundtrip() {
        for kind in [SubtitleKind::Embedded, SubtitleKind::Closed, SubtitleKind::External] {
            assert_eq!(kind.to_string().parse::<SubtitleKind>(), Ok(kind));
        }
        assert!("soft".parse::<SubtitleKind>().is_err());
    }
}
