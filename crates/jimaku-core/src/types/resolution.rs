use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{JimakuError, Result};

/// Canonical video resolution tier.
///
/// `Unknown` is the sentinel carried when a title names no resolution; it is
/// never guessed from context.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Resolution {
    /// No resolution token in the title.
    #[default]
    Unknown,
    /// 480p, Standard Definition
    SD480,
    /// 720p, High Definition
    HD720,
    /// 1080p, Full HD
    FHD1080,
    /// 1440p, Quad HD
    QHD1440,
    /// 2160p, Ultra HD / 4K
    UHD4K,
}

impl Resolution {
    /// Maps a progressive/interlaced line count (`1080` of `1080p`) to a tier.
    #[must_use]
    pub fn from_lines(lines: u32) -> Option<Self> {
        match lines {
            480 => Some(Self::SD480),
            720 => Some(Self::HD720),
            1080 => Some(Self::FHD1080),
            1440 => Some(Self::QHD1440),
            2160 => Some(Self::UHD4K),
            _ => None,
        }
    }

    /// Returns `true` unless this is the `Unknown` sentinel.
    #[must_use]
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }

    /// Canonical rendering: `"1080P"`, `"4K"`, `"Unknown"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::SD480 => "480P",
            Self::HD720 => "720P",
            Self::FHD1080 => "1080P",
            Self::QHD1440 => "1440P",
            Self::UHD4K => "4K",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = JimakuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UNKNOWN" => Ok(Self::Unknown),
            "480P" => Ok(Self::SD480),
            "720P" => Ok(Self::HD720),
            "1080P" => Ok(Self::FHD1080),
            "1440P" => Ok(Self::QHD1440),
            "4K" | "2160P" => Ok(Self::UHD4K),
            _ => Err(JimakuError::UnknownResolution(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_ordering() {
        assert!(Resolution::UHD4K > Resolution::FHD1080);
        assert!(Resolution::FHD1080 > Resolution::HD720);
        assert!(Resolution::HD720 > Resolution::SD480);
        assert!(Resolution::SD480 > Resolution::Unknown);
    }

    #[test]
    fn resolution_display() {
        assert_eq!(Resolution::FHD1080.to_string(), "1080P");
        assert_eq!(Resolution::UHD4K.to_string(), "4K");
        assert_eq!(Resolution::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn default_is_unknown_sentinel() {
        assert_eq!(Resolution::default(), Resolution::Unknown);
        assert!(!Resolution::default().is_known());
    }

    #[test]
    fn from_str_accepts_canonical_and_aliases() {
        assert_eq!("1080P".parse::<Resolution>(), Ok(Resolution::FHD1080));
        assert_eq!("1080p".parse::<Resolution>(), Ok(Resolution::FHD1080));
        assert_eq!("2160p".parse::<Resolution>(), Ok(Resolution::UHD4K));
        assert_eq!("4k".parse::<Resolution>(), Ok(Resolution::UHD4K));
        assert!("1081P".parse::<Resolution>().is_err());
    }

    #[test]
    fn from_lines() {
        assert_eq!(Resolution::from_lines(720), Some(Resolution::HD720));
        assert_eq!(Resolution::from_lines(2160), Some(Resolution::UHD4K));
        assert_eq!(Resolution::from_lines(1081), None);
    }
}
