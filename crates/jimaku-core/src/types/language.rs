use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{JimakuError, Result};

/// A subtitle language a release declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubtitleLanguage {
    /// 简体中文
    SimplifiedChinese,
    /// 繁體中文
    TraditionalChinese,
    /// 粵語
    Cantonese,
    /// 日本語
    Japanese,
    /// English
    English,
}

impl SubtitleLanguage {
    /// All languages, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::SimplifiedChinese,
        Self::TraditionalChinese,
        Self::Cantonese,
        Self::Japanese,
        Self::English,
    ];

    /// Stable short identifier, also the display and sort key.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::SimplifiedChinese => "CHS",
            Self::TraditionalChinese => "CHT",
            Self::Cantonese => "YUE",
            Self::Japanese => "JPN",
            Self::English => "ENG",
        }
    }
}

impl fmt::Display for SubtitleLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SubtitleLanguage {
    type Err = JimakuError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| JimakuError::UnknownLanguage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<_> = SubtitleLanguage::ALL.iter().map(|l| l.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), SubtitleLanguage::ALL.len());
    }

    #[test]
    fn code_roundtrip() {
        for lang in SubtitleLanguage::ALL {
            assert_eq!(lang.to_string().parse::<SubtitleLanguage>(), Ok(lang));
        }
        assert_eq!("chs".parse::<SubtitleLanguage>(), Ok(SubtitleLanguage::SimplifiedChinese));
        assert!("KOR".parse::<SubtitleLanguage>().is_err());
    }
}
