//! # Title Normalizer
//!
//! Folds full-width forms, bracket glyph variants and multiplication signs
//! onto plain ASCII so later stages match one spelling. The mapping is
//! strictly char-for-char: nothing is deleted, so every normalized offset
//! maps back onto the original title.

use std::ops::Range;

/// A normalized title that remembers where each char came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized<'a> {
    original: &'a str,
    text: String,
    /// `(normalized byte, original byte)` for every char boundary, end included.
    origin: Vec<(usize, usize)>,
}

impl<'a> Normalized<'a> {
    /// The normalized text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The title as it was handed in.
    #[must_use]
    pub fn original(&self) -> &'a str {
        self.original
    }

    /// Maps a byte range of the normalized text back onto the original title.
    ///
    /// Offsets that do not fall on a char boundary are rounded down.
    #[must_use]
    pub fn original_slice(&self, range: Range<usize>) -> &'a str {
        let start = self.to_original(range.start);
        let end = self.to_original(range.end).max(start);
        &self.original[start..end]
    }

    fn to_original(&self, offset: usize) -> usize {
        match self.origin.binary_search_by_key(&offset, |&(norm, _)| norm) {
            Ok(idx) => self.origin[idx].1,
            Err(0) => 0,
            Err(idx) => self.origin[idx - 1].1,
        }
    }
}

/// Normalizes a raw title.
///
/// # Examples
/// ```
/// use jimaku_core::parser::normalize::normalize;
///
/// let n = normalize("【喵萌奶茶屋】SPY×FAMILY［１０８０Ｐ］");
/// assert_eq!(n.as_str(), "[喵萌奶茶屋]SPYxFAMILY[1080P]");
/// assert_eq!(n.original_slice(17..27), "SPY×FAMILY");
/// ```
#[must_use]
pub fn normalize(title: &str) -> Normalized<'_> {
    let mut text = String::with_capacity(title.len());
    let mut origin = Vec::with_capacity(title.chars().count() + 1);

    for (idx, c) in title.char_indices() {
        origin.push((text.len(), idx));
        text.push(normalize_char(c));
    }
    origin.push((text.len(), title.len()));

    Normalized {
        original: title,
        text,
        origin,
    }
}

/// Maps a single char onto its canonical form.
#[must_use]
pub fn normalize_char(c: char) -> char {
    match c {
        // Every dimension and title separator spelling reads as `x`
        'X' | 'Ｘ' | '×' | '✕' | '╳' => 'x',
        // Full-width ASCII block, brackets and slashes included
        '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
        '\u{3000}' | '\t' => ' ',
        '【' | '〖' | '〔' => '[',
        '】' | '〗' | '〕' => ']',
        '〜' => '~',
        '‐' | '‑' | '‒' | '–' => '-',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_width_to_half_width() {
        assert_eq!(normalize("（全集）１２").as_str(), "(全集)12");
        assert_eq!(normalize("ＣＨＳ＆ＣＨＴ／ＪＰ").as_str(), "CHS&CHT/JP");
        assert_eq!(normalize("01～12").as_str(), "01~12");
        assert_eq!(normalize("a\u{3000}b").as_str(), "a b");
    }

    #[test]
    fn bracket_glyphs_unify() {
        assert_eq!(normalize("【A】〖B〗［C］").as_str(), "[A][B][C]");
    }

    #[test]
    fn multiplication_signs_collapse() {
        assert_eq!(normalize("SPY×FAMILY").as_str(), "SPYxFAMILY");
        assert_eq!(normalize("3840×2160").as_str(), "3840x2160");
        assert_eq!(normalize("SPY X FAMILY").as_str(), "SPY x FAMILY");
        assert_eq!(normalize("1280X720").as_str(), "1280x720");
        assert_eq!(normalize("１９２０Ｘ１０８０").as_str(), "1920x1080");
    }

    #[test]
    fn char_count_is_preserved() {
        let title = "【喵萌奶茶屋】★01月新番★[迷宮飯 / Dungeon Meshi][20][1080p]";
        let n = normalize(title);
        assert_eq!(n.as_str().chars().count(), title.chars().count());
    }

    #[test]
    fn normalization_is_idempotent() {
        for title in [
            "【喵萌奶茶屋】★01月新番★[迷宮飯][２０][1080p][繁日雙語]",
            "[NC-Raws] 间谍过家家 / SPY×FAMILY - 25 (B-Global 3840x2160 HEVC AAC MKV)",
            "（全集）　０１～１２",
            "ＳＰＹ Ｘ ＦＡＭＩＬＹ [1280X720]",
            "",
        ] {
            let once = normalize(title);
            let twice = normalize(once.as_str());
            assert_eq!(once.as_str(), twice.as_str());
        }
    }

    #[test]
    fn original_slice_maps_back() {
        let title = "【桜都字幕组】ＳＰＹ×ＦＡＭＩＬＹ";
        let n = normalize(title);
        let start = n.as_str().find("SPY").unwrap();
        let end = n.as_str().len();
        assert_eq!(n.original_slice(start..end), "ＳＰＹ×ＦＡＭＩＬＹ");
    }

    #[test]
    fn empty_title() {
        let n = normalize("");
        assert_eq!(n.as_str(), "");
        assert_eq!(n.original_slice(0..0), "");
    }
}
