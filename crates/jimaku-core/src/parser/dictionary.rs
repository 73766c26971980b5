//! # Keyword Dictionaries
//!
//! Compile-time tables mapping surface forms seen in fansub titles onto
//! canonical values. Keys are stored in their normalized spelling (half-width,
//! ASCII uppercased), so lookups go through [`normalize`](super::normalize)
//! first.

use std::sync::LazyLock;

use phf::{phf_map, phf_set};
use regex::Regex;

use crate::error::Result;
use crate::types::{Resolution, SubtitleKind, SubtitleLanguage};

/// What a subtitle-tag piece stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Language(SubtitleLanguage),
    Kind(SubtitleKind),
    /// Glue such as `字幕` or `双语` that only completes a compound.
    Filler,
}

/// A dictionary entry.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    /// Everything the surface form declares; compounds like `简繁` carry two.
    pub tags: &'static [Tag],
    /// Whether the form counts on its own. Non-standalone forms (`简`, `日`)
    /// only count inside a word made entirely of dictionary pieces.
    pub standalone: bool,
}

const CHS: Tag = Tag::Language(SubtitleLanguage::SimplifiedChinese);
const CHT: Tag = Tag::Language(SubtitleLanguage::TraditionalChinese);
const YUE: Tag = Tag::Language(SubtitleLanguage::Cantonese);
const JPN: Tag = Tag::Language(SubtitleLanguage::Japanese);
const ENG: Tag = Tag::Language(SubtitleLanguage::English);
const EMBEDDED: Tag = Tag::Kind(SubtitleKind::Embedded);
const CLOSED: Tag = Tag::Kind(SubtitleKind::Closed);
const EXTERNAL: Tag = Tag::Kind(SubtitleKind::External);

const fn standalone(tags: &'static [Tag]) -> Entry {
    Entry {
        tags,
        standalone: true,
    }
}

const fn piece(tags: &'static [Tag]) -> Entry {
    Entry {
        tags,
        standalone: false,
    }
}

/// Subtitle language, kind and filler surface forms.
pub static SUBTITLE_TAGS: phf::Map<&'static str, Entry> = phf_map! {
    // Simplified Chinese
    "简" => piece(&[CHS]),
    "簡" => piece(&[CHS]),
    "简体" => standalone(&[CHS]),
    "簡體" => standalone(&[CHS]),
    "简中" => standalone(&[CHS]),
    "簡中" => standalone(&[CHS]),
    "CHS" => standalone(&[CHS]),
    "SC" => standalone(&[CHS]),
    "GB" => standalone(&[CHS]),

    // Traditional Chinese
    "繁" => piece(&[CHT]),
    "繁体" => standalone(&[CHT]),
    "繁體" => standalone(&[CHT]),
    "繁中" => standalone(&[CHT]),
    "正体" => standalone(&[CHT]),
    "正體" => standalone(&[CHT]),
    "CHT" => standalone(&[CHT]),
    "TC" => standalone(&[CHT]),
    "BIG5" => standalone(&[CHT]),

    // Cantonese
    "粤" => piece(&[YUE]),
    "粵" => piece(&[YUE]),
    "粤语" => standalone(&[YUE]),
    "粵語" => standalone(&[YUE]),

    // Japanese
    "日" => piece(&[JPN]),
    "日语" => standalone(&[JPN]),
    "日語" => standalone(&[JPN]),
    "日文" => standalone(&[JPN]),
    "日本语" => standalone(&[JPN]),
    "日本語" => standalone(&[JPN]),
    "JP" => standalone(&[JPN]),
    "JPN" => standalone(&[JPN]),

    // English
    "英" => piece(&[ENG]),
    "英语" => standalone(&[ENG]),
    "英語" => standalone(&[ENG]),
    "英文" => standalone(&[ENG]),
    "ENG" => standalone(&[ENG]),

    // Common compounds
    "简繁" => standalone(&[CHS, CHT]),
    "簡繁" => standalone(&[CHS, CHT]),
    "简日" => standalone(&[CHS, JPN]),
    "簡日" => standalone(&[CHS, JPN]),
    "繁日" => standalone(&[CHT, JPN]),

    // Subtitle kinds
    "内嵌" => standalone(&[EMBEDDED]),
    "內嵌" => standalone(&[EMBEDDED]),
    "硬字幕" => standalone(&[EMBEDDED]),
    "HARDSUB" => standalone(&[EMBEDDED]),
    "HARDSUBS" => standalone(&[EMBEDDED]),
    "内封" => standalone(&[CLOSED]),
    "內封" => standalone(&[CLOSED]),
    "内挂" => standalone(&[CLOSED]),
    "內掛" => standalone(&[CLOSED]),
    "SOFTSUB" => standalone(&[CLOSED]),
    "SOFTSUBS" => standalone(&[CLOSED]),
    "外挂" => standalone(&[EXTERNAL]),
    "外掛" => standalone(&[EXTERNAL]),
    "外置" => standalone(&[EXTERNAL]),

    // Filler
    "字幕" => piece(&[Tag::Filler]),
    "中文" => piece(&[Tag::Filler]),
    "中字" => piece(&[Tag::Filler]),
    "双语" => piece(&[Tag::Filler]),
    "雙語" => piece(&[Tag::Filler]),
    "双字" => piece(&[Tag::Filler]),
    "雙字" => piece(&[Tag::Filler]),
    "三语" => piece(&[Tag::Filler]),
    "三語" => piece(&[Tag::Filler]),
    "语" => piece(&[Tag::Filler]),
    "語" => piece(&[Tag::Filler]),
    "文" => piece(&[Tag::Filler]),
    "字" => piece(&[Tag::Filler]),
    "版" => piece(&[Tag::Filler]),
    "中" => piece(&[Tag::Filler]),
    "-" => piece(&[Tag::Filler]),
    "·" => piece(&[Tag::Filler]),
};

/// Longest key in [`SUBTITLE_TAGS`], in chars.
pub const MAX_TAG_CHARS: usize = 8;

/// Looks up a subtitle-tag surface form. ASCII is matched case-insensitively.
#[must_use]
pub fn lookup_tag(surface: &str) -> Option<&'static Entry> {
    if surface.is_ascii() {
        SUBTITLE_TAGS.get(surface.to_ascii_uppercase().as_str())
    } else {
        SUBTITLE_TAGS.get(surface)
    }
}

/// Known `width x height` pairs. Pixel forms are matched against this table,
/// never scaled arithmetically.
pub static PIXEL_DIMENSIONS: phf::Map<&'static str, Resolution> = phf_map! {
    "640x480" => Resolution::SD480,
    "720x480" => Resolution::SD480,
    "848x480" => Resolution::SD480,
    "854x480" => Resolution::SD480,
    "1280x720" => Resolution::HD720,
    "1440x1080" => Resolution::FHD1080,
    "1920x1080" => Resolution::FHD1080,
    "1920x1088" => Resolution::FHD1080,
    "2560x1440" => Resolution::QHD1440,
    "3840x2160" => Resolution::UHD4K,
    "4096x2160" => Resolution::UHD4K,
};

/// Looks up a pixel-dimension pair.
#[must_use]
pub fn lookup_dimensions(width: u32, height: u32) -> Option<Resolution> {
    PIXEL_DIMENSIONS.get(format!("{width}x{height}").as_str()).copied()
}

/// Technical and promotional words that never name an episode.
/// All keys are UPPERCASE.
pub static NOISE_WORDS: phf::Set<&'static str> = phf_set! {
    // Video
    "AVC", "HEVC", "H264", "H.264", "H265", "H.265", "X264", "X265", "AV1", "VP9",
    "10BIT", "10-BIT", "8BIT", "HEVC-10BIT", "HEVC-8BIT", "AVC-8BIT", "HI10P", "HDR", "SDR",
    // Audio
    "AAC", "AAC2.0", "FLAC", "EAC3", "E-AC-3", "AC3", "OPUS", "DTS", "MP3", "DDP", "DUAL",
    // Containers
    "MKV", "MP4", "AVI", "WEBM", "ASS", "SRT",
    // Sources and platforms
    "WEB", "WEBRIP", "WEB-RIP", "WEBDL", "WEB-DL", "BD", "BDRIP", "BLURAY", "BLU-RAY",
    "DVD", "DVDRIP", "HDTV", "TVRIP", "BAHA", "B-GLOBAL", "BILIBILI", "CR", "ABEMA",
    "NETFLIX", "NF", "AMZN", "AT-X", "ATX", "IQIYI", "VIU",
    // Release qualifiers
    "FIN", "END", "BATCH", "REPACK", "V2", "V3", "TV", "OVA", "SP", "RAW", "RAWS",
    "合集", "全集", "完结", "完結", "字幕",
    // Sizes
    "KB", "MB", "GB", "KIB", "MIB", "GIB",
};

/// CJK fragments that mark promotional or release-group text.
pub const NOISE_FRAGMENTS: &[&str] = &[
    "招募", "招聘", "新番", "字幕组", "字幕組", "字幕社", "压制", "壓制", "搬运", "搬運",
];

/// Returns `true` if a word is technical or promotional noise.
#[must_use]
pub fn is_noise_word(word: &str) -> bool {
    NOISE_WORDS.contains(word.to_ascii_uppercase().as_str())
        || NOISE_FRAGMENTS.iter().any(|f| word.contains(f))
}

/// Units that turn a preceding number into a file size.
pub const SIZE_UNITS: &[&str] = &["KB", "MB", "GB", "TB", "KIB", "MIB", "GIB"];

/// Prefixes that mark the number after them as an episode.
pub const EPISODE_WORDS: &[&str] = &["EPISODE", "EPS", "EP", "E"];

/// Returns `true` if a word is a file-size unit such as `GB` or `MiB`.
#[must_use]
pub fn is_size_unit(word: &str) -> bool {
    SIZE_UNITS.iter().any(|unit| unit.eq_ignore_ascii_case(word))
}

/// Compiled resolution patterns.
#[derive(Debug)]
pub struct ResolutionPatterns {
    /// `1080p`, `720P`, `1080i`, `4K`.
    pub tier: Regex,
    /// `1920x1080`, `3840 X 2160`.
    pub dimensions: Regex,
}

impl ResolutionPatterns {
    /// Compiles the resolution patterns.
    ///
    /// # Errors
    ///
    /// Returns `JimakuError::RegexError` if a pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            tier: Regex::new(
                r"(?i)(?:^|[^0-9a-z])(?:(?P<lines>\d{3,4})[pi]|(?P<uhd>4k|uhd))(?:$|[^0-9a-z])",
            )?,
            dimensions: Regex::new(r"(?i)(?:^|[^0-9])(?P<w>\d{3,4})\s?x\s?(?P<h>\d{3,4})(?:$|[^0-9])")?,
        })
    }
}

/// Process-wide resolution patterns, compiled on first use.
pub static RESOLUTION_PATTERNS: LazyLock<Result<ResolutionPatterns>> =
    LazyLock::new(ResolutionPatterns::new);

/// Compiled episode-token patterns.
///
/// All are anchored: `range` is applied at a digit run, the rest right
/// after one.
#[derive(Debug)]
pub struct EpisodePatterns {
    /// Digit runs.
    pub number: Regex,
    /// `01-12`, `01 ~ 12`, `EP01-EP12`.
    pub range: Regex,
    /// `v2`, a `集`/`话`/`END` marker, then an optional `TV+特典映像` suffix.
    pub tail: Regex,
    /// Text that turns the number before it into something else:
    /// a glued letter (`1080p`, `01月`), a decimal, `-bit`, or a size unit.
    pub rejected_after: Regex,
    /// Segment rest made only of qualifiers such as ` Fin` or `(全集)`.
    pub qualifiers_only: Regex,
}

impl EpisodePatterns {
    /// Compiles the episode patterns.
    ///
    /// # Errors
    ///
    /// Returns `JimakuError::RegexError` if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        let episode_words = EPISODE_WORDS.join("|");
        let size_units = SIZE_UNITS.join("|");

        Ok(Self {
            number: Regex::new(r"[0-9]+")?,
            range: Regex::new(&format!(
                r"^(?P<begin>[0-9]{{1,4}})\s*[-~]\s*(?:(?i:{episode_words})\.?)?(?P<end>[0-9]{{1,4}})"
            ))?,
            tail: Regex::new(
                r"^(?:[vV](?P<version>[0-9]{1,2}))?(?P<mark>[集话話回]|(?i:END|FIN))?(?:(?i:TV|BD)?(?P<suffix>\+\S+))?",
            )?,
            rejected_after: Regex::new(&format!(
                r"^(?:\s+(?i:{size_units})(?:\s|$)|\.[0-9]|-[A-Za-z]|[\p{{Alphabetic}}\p{{N}}])"
            ))?,
            qualifiers_only: Regex::new(
                r"^(?:\s*(?:\(全集\)|全集|合集|完结|完結|完|集|(?i:FIN|END|TV|BD)))*\s*$",
            )?,
        })
    }
}

/// Process-wide episode patterns, compiled on first use.
pub static EPISODE_PATTERNS: LazyLock<Result<EpisodePatterns>> =
    LazyLock::new(EpisodePatterns::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_compile() {
        assert!(RESOLUTION_PATTERNS.is_ok());
        assert!(EPISODE_PATTERNS.is_ok());
    }

    #[test]
    fn size_units() {
        assert!(is_size_unit("GB"));
        assert!(is_size_unit("MiB"));
        assert!(!is_size_unit("CHS"));
        assert!(!is_size_unit("GBK"));
    }

    #[test]
    fn episode_range_pattern() {
        let patterns = EpisodePatterns::new().unwrap();
        for (text, begin, end) in [
            ("01-12", "01", "12"),
            ("1 ~ 25 Fin", "1", "25"),
            ("01-EP12", "01", "12"),
            ("01-E12", "01", "12"),
            ("01~Ep.12", "01", "12"),
        ] {
            let caps = patterns.range.captures(text).unwrap();
            assert_eq!(&caps["begin"], begin, "{text}");
            assert_eq!(&caps["end"], end, "{text}");
        }
        assert!(patterns.range.captures("01-bit").is_none());
    }

    #[test]
    fn episode_tail_pattern() {
        let patterns = EpisodePatterns::new().unwrap();
        let caps = patterns.tail.captures("v2 [x]").unwrap();
        assert_eq!(&caps["version"], "2");
        let caps = patterns.tail.captures("TV+特典映像").unwrap();
        assert_eq!(&caps["suffix"], "+特典映像");
        assert!(patterns.tail.captures("集").unwrap().name("mark").is_some());

        for rejected in ["p", "月", "bit", ".5", "-bit", " MB", " GiB"] {
            assert!(patterns.rejected_after.is_match(rejected), "{rejected:?}");
        }
        for accepted in ["", " ", " Fin", "-12", "]", " MBS"] {
            assert!(!patterns.rejected_after.is_match(accepted), "{accepted:?}");
        }

        assert!(patterns.qualifiers_only.is_match(" Fin"));
        assert!(patterns.qualifiers_only.is_match("(全集)"));
        assert!(patterns.qualifiers_only.is_match(""));
        assert!(!patterns.qualifiers_only.is_match(" 精校合集"));
    }

    #[test]
    fn max_tag_chars_covers_every_key() {
        let longest = SUBTITLE_TAGS.keys().map(|k| k.chars().count()).max().unwrap();
        assert!(longest <= MAX_TAG_CHARS);
    }

    #[test]
    fn ascii_keys_are_uppercase() {
        for key in SUBTITLE_TAGS.keys().filter(|k| k.is_ascii()) {
            assert_eq!(*key, key.to_ascii_uppercase());
        }
        for key in NOISE_WORDS.iter().filter(|k| k.is_ascii()) {
            assert_eq!(*key, key.to_ascii_uppercase());
        }
    }

    #[test]
    fn traditional_and_simplified_forms_agree() {
        assert_eq!(lookup_tag("简体").unwrap().tags, &[CHS]);
        assert_eq!(lookup_tag("簡體").unwrap().tags, &[CHS]);
        assert_eq!(lookup_tag("繁体").unwrap().tags, &[CHT]);
        assert_eq!(lookup_tag("繁體").unwrap().tags, &[CHT]);
        assert_eq!(lookup_tag("粤语").unwrap().tags, &[YUE]);
        assert_eq!(lookup_tag("粵語").unwrap().tags, &[YUE]);
        assert_eq!(lookup_tag("内封").unwrap().tags, &[CLOSED]);
        assert_eq!(lookup_tag("內封").unwrap().tags, &[CLOSED]);
    }

    #[test]
    fn ascii_lookup_is_case_insensitive() {
        assert_eq!(lookup_tag("chs").unwrap().tags, &[CHS]);
        assert_eq!(lookup_tag("Big5").unwrap().tags, &[CHT]);
        assert!(lookup_tag("CHX").is_none());
    }

    #[test]
    fn single_glyphs_are_not_standalone() {
        for glyph in ["简", "繁", "日", "粤", "英"] {
            assert!(!lookup_tag(glyph).unwrap().standalone, "{glyph}");
        }
    }

    #[test]
    fn dimensions_table() {
        assert_eq!(lookup_dimensions(1920, 1080), Some(Resolution::FHD1080));
        assert_eq!(lookup_dimensions(3840, 2160), Some(Resolution::UHD4K));
        assert_eq!(lookup_dimensions(1280, 720), Some(Resolution::HD720));
        assert_eq!(lookup_dimensions(1000, 1000), None);
    }

    #[test]
    fn noise_words() {
        assert!(is_noise_word("HEVC-10bit"));
        assert!(is_noise_word("WebRip"));
        assert!(is_noise_word("招募翻譯時軸"));
        assert!(is_noise_word("01月新番"));
        assert!(!is_noise_word("Dungeon"));
    }
}
