//! Subtitle-tag scanning shared by the language and kind extractors.
//!
//! Each word is cut into dictionary pieces by longest match. A word made
//! entirely of pieces (`简繁日内封字幕`) is a compound tag and every piece
//! counts; otherwise only standalone forms do.

use std::ops::Range;

use super::dictionary::{Entry, MAX_TAG_CHARS, Tag, is_size_unit, lookup_tag};
use super::segment::{Segments, Separators};

/// A tag found in a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagHit {
    pub tag: Tag,
    pub segment: usize,
    pub span: Range<usize>,
}

/// Dictionary pieces of one word.
#[derive(Debug, Default)]
struct Pieces {
    items: Vec<(Range<usize>, &'static Entry)>,
    covered: bool,
}

impl Pieces {
    /// A lone non-standalone piece (`日` as a whole word) is a title glyph.
    fn is_compound(&self) -> bool {
        self.covered
            && (self.items.len() >= 2 || self.items.iter().any(|(_, entry)| entry.standalone))
            && self
                .items
                .iter()
                .any(|(_, entry)| entry.tags.iter().any(|t| *t != Tag::Filler))
    }
}

/// Scans every segment for subtitle tags, in title order.
pub fn scan(segments: &Segments) -> Vec<TagHit> {
    let group = segments.group_index();
    let mut hits = Vec::new();

    for segment in segments.non_empty() {
        let in_group = group == Some(segment.index);
        let mut after_number = false;

        for word_range in segments.parts(segment.index, Separators::WORDS) {
            let word = segments.slice(word_range.clone());
            let pieces = split_pieces(word);
            let compound = pieces.is_compound();

            for (range, entry) in &pieces.items {
                if !compound && (!entry.standalone || in_group) {
                    continue;
                }
                // "1.2 GB" is a size, not a Simplified Chinese tag
                if after_number && is_size_unit(&word[range.clone()]) {
                    continue;
                }
                for tag in entry.tags.iter().filter(|t| **t != Tag::Filler) {
                    hits.push(TagHit {
                        tag: *tag,
                        segment: segment.index,
                        span: word_range.start + range.start..word_range.start + range.end,
                    });
                }
            }

            after_number = word.ends_with(|c: char| c.is_ascii_digit());
        }
    }

    hits
}

fn split_pieces(word: &str) -> Pieces {
    let upper = word.to_ascii_uppercase();
    let mut pieces = Pieces {
        covered: true,
        ..Pieces::default()
    };

    let mut pos = 0;
    while pos < upper.len() {
        match longest_at(&upper, pos) {
            Some((end, entry)) => {
                pieces.items.push((pos..end, entry));
                pos = end;
            }
            None => {
                pieces.covered = false;
                pos += upper[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    pieces
}

/// Longest dictionary key starting at `pos`, returned as its end offset.
fn longest_at(text: &str, pos: usize) -> Option<(usize, &'static Entry)> {
    let ends: Vec<usize> = text[pos..]
        .char_indices()
        .skip(1)
        .map(|(idx, _)| pos + idx)
        .chain(std::iter::once(text.len()))
        .take(MAX_TAG_CHARS)
        .collect();

    ends.into_iter().rev().find_map(|end| {
        let key = &text[pos..end];
        let entry = lookup_tag(key)?;
        (!is_alnum_key(key) || on_word_boundary(text, pos, end)).then_some((end, entry))
    })
}

fn is_alnum_key(key: &str) -> bool {
    key.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// ASCII keys must not be glued to other ASCII letters or digits ("DISC", "BIG50").
fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(|c| c.is_ascii_alphanumeric())
        && !after.is_some_and(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::normalize::normalize;
    use crate::parser::segment::segment;
    use crate::types::{SubtitleKind, SubtitleLanguage};

    fn tags(title: &str) -> Vec<Tag> {
        let normalized = normalize(title);
        let segments = segment(&normalized);
        scan(&segments).into_iter().map(|hit| hit.tag).collect()
    }

    #[test]
    fn compound_decomposes() {
        assert_eq!(
            tags("[Group] Title - 01 [简繁日内封字幕]"),
            vec![
                Tag::Language(SubtitleLanguage::SimplifiedChinese),
                Tag::Language(SubtitleLanguage::TraditionalChinese),
                Tag::Language(SubtitleLanguage::Japanese),
                Tag::Kind(SubtitleKind::Closed),
            ]
        );
    }

    #[test]
    fn single_glyphs_need_a_compound() {
        // 日 inside a title word is not a language
        assert!(tags("[Group] 日常 - 01").is_empty());
        assert!(tags("[Group] 日 - 01 [1080p]").is_empty());
        assert_eq!(
            tags("[Group] Title - 01 [繁日雙語]"),
            vec![
                Tag::Language(SubtitleLanguage::TraditionalChinese),
                Tag::Language(SubtitleLanguage::Japanese),
            ]
        );
    }

    #[test]
    fn ascii_forms_need_boundaries() {
        assert_eq!(
            tags("[Group] Title - 01 [CHS&CHT]"),
            vec![
                Tag::Language(SubtitleLanguage::SimplifiedChinese),
                Tag::Language(SubtitleLanguage::TraditionalChinese),
            ]
        );
        assert!(tags("[Group] Disc Title - 01").is_empty());
    }

    #[test]
    fn sizes_are_not_languages() {
        assert!(tags("[Group] Title - 01 [1.2 GB]").is_empty());
        assert_eq!(
            tags("[Group] Title - 01 [GB][1080p]"),
            vec![Tag::Language(SubtitleLanguage::SimplifiedChinese)]
        );
        assert!(tags("[Group] Title - 01 [700 MiB]").is_empty());
    }

    #[test]
    fn tags_after_episode_numbers() {
        let chs = Tag::Language(SubtitleLanguage::SimplifiedChinese);
        let cht = Tag::Language(SubtitleLanguage::TraditionalChinese);
        let jpn = Tag::Language(SubtitleLanguage::Japanese);
        assert_eq!(tags("[Group] Title - 01 CHS [1080p]"), vec![chs]);
        assert_eq!(tags("[Group][Title][01 BIG5][1080p]"), vec![cht]);
        assert_eq!(tags("[Group] Title [12 CHT 1080p]"), vec![cht]);
        assert_eq!(tags("[Group] Title [1080p 01 JPN]"), vec![jpn]);
    }

    #[test]
    fn group_segment_only_counts_compounds() {
        assert!(tags("[日文字幕组] Title - 01").is_empty());
    }

    #[test]
    fn standalone_forms_inside_longer_words() {
        assert_eq!(
            tags("六四位元字幕组★Title★04★繁体中文"),
            vec![Tag::Language(SubtitleLanguage::TraditionalChinese)]
        );
    }

    #[test]
    fn split_pieces_coverage() {
        let pieces = split_pieces("简日双语");
        assert!(pieces.is_compound());
        assert_eq!(pieces.items.len(), 2);

        let pieces = split_pieces("招募翻译");
        assert!(!pieces.covered);
        assert!(pieces.items.is_empty());

        let pieces = split_pieces("双语");
        assert!(pieces.covered);
        assert!(!pieces.is_compound());

        let pieces = split_pieces("日");
        assert!(pieces.covered);
        assert!(!pieces.is_compound());
        assert!(split_pieces("日字幕").is_compound());
        assert!(split_pieces("CHS").is_compound());
    }
}
