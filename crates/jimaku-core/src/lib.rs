//! # Jimaku Core
//!
//! Extracts subtitle metadata from Chinese fansub release titles: episode
//! range, subtitle languages, resolution tier and subtitle packaging.
//!
//! ## Quick Start
//!
//! ```rust
//! use jimaku_core::{SubtitleKind, parse};
//!
//! let result = parse("[桜都字幕组] 间谍过家家 / Spy x Family [1-25 Fin][1080p][简繁内封]");
//!
//! assert_eq!(result.episode_range_string(), "01..25");
//! assert_eq!(result.languages_string(), "CHS, CHT");
//! assert_eq!(result.resolution_string(), "1080P");
//! assert_eq!(result.subtitle_kind, Some(SubtitleKind::Closed));
//! ```
pub mod error;
pub mod parser;
pub mod types;

// Re-export primary API
pub use error::{JimakuError, Result};
pub use parser::{Normalized, Segments, normalize, parse, segment};
pub use types::{
    EpisodeLabel, EpisodeRange, ParseResult, Resolution, SubtitleKind, SubtitleLanguage,
};
