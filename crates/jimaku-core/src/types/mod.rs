pub mod episode;
pub mod kind;
pub mod language;
pub mod resolution;
pub mod result;

pub use episode::{EpisodeLabel, EpisodeRange};
pub use kind::SubtitleKind;
pub use language::SubtitleLanguage;
pub use resolution::Resolution;
pub use result::ParseResult;
