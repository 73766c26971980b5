use thiserror::Error;

/// Errors raised by the auxiliary, fallible parts of Jimaku.
///
/// Title parsing itself never fails; these cover reading canonical codes
/// back into typed values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum JimakuError {
    /// The input string is empty or contains only whitespace.
    #[error("input is empty or whitespace-only")]
    EmptyInput,

    /// A subtitle language code is not one of the canonical identifiers.
    #[error("unknown subtitle language code: {0:?}")]
    UnknownLanguage(String),

    /// A subtitle kind name is not one of the canonical names.
    #[error("unknown subtitle kind: {0:?}")]
    UnknownKind(String),

    /// A resolution tier is not one of the canonical renderings.
    #[error("unknown resolution tier: {0:?}")]
    UnknownResolution(String),

    /// A compiled-in pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// An episode range string does not have the `begin..end` shape.
    #[error("malformed episode range: {input:?}")]
    MalformedEpisodeRange {
        /// The rejected input.
        input: String,
    },
}

/// Result type alias for Jimaku operations.
pub type Result<T> = std::result::Result<T, JimakuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = JimakuError::EmptyInput;
        assert_eq!(err.to_string(), "input is empty or whitespace-only");

        let err = JimakuError::MalformedEpisodeRange {
            input: "01-02".into(),
        };
        assert!(err.to_string().contains("01-02"));

        let err = JimakuError::UnknownLanguage("XYZ".into());
        assert!(err.to_string().contains("XYZ"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JimakuError>();
    }
}
