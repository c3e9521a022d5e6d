//! Error types for the resolver crate.

/// Errors that reject an edited document before any change set is built.
///
/// Both variants are input-validation failures. They are fatal to the call:
/// no partial change set is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Two or more data lines share a key, compared case-insensitively.
    /// Carries every duplicated key, lower-cased and sorted.
    #[error("config text has repeated keys: [{}], please check your input", keys.join(", "))]
    DuplicateKey { keys: Vec<String> },

    /// A line that is neither blank nor a comment has no `=` separator.
    #[error("line:{line_num} key value must separate by '='")]
    MalformedLine { line_num: u32 },
}

/// Convenience alias for resolver results.
pub type ResolveResult<T> = Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_message_lists_keys() {
        let err = ResolveError::DuplicateKey {
            keys: vec!["a".into(), "b".into()],
        };
        assert_eq!(
            err.to_string(),
            "config text has repeated keys: [a, b], please check your input"
        );
    }

    #[test]
    fn malformed_line_message_names_line() {
        let err = ResolveError::MalformedLine { line_num: 4 };
        assert_eq!(err.to_string(), "line:4 key value must separate by '='");
    }
}
