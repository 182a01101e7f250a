use thiserror::Error;

/// Invalid flag combinations, detected before any input is read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("--delete-after requires a matcher list (--matchers)")]
    DeleteAfterWithoutMatchers,

    #[error("--url cannot be combined with --file {0}")]
    UrlWithFile(String),
}

/// Reasons a single input record is skipped and counted as an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("malformed URL: {0}")]
    Malformed(&'static str),

    #[error("missing scheme or host")]
    MissingSchemeOrHost,

    #[error("input line is not valid UTF-8")]
    Decode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_messages() {
        assert_eq!(
            UsageError::DeleteAfterWithoutMatchers.to_string(),
            "--delete-after requires a matcher list (--matchers)"
        );
        assert_eq!(
            UsageError::UrlWithFile("urls.txt".to_string()).to_string(),
            "--url cannot be combined with --file urls.txt"
        );
    }

    #[test]
    fn test_record_error_messages() {
        assert_eq!(
            RecordError::Malformed("unbalanced IPv6 bracket").to_string(),
            "malformed URL: unbalanced IPv6 bracket"
        );
        assert_eq!(
            RecordError::MissingSchemeOrHost.to_string(),
            "missing scheme or host"
        );
    }
}
