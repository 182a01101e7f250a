/// Port removal pattern (colon followed by one to five digits)
pub const PORT_PATTERN: &str = r":\d{1,5}";

/// Progress constants
pub const PROGRESS_LABEL: &str = "URL";

/// Summary labels
pub const SUMMARY_MATCHED_LABEL: &str = "Total matched URLs";
pub const SUMMARY_ERRORS_LABEL: &str = "Total errors";

/// Input path that means "read standard input"
pub const STDIN_PATH: &str = "-";

/// Logging constants
pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const VERBOSE_LOG_FILTER: &str = "warn,urlmatch=debug";
