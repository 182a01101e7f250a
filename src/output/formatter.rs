use colored::*;
use serde::Serialize;
use serde_json::json;

use crate::constants::{PROGRESS_LABEL, SUMMARY_ERRORS_LABEL, SUMMARY_MATCHED_LABEL};
use crate::types::OutputFormat;

/// A kept URL and its position among all input records
#[derive(Debug, Serialize)]
pub struct EmittedUrl<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    pub url: &'a str,
}

impl<'a> EmittedUrl<'a> {
    pub fn new(index: usize, total: usize, url: &'a str) -> Self {
        Self {
            index: Some(index),
            total: Some(total),
            url,
        }
    }

    fn bare(url: &'a str) -> Self {
        Self {
            index: None,
            total: None,
            url,
        }
    }
}

/// Format the line written to the terminal for a kept URL
pub fn format_terminal_line(
    emitted: &EmittedUrl,
    format: OutputFormat,
    silent: bool,
    colored: bool,
) -> String {
    match format {
        OutputFormat::Plain => match (silent, emitted.index, emitted.total) {
            (false, Some(index), Some(total)) => {
                let progress = format!("{}({}/{})", PROGRESS_LABEL, index, total);
                if colored {
                    format!("{} {}\n", progress.cyan(), emitted.url)
                } else {
                    format!("{} {}\n", progress, emitted.url)
                }
            }
            _ => format!("{}\n", emitted.url),
        },
        OutputFormat::Jsonl => {
            let line = if silent {
                serde_json::to_string(&EmittedUrl::bare(emitted.url))
            } else {
                serde_json::to_string(emitted)
            };
            line.unwrap_or_default() + "\n"
        }
    }
}

/// Format the line written to the output file for a kept URL.
/// The file always holds one bare URL per line, whatever the terminal format.
pub fn format_file_line(url: &str) -> String {
    format!("{}\n", url)
}

/// Format the end-of-run summary
pub fn format_summary(matched: usize, errors: usize, format: OutputFormat, colored: bool) -> String {
    match format {
        OutputFormat::Plain => {
            if colored {
                let errors_str = if errors > 0 {
                    errors.to_string().red()
                } else {
                    errors.to_string().green()
                };
                format!(
                    "{}: {}\n{}: {}\n",
                    SUMMARY_MATCHED_LABEL.yellow(),
                    matched.to_string().green(),
                    SUMMARY_ERRORS_LABEL.yellow(),
                    errors_str
                )
            } else {
                format!(
                    "{}: {}\n{}: {}\n",
                    SUMMARY_MATCHED_LABEL, matched, SUMMARY_ERRORS_LABEL, errors
                )
            }
        }
        OutputFormat::Jsonl => {
            json!({ "matched": matched, "errors": errors }).to_string() + "\n"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_line_with_progress() {
        let emitted = EmittedUrl::new(2, 5, "http://h/?q=X");
        assert_eq!(
            format_terminal_line(&emitted, OutputFormat::Plain, false, false),
            "URL(2/5) http://h/?q=X\n"
        );
    }

    #[test]
    fn test_terminal_line_silent() {
        let emitted = EmittedUrl::new(2, 5, "http://h/?q=X");
        assert_eq!(
            format_terminal_line(&emitted, OutputFormat::Plain, true, false),
            "http://h/?q=X\n"
        );
        assert_eq!(
            format_terminal_line(&emitted, OutputFormat::Jsonl, true, false),
            "{\"url\":\"http://h/?q=X\"}\n"
        );
    }

    #[test]
    fn test_terminal_line_jsonl() {
        let emitted = EmittedUrl::new(1, 3, "http://h/");
        assert_eq!(
            format_terminal_line(&emitted, OutputFormat::Jsonl, false, false),
            "{\"index\":1,\"total\":3,\"url\":\"http://h/\"}\n"
        );
    }

    #[test]
    fn test_file_line_is_bare_url() {
        assert_eq!(format_file_line("http://h/?q=\"X\""), "http://h/?q=\"X\"\n");
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            format_summary(3, 1, OutputFormat::Plain, false),
            "Total matched URLs: 3\nTotal errors: 1\n"
        );
        let summary = format_summary(3, 1, OutputFormat::Jsonl, false);
        let value: serde_json::Value = serde_json::from_str(summary.trim()).unwrap();
        assert_eq!(value["matched"], 3);
        assert_eq!(value["errors"], 1);
    }
}
