pub mod formatter;

pub use formatter::{EmittedUrl, format_file_line, format_summary, format_terminal_line};
