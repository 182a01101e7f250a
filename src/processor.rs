use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::error::RecordError;
use crate::filter::{contains_placeholder, rewrite_params};
use crate::input::{Record, read_records};
use crate::output::{EmittedUrl, format_file_line, format_summary, format_terminal_line};
use crate::settings::{Mode, Settings};
use crate::utils::{ParsedUrl, remove_port};

/// Counters for a single run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub matched: usize,
    pub errors: usize,
}

/// Outcome for a single URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Keep(String),
    Drop,
    Reject(RecordError),
}

/// Apply the matching, rewrite, invert and port policies to one URL
pub fn evaluate(url: &str, settings: &Settings) -> Verdict {
    let (matched, result) = match &settings.mode {
        Mode::Substring {
            placeholder,
            case_insensitive,
        } => (
            contains_placeholder(url, placeholder, *case_insensitive),
            url.to_string(),
        ),
        Mode::Parameter {
            matchers,
            replacement,
            delete_after,
        } => {
            let mut parsed = match ParsedUrl::parse(url) {
                Ok(parsed) => parsed,
                Err(err) => return Verdict::Reject(err),
            };
            let matched = rewrite_params(&mut parsed, matchers, replacement, *delete_after);
            (matched, parsed.to_url_string())
        }
    };

    if matched == settings.invert {
        return Verdict::Drop;
    }

    if settings.remove_ports {
        Verdict::Keep(remove_port(&result))
    } else {
        Verdict::Keep(result)
    }
}

/// Process records in order, writing kept URLs to the terminal and,
/// when given, the output file. Per-record errors are only counted.
///
/// Substring mode prints bare URLs and, with an output file, writes only to
/// that file. Parameter mode annotates progress and always prints.
/// Processing stops quietly once the terminal reader goes away.
pub fn process_records<W: Write>(
    settings: &Settings,
    records: &[Record],
    terminal: &mut W,
    mut file: Option<&mut dyn Write>,
) -> Result<RunStats> {
    let total = records.len();
    let mut stats = RunStats::default();
    let parameter_mode = settings.is_parameter_mode();
    let show_progress = parameter_mode && !settings.silent;
    let print_urls = parameter_mode || file.is_none();

    for (idx, record) in records.iter().enumerate() {
        let verdict = match record {
            Ok(url) => evaluate(url, settings),
            Err(err) => Verdict::Reject(err.clone()),
        };

        match verdict {
            Verdict::Keep(url) => {
                stats.matched += 1;
                tracing::info!(url = %url, "matched URL");

                if print_urls {
                    let emitted = EmittedUrl::new(idx + 1, total, &url);
                    let line = format_terminal_line(
                        &emitted,
                        settings.format,
                        !show_progress,
                        settings.colored,
                    );
                    if !write_terminal(terminal, &line)? {
                        return Ok(stats);
                    }
                }

                if let Some(writer) = file.as_mut() {
                    writer
                        .write_all(format_file_line(&url).as_bytes())
                        .context("failed to write to output file")?;
                }
            }
            Verdict::Drop => {}
            Verdict::Reject(err) => {
                stats.errors += 1;
                tracing::debug!(line = idx + 1, error = %err, "skipping record");
            }
        }
    }

    if show_progress {
        let summary = format_summary(stats.matched, stats.errors, settings.format, settings.colored);
        write_terminal(terminal, &summary)?;
    }

    Ok(stats)
}

/// Write to the terminal. Returns `Ok(false)` when the reader closed the pipe.
fn write_terminal<W: Write>(terminal: &mut W, text: &str) -> Result<bool> {
    match terminal.write_all(text.as_bytes()) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("stdout closed, stopping");
            Ok(false)
        }
        Err(err) => Err(err).context("failed to write to stdout"),
    }
}

/// Read the configured input and process it against stdout and the output file
pub fn run(settings: &Settings) -> Result<RunStats> {
    let records = read_records(&settings.source)?;

    let mut output_writer = match &settings.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            Some(BufWriter::new(file))
        }
        None => None,
    };

    let stdout = io::stdout();
    let mut terminal = stdout.lock();
    let stats = process_records(
        settings,
        &records,
        &mut terminal,
        output_writer.as_mut().map(|w| w as &mut dyn Write),
    )?;
    match terminal.flush() {
        Err(err) if err.kind() != io::ErrorKind::BrokenPipe => {
            return Err(err).context("failed to flush stdout");
        }
        _ => {}
    }

    // Ensure all buffered output is written to file before exiting
    if let Some(mut writer) = output_writer {
        writer.flush().context("failed to flush output file")?;
        if let Some(path) = &settings.output {
            tracing::info!(path = %path.display(), "saved results");
        }
    }

    tracing::debug!(
        matched = stats.matched,
        errors = stats.errors,
        total = records.len(),
        "run finished"
    );
    Ok(stats)
}
