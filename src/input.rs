use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use crate::error::RecordError;

/// One non-blank input line: the trimmed URL, or why it could not be decoded.
pub type Record = Result<String, RecordError>;

/// Where URLs are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
    Literal(String),
}

/// Read the whole input source into memory as records.
pub fn read_records(source: &InputSource) -> Result<Vec<Record>> {
    match source {
        InputSource::Stdin => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("failed to read URLs from stdin")?;
            Ok(split_records(&buf))
        }
        InputSource::File(path) => {
            let buf = fs::read(path)
                .with_context(|| format!("failed to read input file {}", path.display()))?;
            Ok(split_records(&buf))
        }
        InputSource::Literal(url) => {
            let url = url.trim();
            if url.is_empty() {
                Ok(Vec::new())
            } else {
                Ok(vec![Ok(url.to_string())])
            }
        }
    }
}

/// Split raw bytes into trimmed, non-blank records. Lines that are not valid
/// UTF-8 become `RecordError::Decode` instead of aborting the batch.
pub fn split_records(buf: &[u8]) -> Vec<Record> {
    buf.split(|b| *b == b'\n')
        .map(<[u8]>::trim_ascii)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match std::str::from_utf8(line) {
            Ok(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| Ok(text.to_string()))
            }
            Err(_) => Some(Err(RecordError::Decode)),
        })
        .collect()
}
