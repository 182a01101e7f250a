use anyhow::{Context, Result};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use crate::constants::STDIN_PATH;
use crate::error::UsageError;
use crate::filter::MatcherSet;
use crate::input::InputSource;
use crate::types::{Cli, OutputFormat};

/// Matching strategy for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Keep URLs whose raw text contains the placeholder.
    Substring {
        placeholder: String,
        case_insensitive: bool,
    },
    /// Rewrite the values of query parameters found in the matcher set.
    Parameter {
        matchers: MatcherSet,
        replacement: String,
        delete_after: bool,
    },
}

/// Validated configuration for a single run
#[derive(Debug, Clone)]
pub struct Settings {
    pub source: InputSource,
    pub mode: Mode,
    pub invert: bool,
    pub remove_ports: bool,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub silent: bool,
    pub colored: bool,
}

impl Settings {
    /// Validate flag combinations and load the matcher file.
    ///
    /// Runs before any URL is read, so usage errors never leave partial output.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if cli.delete_after && cli.matchers.is_none() {
            return Err(UsageError::DeleteAfterWithoutMatchers.into());
        }

        let file = cli.file.as_ref().filter(|path| path.as_path() != Path::new(STDIN_PATH));
        let source = match (&cli.url, file) {
            (Some(_), Some(path)) => {
                return Err(UsageError::UrlWithFile(path.display().to_string()).into());
            }
            (Some(url), None) => InputSource::Literal(url.clone()),
            (None, Some(path)) => InputSource::File(path.clone()),
            (None, None) => InputSource::Stdin,
        };

        let mode = match &cli.placeholder {
            Some(placeholder) => Mode::Substring {
                placeholder: placeholder.clone(),
                case_insensitive: cli.case_insensitive,
            },
            None => {
                let matchers = match &cli.matchers {
                    Some(path) => {
                        let bytes = fs::read(path).with_context(|| {
                            format!("failed to read matcher file {}", path.display())
                        })?;
                        MatcherSet::from_bytes(&bytes, cli.key_style, cli.case_insensitive)
                    }
                    None => MatcherSet::default(),
                };
                tracing::debug!(entries = matchers.len(), "loaded matcher set");
                Mode::Parameter {
                    matchers,
                    replacement: cli.replace.clone().unwrap_or_default(),
                    delete_after: cli.delete_after,
                }
            }
        };

        Ok(Self {
            source,
            mode,
            invert: cli.invert_match,
            remove_ports: cli.remove_ports,
            output: cli.output.clone(),
            format: cli.format,
            silent: cli.silent,
            colored: !cli.no_color && io::stdout().is_terminal(),
        })
    }

    pub fn is_parameter_mode(&self) -> bool {
        matches!(self.mode, Mode::Parameter { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("urlmatch").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_delete_after_without_matchers() {
        let err = Settings::from_cli(&cli(&["-R", "X", "-d"])).unwrap_err();
        assert_eq!(
            err.downcast_ref::<UsageError>(),
            Some(&UsageError::DeleteAfterWithoutMatchers)
        );
    }

    #[test]
    fn test_url_with_file() {
        let err = Settings::from_cli(&cli(&["-R", "X", "-u", "http://a/", "-f", "urls.txt"]))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UsageError>(),
            Some(UsageError::UrlWithFile(_))
        ));
    }

    #[test]
    fn test_url_with_stdin_path_is_allowed() {
        let settings = Settings::from_cli(&cli(&["-R", "X", "-u", "http://a/", "-f", "-"])).unwrap();
        assert_eq!(
            settings.source,
            InputSource::Literal("http://a/".to_string())
        );
    }

    #[test]
    fn test_default_source_is_stdin() {
        let settings = Settings::from_cli(&cli(&["-R", "X"])).unwrap();
        assert_eq!(settings.source, InputSource::Stdin);
        assert!(settings.is_parameter_mode());
    }

    #[test]
    fn test_substring_mode() {
        let settings = Settings::from_cli(&cli(&["-p", "FUZZ", "-c"])).unwrap();
        assert_eq!(
            settings.mode,
            Mode::Substring {
                placeholder: "FUZZ".to_string(),
                case_insensitive: true
            }
        );
    }

    #[test]
    fn test_loads_matcher_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id\n\n  q  ").unwrap();
        let path = file.path().to_str().unwrap();
        let settings = Settings::from_cli(&cli(&["-R", "X", "-m", path, "-d"])).unwrap();
        match settings.mode {
            Mode::Parameter {
                matchers,
                replacement,
                delete_after,
            } => {
                assert_eq!(matchers.len(), 2);
                assert_eq!(replacement, "X");
                assert!(delete_after);
            }
            other => panic!("unexpected mode: {:?}", other),
        }
    }

    #[test]
    fn test_missing_matcher_file() {
        let err = Settings::from_cli(&cli(&["-R", "X", "-m", "/nonexistent/keys.txt"]))
            .unwrap_err();
        assert!(err.to_string().contains("failed to read matcher file"));
    }
}
