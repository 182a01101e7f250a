use clap::Parser;
use std::path::PathBuf;

/// Output format options
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Plain,
    Jsonl,
}

/// How matcher entries are compared against query parameter keys
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyStyle {
    /// Compare against the bare key, e.g. `id`.
    #[default]
    Key,
    /// Compare against the key wrapped as `?id=`.
    Token,
}

/// CLI arguments structure
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    // INPUT
    /// Input file containing URLs, one per line ("-" reads stdin). Defaults to stdin.
    #[arg(short, long, help_heading = "INPUT")]
    pub file: Option<PathBuf>,

    /// Process a single URL instead of a list.
    #[arg(short, long, help_heading = "INPUT")]
    pub url: Option<String>,

    // MATCH
    /// Placeholder text to search for in the URLs (substring mode).
    #[arg(
        short,
        long,
        help_heading = "MATCH",
        conflicts_with_all = ["matchers", "replace", "delete_after", "key_style"]
    )]
    pub placeholder: Option<String>,

    /// File with query parameter keys to match, one per line.
    #[arg(short, long, help_heading = "MATCH")]
    pub matchers: Option<PathBuf>,

    /// How matcher entries are compared against parameter keys.
    #[arg(short, long, value_enum, default_value_t = KeyStyle::Key, help_heading = "MATCH")]
    pub key_style: KeyStyle,

    /// Compare keys (or the placeholder) case-insensitively.
    #[arg(short, long, help_heading = "MATCH")]
    pub case_insensitive: bool,

    /// Invert the match to keep URLs that do not match.
    #[arg(short, long, help_heading = "MATCH")]
    pub invert_match: bool,

    // REWRITE
    /// Value substituted for every matched parameter.
    #[arg(
        short = 'R',
        long,
        required_unless_present = "placeholder",
        help_heading = "REWRITE"
    )]
    pub replace: Option<String>,

    /// Drop every parameter after the first matched one.
    #[arg(short, long, help_heading = "REWRITE")]
    pub delete_after: bool,

    /// Remove port numbers from URLs.
    #[arg(short, long, help_heading = "REWRITE")]
    pub remove_ports: bool,

    // OUTPUT
    /// Output file to save results (in addition to stdout).
    #[arg(short, long, help_heading = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain, help_heading = "OUTPUT")]
    pub format: OutputFormat,

    /// Only print the resulting URLs, without progress or summary lines.
    #[arg(short, long, help_heading = "OUTPUT")]
    pub silent: bool,

    /// Enable verbose logging on stderr.
    #[arg(short, long, help_heading = "OUTPUT")]
    pub verbose: bool,

    /// Disable color output.
    #[arg(long, help_heading = "OUTPUT")]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_replace_required_in_parameter_mode() {
        assert!(Cli::try_parse_from(["urlmatch"]).is_err());
        assert!(Cli::try_parse_from(["urlmatch", "-R", "X"]).is_ok());
        assert!(Cli::try_parse_from(["urlmatch", "-p", "FUZZ"]).is_ok());
    }

    #[test]
    fn test_placeholder_conflicts() {
        assert!(Cli::try_parse_from(["urlmatch", "-p", "FUZZ", "-R", "X"]).is_err());
        assert!(Cli::try_parse_from(["urlmatch", "-p", "FUZZ", "-m", "keys.txt"]).is_err());
        assert!(Cli::try_parse_from(["urlmatch", "-p", "FUZZ", "-d"]).is_err());
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "urlmatch", "-R", "X", "-m", "keys.txt", "-k", "token", "-c", "-i", "-d", "-r", "-s",
            "--format", "jsonl",
        ])
        .unwrap();
        assert_eq!(cli.replace.as_deref(), Some("X"));
        assert_eq!(cli.key_style, KeyStyle::Token);
        assert_eq!(cli.format, OutputFormat::Jsonl);
        assert!(cli.case_insensitive && cli.invert_match && cli.delete_after);
        assert!(cli.remove_ports && cli.silent);
    }
}
