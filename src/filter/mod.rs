use crate::types::KeyStyle;
use crate::utils::ParsedUrl;

/// Ordered list of tokens that decide which query parameters are rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatcherSet {
    entries: Vec<String>,
    style: KeyStyle,
    case_insensitive: bool,
}

impl MatcherSet {
    pub fn new<I, S>(entries: I, style: KeyStyle, case_insensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|entry| entry.as_ref().trim().to_string())
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                if case_insensitive {
                    entry.to_lowercase()
                } else {
                    entry
                }
            })
            .collect();
        Self {
            entries,
            style,
            case_insensitive,
        }
    }

    /// Build from the raw bytes of a matcher file, one token per line.
    /// Byte sequences that are not valid UTF-8 are dropped.
    pub fn from_bytes(bytes: &[u8], style: KeyStyle, case_insensitive: bool) -> Self {
        let text: String = bytes.utf8_chunks().map(|chunk| chunk.valid()).collect();
        Self::new(text.lines(), style, case_insensitive)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether a (decoded) parameter key is in the set.
    pub fn matches_key(&self, key: &str) -> bool {
        let candidate = match self.style {
            KeyStyle::Key => key.to_string(),
            KeyStyle::Token => format!("?{}=", key),
        };
        let candidate = if self.case_insensitive {
            candidate.to_lowercase()
        } else {
            candidate
        };
        self.entries.iter().any(|entry| *entry == candidate)
    }
}

/// Check if the raw URL text contains the placeholder
pub fn contains_placeholder(url: &str, placeholder: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        url.to_lowercase().contains(&placeholder.to_lowercase())
    } else {
        url.contains(placeholder)
    }
}

/// Replace the value of every parameter whose key is in `matchers`.
///
/// With `delete_after`, the parameter list is cut right after the first
/// match. Returns whether the URL counts as matched: at least one key hit,
/// or an empty matcher set (pass-through).
pub fn rewrite_params(
    parsed: &mut ParsedUrl,
    matchers: &MatcherSet,
    replacement: &str,
    delete_after: bool,
) -> bool {
    if matchers.is_empty() {
        return true;
    }

    let Some(params) = parsed.params.as_mut() else {
        return false;
    };

    let mut matched = false;
    let mut keep = params.len();
    for (idx, param) in params.iter_mut().enumerate() {
        if matchers.matches_key(&param.decoded_key()) {
            param.value = Some(replacement.to_string());
            matched = true;
            if delete_after {
                keep = idx + 1;
                break;
            }
        }
    }
    params.truncate(keep);

    matched
}
