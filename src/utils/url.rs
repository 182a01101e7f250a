use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::constants::PORT_PATTERN;
use crate::error::RecordError;

static PORT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PORT_PATTERN).expect("port pattern is a valid regex"));

/// A single `key[=value]` segment of a query string, kept as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub key: String,
    pub value: Option<String>,
}

impl QueryParam {
    fn parse(segment: &str) -> Self {
        match segment.split_once('=') {
            Some((key, value)) => Self {
                key: key.to_string(),
                value: Some(value.to_string()),
            },
            None => Self {
                key: segment.to_string(),
                value: None,
            },
        }
    }

    /// Key with percent-escapes and `+` decoded, used for matching only.
    pub fn decoded_key(&self) -> Cow<'_, str> {
        if !self.key.contains(['%', '+']) {
            return Cow::Borrowed(&self.key);
        }
        url::form_urlencoded::parse(self.key.as_bytes())
            .next()
            .map(|(key, _)| Cow::Owned(key.into_owned()))
            .unwrap_or(Cow::Borrowed(&self.key))
    }
}

/// URL split into its components without any normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub scheme: String,
    pub authority: String,
    pub path: String,
    /// `None` when the URL had no `?` at all.
    pub params: Option<Vec<QueryParam>>,
    pub fragment: Option<String>,
}

impl ParsedUrl {
    /// Split `raw` into components, rejecting URLs without scheme and host
    /// or whose authority has an unbalanced IPv6 bracket. Nothing else about
    /// the host, port or path is validated.
    pub fn parse(raw: &str) -> Result<Self, RecordError> {
        let (before_fragment, fragment) = match raw.split_once('#') {
            Some((head, frag)) => (head, Some(frag.to_string())),
            None => (raw, None),
        };
        let (before_query, query) = match before_fragment.split_once('?') {
            Some((head, query)) => (head, Some(query)),
            None => (before_fragment, None),
        };

        let (scheme, rest) = split_scheme(before_query);
        let (authority, path) = match rest.strip_prefix("//") {
            Some(hier) => hier.split_at(hier.find('/').unwrap_or(hier.len())),
            None => ("", rest),
        };

        if scheme.is_empty() || authority.is_empty() {
            return Err(RecordError::MissingSchemeOrHost);
        }
        if authority.contains('[') != authority.contains(']') {
            return Err(RecordError::Malformed("unbalanced IPv6 bracket"));
        }

        Ok(Self {
            scheme: scheme.to_string(),
            authority: authority.to_string(),
            path: path.to_string(),
            params: query.map(|q| q.split('&').map(QueryParam::parse).collect()),
            fragment,
        })
    }

    /// Rebuild the URL text. The query is joined literally as `key=value`
    /// pairs separated by `&`, never percent-encoded.
    pub fn to_url_string(&self) -> String {
        let mut out = format!("{}://{}{}", self.scheme, self.authority, self.path);
        if let Some(params) = &self.params {
            out.push('?');
            for (idx, param) in params.iter().enumerate() {
                if idx > 0 {
                    out.push('&');
                }
                out.push_str(&param.key);
                if let Some(value) = &param.value {
                    out.push('=');
                    out.push_str(value);
                }
            }
        }
        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }
}

/// Return `(scheme, remainder)`; the scheme is empty when `input` has none.
fn split_scheme(input: &str) -> (&str, &str) {
    if let Some(colon) = input.find(':') {
        let candidate = &input[..colon];
        let valid = candidate
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && candidate
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if valid {
            return (candidate, &input[colon + 1..]);
        }
    }
    ("", input)
}

/// Strip every `:` followed by one to five digits from the URL text.
pub fn remove_port(url: &str) -> String {
    PORT_REGEX.replace_all(url, "").into_owned()
}
