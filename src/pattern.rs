//! URL patterns that decide which requests a filter sees.
//!
//! | Pattern | Matches |
//! |---|---|
//! | `/*` | every path |
//! | `*.css` | paths ending in `.css` |
//! | `/api/*` | paths starting with `/api` |
//! | `/login` | exactly `/login` |
//!
//! Paths are matched after the context path has been stripped, see
//! [`Request::path_within_context`](crate::Request::path_within_context).

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rule {
    All,
    Suffix(String),
    Prefix(String),
    Exact(String),
}

/// A parsed URL pattern. The default pattern, `/*`, matches every path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPattern {
    raw: String,
    rule: Rule,
}

impl UrlPattern {
    /// Parses a pattern. Blank input is rejected.
    pub fn parse(pattern: &str) -> Result<Self, Error> {
        if pattern.trim().is_empty() {
            return Err(Error::InvalidPattern("empty url".to_owned()));
        }

        let rule = if pattern == "/*" {
            Rule::All
        } else if pattern.starts_with('*') {
            Rule::Suffix(strip_wildcards(pattern))
        } else if pattern.ends_with('*') {
            Rule::Prefix(strip_wildcards(pattern))
        } else {
            Rule::Exact(strip_wildcards(pattern))
        };

        Ok(Self { raw: pattern.to_owned(), rule })
    }

    pub fn matches(&self, path: &str) -> bool {
        match &self.rule {
            Rule::All => true,
            Rule::Suffix(s) => path.ends_with(s.as_str()),
            Rule::Prefix(p) => path.starts_with(p.as_str()),
            Rule::Exact(e) => path == e,
        }
    }

    pub fn as_str(&self) -> &str { &self.raw }
}

/// Removes every `*` together with the `/` directly in front of it.
fn strip_wildcards(pattern: &str) -> String {
    pattern.replace("/*", "").replace('*', "")
}

impl Default for UrlPattern {
    fn default() -> Self {
        Self { raw: "/*".to_owned(), rule: Rule::All }
    }
}

impl FromStr for UrlPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
