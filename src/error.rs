//! Unified error type.

use thiserror::Error as ThisError;

/// The error type returned by sluice's fallible operations.
///
/// Filters and terminal handlers return it too. [`FilterChain`](crate::FilterChain)
/// never wraps what a filter raises: the value a failing filter returns is
/// the value the caller receives.
#[derive(Debug, ThisError)]
pub enum Error {
    /// A lifecycle precondition did not hold inside a filter.
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// A URL pattern could not be parsed.
    #[error("invalid url pattern: {0}")]
    InvalidPattern(String),

    /// [`FilterChain::init`](crate::FilterChain::init) was called on a chain
    /// that already holds its filters.
    #[error("filter chain is already initialized")]
    AlreadyInitialized,

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Any other failure a filter wants to surface.
    #[error("filter `{filter}` failed: {source}")]
    Filter {
        filter: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Wraps an arbitrary error raised by the filter called `filter`.
    pub fn filter(
        filter: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Filter { filter: filter.into(), source: source.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_keeps_the_message() {
        assert_eq!(Error::IllegalState("foo".into()).to_string(), "illegal state: foo");
        assert_eq!(
            Error::filter("auth", "token expired").to_string(),
            "filter `auth` failed: token expired",
        );
    }

    #[test]
    fn io_errors_convert() {
        let err: Error = std::io::Error::other("disk gone").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
