//! Selector error types.

use thiserror::Error;

/// A range argument that is not `..N`, `N..`, `A..B` or `N`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid range: {0:?}")]
pub struct RangeError(pub String);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectorError {
    #[error("invalid value for `{key}`: {source}")]
    InvalidArgument {
        key: String,
        #[source]
        source: RangeError,
    },

    #[error("objective not found: {0}")]
    ObjectiveNotFound(String),

    #[error("scores must be wrapped in braces, got {0:?}")]
    MalformedScores(String),

    #[error("unbalanced brackets in selector arguments: {0:?}")]
    UnbalancedBrackets(String),

    #[error("missing closing `]` in selector arguments")]
    UnterminatedArguments,
}

/// A [`SelectorError`] tagged with the token that produced it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("selector `{token}`: {source}")]
pub struct ResolveError {
    pub token: String,
    #[source]
    pub source: SelectorError,
}

impl ResolveError {
    pub fn new(token: impl Into<String>, source: SelectorError) -> Self {
        Self {
            token: token.into(),
            source,
        }
    }
}
