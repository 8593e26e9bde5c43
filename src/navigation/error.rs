//! Navigation errors.
//!
//! A URL that matches nothing is not an error: it is the
//! `NavigationOutcome::NotFound` result.

use thiserror::Error;

use crate::routing::LookupError;
use crate::views::LoadError;

/// Errors surfaced to the caller of a navigation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigationError {
    #[error("invalid location `{target}`: {source}")]
    InvalidLocation {
        target: String,
        #[source]
        source: url::ParseError,
    },

    #[error("`{0}` points outside the application")]
    External(String),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("route `{route}` could not be displayed: {source}")]
    Load {
        route: String,
        #[source]
        source: LoadError,
    },
}

impl NavigationError {
    /// The load failure behind this error, if any.
    pub fn load_error(&self) -> Option<&LoadError> {
        match self {
            NavigationError::Load { source, .. } => Some(source),
            _ => None,
        }
    }
}
