//! Search errors and their HTTP mapping.

use super::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rando_query::{FilterBuildError, ParseError};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Body of every 500 response; details only go to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Build,
    Find,
    Materialize,
    Count,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Parse => "parse",
            Stage::Build => "build",
            Stage::Find => "find",
            Stage::Materialize => "materialize",
            Stage::Count => "count",
        })
    }
}

#[derive(Error, Debug)]
pub enum SearchError {
    /// The raw query is invalid.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The options cannot be expressed as a MongoDB query.
    #[error(transparent)]
    Build(#[from] FilterBuildError),

    #[error("Find on '{collection}' failed: {source}")]
    Find {
        collection: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Reading results from '{collection}' failed: {source}")]
    Materialize {
        collection: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Counting '{collection}' failed: {source}")]
    Count {
        collection: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Stage {stage} on '{collection}' exceeded the {timeout:?} deadline")]
    Timeout {
        collection: &'static str,
        stage: Stage,
        timeout: Duration,
    },
}

impl SearchError {
    pub fn status(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Whether the caller's input caused the failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SearchError::Parse(_) | SearchError::Build(_))
    }

    pub fn stage(&self) -> Stage {
        match self {
            SearchError::Parse(_) => Stage::Parse,
            SearchError::Build(_) => Stage::Build,
            SearchError::Find { .. } => Stage::Find,
            SearchError::Materialize { .. } => Stage::Materialize,
            SearchError::Count { .. } => Stage::Count,
            SearchError::Timeout { stage, .. } => *stage,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::BAD_REQUEST {
            (status, self.to_string()).into_response()
        } else {
            (status, INTERNAL_ERROR_MESSAGE).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let parse = SearchError::from(ParseError::UnknownParameter("q".to_string()));
        assert_eq!(parse.status(), StatusCode::BAD_REQUEST);
        assert_eq!(parse.stage(), Stage::Parse);
        assert!(parse.is_client_error());

        let build = SearchError::from(FilterBuildError::MixedProjection);
        assert_eq!(build.status(), StatusCode::BAD_REQUEST);
        assert_eq!(build.stage(), Stage::Build);

        let timeout = SearchError::Timeout {
            collection: "randoBase",
            stage: Stage::Count,
            timeout: Duration::from_secs(1),
        };
        assert_eq!(timeout.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(timeout.stage(), Stage::Count);
        assert!(!timeout.is_client_error());
    }

    #[test]
    fn test_client_errors_carry_message() {
        let err = SearchError::from(ParseError::UnknownParameter("q".to_string()));
        assert_eq!(err.to_string(), "Unknown query parameter 'q'");
    }
}
