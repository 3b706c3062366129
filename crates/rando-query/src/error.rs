//! Error types for query translation.

use thiserror::Error;

/// A raw query that cannot be parsed or does not fit the entity's fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The query string is not valid `application/x-www-form-urlencoded`.
    #[error("Malformed query string: {0}")]
    Malformed(String),

    /// A parameter outside the query grammar.
    #[error("Unknown query parameter '{0}'")]
    UnknownParameter(String),

    /// A parameter was given without a value.
    #[error("Empty value for query parameter '{0}'")]
    EmptyValue(String),

    /// A filter, sort or projection names a field the entity does not have.
    #[error("Unknown field '{field}' in {parameter}")]
    UnknownField {
        field: String,
        parameter: &'static str,
    },

    /// A filter value does not parse for the field's type.
    #[error("Invalid filter value '{value}' for field '{field}': {reason}")]
    InvalidFilterValue {
        field: String,
        value: String,
        reason: String,
    },

    /// A pagination value is not an integer.
    #[error("Invalid value '{value}' for page[{parameter}]: expected an integer")]
    InvalidPageValue { parameter: String, value: String },
}

/// Parsed options that cannot be turned into a MongoDB query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterBuildError {
    /// The same comparison operator was given twice for one field.
    #[error("Conflicting '{operator}' conditions for field '{field}'")]
    ConflictingOperators {
        field: String,
        operator: &'static str,
    },

    /// `null` cannot be combined with range comparisons.
    #[error("Field '{field}' cannot combine null with comparisons")]
    NullWithComparison { field: String },

    /// A projection mixed included and excluded fields.
    #[error("Projection cannot mix included and excluded fields")]
    MixedProjection,

    /// A clause that does not parse (options not produced by `translate`).
    #[error(transparent)]
    Parse(#[from] ParseError),
}
