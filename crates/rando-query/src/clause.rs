//! Filter expression parsing.
//!
//! String fields:
//! - `value` - equals
//! - `*value*`, `value*`, `*value` - contains, starts with, ends with
//! - `!value` - not equal
//! - `null` - missing or null
//!
//! Date fields (`createdAt`, `updatedAt`), RFC 3339 or `YYYY-MM-DD`:
//! - `date` - equals
//! - `>date`, `>=date`, `<date`, `<=date` - comparisons
//! - `!=date` - not equal
//! - `null` - missing or null

use crate::error::ParseError;
use bson::{Bson, DateTime as BsonDateTime};
use chrono::{DateTime, NaiveDate, Utc};
use rando_core::FieldKind;

const NULL_LITERAL: &str = "null";
const WILDCARD: char = '*';

/// A comparison operator on ordered values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    /// MongoDB query operator.
    pub fn operator(&self) -> &'static str {
        match self {
            Comparison::Gt => "$gt",
            Comparison::Gte => "$gte",
            Comparison::Lt => "$lt",
            Comparison::Lte => "$lte",
        }
    }
}

/// One typed filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Field is missing or null
    Null,
    Equals(Bson),
    NotEquals(Bson),
    /// Anchored regular expression built from a wildcard pattern
    Pattern(String),
    Compare(Comparison, Bson),
}

impl Clause {
    /// Parse a raw filter expression for a field of the given kind.
    pub fn parse(field: &str, kind: FieldKind, raw: &str) -> Result<Self, ParseError> {
        if raw == NULL_LITERAL {
            return Ok(Clause::Null);
        }

        match kind {
            FieldKind::String => parse_string(field, raw),
            FieldKind::Date => parse_date_clause(field, raw),
        }
    }
}

fn invalid(field: &str, raw: &str, reason: impl Into<String>) -> ParseError {
    ParseError::InvalidFilterValue {
        field: field.to_string(),
        value: raw.to_string(),
        reason: reason.into(),
    }
}

fn parse_string(field: &str, raw: &str) -> Result<Clause, ParseError> {
    if let Some(rest) = raw.strip_prefix('!') {
        if rest.is_empty() {
            return Err(invalid(field, raw, "missing value after '!'"));
        }
        return Ok(Clause::NotEquals(Bson::String(rest.to_string())));
    }

    let leading = raw.starts_with(WILDCARD);
    let trailing = raw.len() > 1 && raw.ends_with(WILDCARD);
    if !leading && !trailing {
        return Ok(Clause::Equals(Bson::String(raw.to_string())));
    }

    let inner = raw.trim_matches(WILDCARD);
    if inner.is_empty() {
        return Err(invalid(field, raw, "wildcard pattern has no text"));
    }

    let escaped = escape_regex(inner);
    let pattern = match (leading, trailing) {
        (true, true) => escaped,
        (true, false) => format!("{escaped}$"),
        _ => format!("^{escaped}"),
    };
    Ok(Clause::Pattern(pattern))
}

fn parse_date_clause(field: &str, raw: &str) -> Result<Clause, ParseError> {
    // Two-character operators must be checked first
    let (op, value) = if let Some(rest) = raw.strip_prefix(">=") {
        (Some(Comparison::Gte), rest)
    } else if let Some(rest) = raw.strip_prefix("<=") {
        (Some(Comparison::Lte), rest)
    } else if let Some(rest) = raw.strip_prefix("!=") {
        let date = parse_date(field, raw, rest)?;
        return Ok(Clause::NotEquals(date));
    } else if let Some(rest) = raw.strip_prefix('>') {
        (Some(Comparison::Gt), rest)
    } else if let Some(rest) = raw.strip_prefix('<') {
        (Some(Comparison::Lt), rest)
    } else {
        (None, raw)
    };

    let date = parse_date(field, raw, value)?;
    Ok(match op {
        Some(op) => Clause::Compare(op, date),
        None => Clause::Equals(date),
    })
}

fn parse_date(field: &str, raw: &str, value: &str) -> Result<Bson, ParseError> {
    parse_timestamp(value)
        .map(|dt| Bson::DateTime(BsonDateTime::from_chrono(dt)))
        .ok_or_else(|| invalid(field, raw, "expected an RFC 3339 timestamp or YYYY-MM-DD date"))
}

/// Parse a timestamp in RFC 3339 or date-only (`YYYY-MM-DD`, midnight UTC) form.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

/// Escape regular-expression metacharacters so `s` matches literally.
pub fn escape_regex(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
