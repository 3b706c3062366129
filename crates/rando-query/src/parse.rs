//! Raw query string → [`Options`].

use crate::clause::Clause;
use crate::error::ParseError;
use crate::options::{Options, Page};
use crate::paging::PageDefaults;
use rando_core::Variant;

const FILTER_PREFIX: &str = "filter[";
const PAGE_PREFIX: &str = "page[";
const SORT: &str = "sort";
const FIELDS: &str = "fields";

/// Parse a raw query string, validate it against the variant's fields and
/// apply the pagination defaults.
///
/// The returned options always carry a resolved `page.limit` and
/// `page.offset`.
pub fn translate(
    raw_query: &str,
    variant: Variant,
    defaults: &PageDefaults,
) -> Result<Options, ParseError> {
    let mut options = parse_query(raw_query)?;
    validate(&options, variant)?;
    defaults.apply(&mut options);
    Ok(options)
}

/// Parse a raw query string into options without validating field names.
pub fn parse_query(raw_query: &str) -> Result<Options, ParseError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw_query.trim_start_matches('?'))
        .map_err(|e| ParseError::Malformed(e.to_string()))?;

    let mut options = Options::default();
    for (key, value) in pairs {
        if let Some(field) = bracketed(&key, FILTER_PREFIX) {
            if field.is_empty() {
                return Err(ParseError::UnknownParameter(key.clone()));
            }
            let values = split_list(&key, &value)?;
            options
                .filter
                .entry(field.to_string())
                .or_default()
                .extend(values);
        } else if let Some(name) = bracketed(&key, PAGE_PREFIX) {
            let parsed: i64 = value.trim().parse().map_err(|_| ParseError::InvalidPageValue {
                parameter: name.to_string(),
                value: value.clone(),
            })?;
            let page = options.page.get_or_insert_with(Page::default);
            match name {
                "limit" => page.limit = Some(parsed),
                "offset" => page.offset = Some(parsed),
                _ => return Err(ParseError::UnknownParameter(key.clone())),
            }
        } else if key == SORT {
            options.sort.extend(split_list(&key, &value)?);
        } else if key == FIELDS {
            options.fields.extend(split_list(&key, &value)?);
        } else {
            return Err(ParseError::UnknownParameter(key.clone()));
        }
    }

    Ok(options)
}

/// Check that every referenced field exists and every filter value parses.
pub fn validate(options: &Options, variant: Variant) -> Result<(), ParseError> {
    for (field, values) in &options.filter {
        let spec = variant.field(field).ok_or_else(|| ParseError::UnknownField {
            field: field.clone(),
            parameter: "filter",
        })?;
        for value in values {
            Clause::parse(field, spec.kind, value)?;
        }
    }

    for entry in &options.sort {
        let field = strip_direction(entry);
        if variant.field(field).is_none() {
            return Err(ParseError::UnknownField {
                field: field.to_string(),
                parameter: SORT,
            });
        }
    }

    for entry in &options.fields {
        let field = entry.strip_prefix('-').unwrap_or(entry);
        if variant.field(field).is_none() {
            return Err(ParseError::UnknownField {
                field: field.to_string(),
                parameter: FIELDS,
            });
        }
    }

    Ok(())
}

/// Strip a leading `-` or `+` sort direction.
pub(crate) fn strip_direction(entry: &str) -> &str {
    entry
        .strip_prefix('-')
        .or_else(|| entry.strip_prefix('+'))
        .unwrap_or(entry)
}

/// `filter[email]` with prefix `filter[` → `email`.
fn bracketed<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix)?.strip_suffix(']')
}

fn split_list(key: &str, value: &str) -> Result<Vec<String>, ParseError> {
    let items: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if items.is_empty() {
        return Err(ParseError::EmptyValue(key.to_string()));
    }
    Ok(items)
}
