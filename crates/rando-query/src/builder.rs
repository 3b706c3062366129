//! [`Options`] → MongoDB filter document and find options.

use crate::clause::Clause;
use crate::error::{FilterBuildError, ParseError};
use crate::options::Options;
use crate::parse::strip_direction;
use bson::{Bson, Document, Regex};
use mongodb::options::FindOptions;
use rando_core::Variant;

/// Build the MongoDB filter for the options' filter clauses.
///
/// Clauses on one field are combined: equalities and wildcard patterns into
/// `$in` (a single one becomes a direct match), negations into `$nin`
/// (`$ne` for one), comparisons into `$gt`/`$gte`/`$lt`/`$lte`. Separate
/// fields are combined with an implicit AND.
pub fn build_filter(options: &Options, variant: Variant) -> Result<Document, FilterBuildError> {
    let mut filter = Document::new();
    for (field, values) in &options.filter {
        if values.is_empty() {
            continue;
        }
        let spec = variant
            .field(field)
            .ok_or_else(|| ParseError::UnknownField {
                field: field.clone(),
                parameter: "filter",
            })?;
        let clauses = values
            .iter()
            .map(|raw| Clause::parse(field, spec.kind, raw))
            .collect::<Result<Vec<_>, _>>()?;

        filter.insert(variant.storage_field(field), field_condition(field, clauses)?);
    }
    Ok(filter)
}

fn field_condition(field: &str, clauses: Vec<Clause>) -> Result<Bson, FilterBuildError> {
    let mut equals: Vec<Bson> = Vec::new();
    let mut not_equals: Vec<Bson> = Vec::new();
    let mut comparisons = Document::new();
    let mut matches_null = false;

    for clause in clauses {
        match clause {
            Clause::Null => matches_null = true,
            Clause::Equals(value) => equals.push(value),
            Clause::Pattern(pattern) => equals.push(Bson::RegularExpression(Regex {
                pattern,
                options: String::new(),
            })),
            Clause::NotEquals(value) => not_equals.push(value),
            Clause::Compare(op, value) => {
                if comparisons.contains_key(op.operator()) {
                    return Err(FilterBuildError::ConflictingOperators {
                        field: field.to_string(),
                        operator: op.operator(),
                    });
                }
                comparisons.insert(op.operator(), value);
            }
        }
    }

    if matches_null {
        if !comparisons.is_empty() {
            return Err(FilterBuildError::NullWithComparison {
                field: field.to_string(),
            });
        }
        // `null` matches both missing and null-valued fields
        equals.push(Bson::Null);
    }

    if not_equals.is_empty() && comparisons.is_empty() && equals.len() == 1 {
        return Ok(equals.remove(0));
    }

    let mut condition = comparisons;
    if !equals.is_empty() {
        condition.insert("$in", equals);
    }
    match not_equals.len() {
        0 => {}
        1 => {
            condition.insert("$ne", not_equals.remove(0));
        }
        _ => {
            condition.insert("$nin", not_equals);
        }
    }
    Ok(Bson::Document(condition))
}

/// Build the sort document: `-field` descending, otherwise ascending.
pub fn build_sort(options: &Options, variant: Variant) -> Document {
    let mut sort = Document::new();
    for entry in &options.sort {
        let direction = if entry.starts_with('-') { -1 } else { 1 };
        sort.insert(variant.storage_field(strip_direction(entry)), direction);
    }
    sort
}

/// Build the projection document: `field` includes, `-field` excludes.
pub fn build_projection(options: &Options, variant: Variant) -> Result<Document, FilterBuildError> {
    let mut projection = Document::new();
    let mut included = false;
    let mut excluded = false;
    for entry in &options.fields {
        let (field, value) = match entry.strip_prefix('-') {
            Some(field) => {
                excluded = true;
                (field, 0)
            }
            None => {
                included = true;
                (entry.as_str(), 1)
            }
        };
        projection.insert(variant.storage_field(field), value);
    }
    if included && excluded {
        return Err(FilterBuildError::MixedProjection);
    }
    Ok(projection)
}

/// Build the find options: sort, projection, `skip = offset`,
/// `limit = limit`, and disk use allowed so non-indexed sorts on large
/// collections do not fail outright.
///
/// The limit is passed on unchanged: 0 means no limit, a negative one a
/// single batch of at most `|limit|` documents. A negative offset has no
/// `skip` representation and leaves it unset; the caller must refuse it.
pub fn build_find_options(
    options: &Options,
    variant: Variant,
) -> Result<FindOptions, FilterBuildError> {
    let sort = build_sort(options, variant);
    let projection = build_projection(options, variant)?;

    let mut find_options = FindOptions::default();
    find_options.allow_disk_use = Some(true);
    find_options.skip = u64::try_from(options.offset()).ok();
    find_options.limit = Some(options.limit());
    if !sort.is_empty() {
        find_options.sort = Some(sort);
    }
    if !projection.is_empty() {
        find_options.projection = Some(projection);
    }
    Ok(find_options)
}
