//! Parsed query options.

use serde::Serialize;
use std::collections::BTreeMap;

/// Pagination window. Both values are present once defaults are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

/// Options parsed from a raw query string.
///
/// Values are kept as the client wrote them so the response can echo them
/// back; typed interpretation happens in [`crate::clause`] and
/// [`crate::builder`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Options {
    /// Projection: `field` includes, `-field` excludes
    pub fields: Vec<String>,

    /// Filter expressions per public field name
    pub filter: BTreeMap<String, Vec<String>>,

    /// Pagination, `None` until defaults are applied if the client sent none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Page>,

    /// Sort order: `field` ascending, `-field` descending
    pub sort: Vec<String>,
}

impl Options {
    /// Effective limit, 0 if pagination has not been resolved.
    pub fn limit(&self) -> i64 {
        self.page.and_then(|p| p.limit).unwrap_or(0)
    }

    /// Effective offset, 0 if absent.
    pub fn offset(&self) -> i64 {
        self.page.and_then(|p| p.offset).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_shape() {
        let mut options = Options {
            page: Some(Page {
                limit: Some(10),
                offset: Some(0),
            }),
            sort: vec!["-createdAt".to_string()],
            ..Default::default()
        };
        options
            .filter
            .insert("email".to_string(), vec!["x@test.com".to_string()]);

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["page"]["limit"], 10);
        assert_eq!(json["page"]["offset"], 0);
        assert_eq!(json["filter"]["email"][0], "x@test.com");
        assert_eq!(json["sort"][0], "-createdAt");
        assert!(json["fields"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_accessors_without_page() {
        let options = Options::default();
        assert_eq!(options.limit(), 0);
        assert_eq!(options.offset(), 0);
    }
}
