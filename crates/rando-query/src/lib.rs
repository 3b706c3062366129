//! Query translation for the Rando search endpoints.
//!
//! Turns a raw query string into an [`Options`] value, validates it against
//! a [`rando_core::Variant`]'s fields, applies the pagination defaults, and
//! builds the MongoDB filter and find options from it.
//!
//! # Query-string grammar
//!
//! | Parameter | Meaning |
//! |---|---|
//! | `filter[<field>]=<expr>[,<expr>...]` | filter clauses (repeatable) |
//! | `page[limit]=<int>`, `page[offset]=<int>` | pagination window |
//! | `sort=<field>[,-<field>...]` | sort order, `-` for descending |
//! | `fields=<field>[,-<field>...]` | projection, `-` to exclude |
//!
//! See [`clause`] for the filter expression syntax.
//!
//! # Example
//!
//! ```rust
//! use rando_core::Variant;
//! use rando_query::{build_filter, translate, PageDefaults};
//!
//! let defaults = PageDefaults::new(100, 1000);
//! let options = translate("filter[email]=x@test.com&page[limit]=5000", Variant::Base, &defaults).unwrap();
//! assert_eq!(options.limit(), 1000);
//! assert_eq!(options.offset(), 0);
//!
//! let filter = build_filter(&options, Variant::Base).unwrap();
//! assert_eq!(filter.get_str("email").unwrap(), "x@test.com");
//! ```

pub mod builder;
pub mod clause;
pub mod error;
pub mod options;
pub mod paging;
pub mod parse;

// Re-exports for convenience
pub use builder::{build_filter, build_find_options};
pub use clause::{Clause, Comparison};
pub use error::{FilterBuildError, ParseError};
pub use options::{Options, Page};
pub use paging::PageDefaults;
pub use parse::translate;
