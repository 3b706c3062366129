//! Pagination defaults and clamping.

use crate::options::{Options, Page};

/// Configured page sizes.
///
/// `max_page_size` is at least 1 and `default_page_size` lies within
/// `1..=max_page_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDefaults {
    default_page_size: i64,
    max_page_size: i64,
}

impl PageDefaults {
    /// Out-of-range sizes are pulled into range: the maximum to at least 1,
    /// the default into `1..=max`.
    pub fn new(default_page_size: i64, max_page_size: i64) -> Self {
        let max_page_size = max_page_size.max(1);
        Self {
            default_page_size: default_page_size.clamp(1, max_page_size),
            max_page_size,
        }
    }

    pub fn default_page_size(&self) -> i64 {
        self.default_page_size
    }

    pub fn max_page_size(&self) -> i64 {
        self.max_page_size
    }

    /// Fill in and clamp the pagination window, in this order:
    ///
    /// 1. no page block: `{limit: default, offset: 0}`
    /// 2. missing limit: `default`
    /// 3. missing offset: `0`
    /// 4. limit above the maximum: clamp to the maximum
    ///
    /// A client-supplied limit below 1 or a negative offset is kept as
    /// given and handed to the find as is.
    pub fn apply(&self, options: &mut Options) {
        let page = options.page.get_or_insert(Page {
            limit: Some(self.default_page_size),
            offset: Some(0),
        });

        let limit = page.limit.get_or_insert(self.default_page_size);
        if *limit > self.max_page_size {
            *limit = self.max_page_size;
        }
        page.offset.get_or_insert(0);
    }
}
