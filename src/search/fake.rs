//! In-memory [`RandoStore`] for tests.

use super::store::{DocumentStream, RandoStore, StoreError};
use async_trait::async_trait;
use bson::{Bson, Document};
use futures::stream::{self, StreamExt};
use mongodb::options::FindOptions;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calls {
    pub find: usize,
    pub exact: usize,
    pub estimated: usize,
}

impl Calls {
    pub fn total(&self) -> usize {
        self.find + self.exact + self.estimated
    }
}

/// Holds documents in memory. Filters only honour direct value matches;
/// operator conditions match everything.
#[derive(Default)]
pub struct FakeStore {
    documents: Vec<Document>,
    estimated_count: Option<u64>,
    delay: Option<Duration>,
    fail_find: bool,
    fail_count: bool,
    find_calls: AtomicUsize,
    exact_calls: AtomicUsize,
    estimated_calls: AtomicUsize,
}

impl FakeStore {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            ..Default::default()
        }
    }

    /// Report this instead of the real size from `estimated_document_count`.
    pub fn with_estimated_count(mut self, count: u64) -> Self {
        self.estimated_count = Some(count);
        self
    }

    /// Sleep before answering `find` and both counts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing_find(mut self) -> Self {
        self.fail_find = true;
        self
    }

    pub fn failing_count(mut self) -> Self {
        self.fail_count = true;
        self
    }

    pub fn calls(&self) -> Calls {
        Calls {
            find: self.find_calls.load(Ordering::SeqCst),
            exact: self.exact_calls.load(Ordering::SeqCst),
            estimated: self.estimated_calls.load(Ordering::SeqCst),
        }
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn matching(&self, filter: &Document) -> impl Iterator<Item = &Document> + '_ {
        let filter = filter.clone();
        self.documents.iter().filter(move |doc| {
            filter.iter().all(|(key, expected)| match expected {
                Bson::Document(_) | Bson::RegularExpression(_) => true,
                value => doc.get(key) == Some(value),
            })
        })
    }
}

#[async_trait]
impl RandoStore for FakeStore {
    async fn find(
        &self,
        filter: Document,
        options: FindOptions,
    ) -> Result<DocumentStream, StoreError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.fail_find {
            return Err(StoreError::MongoDB(mongodb::error::Error::custom("find refused")));
        }

        let skip = options.skip.unwrap_or(0) as usize;
        let limit = match options.limit.unwrap_or(0) {
            0 => usize::MAX,
            n => n.unsigned_abs() as usize,
        };
        let documents: Vec<Result<Document, StoreError>> = self
            .matching(&filter)
            .skip(skip)
            .take(limit)
            .cloned()
            .map(Ok)
            .collect();
        Ok(stream::iter(documents).boxed())
    }

    async fn count_documents(&self, filter: Document) -> Result<u64, StoreError> {
        self.exact_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.fail_count {
            return Err(StoreError::MongoDB(mongodb::error::Error::custom("count refused")));
        }
        Ok(self.matching(&filter).count() as u64)
    }

    async fn estimated_document_count(&self) -> Result<u64, StoreError> {
        self.estimated_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.fail_count {
            return Err(StoreError::MongoDB(mongodb::error::Error::custom("count refused")));
        }
        Ok(self
            .estimated_count
            .unwrap_or(self.documents.len() as u64))
    }
}
