//! Per-request search pipeline.
//!
//! Stages run strictly in order and none is retried:
//!
//! 1. parse the raw query ([`rando_query::translate`])
//! 2. build the filter and find options
//! 3. find
//! 4. materialize the cursor into records
//! 5. count: estimated for an empty filter, exact otherwise
//!
//! Stages 3-5 share a single deadline.

use super::error::{SearchError, Stage};
use super::store::{DocumentStream, RandoStore, StoreError};
use bson::Document;
use futures::TryStreamExt;
use mongodb::options::FindOptions;
use rando_core::{RandoRecord, Variant};
use rando_query::{build_filter, build_find_options, translate, Options, PageDefaults};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// JSON body of a successful search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub data: Vec<RandoRecord>,
    /// Options as applied, after pagination defaults and clamping
    pub options: Options,
    pub total: u64,
}

/// A response together with the time the pipeline took.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub response: SearchResponse,
    pub duration: Duration,
}

pub struct SearchPipeline<S> {
    variant: Variant,
    store: S,
    paging: PageDefaults,
    timeout: Duration,
}

impl<S: RandoStore> SearchPipeline<S> {
    pub fn new(variant: Variant, store: S, paging: PageDefaults, timeout: Duration) -> Self {
        Self {
            variant,
            store,
            paging,
            timeout,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Run the whole pipeline for one raw query string.
    pub async fn search(&self, raw_query: &str) -> Result<SearchOutcome, SearchError> {
        let started = Instant::now();
        let collection = self.variant.collection_name();

        let stage_start = Instant::now();
        let options = translate(raw_query, self.variant, &self.paging)
            .map_err(SearchError::from)
            .inspect_err(|e| self.log_failure(e, started))?;
        tracing::trace!(collection, elapsed = ?stage_start.elapsed(), "Query parsed");

        let stage_start = Instant::now();
        let (filter, find_options) = build_filter(&options, self.variant)
            .and_then(|filter| Ok((filter, build_find_options(&options, self.variant)?)))
            .map_err(SearchError::from)
            .inspect_err(|e| self.log_failure(e, started))?;
        tracing::trace!(collection, elapsed = ?stage_start.elapsed(), ?filter, "Filter built");

        let deadline = started + self.timeout;

        let stage_start = Instant::now();
        let stream = self
            .within(deadline, Stage::Find, self.find(filter.clone(), &options, find_options))
            .await?
            .map_err(|source| SearchError::Find { collection, source })
            .inspect_err(|e| self.log_failure(e, started))?;
        tracing::debug!(collection, elapsed = ?stage_start.elapsed(), "Find executed");

        let stage_start = Instant::now();
        let data = self
            .within(deadline, Stage::Materialize, self.materialize(stream, options.limit()))
            .await?
            .map_err(|source| SearchError::Materialize { collection, source })
            .inspect_err(|e| self.log_failure(e, started))?;
        tracing::debug!(
            collection,
            elapsed = ?stage_start.elapsed(),
            records = data.len(),
            "Results materialized"
        );

        let stage_start = Instant::now();
        let approximate = filter.is_empty();
        let count = async {
            if approximate {
                self.store.estimated_document_count().await
            } else {
                self.store.count_documents(filter).await
            }
        };
        let total = self
            .within(deadline, Stage::Count, count)
            .await?
            .map_err(|source| SearchError::Count { collection, source })
            .inspect_err(|e| self.log_failure(e, started))?;
        tracing::debug!(
            collection,
            elapsed = ?stage_start.elapsed(),
            total,
            approximate,
            "Documents counted"
        );

        Ok(SearchOutcome {
            response: SearchResponse {
                data,
                options,
                total,
            },
            duration: started.elapsed(),
        })
    }

    async fn find(
        &self,
        filter: Document,
        options: &Options,
        find_options: FindOptions,
    ) -> Result<DocumentStream, StoreError> {
        if options.offset() < 0 {
            return Err(StoreError::NegativeSkip(options.offset()));
        }
        self.store.find(filter, find_options).await
    }

    /// Drain the cursor, decoding each document. The cursor is dropped, and
    /// so closed, on return.
    ///
    /// `limit` bounds the records the way the driver does: 0 is unbounded,
    /// a negative value allows `|limit|` records.
    async fn materialize(
        &self,
        mut stream: DocumentStream,
        limit: i64,
    ) -> Result<Vec<RandoRecord>, StoreError> {
        let limit = match limit {
            0 => usize::MAX,
            n => usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX),
        };
        let mut records = Vec::with_capacity(limit.min(1024));
        while records.len() < limit {
            match stream.try_next().await? {
                Some(document) => records.push(self.variant.decode(document)?),
                None => break,
            }
        }
        Ok(records)
    }

    /// Await `future` unless the request deadline passes first.
    async fn within<T>(
        &self,
        deadline: Instant,
        stage: Stage,
        future: impl Future<Output = T>,
    ) -> Result<T, SearchError> {
        tokio::time::timeout_at(deadline, future).await.map_err(|_| {
            let err = SearchError::Timeout {
                collection: self.variant.collection_name(),
                stage,
                timeout: self.timeout,
            };
            tracing::error!(
                collection = self.variant.collection_name(),
                %stage,
                error = %err,
                "Search timed out"
            );
            err
        })
    }

    fn log_failure(&self, error: &SearchError, started: Instant) {
        let collection = self.variant.collection_name();
        let stage = error.stage();
        let elapsed = started.elapsed();
        if error.is_client_error() {
            tracing::warn!(collection, %stage, ?elapsed, error = %error, "Search rejected");
        } else {
            tracing::error!(collection, %stage, ?elapsed, error = %error, "Search failed");
        }
    }
}
