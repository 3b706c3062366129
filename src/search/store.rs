//! Storage seam for the search pipeline.

use async_trait::async_trait;
use bson::Document;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use mongodb::options::FindOptions;
use mongodb::Collection;
use rando_core::DecodeError;
use thiserror::Error;

/// Errors raised by a [`RandoStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    #[error("Failed to decode document: {0}")]
    Decode(#[from] DecodeError),

    /// The driver cannot express a negative skip.
    #[error("Skip value must be non-negative, got {0}")]
    NegativeSkip(i64),
}

/// Documents yielded by a find, in cursor order. Dropping the stream closes
/// the underlying cursor.
pub type DocumentStream = BoxStream<'static, Result<Document, StoreError>>;

/// Read access to one collection.
#[async_trait]
pub trait RandoStore: Send + Sync {
    /// Start a find and return its cursor as a stream.
    async fn find(
        &self,
        filter: Document,
        options: FindOptions,
    ) -> Result<DocumentStream, StoreError>;

    /// Exact number of documents matching `filter`.
    async fn count_documents(&self, filter: Document) -> Result<u64, StoreError>;

    /// Collection size from metadata; fast but possibly stale.
    async fn estimated_document_count(&self) -> Result<u64, StoreError>;
}

/// [`RandoStore`] backed by a MongoDB collection.
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl RandoStore for MongoStore {
    async fn find(
        &self,
        filter: Document,
        options: FindOptions,
    ) -> Result<DocumentStream, StoreError> {
        let cursor = self.collection.find(filter).with_options(options).await?;
        Ok(cursor.map_err(StoreError::from).boxed())
    }

    async fn count_documents(&self, filter: Document) -> Result<u64, StoreError> {
        Ok(self.collection.count_documents(filter).await?)
    }

    async fn estimated_document_count(&self) -> Result<u64, StoreError> {
        Ok(self.collection.estimated_document_count().await?)
    }
}
