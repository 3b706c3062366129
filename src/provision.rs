//! Collection provisioning.
//!
//! Each variant's collection is created with its `$jsonSchema` validator and
//! index set. Creation is attempted directly: a `NamespaceExists` reply means
//! another process (or an earlier run) already provisioned it, and nothing
//! else is touched.

use bson::Document;
use mongodb::error::ErrorKind;
use mongodb::options::{CreateCollectionOptions, IndexOptions};
use mongodb::{Collection, Database, IndexModel};
use rando_core::Variant;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// Server error code for `NamespaceExists`.
const NAMESPACE_EXISTS: i32 = 48;

/// Outcome of provisioning one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    Created,
    AlreadyExists,
}

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Unknown collection '{0}'")]
    UnknownCollection(String),

    #[error("Failed to create collection '{collection}': {source}")]
    CreateCollection {
        collection: String,
        #[source]
        source: mongodb::error::Error,
    },

    /// The collection exists but may be missing indices.
    #[error("Failed to create indexes on collection '{collection}': {source}")]
    CreateIndexes {
        collection: String,
        #[source]
        source: mongodb::error::Error,
    },

    #[error("Provisioning did not finish within {0:?}")]
    Timeout(Duration),
}

/// Ensure the named collection exists with its validator and indices.
pub async fn ensure_collection(
    database: &Database,
    collection_name: &str,
) -> Result<Provisioned, ProvisionError> {
    let variant = Variant::from_collection_name(collection_name)
        .ok_or_else(|| ProvisionError::UnknownCollection(collection_name.to_string()))?;

    let mut options = CreateCollectionOptions::default();
    options.validator = Some(variant.validator());

    tracing::trace!(collection = collection_name, "Creating collection");
    match database
        .create_collection(collection_name)
        .with_options(options)
        .await
    {
        Ok(()) => {
            tracing::debug!(collection = collection_name, "Collection created");
        }
        Err(e) if is_namespace_exists(&e) => {
            tracing::debug!(collection = collection_name, "Collection already exists");
            return Ok(Provisioned::AlreadyExists);
        }
        Err(source) => {
            tracing::error!(collection = collection_name, error = %source, "Failed to create collection");
            return Err(ProvisionError::CreateCollection {
                collection: collection_name.to_string(),
                source,
            });
        }
    }

    let collection: Collection<Document> = database.collection(collection_name);
    let models = index_models(variant);
    let index_count = models.len();

    tracing::trace!(collection = collection_name, indexes = index_count, "Creating indexes");
    collection.create_indexes(models).await.map_err(|source| {
        tracing::error!(collection = collection_name, error = %source, "Failed to create indexes");
        ProvisionError::CreateIndexes {
            collection: collection_name.to_string(),
            source,
        }
    })?;
    tracing::debug!(collection = collection_name, indexes = index_count, "Indexes created");

    Ok(Provisioned::Created)
}

/// Provision every variant's collection, in order, under one deadline.
pub async fn ensure_collections(
    database: &Database,
    timeout: Duration,
) -> Result<(), ProvisionError> {
    provision_all(timeout, |name| ensure_collection(database, name)).await
}

async fn provision_all<F, Fut>(timeout: Duration, mut ensure: F) -> Result<(), ProvisionError>
where
    F: FnMut(&'static str) -> Fut,
    Fut: Future<Output = Result<Provisioned, ProvisionError>>,
{
    let deadline = Instant::now() + timeout;
    for variant in Variant::ALL {
        let name = variant.collection_name();
        let outcome = tokio::time::timeout_at(deadline, ensure(name))
            .await
            .map_err(|_| {
                tracing::error!(collection = name, "Provisioning timed out");
                ProvisionError::Timeout(timeout)
            })??;
        tracing::info!(collection = name, ?outcome, "Collection ready");
    }
    Ok(())
}

fn index_models(variant: Variant) -> Vec<IndexModel> {
    variant
        .indexes()
        .iter()
        .map(|index| {
            IndexModel::builder()
                .keys(index.keys())
                .options(IndexOptions::builder().unique(Some(index.unique)).build())
                .build()
        })
        .collect()
}

fn is_namespace_exists(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Command(command) if command.code == NAMESPACE_EXISTS
    )
}
