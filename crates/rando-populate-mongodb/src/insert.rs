//! Batched insert logic for population.

use crate::error::PopulateError;
use bson::Document;
use mongodb::error::ErrorKind;
use mongodb::Collection;

/// Insert a batch of documents in order.
///
/// `first_index` is the run-wide index of the batch's first document. On
/// failure the error carries the run-wide index of the document that
/// failed; documents before it in the batch remain inserted.
pub async fn insert_batch(
    collection: &Collection<Document>,
    documents: Vec<Document>,
    first_index: u64,
) -> Result<u64, PopulateError> {
    if documents.is_empty() {
        return Ok(0);
    }

    match collection.insert_many(documents).await {
        Ok(result) => Ok(result.inserted_ids.len() as u64),
        Err(source) => Err(PopulateError::Insert {
            collection: collection.name().to_string(),
            index: first_index + failed_offset(&source),
            source,
        }),
    }
}

/// Position of the first failed write within an ordered batch, 0 when the
/// driver does not report one.
fn failed_offset(error: &mongodb::error::Error) -> u64 {
    match error.kind.as_ref() {
        ErrorKind::InsertMany(failure) => failure
            .write_errors
            .as_ref()
            .and_then(|errors| errors.iter().map(|e| e.index).min())
            .map(|index| index as u64)
            .unwrap_or(0),
        _ => 0,
    }
}

/// Get the estimated document count for a collection.
pub async fn estimated_count(collection: &Collection<Document>) -> Result<u64, PopulateError> {
    let count = collection.estimated_document_count().await?;
    Ok(count)
}
