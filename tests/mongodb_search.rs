//! Search pipeline against a live MongoDB.

mod common;

use bson::Document;
use mongodb::{Collection, Database};
use rando_core::Variant;
use rando_generator::generate_rando;
use rando_query::PageDefaults;
use rando_search::provision::ensure_collections;
use rando_search::search::{MongoStore, SearchPipeline};
use std::time::Duration;

fn pipeline(db: &Database, variant: Variant) -> SearchPipeline<MongoStore> {
    SearchPipeline::new(
        variant,
        MongoStore::new(db.collection(variant.collection_name())),
        PageDefaults::new(10, 100),
        Duration::from_secs(30),
    )
}

async fn seed(db: &Database, variant: Variant, n: usize) -> Result<(), Box<dyn std::error::Error>> {
    let collection: Collection<Document> = db.collection(variant.collection_name());
    let documents: Vec<Document> = (0..n).map(|_| variant.encode(&generate_rando())).collect();
    collection.insert_many(documents).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "Requires a MongoDB instance at mongodb:27017"]
async fn test_empty_collection() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::fresh_database("rando_test_search_empty").await?;
    ensure_collections(&db, Duration::from_secs(30)).await?;

    let outcome = pipeline(&db, Variant::Base).search("").await?;
    assert!(outcome.response.data.is_empty());
    assert_eq!(outcome.response.total, 0);

    db.drop().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "Requires a MongoDB instance at mongodb:27017"]
async fn test_filter_by_email() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::fresh_database("rando_test_search_email").await?;
    ensure_collections(&db, Duration::from_secs(30)).await?;

    for variant in Variant::ALL {
        seed(&db, variant, 20).await?;
        let mut rando = generate_rando();
        rando.email = "x@test.com".to_string();
        db.collection::<Document>(variant.collection_name())
            .insert_one(variant.encode(&rando))
            .await?;

        let outcome = pipeline(&db, variant)
            .search("filter[email]=x@test.com")
            .await?;
        assert_eq!(outcome.response.total, 1);
        assert_eq!(outcome.response.data.len(), 1);
        assert_eq!(
            outcome.response.data[0].rando_id.as_deref(),
            Some(rando.rando_id.as_str())
        );
    }

    db.drop().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "Requires a MongoDB instance at mongodb:27017"]
async fn test_count_law_and_paging() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::fresh_database("rando_test_search_count").await?;
    ensure_collections(&db, Duration::from_secs(30)).await?;
    seed(&db, Variant::Custom, 50).await?;

    let pipeline = pipeline(&db, Variant::Custom);

    let unfiltered = pipeline.search("page[limit]=5000000").await?;
    assert_eq!(unfiltered.response.options.limit(), 100);
    assert_eq!(unfiltered.response.data.len(), 50);
    assert_eq!(unfiltered.response.total, 50);

    let filtered = pipeline
        .search("filter[favoriteColor]=red,blue&sort=-createdAt&page[limit]=3")
        .await?;
    assert!(filtered.response.data.len() <= 3);
    assert!(filtered.response.total <= 50);
    for record in &filtered.response.data {
        let color = record.favorite_color.as_deref().unwrap_or_default();
        assert!(color == "red" || color == "blue");
    }
    for pair in filtered.response.data.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }

    let projected = pipeline.search("fields=email&page[limit]=1").await?;
    let record = &projected.response.data[0];
    assert!(record.email.is_some());
    assert!(record.first_name.is_none());

    db.drop().await?;
    Ok(())
}
