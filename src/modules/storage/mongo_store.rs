//! MongoDB-backed record store

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::Database;
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::modules::storage::{Collection, RecordFilter, RecordStore};

/// Record store over the collections of one MongoDB database
pub struct MongoRecordStore {
    database: Database,
}

impl MongoRecordStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.database.collection::<Document>(collection.name())
    }
}

#[async_trait]
impl RecordStore for MongoRecordStore {
    async fn insert(&self, collection: Collection, document: Document) -> Result<ObjectId> {
        let result = self.collection(collection).insert_one(document).await?;

        match result.inserted_id {
            Bson::ObjectId(id) => {
                debug!("Inserted document {} into {}", id, collection.name());
                Ok(id)
            }
            other => Err(AppError::Internal(format!(
                "Unexpected id type returned by {}: {:?}",
                collection.name(),
                other
            ))),
        }
    }

    async fn find(
        &self,
        collection: Collection,
        filter: RecordFilter,
        limit: Option<i64>,
    ) -> Result<Vec<Document>> {
        let filter = match filter {
            RecordFilter::All => doc! {},
            RecordFilter::Ids(ids) => doc! { "_id": { "$in": ids } },
        };

        let records = self.collection(collection);
        let mut find = records.find(filter);
        if let Some(limit) = limit {
            find = find.limit(limit);
        }

        let documents: Vec<Document> = find.await?.try_collect().await?;
        debug!(
            "Fetched {} documents from {}",
            documents.len(),
            collection.name()
        );
        Ok(documents)
    }

    async fn count(&self, collection: Collection) -> Result<u64> {
        Ok(self.collection(collection).count_documents(doc! {}).await?)
    }

    async fn delete_all(&self, collection: Collection) -> Result<u64> {
        let result = self.collection(collection).delete_many(doc! {}).await?;
        info!(
            "Deleted {} documents from {}",
            result.deleted_count,
            collection.name()
        );
        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::Client;

    /// Store pointed at a port nothing listens on
    async fn unreachable_store() -> MongoRecordStore {
        let client = Client::with_uri_str(
            "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=100&connectTimeoutMS=100",
        )
        .await
        .unwrap();
        MongoRecordStore::new(client.database("emogo_test"))
    }

    #[tokio::test]
    async fn test_limited_find_surfaces_database_error() {
        let store = unreachable_store().await;

        let result = store
            .find(Collection::Sentiments, RecordFilter::All, Some(5))
            .await;
        assert!(matches!(result, Err(AppError::Database(_))));

        let result = store
            .find(
                Collection::Vlogs,
                RecordFilter::Ids(vec![ObjectId::new()]),
                None,
            )
            .await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
