use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use tracing::debug;

use super::{ItemRepository, effective_limit};
use crate::connection::DocStore;
use crate::error::{Result, StoreError};
use crate::model::{Item, ItemDocument};

/// `ItemRepository` over the `items` collection
pub struct MongoItemRepository {
    collection: Collection<ItemDocument>,
}

impl MongoItemRepository {
    pub fn new(store: &DocStore) -> Self {
        Self {
            collection: store.items(),
        }
    }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    async fn create(&self, name: &str) -> Result<Item> {
        let mut doc = ItemDocument::new(name);
        let result = self.collection.insert_one(&doc).await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::InvalidDocument(format!(
                "expected ObjectId for inserted item, got {}",
                result.inserted_id
            ))
        })?;
        doc.id = Some(id);

        debug!("Created item {}", id);
        Item::try_from(doc)
    }

    async fn get(&self, id: &ObjectId) -> Result<Option<Item>> {
        self.collection
            .find_one(doc! { "_id": *id })
            .await?
            .map(Item::try_from)
            .transpose()
    }

    async fn list(&self, limit: i64) -> Result<Vec<Item>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1, "_id": -1 })
            .limit(effective_limit(limit))
            .await?;

        let docs: Vec<ItemDocument> = cursor.try_collect().await?;
        docs.into_iter().map(Item::try_from).collect()
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }
}
