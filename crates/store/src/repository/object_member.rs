use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use tracing::{debug, info};

use super::ObjectMemberRepository;
use crate::connection::DocStore;
use crate::error::Result;
use crate::model::{ObjectMember, ObjectMemberDocument, ObjectMemberKey};

/// `ObjectMemberRepository` over the `object_member` collection
pub struct MongoObjectMemberRepository {
    collection: Collection<ObjectMemberDocument>,
}

impl MongoObjectMemberRepository {
    /// Bind to the collection and ensure the unique (object_id, member_id) index.
    /// Index creation is idempotent, so this runs on every startup.
    pub async fn new(store: &DocStore) -> Result<Self> {
        let repository = Self {
            collection: store.object_members(),
        };
        repository.ensure_indexes().await?;
        Ok(repository)
    }

    async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "object_id": 1, "member_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        let result = self.collection.create_index(index).await?;
        info!("Ensured unique index {} on object_member", result.index_name);
        Ok(())
    }
}

#[async_trait]
impl ObjectMemberRepository for MongoObjectMemberRepository {
    async fn create(&self, key: &ObjectMemberKey) -> Result<ObjectMember> {
        let link = ObjectMember::from(key);
        self.collection
            .insert_one(ObjectMemberDocument::from(link.clone()))
            .await?;

        debug!("Linked {}", link.id);
        Ok(link)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
