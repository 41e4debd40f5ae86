//! In-memory repository backend.
//!
//! Mirrors the MongoDB semantics the API relies on: store-generated ObjectIds,
//! millisecond timestamps, newest-first listing and the unique
//! (object_id, member_id) constraint.

use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::model::item::to_utc;
use crate::model::{Item, ObjectMember, ObjectMemberKey};
use crate::repository::{ItemRepository, ObjectMemberRepository, effective_limit};

#[derive(Default)]
pub struct InMemoryItemRepository {
    items: RwLock<HashMap<ObjectId, Item>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, name: &str) -> Result<Item> {
        let item = Item {
            id: ObjectId::new(),
            name: name.to_string(),
            created_at: to_utc(bson::DateTime::now())?,
        };
        self.items.write().await.insert(item.id, item.clone());
        Ok(item)
    }

    async fn get(&self, id: &ObjectId) -> Result<Option<Item>> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn list(&self, limit: i64) -> Result<Vec<Item>> {
        let items = self.items.read().await;
        let mut listed: Vec<Item> = items.values().cloned().collect();
        listed.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.bytes().cmp(&a.id.bytes()))
        });
        listed.truncate(usize::try_from(effective_limit(limit)).unwrap_or(usize::MAX));
        Ok(listed)
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool> {
        Ok(self.items.write().await.remove(id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryObjectMemberRepository {
    links: RwLock<HashMap<String, ObjectMember>>,
}

impl InMemoryObjectMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.links.read().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.links.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.links.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectMemberRepository for InMemoryObjectMemberRepository {
    async fn create(&self, key: &ObjectMemberKey) -> Result<ObjectMember> {
        let link = ObjectMember::from(key);
        let mut links = self.links.write().await;

        let pair_taken = links
            .values()
            .any(|l| l.object_id == link.object_id && l.member_id == link.member_id);
        if pair_taken || links.contains_key(&link.id) {
            return Err(StoreError::DuplicateKey(format!(
                "E11000 duplicate key error collection: object_member dup key: {{ _id: \"{}\" }}",
                link.id
            )));
        }

        links.insert(link.id.clone(), link.clone());
        Ok(link)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        Ok(self.links.write().await.remove(id).is_some())
    }
}
