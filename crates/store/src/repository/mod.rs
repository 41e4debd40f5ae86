//! Repository traits and their MongoDB implementations

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::Result;
use crate::model::{Item, ObjectMember, ObjectMemberKey};

mod item;
mod object_member;

pub use item::MongoItemRepository;
pub use object_member::MongoObjectMemberRepository;

/// Page size used when the caller asks for `limit <= 0`
pub const DEFAULT_LIST_LIMIT: i64 = 100;
/// Upper bound on a single list call
pub const MAX_LIST_LIMIT: i64 = 1000;

/// Normalize a requested list size
pub fn effective_limit(limit: i64) -> i64 {
    if limit <= 0 {
        DEFAULT_LIST_LIMIT
    } else {
        limit.min(MAX_LIST_LIMIT)
    }
}

/// Persistence operations on items
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a new item stamped with the current UTC time
    async fn create(&self, name: &str) -> Result<Item>;

    /// Fetch one item; `None` when no document has this id
    async fn get(&self, id: &ObjectId) -> Result<Option<Item>>;

    /// Newest first, at most `effective_limit(limit)` entries
    async fn list(&self, limit: i64) -> Result<Vec<Item>>;

    /// Returns true if a document was removed
    async fn delete(&self, id: &ObjectId) -> Result<bool>;
}

/// Persistence operations on object-member links
#[async_trait]
pub trait ObjectMemberRepository: Send + Sync {
    /// Insert a link keyed by `key.composite_id()`.
    /// Fails with `StoreError::DuplicateKey` when the pair is already linked.
    async fn create(&self, key: &ObjectMemberKey) -> Result<ObjectMember>;

    /// Remove by composite id. Returns true if a document was removed.
    async fn delete_by_id(&self, id: &str) -> Result<bool>;

    /// Remove by pair; same removal path as `delete_by_id`
    async fn delete_by_pair(&self, key: &ObjectMemberKey) -> Result<bool> {
        self.delete_by_id(&key.composite_id()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_limit() {
        assert_eq!(effective_limit(0), DEFAULT_LIST_LIMIT);
        assert_eq!(effective_limit(-5), DEFAULT_LIST_LIMIT);
        assert_eq!(effective_limit(1), 1);
        assert_eq!(effective_limit(250), 250);
        assert_eq!(effective_limit(MAX_LIST_LIMIT + 1), MAX_LIST_LIMIT);
    }
}
