//! Document store access for the items and object-member collections
//!
//! This crate provides:
//! - `DocStore`: MongoDB connection manager with collection accessors
//! - Document models and the validated `ObjectMemberKey` pair type
//! - Repository traits with MongoDB implementations
//! - An in-memory repository backend (feature `memory`)

pub mod connection;
pub mod error;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod model;
pub mod repository;

// Re-export commonly used types
pub use connection::{DEFAULT_CONNECT_TIMEOUT, DocStore, ITEMS_COLLECTION, OBJECT_MEMBER_COLLECTION};
pub use error::{Result, StoreError, ValidationError, is_duplicate_key};
#[cfg(any(test, feature = "memory"))]
pub use memory::{InMemoryItemRepository, InMemoryObjectMemberRepository};
pub use model::{Item, ItemDocument, ObjectMember, ObjectMemberDocument, ObjectMemberKey, composite_id};
pub use repository::{
    DEFAULT_LIST_LIMIT, ItemRepository, MAX_LIST_LIMIT, MongoItemRepository,
    MongoObjectMemberRepository, ObjectMemberRepository, effective_limit,
};

// Re-export the ObjectId type used for item identifiers
pub use mongodb::bson::oid::ObjectId;
