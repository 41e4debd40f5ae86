//! items collection
//! Named entities with a store-generated id and a creation timestamp

use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::StoreError;

/// Item as returned to API callers. `id` is rendered as a 24-char hex string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    #[serde(serialize_with = "serialize_object_id")]
    pub id: ObjectId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Item as persisted in the `items` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub created_at: bson::DateTime,
}

impl ItemDocument {
    /// New document stamped with the current time, id left for the store to assign
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            created_at: bson::DateTime::now(),
        }
    }
}

impl TryFrom<ItemDocument> for Item {
    type Error = StoreError;

    fn try_from(doc: ItemDocument) -> Result<Self, Self::Error> {
        let id = doc
            .id
            .ok_or_else(|| StoreError::InvalidDocument("item without _id".to_string()))?;
        Ok(Self {
            id,
            name: doc.name,
            created_at: to_utc(doc.created_at)?,
        })
    }
}

/// Convert a BSON datetime (millisecond precision) to chrono
pub(crate) fn to_utc(value: bson::DateTime) -> Result<DateTime<Utc>, StoreError> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis()).ok_or_else(|| {
        StoreError::InvalidDocument(format!(
            "created_at out of range: {}",
            value.timestamp_millis()
        ))
    })
}

fn serialize_object_id<S>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&id.to_hex())
}
