//! object_member collection
//! Links a member (group or user) to a group object. `_id` is `object_id:member_id`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

static OBJECT_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^group/[0-9]+$").unwrap_or_else(|e| panic!("invalid object_id pattern: {e}"))
});

static MEMBER_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(group|user)/[0-9]+$")
        .unwrap_or_else(|e| panic!("invalid member_id pattern: {e}"))
});

/// Primary key of an object-member link
pub fn composite_id(object_id: &str, member_id: &str) -> String {
    format!("{}:{}", object_id, member_id)
}

/// A validated (object_id, member_id) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectMemberKey {
    object_id: String,
    member_id: String,
}

impl ObjectMemberKey {
    /// Validate presence first, then the object_id pattern, then the member_id pattern
    pub fn parse(
        object_id: impl Into<String>,
        member_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let object_id = object_id.into();
        let member_id = member_id.into();

        if object_id.is_empty() || member_id.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if !OBJECT_ID_PATTERN.is_match(&object_id) {
            return Err(ValidationError::InvalidObjectId);
        }
        if !MEMBER_ID_PATTERN.is_match(&member_id) {
            return Err(ValidationError::InvalidMemberId);
        }

        Ok(Self {
            object_id,
            member_id,
        })
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    pub fn member_id(&self) -> &str {
        &self.member_id
    }

    pub fn composite_id(&self) -> String {
        composite_id(&self.object_id, &self.member_id)
    }
}

/// Object-member link as returned to API callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMember {
    pub id: String,
    pub object_id: String,
    pub member_id: String,
}

impl From<&ObjectMemberKey> for ObjectMember {
    fn from(key: &ObjectMemberKey) -> Self {
        Self {
            id: key.composite_id(),
            object_id: key.object_id.clone(),
            member_id: key.member_id.clone(),
        }
    }
}

/// Object-member link as persisted in the `object_member` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMemberDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub object_id: String,
    pub member_id: String,
}

impl From<ObjectMember> for ObjectMemberDocument {
    fn from(link: ObjectMember) -> Self {
        Self {
            id: link.id,
            object_id: link.object_id,
            member_id: link.member_id,
        }
    }
}

impl From<ObjectMemberDocument> for ObjectMember {
    fn from(doc: ObjectMemberDocument) -> Self {
        Self {
            id: doc.id,
            object_id: doc.object_id,
            member_id: doc.member_id,
        }
    }
}
