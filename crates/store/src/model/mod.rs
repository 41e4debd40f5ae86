//! Document models for the `items` and `object_member` collections

pub mod item;
pub mod object_member;

pub use item::{Item, ItemDocument};
pub use object_member::{ObjectMember, ObjectMemberDocument, ObjectMemberKey, composite_id};
