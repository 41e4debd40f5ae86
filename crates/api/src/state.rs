//! Shared handler state

use std::sync::Arc;
use store::{ItemRepository, ObjectMemberRepository};

use crate::error::ApiError;

/// Repository handles shared by all handlers.
/// A `None` handle means the store is unreachable and the route answers 503.
#[derive(Clone, Default)]
pub struct AppState {
    items: Option<Arc<dyn ItemRepository>>,
    object_members: Option<Arc<dyn ObjectMemberRepository>>,
}

impl AppState {
    pub fn new(
        items: Arc<dyn ItemRepository>,
        object_members: Arc<dyn ObjectMemberRepository>,
    ) -> Self {
        Self {
            items: Some(items),
            object_members: Some(object_members),
        }
    }

    /// State for running without a database
    pub fn degraded() -> Self {
        Self::default()
    }

    pub fn is_degraded(&self) -> bool {
        self.items.is_none() || self.object_members.is_none()
    }

    pub fn items(&self) -> Result<&dyn ItemRepository, ApiError> {
        self.items.as_deref().ok_or(ApiError::Unavailable)
    }

    pub fn object_members(&self) -> Result<&dyn ObjectMemberRepository, ApiError> {
        self.object_members.as_deref().ok_or(ApiError::Unavailable)
    }
}
