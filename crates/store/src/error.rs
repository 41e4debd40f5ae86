//! Error types for document store operations

use mongodb::error::{ErrorKind, WriteFailure};
use std::time::Duration;
use thiserror::Error;

/// MongoDB server error code for a unique index violation
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// Errors that can occur while talking to the document store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("{0}")]
    Database(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey(_))
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            StoreError::DuplicateKey(err.to_string())
        } else {
            StoreError::Database(err.to_string())
        }
    }
}

/// Whether a driver error is a unique index violation
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

/// Rejections produced when building an `ObjectMemberKey`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("object_id and member_id required")]
    MissingFields,

    #[error("object_id must match group/[0-9]+")]
    InvalidObjectId,

    #[error("member_id must match group/[0-9]+ or user/[0-9]+")]
    InvalidMemberId,
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::MissingFields.to_string(),
            "object_id and member_id required"
        );
        assert_eq!(
            ValidationError::InvalidObjectId.to_string(),
            "object_id must match group/[0-9]+"
        );
        assert_eq!(
            ValidationError::InvalidMemberId.to_string(),
            "member_id must match group/[0-9]+ or user/[0-9]+"
        );
    }

    #[test]
    fn test_store_error_passthrough() {
        let err = StoreError::Database("connection reset".to_string());
        assert_eq!(err.to_string(), "connection reset");
        assert!(!err.is_duplicate_key());
        assert!(StoreError::DuplicateKey("E11000".to_string()).is_duplicate_key());
    }
}
