//! Typed error handling for content links, placement and stores
//!
//! # Error Categories
//!
//! - [`ConfigError`]: configuration loading and composition-time wiring
//! - [`MetadataError`]: malformed entity metadata or unknown content properties
//! - [`StorageError`]: content store backends
//!
//! Errors in the first two categories surface when the host is assembled,
//! never while links are being resolved.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Convenience alias used across the crate
pub type ContentResult<T> = std::result::Result<T, ContentError>;

/// The main error type for the crate
#[derive(Debug, Error)]
pub enum ContentError {
    /// Configuration and wiring errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Entity metadata errors
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A placement strategy could not produce a key
    #[error("Placement failed: {0}")]
    Placement(String),
}

/// Errors raised while loading configuration or wiring the host
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse a configuration document
    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    /// An entity references a store that was never registered
    #[error("No content store '{store}' registered (required by entity '{entity_type}')")]
    StoreNotRegistered { entity_type: String, store: String },

    /// An entity references a placement strategy that was never registered
    #[error("No placement strategy '{placement}' registered (required by entity '{entity_type}')")]
    PlacementNotRegistered {
        entity_type: String,
        placement: String,
    },

    /// A repository was requested for an entity type without a store
    #[error("No content repository for entity type '{entity_type}'")]
    NoRepository { entity_type: String },

    /// Wiring refers to an entity type that was never registered
    #[error("Entity type '{entity_type}' is not registered (referenced by {what})")]
    UnknownEntity { entity_type: String, what: String },
}

/// Errors in entity content metadata
#[derive(Debug, Error, PartialEq)]
pub enum MetadataError {
    /// A required name is empty
    #[error("Empty {what} in metadata for entity '{entity_type}'")]
    EmptyName { entity_type: String, what: String },

    /// A content property name cannot be used as a path segment
    #[error("Content property '{name}' of entity '{entity_type}' is not a valid path segment")]
    InvalidPropertyName { entity_type: String, name: String },

    /// Two content properties share the same name
    #[error("Duplicate content property '{name}' on entity '{entity_type}'")]
    DuplicateProperty { entity_type: String, name: String },

    /// A content property was requested that the entity does not declare
    #[error("Entity '{entity_type}' has no content property '{name}'")]
    UnknownProperty { entity_type: String, name: String },

    /// The entity rejected a write to a declared field
    #[error("Entity '{entity_type}' has no writable field '{field}'")]
    UnknownField { entity_type: String, field: String },

    /// The entity has no usable identifier
    #[error("Entity '{entity_type}' has an empty id")]
    MissingId { entity_type: String },
}

/// Errors raised by content store backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend rejected or failed an operation
    #[error("{backend} error on '{key}': {message}")]
    Backend {
        backend: String,
        key: String,
        message: String,
    },

    /// A lock guarding in-process state was poisoned
    #[error("Failed to acquire {0} lock")]
    Poisoned(&'static str),

    /// Content was expected under a key but is gone
    #[error("No content stored under '{key}'")]
    NotFound { key: String },
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ContentError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContentError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ContentError::Metadata(MetadataError::UnknownProperty { .. }) => StatusCode::NOT_FOUND,
            ContentError::Metadata(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ContentError::Storage(StorageError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ContentError::Storage(_) => StatusCode::BAD_GATEWAY,
            ContentError::Placement(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ContentError::Config(_) => "CONFIG_ERROR",
            ContentError::Metadata(MetadataError::UnknownProperty { .. }) => {
                "CONTENT_PROPERTY_NOT_FOUND"
            }
            ContentError::Metadata(_) => "METADATA_ERROR",
            ContentError::Storage(StorageError::NotFound { .. }) => "CONTENT_NOT_FOUND",
            ContentError::Storage(_) => "STORAGE_ERROR",
            ContentError::Placement(_) => "PLACEMENT_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
