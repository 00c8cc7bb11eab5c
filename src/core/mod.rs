//! Core module containing fundamental traits and types for content links

pub mod entity;
pub mod error;
pub mod field;
pub mod link;
pub mod metadata;
pub mod pluralize;

pub use entity::{ContentEntity, EntityDescriptor};
pub use error::{ConfigError, ContentError, ContentResult, MetadataError, StorageError};
pub use field::FieldValue;
pub use link::{EntityResource, Link, Links};
pub use metadata::{ContentPropertyDescriptor, DEFAULT_CONTENT_PROPERTY, EntityMetadata};
pub use pluralize::Pluralizer;
