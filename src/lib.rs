//! # content-rest
//!
//! Hypermedia links for content attached to REST entities, and pluggable
//! content stores behind a uniform interface.
//!
//! ## Features
//!
//! - **Content Links**: one link per populated content property, under the
//!   property's own relation (`content`, `rendition`, ...)
//! - **Entity Links**: collection and shortcut (singular) relations, toggled
//!   by a swappable [`RestConfiguration`](config::RestConfiguration) snapshot
//! - **Placement Strategies**: UUID (default), entity-id derived or custom
//!   storage keys, selectable per entity type
//! - **Content Stores**: in-memory and object-storage backends behind
//!   [`ContentStore`](storage::ContentStore)
//! - **Fail-Fast Wiring**: unknown stores or strategies are reported when the
//!   host is built
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use content::prelude::*;
//!
//! impl_content_entity!(
//!     Document,
//!     "document",
//!     id: i64,
//!     content_ids: [content_id],
//!     { title: String }
//! );
//!
//! let host = ContentHostBuilder::new()
//!     .with_rest_configuration(RestConfiguration::new("http://localhost/contentApi"))
//!     .register_entity_type::<Document>(Some("memory"))
//!     .with_store("memory", Arc::new(InMemoryContentStore::new()))
//!     .build()?;
//!
//! let mut doc = Document::new(999, "Report".to_string());
//! host.repository("document")?
//!     .set_content(&mut doc, "content", bytes, Some("application/pdf"))
//!     .await?;
//!
//! let resource = host.represent(&doc);
//! // _links.content.href == "http://localhost/contentApi/documents/999/content"
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod links;
pub mod placement;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::{ContentEntity, EntityDescriptor},
        error::{ConfigError, ContentError, ContentResult, MetadataError, StorageError},
        field::FieldValue,
        link::{EntityResource, Link, Links},
        metadata::{ContentPropertyDescriptor, EntityMetadata},
        pluralize::Pluralizer,
    };

    // === Macros ===
    pub use crate::impl_content_entity;

    // === Links ===
    pub use crate::links::{
        ContentLinksProcessor, ContentLinksResolver, LinkContributor, MetadataRegistry,
    };

    // === Placement ===
    pub use crate::placement::{
        CustomPlacementStrategy, EntityIdPlacementStrategy, PlacementRegistry, PlacementStrategy,
        UuidPlacementStrategy,
    };

    // === Storage ===
    pub use crate::storage::{
        ContentDescriptor, ContentRepository, ContentStore, InMemoryContentStore, ObjectMetadata,
        ObjectStorageClient, ObjectStorageContentStore,
    };

    // === Config ===
    pub use crate::config::{
        ContentConfig, EntityContentConfig, RestConfiguration, RestSettings,
        SharedRestConfiguration,
    };

    // === Server ===
    pub use crate::server::{ContentHost, ContentHostBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
