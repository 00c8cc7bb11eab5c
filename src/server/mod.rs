//! Composition root for content links and stores
//!
//! This module provides a `ContentHostBuilder` that wires together:
//! - entity content metadata (for link resolution)
//! - named content stores (one per entity type)
//! - placement strategies (UUID by default)

pub mod builder;
pub mod host;

pub use builder::ContentHostBuilder;
pub use host::ContentHost;
