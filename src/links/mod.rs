//! Content link resolution and contribution

pub mod processor;
pub mod registry;
pub mod resolver;

pub use processor::{ContentLinksProcessor, LinkContributor};
pub use registry::MetadataRegistry;
pub use resolver::ContentLinksResolver;
