//! Shared fixtures for integration tests

#![allow(dead_code)]

use content::prelude::*;
use std::sync::Once;

pub const BASE_URI: &str = "http://localhost/contentApi";

impl_content_entity!(TestEntity4, "testEntity4", id: i64, content_ids: [content_id], {});

impl_content_entity!(
    TestEntity5,
    "testEntity5",
    id: i64,
    content_ids: [content_id, rendition_id],
    {}
);

impl_content_entity!(
    Document,
    "document",
    id: i64,
    content_ids: [content_id],
    {
        title: String,
    }
);

/// Route test logs through the test writer; honours RUST_LOG
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn test_entity4(id: i64) -> TestEntity4 {
    let mut entity = TestEntity4::new(id);
    entity.content_id = Some(Uuid::new_v4().to_string());
    entity
}

pub fn test_entity5(id: i64) -> TestEntity5 {
    let mut entity = TestEntity5::new(id);
    entity.content_id = Some(Uuid::new_v4().to_string());
    entity.rendition_id = Some(Uuid::new_v4().to_string());
    entity
}

/// A host exposing links for both test entity types under `BASE_URI`
pub fn links_host() -> ContentHost {
    ContentHostBuilder::new()
        .with_rest_configuration(RestConfiguration::new(BASE_URI))
        .register_entity_type::<TestEntity4>(None)
        .register_entity_type::<TestEntity5>(None)
        .build()
        .expect("links host should build")
}
