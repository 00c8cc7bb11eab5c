//! Hypermedia links and the entity resources they are attached to

use crate::core::entity::ContentEntity;
use axum::Json;
use axum::response::{IntoResponse, Response};
use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// A single hypermedia link: relation name + href
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// The relation name (e.g., "content", "rendition", "testEntity4s")
    pub rel: String,

    /// The target URI
    pub href: String,
}

impl Link {
    /// Create a new link
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }
}

/// A set of links grouped by relation
///
/// Several links may share a relation. Adding a link that is already present
/// is a no-op, so contributing the same links twice leaves the set unchanged.
/// Relations keep the order in which they were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    by_rel: IndexMap<String, Vec<String>>,
}

impl Links {
    /// Create an empty link set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link, returning `false` if it was already present
    pub fn add(&mut self, link: Link) -> bool {
        let hrefs = self.by_rel.entry(link.rel).or_default();
        if hrefs.contains(&link.href) {
            return false;
        }
        hrefs.push(link.href);
        true
    }

    /// All links registered under a relation
    pub fn get_links(&self, rel: &str) -> Vec<Link> {
        self.hrefs(rel)
            .iter()
            .map(|href| Link::new(rel, href.clone()))
            .collect()
    }

    /// The hrefs registered under a relation
    pub fn hrefs(&self, rel: &str) -> &[String] {
        self.by_rel.get(rel).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a specific link is present
    pub fn contains(&self, rel: &str, href: &str) -> bool {
        self.hrefs(rel).iter().any(|h| h == href)
    }

    /// Whether any link is registered under a relation
    pub fn has_rel(&self, rel: &str) -> bool {
        !self.hrefs(rel).is_empty()
    }

    /// Relation names in insertion order
    pub fn rels(&self) -> impl Iterator<Item = &str> {
        self.by_rel.keys().map(String::as_str)
    }

    /// Iterate over every link
    pub fn iter(&self) -> impl Iterator<Item = Link> + '_ {
        self.by_rel
            .iter()
            .flat_map(|(rel, hrefs)| hrefs.iter().map(move |href| Link::new(rel, href)))
    }

    /// Total number of links
    pub fn len(&self) -> usize {
        self.by_rel.values().map(Vec::len).sum()
    }

    /// Whether the set holds no links
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Extend<Link> for Links {
    fn extend<I: IntoIterator<Item = Link>>(&mut self, iter: I) {
        for link in iter {
            self.add(link);
        }
    }
}

impl FromIterator<Link> for Links {
    fn from_iter<I: IntoIterator<Item = Link>>(iter: I) -> Self {
        let mut links = Links::new();
        links.extend(iter);
        links
    }
}

#[derive(Serialize)]
struct HrefObject<'a> {
    href: &'a str,
}

/// HAL form: a single link is an object, several links are an array
impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.by_rel.len()))?;
        for (rel, hrefs) in &self.by_rel {
            match hrefs.as_slice() {
                [single] => map.serialize_entry(rel, &HrefObject { href: single.as_str() })?,
                many => {
                    let objects: Vec<_> = many
                        .iter()
                        .map(|href| HrefObject { href: href.as_str() })
                        .collect();
                    map.serialize_entry(rel, &objects)?
                }
            }
        }
        map.end()
    }
}

/// An entity together with the links contributed for it
///
/// This is what a host serializer hands to link contributors before
/// rendering the entity.
pub struct EntityResource<'a> {
    entity: &'a dyn ContentEntity,
    links: Links,
}

impl<'a> EntityResource<'a> {
    /// Wrap an entity with an empty link set
    pub fn new(entity: &'a dyn ContentEntity) -> Self {
        Self {
            entity,
            links: Links::new(),
        }
    }

    /// The wrapped entity
    pub fn entity(&self) -> &'a dyn ContentEntity {
        self.entity
    }

    /// The links contributed so far
    pub fn links(&self) -> &Links {
        &self.links
    }

    /// Mutable access for contributors
    pub fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }

    /// Links under one relation
    pub fn get_links(&self, rel: &str) -> Vec<Link> {
        self.links.get_links(rel)
    }

    /// Render the entity with an embedded `_links` object
    pub fn to_json(&self) -> serde_json::Value {
        let mut body = match self.entity.to_json() {
            serde_json::Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };

        if !self.links.is_empty() {
            // Links serialization into a Value cannot fail: keys are strings.
            let links = serde_json::to_value(&self.links).unwrap_or_default();
            body.insert("_links".to_string(), links);
        }

        serde_json::Value::Object(body)
    }
}

impl IntoResponse for EntityResource<'_> {
    fn into_response(self) -> Response {
        Json(self.to_json()).into_response()
    }
}
