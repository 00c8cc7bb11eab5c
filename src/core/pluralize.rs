//! Collection names derived from singular entity type names
//!
//! Entity type names are usually camelCase identifiers (`testEntity4`,
//! `invoiceLine`), so only the trailing word is inflected.

/// Utility for deriving collection route segments from entity type names
pub struct Pluralizer;

const SIBILANT_ENDINGS: [&str; 5] = ["s", "x", "z", "ch", "sh"];

impl Pluralizer {
    /// Convert a singular entity type name to its collection name
    ///
    /// # Examples
    ///
    /// ```
    /// use content::core::pluralize::Pluralizer;
    ///
    /// assert_eq!(Pluralizer::pluralize("testEntity4"), "testEntity4s");
    /// assert_eq!(Pluralizer::pluralize("company"), "companies");
    /// assert_eq!(Pluralizer::pluralize("mediaBox"), "mediaBoxes");
    /// ```
    pub fn pluralize(singular: &str) -> String {
        if singular.is_empty() {
            return String::new();
        }

        let lower = singular.to_ascii_lowercase();

        if let Some(stem) = singular.strip_suffix('y') {
            let vowel_before = stem
                .chars()
                .last()
                .is_some_and(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'));
            if !stem.is_empty() && !vowel_before {
                return format!("{stem}ies");
            }
        }

        if SIBILANT_ENDINGS.iter().any(|ending| lower.ends_with(ending)) {
            return format!("{singular}es");
        }

        format!("{singular}s")
    }
}
