//! Macros for reducing boilerplate when declaring content entities

/// Declare an entity struct with content-id slots and implement
/// [`ContentEntity`](crate::core::entity::ContentEntity) and
/// [`EntityDescriptor`](crate::core::entity::EntityDescriptor) for it.
///
/// Each listed content-id field becomes an `Option<String>` field. A single
/// field maps onto the default `content` slot; with several fields each slot
/// is named after its field without the `_id` suffix.
///
/// # Example
///
/// ```rust,ignore
/// use content::prelude::*;
///
/// impl_content_entity!(
///     Invoice,
///     "invoice",
///     id: i64,
///     content_ids: [content_id, rendition_id],
///     {
///         number: String,
///     }
/// );
///
/// let mut invoice = Invoice::new(999, "INV-1".to_string());
/// invoice.content_id = Some(Uuid::new_v4().to_string());
///
/// let metadata = Invoice::describe(); // slots: content, rendition
/// ```
#[macro_export]
macro_rules! impl_content_entity {
    (
        $type:ident,
        $type_name:expr,
        id: $id_type:ty,
        content_ids: [ $( $content_field:ident ),* $(,)? ],
        {
            $( $specific_field:ident : $specific_type:ty ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Entity identifier
            pub id: $id_type,
            $(
                /// Content identifier of this slot, if content is attached
                pub $content_field: Option<String>,
            )*
            $( pub $specific_field : $specific_type ),*
        }

        impl $crate::core::entity::ContentEntity for $type {
            fn entity_type(&self) -> &str {
                $type_name
            }

            fn id(&self) -> String {
                self.id.to_string()
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    $(
                        stringify!($content_field) => {
                            Some($crate::core::field::FieldValue::from(self.$content_field.clone()))
                        }
                    )*
                    _ => None,
                }
            }

            #[allow(unused_variables)]
            fn set_field_value(
                &mut self,
                field: &str,
                value: $crate::core::field::FieldValue,
            ) -> bool {
                match field {
                    $(
                        stringify!($content_field) => {
                            self.$content_field = value.as_content_id();
                            true
                        }
                    )*
                    _ => false,
                }
            }

            fn to_json(&self) -> ::serde_json::Value {
                ::serde_json::to_value(self)
                    .unwrap_or_else(|_| ::serde_json::json!({ "id": self.id.to_string() }))
            }
        }

        impl $crate::core::entity::EntityDescriptor for $type {
            fn describe() -> $crate::core::metadata::EntityMetadata {
                $crate::core::metadata::EntityMetadata::from_content_id_fields(
                    $type_name,
                    &[ $( stringify!($content_field) ),* ],
                )
            }
        }

        impl $type {
            /// Create an instance with every content slot empty
            pub fn new(id: $id_type, $( $specific_field: $specific_type ),*) -> Self {
                Self {
                    id,
                    $( $content_field: None, )*
                    $( $specific_field ),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::entity::{ContentEntity, EntityDescriptor};
    use crate::core::field::FieldValue;

    crate::impl_content_entity!(
        Manual,
        "manual",
        id: i64,
        content_ids: [content_id, rendition_id],
        {
            title: String,
        }
    );

    crate::impl_content_entity!(Sheet, "sheet", id: u32, content_ids: [content_id], {});

    crate::impl_content_entity!(Tag, "tag", id: i64, content_ids: [], { label: String });

    #[test]
    fn test_generated_field_access() {
        let mut manual = Manual::new(999, "Setup".to_string());
        assert_eq!(manual.field_value("content_id"), Some(FieldValue::Null));
        assert_eq!(manual.field_value("title"), None);

        assert!(manual.set_field_value("rendition_id", "r-1".into()));
        assert!(!manual.set_field_value("title", "x".into()));
        assert_eq!(manual.rendition_id.as_deref(), Some("r-1"));
        assert_eq!(manual.id(), "999");
        assert_eq!(manual.entity_type(), "manual");
    }

    #[test]
    fn test_entity_without_content_slots() {
        let mut tag = Tag::new(5, "urgent".to_string());
        assert!(!tag.set_field_value("label", "x".into()));
        assert_eq!(tag.field_value("label"), None);
        assert!(!Tag::describe().has_content());
    }

    #[test]
    fn test_generated_metadata() {
        let meta = Manual::describe();
        assert_eq!(meta.plural, "manuals");
        let names: Vec<_> = meta.content_properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["content", "rendition"]);

        let sheet = Sheet::describe();
        assert_eq!(sheet.content_properties.len(), 1);
        assert!(sheet.content_properties[0].is_default());
        assert_eq!(sheet.content_properties[0].content_id_field, "content_id");
    }

    #[test]
    fn test_generated_json() {
        let mut sheet = Sheet::new(3);
        sheet.content_id = Some("abc".to_string());
        assert_eq!(
            sheet.to_json(),
            serde_json::json!({ "id": 3, "content_id": "abc" })
        );
    }
}
