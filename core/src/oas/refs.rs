#![deny(missing_docs)]

//! # Reference Resolution
//!
//! The `$ref` side of the raw document: a wrapper distinguishing reference
//! objects from inline values, and extraction of the referenced component
//! name from a `#/components/.../Name` pointer.

use serde::Deserialize;

/// A raw `$ref` object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawReference {
    /// The reference string, e.g. `#/components/schemas/User`.
    #[serde(rename = "$ref")]
    pub target: String,
}

/// Either a `$ref` object or an inline value.
///
/// The reference arm is tried first so that any object carrying a `$ref`
/// key deserializes as a reference, mirroring the `hasOwnProperty('$ref')`
/// classification of OpenAPI tooling.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// A reference to a named component.
    Ref(RawReference),
    /// An inline value.
    Item(T),
}

impl<T> RefOr<T> {
    /// Returns the inline value, if this is not a reference.
    pub fn as_item(&self) -> Option<&T> {
        match self {
            RefOr::Ref(_) => None,
            RefOr::Item(item) => Some(item),
        }
    }
}

/// Extracts the referenced component name: the final `/`-separated segment.
///
/// Lookup against the top-level registries is by this name only; references
/// across documents are not supported.
pub fn ref_target_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_target_name_takes_last_segment() {
        assert_eq!(ref_target_name("#/components/schemas/User"), "User");
        assert_eq!(ref_target_name("#/components/requestBodies/Body"), "Body");
        assert_eq!(ref_target_name("plain"), "plain");
    }

    #[test]
    fn test_ref_or_prefers_reference() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Inline {
            name: Option<String>,
        }

        let reference: RefOr<Inline> =
            serde_json::from_str(r##"{"$ref": "#/components/schemas/Foo"}"##).unwrap();
        assert_eq!(
            reference,
            RefOr::Ref(RawReference {
                target: "#/components/schemas/Foo".into()
            })
        );

        let inline: RefOr<Inline> = serde_json::from_str(r#"{"name": "foo"}"#).unwrap();
        assert!(inline.as_item().is_some());
    }
}
