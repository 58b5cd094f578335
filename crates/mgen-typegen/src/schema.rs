//! In-memory schema model.
//!
//! Every input format decodes to this model before being passed to output
//! backends. The model is immutable once loaded and is shared read-only by all
//! generators.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Named properties in document order.
pub type Properties = IndexMap<String, Property>;

/// Per-language option bags, keyed by language id (e.g. "go").
pub type OptionBags = IndexMap<String, serde_json::Value>;

/// The root description of one data entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Type name of the generated declaration.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Free-form description, rendered as the declaration's doc comment.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Root type: the composite marker or a primitive.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub ty: TypeName,
    /// Members of the root object.
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Properties,
    /// Names of root properties that must be present.
    #[serde(default, deserialize_with = "null_as_default")]
    pub required: Vec<String>,
    /// Loosely-typed generation options per target language.
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: OptionBags,
}

/// A named, typed member of a schema or of a nested object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub ty: TypeName,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
    /// Only meaningful when `ty` is the composite marker.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub properties: Properties,
}

/// Identifier of an abstract type (`object`, `string`, `int`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// The composite marker.
    pub const OBJECT: &'static str = "object";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn object() -> Self {
        Self(Self::OBJECT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_object(&self) -> bool {
        self.0 == Self::OBJECT
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl Schema {
    /// Start an object schema with the given title.
    pub fn object(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ty: TypeName::object(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, property: Property) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    pub fn with_options(mut self, language: impl Into<String>, bag: serde_json::Value) -> Self {
        self.options.insert(language.into(), bag);
        self
    }

    /// Option bag for a language, if the schema carries one.
    pub fn options_for(&self, language: &str) -> Option<&serde_json::Value> {
        self.options.get(language)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

impl Property {
    pub fn primitive(ty: impl Into<TypeName>) -> Self {
        Self {
            ty: ty.into(),
            ..Self::default()
        }
    }

    pub fn object(properties: impl IntoIterator<Item = (String, Property)>) -> Self {
        Self {
            ty: TypeName::object(),
            properties: properties.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Nested properties that a primitive carries but nothing will emit.
    pub fn has_extraneous_properties(&self) -> bool {
        !self.ty.is_object() && !self.properties.is_empty()
    }
}

/// Dotted location of a property inside a schema, used in diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyPath(Vec<String>);

impl PropertyPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_string());
        Self(segments)
    }

    /// Nesting level; the root is 0.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0.join("."))
        }
    }
}

/// Treat an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_schema_programmatically() {
        let schema = Schema::object("User")
            .with_description("a user")
            .with_property("id", Property::primitive("string"))
            .with_property(
                "address",
                Property::object([("street".to_string(), Property::primitive("string"))]),
            )
            .with_required("id");

        assert_eq!(schema.properties.len(), 2);
        assert!(schema.is_required("id"));
        assert!(!schema.is_required("address"));
        assert!(schema.properties["address"].ty.is_object());
    }

    #[test]
    fn property_order_follows_insertion() {
        let schema = Schema::object("Ordered")
            .with_property("zeta", Property::primitive("string"))
            .with_property("alpha", Property::primitive("string"))
            .with_property("mid", Property::primitive("string"));

        let names: Vec<_> = schema.properties.keys().map(String::as_str).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn extraneous_properties_only_on_primitives() {
        let mut primitive = Property::primitive("string");
        assert!(!primitive.has_extraneous_properties());
        primitive
            .properties
            .insert("x".into(), Property::primitive("int"));
        assert!(primitive.has_extraneous_properties());

        let object = Property::object([("x".to_string(), Property::primitive("int"))]);
        assert!(!object.has_extraneous_properties());
    }

    #[test]
    fn property_path_display() {
        let root = PropertyPath::root();
        assert_eq!(root.to_string(), "<root>");
        assert_eq!(root.depth(), 0);

        let nested = root.child("meta").child("size");
        assert_eq!(nested.to_string(), "meta.size");
        assert_eq!(nested.depth(), 2);
    }
}
