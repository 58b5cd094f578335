//! Abstract type name to target-language type syntax.
//!
//! Each backend owns one static [`TypeTable`]. Lookups never recurse: nested
//! objects are the generator's job, and the composite marker never appears in
//! a table.

use crate::schema::TypeName;

/// A single primitive mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping {
    /// Abstract type name as written in schemas.
    pub name: &'static str,
    /// Literal type syntax in the target language.
    pub target: &'static str,
    /// Import the target type needs, in the target language's import syntax.
    pub import: Option<&'static str>,
}

impl TypeMapping {
    pub const fn new(name: &'static str, target: &'static str) -> Self {
        Self {
            name,
            target,
            import: None,
        }
    }

    pub const fn with_import(name: &'static str, target: &'static str, import: &'static str) -> Self {
        Self {
            name,
            target,
            import: Some(import),
        }
    }
}

/// Capability shared by every target language's type table.
pub trait TypeMap: Send + Sync {
    /// Look up a primitive. `None` means the language has no mapping.
    fn map_type(&self, name: &TypeName) -> Option<&TypeMapping>;

    /// Abstract names this table understands, in table order.
    fn type_names(&self) -> Vec<&'static str>;
}

/// Static lookup table backing a [`TypeMap`].
#[derive(Debug)]
pub struct TypeTable {
    entries: &'static [TypeMapping],
}

impl TypeTable {
    pub const fn new(entries: &'static [TypeMapping]) -> Self {
        Self { entries }
    }
}

impl TypeMap for TypeTable {
    fn map_type(&self, name: &TypeName) -> Option<&TypeMapping> {
        self.entries.iter().find(|m| m.name == name.as_str())
    }

    fn type_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|m| m.name).collect()
    }
}
