//! State shared by the recursive generators: depth guard, primitive lookup,
//! import collection.

use crate::error::GenerateError;
use crate::schema::{Property, PropertyPath, Schema, TypeName};
use crate::types::TypeMap;
use std::collections::{BTreeSet, HashMap};

/// Default ceiling on nested object depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Settings shared by every backend for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Maximum depth of nested objects below the root. `None` disables the
    /// guard.
    pub max_depth: Option<usize>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl GenerateConfig {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }

    pub fn unlimited() -> Self {
        Self { max_depth: None }
    }
}

/// Identifiers already declared in one namespace (a struct body, a class's
/// member types).
#[derive(Debug, Default)]
pub(crate) struct Scope {
    names: HashMap<String, PropertyPath>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, ident: &str) -> bool {
        self.names.contains_key(ident)
    }

    /// Declare a generated type name, appending `Type` until it is neither
    /// declared here nor `reserved`.
    pub fn fresh(&mut self, base: String, path: &PropertyPath, reserved: impl Fn(&str) -> bool) -> String {
        let mut name = base;
        while self.contains(&name) || reserved(&name) {
            name.push_str("Type");
        }
        self.names.insert(name.clone(), path.clone());
        name
    }
}

pub(crate) struct Walker<'a> {
    language: &'static str,
    types: &'a dyn TypeMap,
    max_depth: Option<usize>,
    imports: BTreeSet<&'static str>,
}

impl<'a> Walker<'a> {
    pub fn new(language: &'static str, types: &'a dyn TypeMap, config: &GenerateConfig) -> Self {
        Self {
            language,
            types,
            max_depth: config.max_depth,
            imports: BTreeSet::new(),
        }
    }

    /// Guard entry into an object body at `path`.
    pub fn enter(&self, path: &PropertyPath) -> Result<(), GenerateError> {
        match self.max_depth {
            Some(limit) if path.depth() > limit => Err(GenerateError::DepthExceeded {
                language: self.language,
                limit,
                path: path.clone(),
            }),
            _ => Ok(()),
        }
    }

    /// Target syntax for a primitive, recording any import it needs.
    pub fn primitive(&mut self, ty: &TypeName, path: &PropertyPath) -> Result<&'static str, GenerateError> {
        let mapping = self
            .types
            .map_type(ty)
            .ok_or_else(|| GenerateError::UnsupportedType {
                language: self.language,
                type_name: ty.clone(),
                path: path.clone(),
            })?;
        if let Some(import) = mapping.import {
            self.imports.insert(import);
        }
        Ok(mapping.target)
    }

    /// Nested properties on a primitive are ignored; say so.
    pub fn check_property(&self, property: &Property, path: &PropertyPath) {
        if property.has_extraneous_properties() {
            tracing::warn!(
                language = self.language,
                path = %path,
                ty = %property.ty,
                "ignoring nested properties on primitive type"
            );
        }
    }

    pub fn check_schema(&self, schema: &Schema) {
        if !schema.ty.is_object() && !schema.properties.is_empty() {
            tracing::warn!(
                language = self.language,
                ty = %schema.ty,
                "ignoring properties on primitive root type"
            );
        }
    }

    /// Declare `ident` for the property at `path`, failing when another
    /// property of the same body already produced it.
    pub fn claim(&self, scope: &mut Scope, ident: &str, path: &PropertyPath) -> Result<(), GenerateError> {
        match scope.names.get(ident) {
            Some(first) => Err(GenerateError::NameCollision {
                language: self.language,
                identifier: ident.to_string(),
                first: first.clone(),
                second: path.clone(),
            }),
            None => {
                scope.names.insert(ident.to_string(), path.clone());
                Ok(())
            }
        }
    }

    /// Imports collected so far, sorted.
    pub fn imports(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.imports.iter().copied()
    }

    pub fn format_error(&self, source: crate::format::FormatError) -> GenerateError {
        GenerateError::Format {
            language: self.language,
            source,
        }
    }
}
