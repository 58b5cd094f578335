//! Generation errors.

use crate::format::FormatError;
use crate::schema::{PropertyPath, TypeName};

/// Failure of a single language's generator. Never aborts sibling languages.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The schema uses a type the target language has no mapping for.
    #[error("{language}: unsupported type '{type_name}' at {path}")]
    UnsupportedType {
        language: &'static str,
        type_name: TypeName,
        path: PropertyPath,
    },
    /// Nested objects go deeper than the configured ceiling.
    #[error("{language}: nesting exceeds maximum depth {limit} at {path}")]
    DepthExceeded {
        language: &'static str,
        limit: usize,
        path: PropertyPath,
    },
    /// Two properties of one body re-case to the same identifier.
    #[error("{language}: properties '{first}' and '{second}' both map to '{identifier}'")]
    NameCollision {
        language: &'static str,
        identifier: String,
        first: PropertyPath,
        second: PropertyPath,
    },
    /// The generator emitted code its own formatter rejects. This is a bug in
    /// the generator, not in the input.
    #[error("{language}: internal error: generated code failed to format: {source}")]
    Format {
        language: &'static str,
        #[source]
        source: FormatError,
    },
    #[error("unknown output language '{language}' (available: {available})")]
    UnknownLanguage { language: String, available: String },
}

impl GenerateError {
    /// True for errors caused by generator bugs rather than by the input.
    pub fn is_internal(&self) -> bool {
        matches!(self, GenerateError::Format { .. })
    }
}
