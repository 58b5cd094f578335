//! Traits for code generation backends.

use crate::error::GenerateError;
use crate::schema::Schema;
use crate::types::TypeMap;
use crate::walk::GenerateConfig;

/// A code generation backend for one target language.
///
/// Backends transform a [`Schema`] into formatted source code.
///
/// # Implementing Custom Backends
///
/// ```ignore
/// use mgen_typegen::{Backend, GenerateConfig, GenerateError, Schema, register_backend};
///
/// struct KotlinBackend;
///
/// impl Backend for KotlinBackend {
///     fn name(&self) -> &'static str { "kotlin" }
///     fn language(&self) -> &'static str { "Kotlin" }
///     fn extension(&self) -> &'static str { "kt" }
///     fn types(&self) -> &'static dyn TypeMap { &KOTLIN_TYPES }
///     fn generate(&self, schema: &Schema, config: &GenerateConfig) -> Result<String, GenerateError> { /* ... */ }
/// }
///
/// // Register before first use
/// register_backend(&KotlinBackend);
/// ```
pub trait Backend: Send + Sync {
    /// Language id used in option bags and on the command line (e.g. "go").
    fn name(&self) -> &'static str;

    /// Other ids accepted for this backend (e.g. "golang").
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Human-readable language name.
    fn language(&self) -> &'static str;

    /// File extension for generated code.
    fn extension(&self) -> &'static str;

    /// Primitive type table.
    fn types(&self) -> &'static dyn TypeMap;

    /// Generate formatted code for the schema, reading this backend's options
    /// from `schema.options[self.name()]`.
    fn generate(&self, schema: &Schema, config: &GenerateConfig) -> Result<String, GenerateError>;

    fn matches(&self, id: &str) -> bool {
        let id = id.trim();
        self.name().eq_ignore_ascii_case(id) || self.aliases().iter().any(|a| a.eq_ignore_ascii_case(id))
    }
}
