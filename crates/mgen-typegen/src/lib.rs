//! Polyglot data-model generation from declarative schemas.
//!
//! `mgen-typegen` reads a schema document (JSON or YAML) describing one data
//! entity and emits equivalent, formatted type declarations for several target
//! languages, each carrying serialization metadata bound to the schema's
//! property names.
//!
//! # Architecture
//!
//! ```text
//! Input             Model             Output Backends        Formatters
//! ─────────    ──────────────     ────────────────────    ─────────────
//! JSON  ─┐                      ┌─> Go structs        ──> gofmt-style
//!        ├─> Schema ────────────┼─> Java classes      ──> brace reindent
//! YAML  ─┘   (schema.rs)        ├─> Python dataclasses──> layout check
//!                               ├─> TypeScript types  ──> brace reindent
//!                               └─> Rust structs      ──> syn + prettyplease
//! ```
//!
//! # Example
//!
//! ```
//! use mgen_typegen::{GenerateConfig, SchemaFormat, generate_all, parse_schema};
//!
//! let source = br#"{
//!     "title": "Photo",
//!     "type": "object",
//!     "properties": { "size": { "type": "int" } },
//!     "options": { "go": { "package": "schema" } }
//! }"#;
//! let schema = parse_schema(source, SchemaFormat::Json).unwrap();
//!
//! let results = generate_all(&schema, &["go", "typescript"], &GenerateConfig::default());
//! let go = results[0].result.as_ref().unwrap();
//! assert!(go.starts_with("package schema\n"));
//! assert!(go.contains("type Photo struct"));
//! ```
//!
//! # Using the Backend Registry
//!
//! ```ignore
//! use mgen_typegen::{backend_names, get_backend};
//!
//! for name in backend_names() {
//!     println!("Backend: {}", name);
//! }
//!
//! if let Some(backend) = get_backend("golang") {
//!     let code = backend.generate(&schema, &GenerateConfig::default())?;
//!     println!("{}", code);
//! }
//! ```
//!
//! # Feature Flags
//!
//! Backend flags (use `backend-*` prefix):
//! - `backend-go` - Go structs with struct tags
//! - `backend-java` - Java classes with annotations
//! - `backend-python` - Python dataclasses with field metadata
//! - `backend-typescript` - TypeScript interfaces
//! - `backend-rust` - Rust structs with serde attributes
//!
//! Language umbrella flags: `go`, `java`, `python`, `typescript`,
//! `rust-types`.

pub mod error;
pub mod format;
pub mod input;
pub mod naming;
pub mod options;
pub mod output;
pub mod registry;
pub mod schema;
pub mod traits;
pub mod types;
pub mod walk;

// Re-export the model and loading
pub use input::{LoadError, SchemaFormat, parse_schema, read_schema};
pub use schema::{Property, PropertyPath, Schema, TypeName};

pub use error::GenerateError;
pub use format::FormatError;
pub use options::LanguageOptions;
pub use walk::{DEFAULT_MAX_DEPTH, GenerateConfig};

// Re-export traits
pub use traits::Backend;
pub use types::{TypeMap, TypeMapping, TypeTable};

// Re-export registry functions
pub use registry::{
    DEFAULT_LANGUAGE, Generated, backend_names, backends, generate, generate_all, get_backend,
    register_backend,
};

// Re-export generators
#[cfg(feature = "backend-go")]
pub use output::generate_go_types;

#[cfg(feature = "backend-java")]
pub use output::generate_java_types;

#[cfg(feature = "backend-python")]
pub use output::generate_python_types;

#[cfg(feature = "backend-typescript")]
pub use output::generate_typescript_types;

#[cfg(feature = "backend-rust")]
pub use output::generate_rust_types;

// Re-export backend structs
#[cfg(feature = "backend-go")]
pub use output::go::GoBackend;

#[cfg(feature = "backend-java")]
pub use output::java::JavaBackend;

#[cfg(feature = "backend-python")]
pub use output::python::PythonBackend;

#[cfg(feature = "backend-typescript")]
pub use output::typescript::TypeScriptBackend;

#[cfg(feature = "backend-rust")]
pub use output::rust::RustBackend;
