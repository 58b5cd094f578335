//! Output backends for code generation.
//!
//! Each backend takes a [`Schema`](crate::schema::Schema) and produces
//! formatted source code. All backends implement the
//! [`Backend`](crate::traits::Backend) trait for uniform access via the
//! registry.

// Go
#[cfg(feature = "backend-go")]
pub mod go;

#[cfg(feature = "backend-go")]
pub use go::{GoBackend, GoOptions, generate_go_types};

// Java
#[cfg(feature = "backend-java")]
pub mod java;

#[cfg(feature = "backend-java")]
pub use java::{JavaBackend, JavaOptions, generate_java_types};

// Python
#[cfg(feature = "backend-python")]
pub mod python;

#[cfg(feature = "backend-python")]
pub use python::{PythonBackend, PythonOptions, generate_python_types};

// TypeScript
#[cfg(feature = "backend-typescript")]
pub mod typescript;

#[cfg(feature = "backend-typescript")]
pub use typescript::{TypeScriptBackend, TypeScriptOptions, generate_typescript_types};

// Rust
#[cfg(feature = "backend-rust")]
pub mod rust;

#[cfg(feature = "backend-rust")]
pub use rust::{RustBackend, RustOptions, generate_rust_types};
