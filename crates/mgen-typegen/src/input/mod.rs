//! Input format parsers.
//!
//! Each parser reads structured schema text and produces a [`Schema`](crate::schema::Schema).

mod loader;

pub use loader::{LoadError, SchemaFormat, parse_schema, read_schema};
