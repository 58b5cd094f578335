//! Registry for code generation backends.

use crate::error::GenerateError;
use crate::schema::Schema;
use crate::traits::Backend;
use crate::walk::GenerateConfig;
use rayon::prelude::*;
use std::sync::{OnceLock, RwLock};

/// Language generated when the caller does not ask for any.
pub const DEFAULT_LANGUAGE: &str = "go";

/// Global registry of backends.
static BACKENDS: RwLock<Vec<&'static dyn Backend>> = RwLock::new(Vec::new());
static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register a custom backend.
///
/// Call this before any generation operations to add custom backends.
/// Built-in backends are registered automatically on first use.
pub fn register_backend(backend: &'static dyn Backend) {
    init_builtin();
    BACKENDS
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .push(backend);
}

/// Initialize built-in backends (called automatically on first use).
fn init_builtin() {
    INITIALIZED.get_or_init(|| {
        let mut backends = BACKENDS.write().unwrap_or_else(|e| e.into_inner());

        #[cfg(feature = "backend-go")]
        {
            backends.push(&crate::output::go::GO_BACKEND);
        }

        #[cfg(feature = "backend-java")]
        {
            backends.push(&crate::output::java::JAVA_BACKEND);
        }

        #[cfg(feature = "backend-python")]
        {
            backends.push(&crate::output::python::PYTHON_BACKEND);
        }

        #[cfg(feature = "backend-typescript")]
        {
            backends.push(&crate::output::typescript::TYPESCRIPT_BACKEND);
        }

        #[cfg(feature = "backend-rust")]
        {
            backends.push(&crate::output::rust::RUST_BACKEND);
        }
    });
}

/// Get a backend by language id or alias (case-insensitive).
pub fn get_backend(id: &str) -> Option<&'static dyn Backend> {
    init_builtin();
    BACKENDS
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .iter()
        .find(|b| b.matches(id))
        .copied()
}

/// List all registered backends.
pub fn backends() -> Vec<&'static dyn Backend> {
    init_builtin();
    BACKENDS.read().unwrap_or_else(|e| e.into_inner()).clone()
}

/// List all registered language ids.
pub fn backend_names() -> Vec<&'static str> {
    init_builtin();
    BACKENDS
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .iter()
        .map(|b| b.name())
        .collect()
}

/// Outcome of one requested language.
#[derive(Debug)]
pub struct Generated {
    /// The id as requested.
    pub language: String,
    pub result: Result<String, GenerateError>,
}

impl Generated {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Generate one language by id.
pub fn generate(schema: &Schema, language: &str, config: &GenerateConfig) -> Result<String, GenerateError> {
    let backend = get_backend(language).ok_or_else(|| GenerateError::UnknownLanguage {
        language: language.to_string(),
        available: backend_names().join(", "),
    })?;
    tracing::debug!(language = backend.name(), title = %schema.title, "generating");
    backend.generate(schema, config)
}

/// Run every requested generator over the same schema.
///
/// Generators run in parallel and independently: one failure never stops the
/// others. Results come back in the order requested. An empty request means
/// [`DEFAULT_LANGUAGE`].
pub fn generate_all<S: AsRef<str> + Sync>(
    schema: &Schema,
    languages: &[S],
    config: &GenerateConfig,
) -> Vec<Generated> {
    let requested: Vec<&str> = if languages.is_empty() {
        vec![DEFAULT_LANGUAGE]
    } else {
        languages.iter().map(|l| l.as_ref().trim()).collect()
    };

    requested
        .par_iter()
        .map(|&language| Generated {
            language: language.to_string(),
            result: generate(schema, language, config),
        })
        .collect()
}

#[cfg(all(
    test,
    feature = "backend-go",
    feature = "backend-java",
    feature = "backend-python",
    feature = "backend-typescript",
    feature = "backend-rust"
))]
mod tests {
    use super::*;
    use crate::schema::Property;

    fn photo() -> Schema {
        Schema::object("Photo")
            .with_property("content", Property::primitive("string"))
            .with_property("size", Property::primitive("int"))
    }

    #[test]
    fn builtin_backends_registered() {
        let names = backend_names();
        assert!(names.contains(&"go"));
        assert!(names.contains(&"java"));
        assert!(names.contains(&"python"));
        assert!(names.contains(&"typescript"));
        assert!(names.contains(&"rust"));
    }

    #[test]
    fn lookup_by_alias_and_case() {
        assert_eq!(get_backend("golang").map(|b| b.name()), Some("go"));
        assert_eq!(get_backend("TS").map(|b| b.name()), Some("typescript"));
        assert_eq!(get_backend(" py ").map(|b| b.name()), Some("python"));
        assert!(get_backend("cobol").is_none());
    }

    #[test]
    fn empty_request_uses_default_language() {
        let results = generate_all::<&str>(&photo(), &[], &GenerateConfig::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].language, DEFAULT_LANGUAGE);
        assert!(results[0].is_ok());
    }

    #[test]
    fn results_follow_request_order() {
        let order = ["typescript", "go", "rust", "java", "python"];
        let results = generate_all(&photo(), &order, &GenerateConfig::default());
        let languages: Vec<_> = results.iter().map(|r| r.language.as_str()).collect();
        assert_eq!(languages, order);
        assert!(results.iter().all(Generated::is_ok));
    }

    #[test]
    fn unknown_language_is_scoped() {
        let results = generate_all(&photo(), &["cobol", "go"], &GenerateConfig::default());
        assert!(matches!(
            &results[0].result,
            Err(GenerateError::UnknownLanguage { language, .. }) if language == "cobol"
        ));
        assert!(results[1].is_ok());
    }

    #[test]
    fn output_is_deterministic() {
        let schema = photo();
        let first = generate_all(&schema, &["go", "python"], &GenerateConfig::default());
        let second = generate_all(&schema, &["go", "python"], &GenerateConfig::default());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.result.as_ref().unwrap(), b.result.as_ref().unwrap());
        }
    }
}
