//! The `mgen` command: read one schema, write one formatted block per
//! requested language.

pub mod cli;
pub mod config;

pub use cli::Cli;
pub use config::MgenConfig;

use anyhow::Context;
use mgen_typegen::{backends, generate_all, read_schema};
use std::io::Write;

/// Execute a parsed command line.
///
/// Generated code goes to `out` in the requested order, each block followed by
/// a blank line; per-language failures go to `err`. Returns `Ok(false)` when
/// any language failed. Input that cannot be read or decoded is an `Err`.
pub fn run<W: Write, E: Write>(
    cli: &Cli,
    config: &MgenConfig,
    out: &mut W,
    err: &mut E,
) -> anyhow::Result<bool> {
    if cli.list {
        for backend in backends() {
            let aliases = backend.aliases();
            if aliases.is_empty() {
                writeln!(out, "{:<12} {}", backend.name(), backend.language())?;
            } else {
                writeln!(
                    out,
                    "{:<12} {} (aliases: {})",
                    backend.name(),
                    backend.language(),
                    aliases.join(", ")
                )?;
            }
        }
        return Ok(true);
    }

    let file = cli.file.as_deref().context("no schema file given")?;
    let schema = read_schema(file).with_context(|| format!("cannot load schema {}", file.display()))?;

    let languages = cli.languages(config);
    let generate_config = cli.generate_config(config);
    tracing::debug!(?languages, max_depth = ?generate_config.max_depth, "generating");

    let results = generate_all(&schema, languages.as_slice(), &generate_config);
    let mut failed = 0;
    for generated in &results {
        match &generated.result {
            Ok(code) => writeln!(out, "{}", code)?,
            Err(e) if e.is_internal() => {
                failed += 1;
                writeln!(err, "error: {} (this is a bug in mgen)", e)?;
            }
            Err(e) => {
                failed += 1;
                writeln!(err, "error: {}", e)?;
            }
        }
    }
    out.flush()?;

    tracing::info!(
        title = %schema.title,
        languages = results.len(),
        failed,
        "generation finished"
    );
    Ok(failed == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    const PHOTO: &str = r#"{
        "title": "Photo",
        "type": "object",
        "properties": {
            "id": { "type": "uuid" },
            "size": { "type": "int" }
        }
    }"#;

    fn run_args(args: &[&str]) -> (anyhow::Result<bool>, String, String) {
        let cli = Cli::try_parse_from(std::iter::once("mgen").chain(args.iter().copied())).unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run(&cli, &MgenConfig::default(), &mut out, &mut err);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn blocks_in_requested_order_and_scoped_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.json");
        std::fs::write(&path, PHOTO).unwrap();
        let file = path.to_str().unwrap();

        let (result, out, err) = run_args(&[file, "-o", "typescript,go,java"]);
        assert!(!result.unwrap());

        let ts = out.find("export interface Photo").unwrap();
        let java = out.find("public class Photo").unwrap();
        assert!(ts < java);
        assert!(!out.contains("package main"));
        assert!(out.ends_with("}\n\n"));
        assert_eq!(err, "error: go: unsupported type 'uuid' at id\n");
    }

    #[test]
    fn unreadable_input_is_fatal() {
        let (result, out, _) = run_args(&["/nonexistent/photo.json"]);
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("cannot load schema"));
        assert!(out.is_empty());
    }

    #[test]
    fn list_prints_languages() {
        let (result, out, _) = run_args(&["--list"]);
        assert!(result.unwrap());
        assert!(out.contains("go           Go (aliases: golang)\n"));
        assert!(out.contains("java         Java\n"));
    }
}
