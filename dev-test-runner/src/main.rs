//! Sweep the generator over sample documents.
//!
//! For every `*.json` under the samples directory (default `samples/`, or
//! the first CLI argument) this checks, under both naming policies, that:
//! - two renders are byte-identical;
//! - every record a field refers to is itself generated.
use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use json_pojo::{Generator, GeneratorOptions, NamingPolicy};

fn check(generator: &Generator, json: &str, root: &str) -> Result<Vec<String>> {
    let mut problems = Vec::new();

    let first = generator.render(json, root, "samples")?;
    let second = generator.render(json, root, "samples")?;
    if first != second {
        problems.push("renders differ between runs".to_string());
    }

    let registry = generator.registry(json, root)?;
    let names: HashSet<&str> = registry.names().collect();
    for def in registry.definitions() {
        for field in &def.fields {
            if let Some(target) = field.ty.record_name() {
                if !names.contains(target) {
                    problems.push(format!("{}.{} refers to missing record {target}", def.name, field.field_name));
                }
            }
        }
    }
    for warning in registry.warnings() {
        eprintln!("  {} {}", "note".yellow(), serde_json::to_string(warning)?);
    }
    Ok(problems)
}

fn main() -> Result<()> {
    let dir = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("samples"));
    let pattern = format!("{}/**/*.json", dir.display());

    let mut failures = 0usize;
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let root = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(json_pojo::naming::type_name)
            .unwrap_or_else(|| "Root".to_string());

        for naming in [NamingPolicy::FirstWins, NamingPolicy::Qualified] {
            let generator = Generator::new(GeneratorOptions::default().with_naming(naming));
            let label = format!("{} ({naming:?})", path.display());
            match check(&generator, &json, &root) {
                Ok(problems) if problems.is_empty() => {
                    eprintln!("✅ {}", label.green());
                }
                Ok(problems) => {
                    failures += 1;
                    eprintln!("❌ {}", label.red());
                    for p in problems {
                        eprintln!("   {p}");
                    }
                }
                Err(error) => {
                    failures += 1;
                    eprintln!("❌ {}: {error:#}", label.red());
                }
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} sample run(s) failed");
    }
    Ok(())
}
