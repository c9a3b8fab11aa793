//! CLI: infer → (schema | java)
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rayon::prelude::*;

use json_pojo::{
    collect, naming, writer, DecimalKind, GeneratedFile, Generator, GeneratorOptions, JsonValue,
    NamingPolicy,
};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate Java POJOs (or a schema debug view) from sample JSON documents
#[derive(Parser, Debug)]
#[command(name = "json-pojo", version)]
pub struct CommandLineInterface {
    /// more logging (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// collect records and print them as JSON
    Schema(SchemaOut),
    /// collect records and write one Java class per record
    Java(JavaOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; must yield one document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// root type name (default: derived from the file name, `Root` for stdin)
    #[arg(long)]
    root_type: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct OptionSettings {
    /// JSON file with generator options; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// skip equals/hashCode
    #[arg(long)]
    no_equality: bool,

    /// skip toString
    #[arg(long)]
    no_to_string: bool,

    /// how colliding record names are resolved
    #[arg(long, value_enum)]
    naming: Option<NamingArg>,

    /// Java type for numbers with a fraction or exponent
    #[arg(long, value_enum)]
    decimal: Option<DecimalArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum NamingArg {
    FirstWins,
    Qualified,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum DecimalArg {
    Float,
    Double,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    option_settings: OptionSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct JavaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    option_settings: OptionSettings,

    /// Java package of the generated classes
    #[arg(long, short, default_value = "")]
    package: String,

    /// source root the package directories are created under
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// print the classes instead of writing files
    #[arg(long)]
    stdout: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

/// One input document, ready for collection.
struct Document {
    source: String,
    root_name: String,
    value: JsonValue,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl OptionSettings {
    fn resolve(&self) -> Result<GeneratorOptions> {
        let mut options = match &self.config {
            Some(path) => GeneratorOptions::from_file(path)?,
            None => GeneratorOptions::default(),
        };
        if self.no_equality {
            options.emit_equality = false;
        }
        if self.no_to_string {
            options.emit_textual_representation = false;
        }
        if let Some(naming) = self.naming {
            options.naming = match naming {
                NamingArg::FirstWins => NamingPolicy::FirstWins,
                NamingArg::Qualified => NamingPolicy::Qualified,
            };
        }
        if let Some(decimal) = self.decimal {
            options.decimal_kind = match decimal {
                DecimalArg::Float => DecimalKind::Float,
                DecimalArg::Double => DecimalKind::Double,
            };
        }
        Ok(options)
    }
}

impl InputSettings {
    fn load(&self, decimal: DecimalKind) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        for source in resolve_file_path_patterns(&self.input)? {
            let (label, text) = read_source(&source)?;
            let raw = json_pojo::path_de::parse_document(&text)
                .with_context(|| format!("failed to parse {label}"))?;
            let raw = self.select(raw, &label)?;
            let root_name = match &self.root_type {
                Some(name) => name.clone(),
                None => default_root_name(&source),
            };
            documents.push(Document {
                source: label,
                root_name,
                value: JsonValue::from_serde(&raw, decimal),
            });
        }
        if self.root_type.is_some() && documents.len() > 1 {
            tracing::warn!(
                inputs = documents.len(),
                "--root-type applies to every input; later inputs overwrite earlier classes"
            );
        }
        Ok(documents)
    }

    fn select(&self, mut raw: serde_json::Value, label: &str) -> Result<serde_json::Value> {
        if let Some(pointer) = &self.json_pointer {
            raw = match raw.pointer(pointer) {
                Some(node) => node.clone(),
                None => bail!("JSON pointer {pointer} matched nothing in {label}"),
            };
        }
        if let Some(jq_expr) = &self.jq_expr {
            raw = crate::jq_exec::run_jaq_single(jq_expr, &raw)
                .with_context(|| format!("failed to apply jq expression to {label}"))?;
        }
        Ok(raw)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Schema(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let options = target.option_settings.resolve()?;
                let documents = target.input_settings.load(options.decimal_kind)?;

                let registries = documents
                    .par_iter()
                    .map(|doc| {
                        let registry = collect(&doc.root_name, &doc.value, &options);
                        serde_json::json!({ "source": doc.source, "registry": registry })
                    })
                    .collect::<Vec<_>>();
                let schema = match registries.len() {
                    1 => registries.into_iter().next().unwrap_or_default(),
                    _ => serde_json::Value::Array(registries),
                };
                let schema_src = serde_json::to_string_pretty(&schema)?;
                match target.out.as_ref() {
                    Some(out) => {
                        if let Some(parent) = out.parent() {
                            std::fs::create_dir_all(parent)?;
                        }
                        std::fs::write(out, &schema_src)
                            .with_context(|| format!("failed to write {}", out.display()))?;
                    }
                    None => println!("{schema_src}"),
                }
            }
            Command::Java(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let options = target.option_settings.resolve()?;
                let documents = target.input_settings.load(options.decimal_kind)?;
                let generator = Generator::new(options);

                // render in parallel, write in input order
                let rendered: Vec<(&Document, Vec<GeneratedFile>)> = documents
                    .par_iter()
                    .map(|doc| (doc, generator.render_value(&doc.value, &doc.root_name, &target.package)))
                    .collect();

                for (doc, files) in rendered {
                    if target.stdout {
                        for file in &files {
                            println!("// {}\n{}", file.file_name(), file.contents);
                        }
                        continue;
                    }
                    let written = writer::write(&target.package, &target.out_dir, &files)
                        .with_context(|| format!("failed to write classes for {}", doc.source))?;
                    for path in written {
                        eprintln!("{} {}", "generated".green().bold(), path.display());
                    }
                }
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

const STDIN: &str = "-";

fn read_source(source: &Path) -> Result<(String, String)> {
    if source == Path::new(STDIN) {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
        return Ok(("<stdin>".to_string(), text));
    }
    let label = source.to_string_lossy().to_string();
    let text = std::fs::read_to_string(source)
        .with_context(|| format!("failed to read source file {label}"))?;
    Ok((label, text))
}

fn default_root_name(source: &Path) -> String {
    if source == Path::new(STDIN) {
        return "Root".to_string();
    }
    match source.file_stem().and_then(|s| s.to_str()) {
        Some(stem) => naming::type_name(stem),
        None => "Root".to_string(),
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
