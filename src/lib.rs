//! Generate Java POJOs from a sample JSON document.
//!
//! Pipeline:
//!
//! ```text
//! JSON text ─parse→ JsonValue ─collect→ Registry ─codegen→ GeneratedFile ─writer→ <out>/<pkg>/<Name>.java
//! ```
//!
//! Every stage receives [`GeneratorOptions`] explicitly; a run keeps no
//! state once it returns.
//!
//! ```no_run
//! use json_pojo::{generate, GeneratorOptions};
//! use std::path::Path;
//!
//! let json = r#"{"name":"Ann","age":30,"address":{"city":"NY"}}"#;
//! generate(json, "User", "base.pojo", Path::new("src/test/java"), &GeneratorOptions::default())?;
//! # Ok::<(), json_pojo::GenError>(())
//! ```
pub mod codegen;
pub mod collect;
pub mod error;
pub mod ir;
pub mod naming;
pub mod options;
pub mod path_de;
pub mod resolve;
pub mod value;
pub mod writer;

use std::path::{Path, PathBuf};

pub use collect::{collect, NamingPolicy, Registry, SchemaWarning};
pub use error::{GenError, GenResult};
pub use ir::{FieldDefinition, FieldType, Primitive, RecordDefinition};
pub use options::GeneratorOptions;
pub use resolve::resolve_type;
pub use value::{parse, DecimalKind, JsonValue};
pub use writer::GeneratedFile;

/// Generator bound to one set of options.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: GeneratorOptions,
}

impl Generator {
    pub fn new(options: GeneratorOptions) -> Self { Self { options } }

    pub fn options(&self) -> &GeneratorOptions { &self.options }

    /// Parse `json` and collect its records.
    pub fn registry(&self, json: &str, root_name: &str) -> GenResult<Registry> {
        let value = value::parse(json, self.options.decimal_kind)?;
        Ok(collect(root_name, &value, &self.options))
    }

    /// Render every record of `json` without touching the filesystem.
    pub fn render(&self, json: &str, root_name: &str, package: &str) -> GenResult<Vec<GeneratedFile>> {
        let registry = self.registry(json, root_name)?;
        Ok(self.render_registry(&registry, package))
    }

    /// Render an already parsed document.
    pub fn render_value(&self, value: &JsonValue, root_name: &str, package: &str) -> Vec<GeneratedFile> {
        let registry = collect(root_name, value, &self.options);
        self.render_registry(&registry, package)
    }

    pub fn render_registry(&self, registry: &Registry, package: &str) -> Vec<GeneratedFile> {
        registry
            .definitions()
            .map(|def| GeneratedFile {
                record_name: def.name.clone(),
                contents: codegen::emit(def, package, &self.options),
            })
            .collect()
    }

    /// Parse, render, and write one file per record. Returns the written paths.
    pub fn generate(
        &self,
        json: &str,
        root_name: &str,
        package: &str,
        output_root: &Path,
    ) -> GenResult<Vec<PathBuf>> {
        let files = self.render(json, root_name, package)?;
        writer::write(package, output_root, &files)
    }
}

/// One-shot form of [`Generator::generate`].
pub fn generate(
    json: &str,
    root_name: &str,
    package: &str,
    output_root: &Path,
    options: &GeneratorOptions,
) -> GenResult<Vec<PathBuf>> {
    Generator::new(options.clone()).generate(json, root_name, package, output_root)
}
