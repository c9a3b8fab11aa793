//! Generator configuration.
//!
//! Options are a plain value handed to every stage; nothing is global, so
//! runs with different settings can execute side by side.
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use crate::collect::NamingPolicy;
pub use crate::value::DecimalKind;

use crate::error::GenError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// emit `equals` / `hashCode`
    pub emit_equality: bool,
    /// emit `toString`
    pub emit_textual_representation: bool,
    pub naming: NamingPolicy,
    pub decimal_kind: DecimalKind,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            emit_equality: true,
            emit_textual_representation: true,
            naming: NamingPolicy::default(),
            decimal_kind: DecimalKind::default(),
        }
    }
}

impl GeneratorOptions {
    /// Load from a JSON file; absent keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, GenError> {
        crate::path_de::load_file(path)
    }

    pub fn with_equality(mut self, on: bool) -> Self {
        self.emit_equality = on;
        self
    }

    pub fn with_textual_representation(mut self, on: bool) -> Self {
        self.emit_textual_representation = on;
        self
    }

    pub fn with_naming(mut self, naming: NamingPolicy) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_decimal_kind(mut self, kind: DecimalKind) -> Self {
        self.decimal_kind = kind;
        self
    }
}
