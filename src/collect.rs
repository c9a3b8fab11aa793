//! Record discovery.
//!
//! Walks a parsed document depth-first with an explicit stack and assigns a
//! name to every object shape that becomes a generated class:
//!
//! - the root object takes the caller's root name;
//! - a nested object takes the type name of its field key;
//! - an array whose (innermost) first element is an object takes the type
//!   name of its field key, plus `Item` per extra nesting level. Only the
//!   first element is the shape; later elements are checked and reported.
//!
//! A name is expanded at most once. When a second object proposes a name
//! that is already taken, [`NamingPolicy`] decides whether it folds into the
//! existing record or gets a qualified name. Nothing here fails: every
//! ambiguity is resolved and recorded as a [`SchemaWarning`].
pub mod shape;

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::ir::RecordDefinition;
use crate::naming;
use crate::options::GeneratorOptions;
use crate::resolve::resolve_fields;
use crate::value::{JsonValue, Object};

// ------------------------------- Policy ---------------------------------- //

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingPolicy {
    /// The first object to claim a name owns it; later objects with that name
    /// are bound to it whatever their shape.
    FirstWins,
    /// Same name and same shape merge; a different shape is renamed to
    /// `<Owner><Name>` (then `<Owner><Name>2`, ...).
    #[default]
    Qualified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaWarning {
    /// An object proposed a name already held by a different shape.
    NameCollision {
        proposed: String,
        path: Vec<String>,
        resolved: String,
    },
    /// An array element differs in shape from element 0. `field` is
    /// [`ROOT_ELEMENTS`] when the array is the document itself.
    DivergentArrayElements {
        record: String,
        field: String,
        index: usize,
    },
    /// The document root is not an object.
    NonObjectRoot {
        root: String,
        found: &'static str,
    },
}

pub const ROOT_ELEMENTS: &str = "[]";

// ------------------------------ Registry ---------------------------------- //

/// Records discovered in one run, in discovery order (root first).
#[derive(Debug, Default, Serialize)]
pub struct Registry {
    #[serde(skip)]
    processed: IndexSet<String>,
    definitions: IndexMap<String, RecordDefinition>,
    warnings: Vec<SchemaWarning>,
}

impl Registry {
    pub fn definitions(&self) -> impl Iterator<Item = &RecordDefinition> {
        self.definitions.values()
    }

    pub fn get(&self, name: &str) -> Option<&RecordDefinition> {
        self.definitions.get(name)
    }

    pub fn root(&self) -> Option<&RecordDefinition> {
        self.definitions.first().map(|(_, def)| def)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn is_processed(&self, name: &str) -> bool {
        self.processed.contains(name)
    }

    pub fn len(&self) -> usize { self.definitions.len() }

    pub fn is_empty(&self) -> bool { self.definitions.is_empty() }

    pub fn warnings(&self) -> &[SchemaWarning] { &self.warnings }
}

// ------------------------------ Collector --------------------------------- //

struct Owner {
    record: String,
    key: String,
}

struct Pending<'a> {
    proposed: String,
    path: Vec<String>,
    owner: Option<Owner>,
    object: &'a Object,
}

struct Candidate<'a> {
    path: Vec<String>,
    object: &'a Object,
    fingerprint: String,
    /// field key → record name assigned to that field's object
    bindings: HashMap<String, String>,
}

enum Claim {
    New(String),
    Existing(String),
}

struct Collector<'a> {
    policy: NamingPolicy,
    stack: Vec<Pending<'a>>,
    processed: IndexSet<String>,
    candidates: IndexMap<String, Candidate<'a>>,
    warnings: Vec<SchemaWarning>,
}

/// Discover every record reachable from `root`. `root_name` is sanitized
/// like any other type name.
pub fn collect(root_name: &str, root: &JsonValue, options: &GeneratorOptions) -> Registry {
    let empty = Object::new();
    let root_name = naming::type_name(root_name);
    let mut collector = Collector::new(options.naming);

    let root_object = match root {
        JsonValue::Object(m) => m,
        other => {
            collector.warn(SchemaWarning::NonObjectRoot {
                root: root_name.clone(),
                found: other.kind_name(),
            });
            let elements = other.as_array().unwrap_or_default();
            collector.check_homogeneous(&root_name, ROOT_ELEMENTS, elements);
            match innermost_object(elements) {
                Some((_, m)) => m,
                None => &empty,
            }
        }
    };

    collector.stack.push(Pending {
        proposed: root_name,
        path: Vec::new(),
        owner: None,
        object: root_object,
    });
    collector.drain();
    collector.finish()
}

impl<'a> Collector<'a> {
    fn new(policy: NamingPolicy) -> Self {
        Self {
            policy,
            stack: Vec::new(),
            processed: IndexSet::new(),
            candidates: IndexMap::new(),
            warnings: Vec::new(),
        }
    }

    fn warn(&mut self, warning: SchemaWarning) {
        tracing::warn!(?warning, "schema ambiguity resolved");
        self.warnings.push(warning);
    }

    fn drain(&mut self) {
        while let Some(item) = self.stack.pop() {
            let fingerprint = shape::fingerprint_object(item.object);
            let name = match self.claim(&item, &fingerprint) {
                Claim::Existing(name) => {
                    // revisit guard: the shape is already expanded under `name`
                    tracing::debug!(record = %name, path = ?item.path, "record already collected");
                    self.bind(item.owner.as_ref(), &name);
                    continue;
                }
                Claim::New(name) => name,
            };

            tracing::debug!(record = %name, path = ?item.path, "collecting record");
            self.processed.insert(name.clone());
            self.bind(item.owner.as_ref(), &name);
            self.expand(&name, &item);
            self.candidates.insert(name, Candidate {
                path: item.path,
                object: item.object,
                fingerprint,
                bindings: HashMap::new(),
            });
        }
    }

    fn claim(&mut self, item: &Pending<'a>, fingerprint: &str) -> Claim {
        let proposed = &item.proposed;
        match self.policy {
            NamingPolicy::FirstWins => {
                if !self.processed.contains(proposed) {
                    return Claim::New(proposed.clone());
                }
                if self.fingerprint_of(proposed) != Some(fingerprint) {
                    self.warn(SchemaWarning::NameCollision {
                        proposed: proposed.clone(),
                        path: item.path.clone(),
                        resolved: proposed.clone(),
                    });
                }
                Claim::Existing(proposed.clone())
            }
            NamingPolicy::Qualified => {
                let base = match &item.owner {
                    Some(owner) => format!("{}{}", owner.record, proposed),
                    None => proposed.clone(),
                };
                let candidates = std::iter::once(proposed.clone())
                    .chain(std::iter::once(base.clone()))
                    .chain((2..).map(|n| format!("{base}{n}")));
                for candidate in candidates {
                    if !self.processed.contains(&candidate) {
                        if &candidate != proposed {
                            self.warn(SchemaWarning::NameCollision {
                                proposed: proposed.clone(),
                                path: item.path.clone(),
                                resolved: candidate.clone(),
                            });
                        }
                        return Claim::New(candidate);
                    }
                    if self.fingerprint_of(&candidate) == Some(fingerprint) {
                        return Claim::Existing(candidate);
                    }
                }
                unreachable!("numeric suffixes are unbounded")
            }
        }
    }

    /// Fingerprint of an already expanded record.
    fn fingerprint_of(&self, name: &str) -> Option<&str> {
        self.candidates.get(name).map(|c| c.fingerprint.as_str())
    }

    fn bind(&mut self, owner: Option<&Owner>, name: &str) {
        let Some(owner) = owner else { return };
        if let Some(parent) = self.candidates.get_mut(&owner.record) {
            parent.bindings.insert(owner.key.clone(), name.to_string());
        }
    }

    /// Queue every object-typed field of `item` in source order.
    fn expand(&mut self, name: &str, item: &Pending<'a>) {
        let mut children = Vec::new();
        for (key, value) in item.object {
            let (proposed, object) = match value {
                JsonValue::Object(m) => (naming::type_name(key), m),
                JsonValue::Array(xs) => {
                    self.check_homogeneous(name, key, xs);
                    match innermost_object(xs) {
                        Some((depth, m)) => {
                            (format!("{}{}", naming::type_name(key), "Item".repeat(depth)), m)
                        }
                        None => continue,
                    }
                }
                _ => continue,
            };
            let mut path = item.path.clone();
            path.push(key.clone());
            children.push(Pending {
                proposed,
                path,
                owner: Some(Owner { record: name.to_string(), key: key.clone() }),
                object,
            });
        }
        // reversed so children pop in source order
        self.stack.extend(children.into_iter().rev());
    }

    fn check_homogeneous(&mut self, record: &str, field: &str, xs: &[JsonValue]) {
        let Some(first) = xs.first() else { return };
        let expected = shape::fingerprint(first);
        let divergent = xs.iter()
            .enumerate()
            .skip(1)
            .find(|(_, x)| shape::fingerprint(x) != expected);
        if let Some((index, _)) = divergent {
            self.warn(SchemaWarning::DivergentArrayElements {
                record: record.to_string(),
                field: field.to_string(),
                index,
            });
        }
    }

    /// Resolve fields now that every nested record has its final name.
    fn finish(self) -> Registry {
        let definitions = self.candidates
            .into_iter()
            .map(|(name, c)| {
                let fields = resolve_fields(c.object, &c.bindings);
                (name.clone(), RecordDefinition { name, path: c.path, fields })
            })
            .collect();
        Registry {
            processed: self.processed,
            definitions,
            warnings: self.warnings,
        }
    }
}

/// Follow first elements through nested arrays down to an object.
/// Returns the number of array levels crossed below `xs`.
fn innermost_object(xs: &[JsonValue]) -> Option<(usize, &Object)> {
    let mut depth = 0;
    let mut current = xs.first()?;
    loop {
        match current {
            JsonValue::Object(m) => return Some((depth, m)),
            JsonValue::Array(inner) => {
                current = inner.first()?;
                depth += 1;
            }
            _ => return None,
        }
    }
}
