#![deny(missing_docs)]

//! # Reference Tables
//!
//! Two immutable lookups built once per document:
//!
//! - [`ReferenceTable`]: `#/definitions/{name}` and `#/parameters/{name}` to their raw nodes.
//! - [`SecurityTable`]: bare security scheme names to their raw nodes.
//!
//! Entries are stored undecoded. Consumers decode them when they need a shape.

use crate::error::AppResult;
use crate::swagger::models::{Parameter, SecurityScheme};
use crate::swagger::node::SchemaNode;
use crate::swagger::pointer::{normalize_ref, DEFINITIONS_PREFIX, PARAMETERS_PREFIX};
use indexmap::IndexMap;

/// Lookup of reusable definitions and parameters by reference path.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: IndexMap<String, SchemaNode>,
}

impl ReferenceTable {
    /// Merges `definitions` and `parameters` into one table.
    ///
    /// Missing collections contribute nothing. Duplicate keys keep the last entry.
    pub fn build(
        definitions: Option<&SchemaNode>,
        parameters: Option<&SchemaNode>,
    ) -> AppResult<Self> {
        let mut entries = IndexMap::new();
        for (prefix, collection, context) in [
            (DEFINITIONS_PREFIX, definitions, "definitions"),
            (PARAMETERS_PREFIX, parameters, "parameters"),
        ] {
            let Some(collection) = collection else {
                continue;
            };
            for (name, node) in collection.decode_map(context)? {
                entries.insert(format!("{}{}", prefix, name), node);
            }
        }
        Ok(Self { entries })
    }

    /// Looks up a reference path, retrying with pointer escapes decoded.
    pub fn get(&self, reference: &str) -> Option<&SchemaNode> {
        self.entries.get(reference).or_else(|| {
            let normalized = normalize_ref(reference)?;
            self.entries.get(&normalized)
        })
    }

    /// Looks up a reference path and decodes the target as a [`Parameter`].
    ///
    /// An absent key is `Ok(None)`; a target that does not decode is an error.
    pub fn resolve(&self, reference: &str) -> AppResult<Option<Parameter>> {
        self.get(reference)
            .map(|node| node.decode(reference))
            .transpose()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the document declared no definitions or parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reference paths in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Lookup of `securityDefinitions` by scheme name.
#[derive(Debug, Clone, Default)]
pub struct SecurityTable {
    schemes: IndexMap<String, SchemaNode>,
}

impl SecurityTable {
    /// Builds the table from the `securityDefinitions` collection, if any.
    pub fn build(security_definitions: Option<&SchemaNode>) -> AppResult<Self> {
        let schemes = match security_definitions {
            Some(node) => node.decode_map("securityDefinitions")?,
            None => IndexMap::new(),
        };
        Ok(Self { schemes })
    }

    /// Returns the raw node of a scheme.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.schemes.get(name)
    }

    /// Looks up a scheme and decodes it. An unknown name is `Ok(None)`.
    pub fn scheme(&self, name: &str) -> AppResult<Option<SecurityScheme>> {
        self.get(name)
            .map(|node| node.decode(&format!("security scheme '{}'", name)))
            .transpose()
    }

    /// Number of schemes.
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    /// Returns true when no schemes are declared.
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}
