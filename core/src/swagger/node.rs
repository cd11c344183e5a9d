#![deny(missing_docs)]

//! # Schema Nodes
//!
//! Opaque, lazily decoded fragments of a Swagger document.
//!
//! A node keeps the exact JSON text it was read from. Nothing inside it is
//! parsed until a consumer asks for a concrete shape, so schema detail that no
//! parameter ever touches costs nothing beyond the initial tokenisation.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::fmt;

/// A raw JSON fragment owned by the document that produced it.
///
/// Absent fields are modelled as `Option<SchemaNode>` by the records holding them.
#[derive(Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SchemaNode(Box<RawValue>);

impl SchemaNode {
    /// Wraps JSON text without interpreting it beyond a syntax check.
    pub fn from_json(text: impl Into<String>) -> AppResult<Self> {
        RawValue::from_string(text.into())
            .map(Self)
            .map_err(|e| AppError::decode("schema node", e))
    }

    /// Captures an in-memory JSON value as a node.
    pub fn from_value(value: &serde_json::Value) -> AppResult<Self> {
        let text = serde_json::to_string(value).map_err(|e| AppError::decode("schema node", e))?;
        Self::from_json(text)
    }

    /// The JSON text of this node, exactly as read.
    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    /// Returns true for a literal JSON `null`.
    pub fn is_null(&self) -> bool {
        self.as_str().trim() == "null"
    }

    /// Decodes the node into a concrete record shape.
    ///
    /// `context` names what the caller expected and ends up in the error message.
    pub fn decode<T: DeserializeOwned>(&self, context: &str) -> AppResult<T> {
        serde_json::from_str(self.as_str()).map_err(|e| AppError::decode(context, e))
    }

    /// Decodes the node into a map of child nodes, preserving document order.
    ///
    /// A `null` node decodes to an empty map.
    pub fn decode_map(&self, context: &str) -> AppResult<IndexMap<String, SchemaNode>> {
        if self.is_null() {
            return Ok(IndexMap::new());
        }
        self.decode(context)
    }
}

impl PartialEq for SchemaNode {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Debug for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchemaNode({})", self.as_str())
    }
}
