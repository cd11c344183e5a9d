#![deny(missing_docs)]

//! # Swagger Models
//!
//! Typed records decoded on demand from [`SchemaNode`]s.
//!
//! These are deliberately loose: unknown keys are ignored, and scalar slots
//! (`default`, `example`, `enum`) accept any JSON scalar so that real-world
//! documents with numeric defaults still decode.

use crate::swagger::node::SchemaNode;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;
use std::fmt;

/// Where a parameter lives in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamLocation {
    /// URL query string.
    Query,
    /// Templated segment of the URL path.
    Path,
    /// Request header.
    Header,
    /// JSON request body.
    Body,
    /// Form field. Parsed, never rendered.
    FormData,
    /// Missing or unrecognised location (e.g. a bare `$ref` parameter).
    #[default]
    #[serde(other)]
    Other,
}

/// Declared type of a parameter or schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// `object`
    Object,
    /// `string`
    String,
    /// `boolean`
    Boolean,
    /// `array`
    Array,
    /// `integer`
    Integer,
    /// Legacy `json` marker, rendered as `<OBJECT>` inside bodies.
    Json,
    /// Any other type word (`number`, `file`, ...).
    #[serde(other)]
    Unknown,
}

impl SchemaType {
    /// The type word as written in a document.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Object => "object",
            SchemaType::String => "string",
            SchemaType::Boolean => "boolean",
            SchemaType::Array => "array",
            SchemaType::Integer => "integer",
            SchemaType::Json => "json",
            SchemaType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value slot: a parameter, a body schema, or an object property.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Parameter {
    /// Location of the parameter.
    #[serde(rename = "in", deserialize_with = "null_as_default")]
    pub location: ParamLocation,
    /// Declared type.
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,
    /// Parameter name (header name, query key, path placeholder).
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Explicit default value, as text.
    #[serde(deserialize_with = "scalar_text")]
    pub default: Option<String>,
    /// `required` flag (parameters) or required-property list (schemas). Never inspected.
    pub required: Option<SchemaNode>,
    /// Body schema: either a `$ref` or an inline schema.
    pub schema: Option<Box<Parameter>>,
    /// Pointer to a reusable parameter or definition.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Format qualifier (`int64`, `date-time`, ...).
    pub format: Option<String>,
    /// Allowed values, in source order.
    #[serde(rename = "enum", deserialize_with = "scalar_list")]
    pub enumeration: Vec<String>,
    /// Element description for arrays.
    pub items: Option<Items>,
    /// Example value, as text.
    #[serde(deserialize_with = "scalar_text")]
    pub example: Option<String>,
    /// Property map for objects, decoded only when an object value is synthesized.
    pub properties: Option<SchemaNode>,
}

impl Parameter {
    /// The explicit default, if one is set and non-empty.
    pub fn default_text(&self) -> Option<&str> {
        non_empty(self.default.as_deref())
    }

    /// The parameter's own `$ref`, if set.
    pub fn reference(&self) -> Option<&str> {
        non_empty(self.reference.as_deref())
    }

    /// The `$ref` carried under `schema`, if set.
    pub fn body_reference(&self) -> Option<&str> {
        self.schema.as_deref().and_then(Parameter::reference)
    }

    /// The schema carried under `schema` when it is inline rather than a `$ref`.
    pub fn inline_schema(&self) -> Option<&Parameter> {
        self.schema
            .as_deref()
            .filter(|schema| schema.reference().is_none())
    }

    /// The example value, if set and non-empty.
    pub fn example_text(&self) -> Option<&str> {
        non_empty(self.example.as_deref())
    }
}

/// Array element description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Items {
    /// Element `$ref`. Recorded but not followed.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Element title.
    pub title: Option<String>,
    /// Element type.
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,
    /// Allowed element values.
    #[serde(rename = "enum", deserialize_with = "scalar_list")]
    pub enumeration: Vec<String>,
    /// Element default.
    #[serde(deserialize_with = "scalar_text")]
    pub default: Option<String>,
}

impl Items {
    /// The element default, if set and non-empty.
    pub fn default_text(&self) -> Option<&str> {
        non_empty(self.default.as_deref())
    }
}

/// One operation as written under a path item. `method` is filled in by the unpacker.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Request {
    /// HTTP method, lower-case as written in the document.
    #[serde(skip)]
    pub method: String,
    /// Operation tags.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// One-line summary (may contain newlines).
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    /// Longer description (may contain newlines).
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Operation identifier.
    #[serde(rename = "operationId", deserialize_with = "null_as_default")]
    pub operation_id: String,
    /// Shared path parameters first, then the operation's own.
    #[serde(deserialize_with = "null_as_default")]
    pub parameters: Vec<Parameter>,
    /// Security requirements. `None` when the operation does not mention security.
    pub security: Option<Vec<SchemaNode>>,
}

/// Document `info` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Info {
    /// API version string.
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    /// Free-form description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// API title.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
}

/// Document-level tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Tag {
    /// Tag name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Tag description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

/// An entry of `securityDefinitions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SecurityScheme {
    /// Scheme kind (`apiKey`, `basic`, `oauth2`).
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Where an API key is sent.
    #[serde(rename = "in", deserialize_with = "null_as_default")]
    pub location: ParamLocation,
    /// Header or query key name for API keys.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

impl SecurityScheme {
    /// The header this scheme is sent in, if it is header-located.
    pub fn header_name(&self) -> Option<&str> {
        if self.location == ParamLocation::Header {
            Some(self.name.as_str())
        } else {
            None
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn json_text(value: JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(value.and_then(json_text))
}

/// Reads an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn scalar_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<JsonValue>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .filter_map(json_text)
        .collect())
}
