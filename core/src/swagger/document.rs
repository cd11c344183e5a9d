#![deny(missing_docs)]

//! # Swagger Document
//!
//! Loads a Swagger 2.0 document and builds its reference tables.
//!
//! Only the top-level fields are decoded eagerly. `paths`, `definitions`,
//! `parameters` and `securityDefinitions` stay as raw [`SchemaNode`]s.

use crate::error::{AppError, AppResult};
use crate::swagger::models::{null_as_default, Info, Tag};
use crate::swagger::node::SchemaNode;
use crate::swagger::registry::{ReferenceTable, SecurityTable};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;
use tracing::debug;

/// The only accepted value of the top-level `swagger` field.
pub const SWAGGER_VERSION: &str = "2.0";

/// Scheme used when the document declares none.
pub const DEFAULT_SCHEME: &str = "http";

/// Syntax of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// JSON text.
    Json,
    /// YAML text.
    Yaml,
}

impl InputFormat {
    /// Picks YAML for `.yaml` / `.yml` files and JSON for everything else.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                InputFormat::Yaml
            }
            _ => InputFormat::Json,
        }
    }
}

#[derive(Deserialize)]
struct VersionProbe {
    swagger: Option<JsonValue>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct DocumentRecord {
    #[serde(deserialize_with = "null_as_default")]
    swagger: String,
    #[serde(deserialize_with = "null_as_default")]
    info: Info,
    #[serde(deserialize_with = "null_as_default")]
    host: String,
    #[serde(rename = "basePath", deserialize_with = "null_as_default")]
    base_path: String,
    #[serde(deserialize_with = "null_as_default")]
    schemes: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    tags: Vec<Tag>,
    security: Option<Vec<SchemaNode>>,
    paths: Option<SchemaNode>,
    #[serde(rename = "securityDefinitions")]
    security_definitions: Option<SchemaNode>,
    definitions: Option<SchemaNode>,
    parameters: Option<SchemaNode>,
}

/// A loaded Swagger 2.0 document together with its reference tables.
#[derive(Debug, Clone)]
pub struct Document {
    /// Version tag, always [`SWAGGER_VERSION`].
    pub swagger: String,
    /// Title, version and description.
    pub info: Info,
    /// Host (and optional port) requests are sent to.
    pub host: String,
    /// Prefix of every path.
    pub base_path: String,
    /// Supported transfer schemes; the first one is used.
    pub schemes: Vec<String>,
    /// Document-level tags.
    pub tags: Vec<Tag>,
    /// Security requirements inherited by operations that declare none.
    pub security: Option<Vec<SchemaNode>>,
    /// Path items keyed by path template.
    pub paths: Option<SchemaNode>,
    /// Raw `securityDefinitions`.
    pub security_definitions: Option<SchemaNode>,
    /// Raw `definitions`.
    pub definitions: Option<SchemaNode>,
    /// Raw reusable `parameters`.
    pub parameters: Option<SchemaNode>,
    refs: ReferenceTable,
    securities: SecurityTable,
}

impl Document {
    /// Parses a JSON document, checks its version and builds the reference tables.
    pub fn from_json_str(text: &str) -> AppResult<Self> {
        let probe: VersionProbe = serde_json::from_str(text)
            .map_err(|e| AppError::MalformedDocument(e.to_string()))?;
        check_version(probe.swagger.as_ref())?;

        let record: DocumentRecord = serde_json::from_str(text)
            .map_err(|e| AppError::MalformedDocument(e.to_string()))?;
        Self::from_record(record)
    }

    /// Parses a JSON document from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> AppResult<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| AppError::MalformedDocument(format!("input is not UTF-8: {}", e)))?;
        Self::from_json_str(text)
    }

    /// Parses a YAML document.
    ///
    /// The YAML is re-encoded as JSON first, so every schema node still holds JSON text.
    pub fn from_yaml_str(text: &str) -> AppResult<Self> {
        let value: JsonValue = serde_yaml::from_str(text)
            .map_err(|e| AppError::MalformedDocument(format!("Failed to parse YAML: {}", e)))?;
        let json = serde_json::to_string(&value)
            .map_err(|e| AppError::MalformedDocument(e.to_string()))?;
        Self::from_json_str(&json)
    }

    /// Parses text in the given syntax.
    pub fn parse(text: &str, format: InputFormat) -> AppResult<Self> {
        match format {
            InputFormat::Json => Self::from_json_str(text),
            InputFormat::Yaml => Self::from_yaml_str(text),
        }
    }

    /// Reads and parses a file, choosing the syntax from its extension.
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text, InputFormat::from_path(path))
    }

    fn from_record(record: DocumentRecord) -> AppResult<Self> {
        let refs = ReferenceTable::build(record.definitions.as_ref(), record.parameters.as_ref())?;
        let securities = SecurityTable::build(record.security_definitions.as_ref())?;
        debug!(
            references = refs.len(),
            security_schemes = securities.len(),
            "reference tables built"
        );

        Ok(Self {
            swagger: record.swagger,
            info: record.info,
            host: record.host,
            base_path: record.base_path,
            schemes: record.schemes,
            tags: record.tags,
            security: record.security,
            paths: record.paths,
            security_definitions: record.security_definitions,
            definitions: record.definitions,
            parameters: record.parameters,
            refs,
            securities,
        })
    }

    /// Decodes `paths` into path template -> path item, in document order.
    pub fn paths(&self) -> AppResult<IndexMap<String, SchemaNode>> {
        match &self.paths {
            Some(node) => node.decode_map("paths"),
            None => Ok(IndexMap::new()),
        }
    }

    /// The first declared scheme, or [`DEFAULT_SCHEME`].
    pub fn scheme(&self) -> &str {
        self.schemes
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_SCHEME)
    }

    /// Definitions and reusable parameters keyed by reference path.
    pub fn reference_table(&self) -> &ReferenceTable {
        &self.refs
    }

    /// Security schemes keyed by name.
    pub fn security_table(&self) -> &SecurityTable {
        &self.securities
    }
}

fn check_version(found: Option<&JsonValue>) -> AppResult<()> {
    match found {
        Some(JsonValue::String(v)) if v == SWAGGER_VERSION => Ok(()),
        Some(other) => Err(AppError::VersionMismatch(other.to_string())),
        None => Err(AppError::VersionMismatch("no `swagger` field".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PETSTORE: &str = r##"{
        "swagger": "2.0",
        "info": {"title": "Petstore", "version": "1.0.0", "description": "Sample"},
        "host": "petstore.example.com",
        "basePath": "/v2",
        "schemes": ["https", "http"],
        "tags": [{"name": "pet", "description": "Pets"}],
        "paths": {"/pets": {"get": {}}, "/pets/{id}": {"get": {}}},
        "definitions": {"Pet": {"type": "object"}},
        "parameters": {"limit": {"in": "query", "name": "limit", "type": "integer"}},
        "securityDefinitions": {"api_key": {"type": "apiKey", "in": "header", "name": "X-API-KEY"}}
    }"##;

    #[test]
    fn test_from_json_str_loads_metadata_and_tables() {
        let doc = Document::from_json_str(PETSTORE).unwrap();
        assert_eq!(doc.info.title, "Petstore");
        assert_eq!(doc.host, "petstore.example.com");
        assert_eq!(doc.base_path, "/v2");
        assert_eq!(doc.scheme(), "https");
        assert_eq!(doc.tags[0].name, "pet");
        assert_eq!(doc.reference_table().len(), 2);
        assert!(doc.reference_table().get("#/definitions/Pet").is_some());
        assert!(doc.security_table().get("api_key").is_some());

        let paths: Vec<String> = doc.paths().unwrap().into_keys().collect();
        assert_eq!(paths, vec!["/pets", "/pets/{id}"]);
    }

    #[test]
    fn test_default_scheme_is_http() {
        let doc = Document::from_json_str(r#"{"swagger": "2.0", "host": "h"}"#).unwrap();
        assert_eq!(doc.scheme(), "http");
        assert!(doc.paths().unwrap().is_empty());
        assert!(doc.reference_table().is_empty());
    }

    #[test]
    fn test_version_mismatch() {
        let err = Document::from_json_str(r#"{"openapi": "3.0.0", "swagger": "3.0"}"#).unwrap_err();
        match err {
            AppError::VersionMismatch(found) => assert_eq!(found, "\"3.0\""),
            other => panic!("expected VersionMismatch, got {other}"),
        }

        let missing = Document::from_json_str(r#"{"openapi": "3.0.0"}"#).unwrap_err();
        assert!(matches!(missing, AppError::VersionMismatch(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Document::from_json_str("{\"swagger\": ").unwrap_err();
        assert!(matches!(err, AppError::MalformedDocument(_)));

        let not_object = Document::from_json_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(not_object, AppError::MalformedDocument(_)));
    }

    #[test]
    fn test_wrong_field_shape_is_malformed() {
        let err = Document::from_json_str(r#"{"swagger": "2.0", "schemes": "https"}"#).unwrap_err();
        assert!(matches!(err, AppError::MalformedDocument(_)));
    }

    #[test]
    fn test_null_fields_load_as_empty() {
        let doc = Document::from_json_str(
            r#"{"swagger": "2.0", "info": null, "host": null, "basePath": null, "schemes": null, "tags": null}"#,
        )
        .unwrap();
        assert_eq!(doc.host, "");
        assert_eq!(doc.base_path, "");
        assert_eq!(doc.scheme(), "http");
        assert!(doc.tags.is_empty());
        assert_eq!(doc.info, Info::default());
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
swagger: "2.0"
info:
  title: Yaml API
host: api.example.com
basePath: /v1
paths:
  /b: {}
  /a: {}
"#;
        let doc = Document::from_yaml_str(yaml).unwrap();
        assert_eq!(doc.info.title, "Yaml API");
        let paths: Vec<String> = doc.paths().unwrap().into_keys().collect();
        assert_eq!(paths, vec!["/b", "/a"]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("petstore.json");
        fs::File::create(&path)
            .unwrap()
            .write_all(PETSTORE.as_bytes())
            .unwrap();

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.host, "petstore.example.com");

        let missing = Document::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, AppError::Io(_)));
    }

    #[test]
    fn test_input_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("a.yaml")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("a.YML")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("a.json")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("swagger")), InputFormat::Json);
    }
}
