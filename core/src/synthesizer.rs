#![deny(missing_docs)]

//! # Default Value Synthesis
//!
//! Computes one representative value for a parameter or schema, following
//! references through the [`ReferenceTable`].
//!
//! Synthesis runs in two phases:
//!
//! 1. **Representative text**, first match wins:
//!    explicit `default` -> `$ref` -> `schema.$ref` -> declared type.
//! 2. **Context wrapping**, applied to whatever phase 1 produced (explicit
//!    defaults included) when the value is going into a JSON body.
//!
//! A reference missing from the table yields empty text, never an error.

use crate::error::{AppError, AppResult};
use crate::swagger::models::{Parameter, SchemaType};
use crate::swagger::registry::ReferenceTable;
use serde_json::value::RawValue;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use tracing::debug;

/// Placeholder for values declared with the legacy `json` type.
pub const OBJECT_PLACEHOLDER: &str = "<OBJECT>";

/// Textual context a synthesized value is embedded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputContext {
    /// Bare token for a URL or header.
    Plain,
    /// JSON literal inside a request body.
    JsonEmbedded,
}

/// Synthesizes a representative value for `param`.
///
/// Returns empty text for dangling references and unrecognised types. Fails
/// when a nested node does not decode, or when a reference cycles back onto
/// itself.
pub fn synthesize(
    param: &Parameter,
    refs: &ReferenceTable,
    context: OutputContext,
) -> AppResult<String> {
    Ok(Synthesizer::new(refs, context).synthesize(param)?.text)
}

#[derive(Debug, Default)]
struct Synthesized {
    text: String,
    // Declared type of the node that produced `text`, after following references.
    schema_type: Option<SchemaType>,
}

struct Synthesizer<'a> {
    refs: &'a ReferenceTable,
    context: OutputContext,
    // Reference paths currently being expanded.
    active: Vec<String>,
}

impl<'a> Synthesizer<'a> {
    fn new(refs: &'a ReferenceTable, context: OutputContext) -> Self {
        Self {
            refs,
            context,
            active: Vec::new(),
        }
    }

    fn synthesize(&mut self, param: &Parameter) -> AppResult<Synthesized> {
        let value = self.representative(param)?;
        Ok(Synthesized {
            text: self.wrap(param.schema_type, value.text),
            schema_type: param.schema_type.or(value.schema_type),
        })
    }

    fn representative(&mut self, param: &Parameter) -> AppResult<Synthesized> {
        let own = |text: String| Synthesized {
            text,
            schema_type: param.schema_type,
        };

        if let Some(default) = param.default_text() {
            return Ok(own(default.to_string()));
        }
        if let Some(reference) = param.reference() {
            return self.follow(reference);
        }
        if let Some(reference) = param.body_reference() {
            return self.follow(reference);
        }
        if param.schema_type.is_none() {
            if let Some(schema) = param.inline_schema() {
                return self.synthesize(schema);
            }
        }

        let text = match param.schema_type {
            Some(SchemaType::String) => string_value(param),
            Some(SchemaType::Boolean) => "false".to_string(),
            Some(SchemaType::Integer) => "0".to_string(),
            Some(SchemaType::Array) => array_element(param),
            Some(SchemaType::Object) => self.object_value(param)?,
            other => {
                debug!(name = %param.name, schema_type = ?other, "no value for type");
                String::new()
            }
        };
        Ok(own(text))
    }

    fn follow(&mut self, reference: &str) -> AppResult<Synthesized> {
        if self.active.iter().any(|r| r == reference) {
            return Err(AppError::CyclicReference(reference.to_string()));
        }
        let Some(target) = self.refs.resolve(reference)? else {
            debug!(reference, "unresolved reference");
            return Ok(Synthesized::default());
        };

        self.active.push(reference.to_string());
        let result = self.synthesize(&target);
        self.active.pop();
        result
    }

    fn object_value(&mut self, param: &Parameter) -> AppResult<String> {
        let Some(properties) = &param.properties else {
            return Ok("{}".to_string());
        };

        let mut members = BTreeMap::new();
        for (name, node) in properties.decode_map("object properties")? {
            let child: Parameter = node.decode(&format!("property '{}'", name))?;
            let value = self.synthesize(&child)?;
            let member = self.embed(value)?;
            members.insert(name, member);
        }
        serde_json::to_string(&members).map_err(|e| AppError::decode("object value", e))
    }

    // Child text is kept byte for byte when it is a JSON literal. Bare string
    // tokens and anything that does not parse become JSON strings.
    fn embed(&self, value: Synthesized) -> AppResult<Box<RawValue>> {
        if value.text.is_empty() {
            return raw_literal("null".to_string());
        }
        let bare_string =
            self.context == OutputContext::Plain && value.schema_type == Some(SchemaType::String);
        if !bare_string {
            if let Ok(raw) = serde_json::from_str::<Box<RawValue>>(&value.text) {
                return Ok(raw);
            }
        }
        let quoted = serde_json::to_string(&value.text)
            .map_err(|e| AppError::decode("object member", e))?;
        raw_literal(quoted)
    }

    fn wrap(&self, schema_type: Option<SchemaType>, text: String) -> String {
        if self.context != OutputContext::JsonEmbedded || text.is_empty() {
            return text;
        }
        match schema_type {
            Some(SchemaType::Array) => JsonValue::Array(vec![JsonValue::String(text)]).to_string(),
            Some(SchemaType::String) => JsonValue::String(text).to_string(),
            Some(SchemaType::Json) => OBJECT_PLACEHOLDER.to_string(),
            _ => text,
        }
    }
}

fn string_value(param: &Parameter) -> String {
    if param.format.as_deref() == Some("int64") {
        return "0".to_string();
    }
    if let Some(first) = param.enumeration.first() {
        return first.clone();
    }
    if let Some(example) = param.example_text() {
        return example.to_string();
    }
    "string".to_string()
}

// One element only; the list brackets come from context wrapping.
fn array_element(param: &Parameter) -> String {
    let items = param.items.clone().unwrap_or_default();
    if let Some(default) = items.default_text() {
        return default.to_string();
    }
    if let Some(first) = items.enumeration.first() {
        return first.clone();
    }
    if items.schema_type == Some(SchemaType::Integer) {
        return "0".to_string();
    }
    "string".to_string()
}

fn raw_literal(text: String) -> AppResult<Box<RawValue>> {
    RawValue::from_string(text).map_err(|e| AppError::decode("object member", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swagger::node::SchemaNode;
    use serde_json::json;

    fn param(value: JsonValue) -> Parameter {
        serde_json::from_str(&value.to_string()).unwrap()
    }

    fn table(definitions: JsonValue, parameters: JsonValue) -> ReferenceTable {
        let defs = SchemaNode::from_value(&definitions).unwrap();
        let params = SchemaNode::from_value(&parameters).unwrap();
        ReferenceTable::build(Some(&defs), Some(&params)).unwrap()
    }

    fn plain(p: &Parameter) -> String {
        synthesize(p, &ReferenceTable::default(), OutputContext::Plain).unwrap()
    }

    fn embedded(p: &Parameter) -> String {
        synthesize(p, &ReferenceTable::default(), OutputContext::JsonEmbedded).unwrap()
    }

    #[test]
    fn test_explicit_default_wins_and_is_still_wrapped() {
        let p = param(json!({"type": "string", "default": "available", "enum": ["sold"]}));
        assert_eq!(plain(&p), "available");
        assert_eq!(embedded(&p), "\"available\"");

        let list = param(json!({"type": "array", "default": "a", "items": {"type": "integer"}}));
        assert_eq!(plain(&list), "a");
        assert_eq!(embedded(&list), "[\"a\"]");

        let number = param(json!({"type": "integer", "default": 10}));
        assert_eq!(embedded(&number), "10");
    }

    #[test]
    fn test_string_dispatch_order() {
        assert_eq!(plain(&param(json!({"type": "string", "format": "int64", "enum": ["x"]}))), "0");
        assert_eq!(plain(&param(json!({"type": "string", "enum": ["x", "y"], "example": "e"}))), "x");
        assert_eq!(plain(&param(json!({"type": "string", "example": "doggie"}))), "doggie");
        assert_eq!(plain(&param(json!({"type": "string"}))), "string");
        assert_eq!(embedded(&param(json!({"type": "string"}))), "\"string\"");
    }

    #[test]
    fn test_scalars_ignore_format() {
        let b = param(json!({"type": "boolean", "format": "int64"}));
        assert_eq!(plain(&b), "false");
        assert_eq!(embedded(&b), "false");

        let i = param(json!({"type": "integer", "format": "int32"}));
        assert_eq!(plain(&i), "0");
        assert_eq!(embedded(&i), "0");
    }

    #[test]
    fn test_array_inspects_items_only() {
        let enumerated = param(json!({"type": "array", "items": {"enum": ["x", "y"]}}));
        assert_eq!(plain(&enumerated), "x");
        assert_eq!(embedded(&enumerated), "[\"x\"]");

        let defaulted = param(json!({"type": "array", "items": {"default": "d", "enum": ["x"]}}));
        assert_eq!(plain(&defaulted), "d");

        let integers = param(json!({"type": "array", "items": {"type": "integer"}}));
        assert_eq!(plain(&integers), "0");
        assert_eq!(embedded(&integers), "[\"0\"]");

        let bare = param(json!({"type": "array", "enum": ["ignored"]}));
        assert_eq!(plain(&bare), "string");
    }

    #[test]
    fn test_object_properties() {
        let p = param(json!({
            "type": "object",
            "properties": {"a": {"type": "integer"}, "b": {"type": "boolean"}}
        }));
        assert_eq!(embedded(&p), r#"{"a":0,"b":false}"#);

        let empty = param(json!({"type": "object"}));
        assert_eq!(embedded(&empty), "{}");
        assert_eq!(plain(&empty), "{}");
    }

    #[test]
    fn test_object_keys_are_sorted() {
        let p = param(json!({
            "type": "object",
            "properties": {"name": {"type": "string"}, "age": {"type": "integer"}}
        }));
        assert_eq!(embedded(&p), r#"{"age":0,"name":"string"}"#);
    }

    #[test]
    fn test_object_in_plain_context_quotes_bare_tokens() {
        let p = param(json!({
            "type": "object",
            "properties": {"name": {"type": "string"}, "tags": {"type": "array"}}
        }));
        assert_eq!(plain(&p), r#"{"name":"string","tags":"string"}"#);
    }

    #[test]
    fn test_members_keep_literal_text() {
        let p: Parameter = serde_json::from_str(
            r#"{"type": "object", "properties": {
                "id": {"type": "integer", "default": 12345678901234567890123},
                "ratio": {"type": "integer", "default": 1.50}
            }}"#,
        )
        .unwrap();
        assert_eq!(embedded(&p), r#"{"id":12345678901234567890123,"ratio":1.50}"#);
    }

    #[test]
    fn test_plain_string_members_stay_strings() {
        let p = param(json!({
            "type": "object",
            "properties": {
                "code": {"type": "string", "default": "007"},
                "flag": {"type": "string", "enum": ["true"]},
                "count": {"type": "integer"}
            }
        }));
        assert_eq!(plain(&p), r#"{"code":"007","count":0,"flag":"true"}"#);
        assert_eq!(embedded(&p), r#"{"code":"007","count":0,"flag":"true"}"#);
    }

    #[test]
    fn test_plain_member_type_follows_reference() {
        let refs = table(
            json!({
                "Flag": {"type": "string", "default": "true"},
                "Box": {"type": "object", "properties": {"flag": {"$ref": "#/definitions/Flag"}}}
            }),
            json!({}),
        );
        let p = param(json!({"$ref": "#/definitions/Box"}));
        assert_eq!(
            synthesize(&p, &refs, OutputContext::Plain).unwrap(),
            r#"{"flag":"true"}"#
        );
    }

    #[test]
    fn test_nested_object_and_unknown_child() {
        let p = param(json!({
            "type": "object",
            "properties": {
                "owner": {"type": "object", "properties": {"id": {"type": "integer"}}},
                "weight": {"type": "number"},
                "photoUrls": {"type": "array", "items": {"type": "string"}}
            }
        }));
        assert_eq!(
            embedded(&p),
            r#"{"owner":{"id":0},"photoUrls":["string"],"weight":null}"#
        );
    }

    #[test]
    fn test_unknown_type_is_empty() {
        assert_eq!(plain(&param(json!({"type": "number"}))), "");
        assert_eq!(embedded(&param(json!({"type": "file"}))), "");
        assert_eq!(embedded(&param(json!({}))), "");
    }

    #[test]
    fn test_json_marker_only_replaces_non_empty_text() {
        let with_default = param(json!({"type": "json", "default": "{\"k\":1}"}));
        assert_eq!(embedded(&with_default), OBJECT_PLACEHOLDER);
        assert_eq!(plain(&with_default), "{\"k\":1}");

        let bare = param(json!({"type": "json"}));
        assert_eq!(embedded(&bare), "");
    }

    #[test]
    fn test_dangling_reference_is_empty_not_error() {
        let refs = ReferenceTable::default();
        let p = param(json!({"$ref": "#/definitions/Missing"}));
        assert_eq!(synthesize(&p, &refs, OutputContext::JsonEmbedded).unwrap(), "");

        let body = param(json!({"in": "body", "schema": {"$ref": "#/definitions/Missing"}}));
        assert_eq!(synthesize(&body, &refs, OutputContext::Plain).unwrap(), "");
    }

    #[test]
    fn test_references_resolve_through_both_namespaces() {
        let refs = table(
            json!({
                "Pet": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "category": {"$ref": "#/definitions/Category"}
                    }
                },
                "Category": {"type": "object", "properties": {"id": {"type": "integer"}}}
            }),
            json!({"status": {"in": "query", "name": "status", "type": "string", "enum": ["sold"]}}),
        );

        let body = param(json!({"in": "body", "name": "pet", "schema": {"$ref": "#/definitions/Pet"}}));
        assert_eq!(
            synthesize(&body, &refs, OutputContext::JsonEmbedded).unwrap(),
            r#"{"category":{"id":0},"name":"string"}"#
        );

        let status = param(json!({"$ref": "#/parameters/status"}));
        assert_eq!(synthesize(&status, &refs, OutputContext::Plain).unwrap(), "sold");
        assert_eq!(
            synthesize(&status, &refs, OutputContext::JsonEmbedded).unwrap(),
            "\"sold\""
        );
    }

    #[test]
    fn test_inline_body_schema() {
        let body = param(json!({
            "in": "body",
            "name": "payload",
            "schema": {"type": "object", "properties": {"ok": {"type": "boolean"}}}
        }));
        assert_eq!(embedded(&body), r#"{"ok":false}"#);
    }

    #[test]
    fn test_sibling_reuse_is_not_a_cycle() {
        let refs = table(
            json!({
                "Money": {"type": "integer"},
                "Order": {
                    "type": "object",
                    "properties": {
                        "price": {"$ref": "#/definitions/Money"},
                        "tax": {"$ref": "#/definitions/Money"}
                    }
                }
            }),
            json!({}),
        );
        let p = param(json!({"$ref": "#/definitions/Order"}));
        assert_eq!(
            synthesize(&p, &refs, OutputContext::JsonEmbedded).unwrap(),
            r#"{"price":0,"tax":0}"#
        );
    }

    #[test]
    fn test_cyclic_reference_fails() {
        let refs = table(
            json!({
                "Node": {
                    "type": "object",
                    "properties": {"next": {"$ref": "#/definitions/Node"}}
                }
            }),
            json!({}),
        );
        let p = param(json!({"$ref": "#/definitions/Node"}));
        let err = synthesize(&p, &refs, OutputContext::JsonEmbedded).unwrap_err();
        match err {
            AppError::CyclicReference(path) => assert_eq!(path, "#/definitions/Node"),
            other => panic!("expected CyclicReference, got {other}"),
        }
    }

    #[test]
    fn test_malformed_property_propagates() {
        let p = param(json!({"type": "object", "properties": {"bad": "not a schema"}}));
        let err = synthesize(&p, &ReferenceTable::default(), OutputContext::JsonEmbedded)
            .unwrap_err();
        match err {
            AppError::Decode { context, .. } => assert_eq!(context, "property 'bad'"),
            other => panic!("expected Decode, got {other}"),
        }

        let not_a_map = param(json!({"type": "object", "properties": ["a"]}));
        assert!(synthesize(&not_a_map, &ReferenceTable::default(), OutputContext::Plain).is_err());
    }
}
