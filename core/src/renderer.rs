#![deny(missing_docs)]

//! # Request Rendering
//!
//! Turns one [`Request`] into one block of the `.http` request collection:
//!
//! ```text
//! ###
//! # pet.getPetById
//! # Find pet by ID
//! GET https://petstore.example.com/v2/pet/0
//!  ?verbose=false
//! X-Request-Id: {{_header_X_Request_Id}}
//! X-API-KEY: {{_auth_X_API_KEY}}
//! Content-Type: application/json
//!
//! ```
//!
//! Query and path values are synthesized as bare tokens, body values as JSON.
//! Header values are template variables the user fills in.

use crate::error::{AppError, AppResult};
use crate::naming::{auth_placeholder, comment_lines, header_line, header_placeholder};
use crate::swagger::document::Document;
use crate::swagger::models::{Info, ParamLocation, Parameter, Request};
use crate::swagger::node::SchemaNode;
use crate::synthesizer::{synthesize, OutputContext};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Separator line opening every request block.
pub const BLOCK_SEPARATOR: &str = "###";

/// Content type sent with every request.
pub const CONTENT_TYPE: &str = "application/json";

/// One rendered request block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedRequest {
    /// The block text, ending with its separating blank line.
    pub text: String,
    /// Credential variables used by the block: variable name -> header name.
    pub auth_variables: IndexMap<String, String>,
}

/// Query parameters grouped by name, encoded as `application/x-www-form-urlencoded`.
///
/// Names are emitted in lexicographic order; repeated names keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues {
    values: BTreeMap<String, Vec<String>>,
}

impl QueryValues {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value for `name`.
    pub fn add(&mut self, name: &str, value: impl Into<String>) {
        self.values
            .entry(name.to_string())
            .or_default()
            .push(value.into());
    }

    /// Returns true when nothing was added.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Encodes all pairs, e.g. `limit=0&tags=a+b`.
    pub fn encode(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (name, values) in &self.values {
            for value in values {
                serializer.append_pair(name, value);
            }
        }
        serializer.finish()
    }
}

/// Writes the document-level header: title, version and description comments, then a blank line.
pub fn write_head(out: &mut String, info: &Info) {
    for field in [&info.title, &info.version, &info.description] {
        if !field.is_empty() {
            out.push_str(&comment_lines(field));
        }
    }
    out.push('\n');
}

/// Renders the block for `request`, declared under `path` in `doc`.
///
/// Nothing is returned on failure, so a caller appending blocks never sees half a block.
pub fn render_request(doc: &Document, path: &str, request: &Request) -> AppResult<RenderedRequest> {
    let refs = doc.reference_table();
    let method = request.method.to_uppercase();
    trace!(%method, path, "rendering request");

    let mut out = String::new();
    out.push_str(BLOCK_SEPARATOR);
    out.push('\n');
    out.push_str(&format!(
        "# {}.{}\n",
        request.tags.join(", "),
        request.operation_id
    ));
    out.push_str(&comment_lines(&request.summary));
    if !request.description.is_empty() {
        out.push_str(&comment_lines(&request.description));
    }

    let params = resolve_parameters(doc, &request.parameters)?;

    let mut query = QueryValues::new();
    let mut resolved_path = path.to_string();
    for param in &params {
        match param.location {
            ParamLocation::Query => {
                let value = synthesize(param, refs, OutputContext::Plain)?;
                query.add(&param.name, value);
            }
            ParamLocation::Path => {
                let value = synthesize(param, refs, OutputContext::Plain)?;
                resolved_path = resolved_path.replace(&format!("{{{}}}", param.name), &value);
            }
            _ => {}
        }
    }

    out.push_str(&format!(
        "{} {}://{}{}{}\n",
        method,
        doc.scheme(),
        doc.host,
        doc.base_path,
        resolved_path
    ));
    if !query.is_empty() {
        out.push_str(&format!(" ?{}\n", query.encode()));
    }

    for param in params.iter().filter(|p| p.location == ParamLocation::Header) {
        out.push_str(&header_line(&param.name, &header_placeholder(&param.name)));
    }

    let mut auth_variables = IndexMap::new();
    for requirement in security_requirements(doc, request) {
        for scheme_name in requirement.decode_map("security requirement")?.keys() {
            let Some(scheme) = doc.security_table().scheme(scheme_name)? else {
                debug!(scheme = %scheme_name, "unknown security scheme");
                continue;
            };
            if let Some(header) = scheme.header_name() {
                let variable = auth_placeholder(header);
                out.push_str(&header_line(header, &variable));
                auth_variables.insert(variable, header.to_string());
            }
        }
    }

    out.push_str(&format!("Content-Type: {}\n", CONTENT_TYPE));
    out.push('\n');

    for param in params.iter().filter(|p| p.location == ParamLocation::Body) {
        let value = synthesize(param, refs, OutputContext::JsonEmbedded)?;
        out.push_str(&pretty_body(&value)?);
        out.push_str("\n\n");
    }
    out.push('\n');

    Ok(RenderedRequest {
        text: out,
        auth_variables,
    })
}

// A `$ref` parameter is replaced by its target; dangling ones stay as written.
fn resolve_parameters(doc: &Document, params: &[Parameter]) -> AppResult<Vec<Parameter>> {
    params
        .iter()
        .map(|param| match param.reference() {
            Some(reference) => Ok(doc
                .reference_table()
                .resolve(reference)?
                .unwrap_or_else(|| param.clone())),
            None => Ok(param.clone()),
        })
        .collect()
}

fn security_requirements<'a>(doc: &'a Document, request: &'a Request) -> &'a [SchemaNode] {
    request
        .security
        .as_deref()
        .or(doc.security.as_deref())
        .unwrap_or(&[])
}

/// Pretty-prints a JSON body with 4-space indentation. Empty text becomes `{}`.
///
/// Text that is not valid JSON (e.g. a hand-written default) is emitted unchanged.
pub fn pretty_body(text: &str) -> AppResult<String> {
    if text.is_empty() {
        return Ok("{}".to_string());
    }
    let Ok(value) = serde_json::from_str::<JsonValue>(text) else {
        return Ok(text.to_string());
    };

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .map_err(|e| AppError::decode("request body", e))?;
    String::from_utf8(buf).map_err(|e| AppError::decode("request body", e))
}
