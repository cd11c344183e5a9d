#![deny(missing_docs)]

//! # Collection Generation
//!
//! Drives the whole conversion: document head, then one block per operation,
//! paths and methods in document order.

use crate::error::AppResult;
use crate::renderer::{render_request, write_head};
use crate::swagger::document::Document;
use crate::unpacker::unpack_path_item;
use indexmap::IndexMap;
use tracing::debug;

/// A generated request collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    /// The `.http` file content.
    pub text: String,
    /// Every credential variable used by the collection: variable name -> header name.
    pub auth_variables: IndexMap<String, String>,
}

impl Collection {
    /// Returns true when there is nothing worth writing.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Generates the request collection for `doc`.
pub fn dump(doc: &Document) -> AppResult<Collection> {
    let mut text = String::new();
    let auth_variables = dump_to(doc, &mut text)?;
    Ok(Collection {
        text,
        auth_variables,
    })
}

/// Appends the request collection for `doc` to `out`.
///
/// On error, `out` keeps the blocks of every request rendered before the
/// failing one; the failing block itself is never appended.
pub fn dump_to(doc: &Document, out: &mut String) -> AppResult<IndexMap<String, String>> {
    write_head(out, &doc.info);

    let mut auth_variables = IndexMap::new();
    let mut count = 0usize;
    for (path, item) in doc.paths()? {
        if path.starts_with("x-") {
            continue;
        }
        for request in unpack_path_item(&path, &item)? {
            let rendered = render_request(doc, &path, &request)?;
            out.push_str(&rendered.text);
            auth_variables.extend(rendered.auth_variables);
            count += 1;
        }
    }
    debug!(requests = count, "collection generated");

    Ok(auth_variables)
}
