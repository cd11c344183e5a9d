#![deny(missing_docs)]

//! # Request Unpacking
//!
//! Splits one path item into one [`Request`] per HTTP method.
//!
//! Parameters declared on the path item itself are shared by every method and
//! are placed ahead of the method's own parameters. Same-named entries are kept
//! as they are, without de-duplication.

use crate::error::AppResult;
use crate::swagger::models::{Parameter, Request};
use crate::swagger::node::SchemaNode;

/// Key of the shared parameter list inside a path item.
pub const SHARED_PARAMETERS_KEY: &str = "parameters";

/// Decodes the path item at `path` into its requests, in document order of the method keys.
///
/// Specification extensions (`x-...`) are skipped.
pub fn unpack_path_item(path: &str, item: &SchemaNode) -> AppResult<Vec<Request>> {
    let entries = item.decode_map(&format!("path item '{}'", path))?;

    let shared: Vec<Parameter> = match entries.get(SHARED_PARAMETERS_KEY) {
        Some(node) => node.decode(&format!("shared parameters of '{}'", path))?,
        None => Vec::new(),
    };

    let mut requests = Vec::new();
    for (method, node) in entries {
        if method == SHARED_PARAMETERS_KEY || method.starts_with("x-") {
            continue;
        }
        let mut request: Request = node.decode(&format!("operation {} {}", method, path))?;
        let mut parameters = shared.clone();
        parameters.append(&mut request.parameters);
        request.parameters = parameters;
        request.method = method;
        requests.push(request);
    }

    Ok(requests)
}
