#![deny(missing_docs)]

//! # Reference Paths
//!
//! Helpers for the two local `$ref` namespaces of a Swagger 2.0 document.
//!
//! Reference tables are keyed by prefix + raw name. A `$ref` written as an
//! escaped JSON pointer (`Foo~1Bar`, `Pet%20Owner`) is normalised back to the
//! raw name so it still finds its target. External documents are never fetched.

use percent_encoding::percent_decode_str;

/// Prefix of references into `definitions`.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Prefix of references into the reusable `parameters` collection.
pub const PARAMETERS_PREFIX: &str = "#/parameters/";

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent-encoding).
pub fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

/// Rewrites an escaped reference into the form used as a table key.
///
/// Returns `None` when the reference is outside the two local namespaces, or
/// when decoding would not change it.
pub fn normalize_ref(ref_str: &str) -> Option<String> {
    [DEFINITIONS_PREFIX, PARAMETERS_PREFIX]
        .into_iter()
        .find_map(|prefix| {
            let name = ref_str.strip_prefix(prefix)?;
            Some(format!("{}{}", prefix, decode_pointer_segment(name)))
        })
        .filter(|normalized| normalized != ref_str)
}
