#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Helpers for deriving template variable names and comment lines in the
//! generated request collection.

/// Prefix of variables standing in for header parameters.
pub const HEADER_PREFIX: &str = "_header_";

/// Prefix of variables standing in for credentials.
pub const AUTH_PREFIX: &str = "_auth_";

/// Turns a header name into a template variable suffix (`X-Request-Id` -> `X_Request_Id`).
pub fn sanitize_variable(name: &str) -> String {
    name.replace('-', "_")
}

/// Variable name for a header parameter, e.g. `_header_X_Request_Id`.
pub fn header_placeholder(name: &str) -> String {
    format!("{}{}", HEADER_PREFIX, sanitize_variable(name))
}

/// Variable name for a header-located security scheme, e.g. `_auth_X_API_KEY`.
pub fn auth_placeholder(name: &str) -> String {
    format!("{}{}", AUTH_PREFIX, sanitize_variable(name))
}

/// A header line whose value is a template variable: `Name: {{variable}}`.
pub fn header_line(name: &str, variable: &str) -> String {
    format!("{}: {{{{{}}}}}\n", name, variable)
}

/// Prefixes every physical line of `text` with `# `.
///
/// The result always ends with a newline. Empty text yields a bare `# ` line.
pub fn comment_lines(text: &str) -> String {
    format!("# {}\n", text.replace('\n', "\n# "))
}
