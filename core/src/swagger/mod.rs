#![deny(missing_docs)]

//! # Swagger 2.0 Document Model
//!
//! - **node**: lazily decoded raw JSON fragments.
//! - **models**: typed records decoded from nodes on demand.
//! - **document**: top-level loading and version check.
//! - **registry**: reference and security-scheme lookup tables.
//! - **pointer**: `$ref` path namespaces and escaping.

pub mod document;
pub mod models;
pub mod node;
pub mod pointer;
pub mod registry;

pub use document::{Document, InputFormat, DEFAULT_SCHEME, SWAGGER_VERSION};
pub use models::{Info, Items, ParamLocation, Parameter, Request, SchemaType, SecurityScheme, Tag};
pub use node::SchemaNode;
pub use registry::{ReferenceTable, SecurityTable};
