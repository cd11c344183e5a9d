#![deny(missing_docs)]

//! # Swagger HTTP Core
//!
//! Turns a Swagger 2.0 document into a collection of ready-to-send `.http`
//! request templates, one per declared operation.

/// Shared error types.
pub mod error;

/// Swagger 2.0 document model and reference tables.
pub mod swagger;

/// Representative value synthesis.
pub mod synthesizer;

/// Path item -> requests.
pub mod unpacker;

/// Request -> `.http` block.
pub mod renderer;

/// Template variable and comment naming.
pub mod naming;

/// Whole-document conversion.
pub mod collection;

pub use collection::{dump, dump_to, Collection};
pub use error::{AppError, AppResult};
pub use renderer::{render_request, write_head, QueryValues, RenderedRequest};
pub use swagger::{
    Document, InputFormat, Info, Items, ParamLocation, Parameter, ReferenceTable, Request,
    SchemaNode, SchemaType, SecurityScheme, SecurityTable, Tag,
};
pub use synthesizer::{synthesize, OutputContext};
pub use unpacker::unpack_path_item;
