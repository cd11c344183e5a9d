#![deny(missing_docs)]

//! # Convert Command
//!
//! Reads a Swagger 2.0 document and writes its request collection next to it
//! as `<input>.http`.

use crate::error::CliResult;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use swagger_http_core::{dump, Collection, Document, InputFormat};
use tracing::{debug, info};

/// Input syntax selection.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// Decide from the file extension.
    Auto,
    /// JSON.
    Json,
    /// YAML.
    Yaml,
}

impl FormatArg {
    /// Resolves the concrete syntax for `input`.
    pub fn resolve(self, input: &Path) -> InputFormat {
        match self {
            FormatArg::Auto => InputFormat::from_path(input),
            FormatArg::Json => InputFormat::Json,
            FormatArg::Yaml => InputFormat::Yaml,
        }
    }
}

/// Arguments for the conversion.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the Swagger 2.0 document.
    pub input: Option<PathBuf>,

    /// Output path. Defaults to `<INPUT>.http`.
    #[clap(short, long, env = "SWAGGER_HTTP_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Print the collection to stdout instead of writing a file.
    #[clap(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Input syntax.
    #[clap(short, long, value_enum, default_value_t = FormatArg::Auto, env = "SWAGGER_HTTP_FORMAT")]
    pub format: FormatArg,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The collection was written to this path.
    Written(PathBuf),
    /// The collection was printed to stdout.
    Printed,
    /// The document produced nothing; no file was written.
    Empty,
}

/// The sibling output file for `input`: `<input>.http`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".http");
    PathBuf::from(name)
}

/// Converts `input` according to `args`.
///
/// Nothing is written unless the whole document converts.
pub fn execute(input: &Path, args: &ConvertArgs) -> CliResult<Outcome> {
    let format = args.format.resolve(input);
    debug!(input = %input.display(), ?format, "loading document");

    let text = fs::read_to_string(input).map_err(swagger_http_core::AppError::Io)?;
    let doc = Document::parse(&text, format)?;
    let collection = dump(&doc)?;

    if collection.is_empty() {
        return Ok(Outcome::Empty);
    }
    report_variables(&collection);

    if args.stdout {
        print!("{}", collection.text);
        return Ok(Outcome::Printed);
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input));
    fs::write(&output, &collection.text)?;
    Ok(Outcome::Written(output))
}

fn report_variables(collection: &Collection) {
    for (variable, header) in &collection.auth_variables {
        info!(%variable, %header, "credential variable to fill in");
    }
}
