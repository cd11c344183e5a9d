#![deny(missing_docs)]

//! # swagger2http
//!
//! Command Line Interface turning a Swagger 2.0 document into a `.http`
//! request collection written next to it.
//!
//! Failures are reported as a message; nothing is written unless the whole
//! document converts.

use clap::{CommandFactory, Parser};
use tracing::info;

use crate::convert::{ConvertArgs, Outcome};

mod convert;
mod error;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Swagger 2.0 -> .http request collection")]
struct Cli {
    #[clap(flatten)]
    convert: ConvertArgs,

    /// Enable debug logging (overridden by RUST_LOG).
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(input) = cli.convert.input.as_deref() else {
        let _ = Cli::command().print_help();
        println!();
        return;
    };

    match convert::execute(input, &cli.convert) {
        Ok(Outcome::Written(path)) => info!(output = %path.display(), "request collection written"),
        Ok(Outcome::Printed) => {}
        Ok(Outcome::Empty) => println!("empty result"),
        Err(err) => eprintln!("{}", err),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    let default_level = if verbose { "debug" } else { "warn" };
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
