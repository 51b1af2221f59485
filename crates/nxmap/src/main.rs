//! nxmap - project flattened NeXus instrument metadata onto a JSON
//! schema document

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::commands::{ConvertArgs, handle_convert};

/// Project flattened NeXus instrument metadata onto a JSON schema document
#[derive(Debug, Parser)]
#[command(name = "nxmap", version, about)]
struct Cli {
    /// Path to the JSON schema file
    schema: PathBuf,

    /// Flattened metadata input: a JSON dump, or a zip archive of dumps
    input: PathBuf,

    /// Output path: a .json document, or a .zip bundle for archive inputs
    output: PathBuf,

    /// Print every projection diagnostic
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let args = ConvertArgs {
        schema: cli.schema,
        input: cli.input,
        output: cli.output,
        verbose: cli.verbose,
    };
    handle_convert(&args)?;
    Ok(())
}
