//! # VOTable command-line tool
//!
//! Inspect VOTable documents and convert their data tables to Parquet.
//!
//! ## Usage
//!
//! ```bash
//! # Print columns, coordinate system and description
//! votable info catalog.vot
//! votable info --json catalog.vot
//!
//! # Convert to Parquet, nulling cells that do not match their FIELD datatype
//! votable convert --lenient catalog.vot catalog.parquet
//!
//! # Settings from a file
//! votable --config votable.toml convert catalog.vot
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
