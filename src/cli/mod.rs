use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod convert;
mod info;

use config::Config;

/// votable - VOTable inspection and conversion
#[derive(Parser)]
#[command(name = "votable")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load parser and writer settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the columns, coordinate system and description of a VOTable
    Info {
        /// Input VOTable file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print a JSON document instead of text
        #[arg(long)]
        json: bool,

        /// Record data errors instead of aborting on the first one
        #[arg(long)]
        lenient: bool,
    },

    /// Convert the data table of a VOTable to Parquet
    Convert {
        /// Input VOTable file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output Parquet file (defaults to INPUT with a .parquet extension)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Record data errors instead of aborting on the first one
        #[arg(long)]
        lenient: bool,

        /// Compression level for ZSTD (1-22)
        #[arg(short = 'c', long)]
        compression_level: Option<i32>,

        /// Row group size (rows per row group)
        #[arg(short = 'r', long, hide = true)]
        row_group_size: Option<usize>,
    },
}

impl Cli {
    /// Number of `-v` flags given
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

/// Initialize env_logger; `RUST_LOG` overrides the verbosity flags
pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Run the selected subcommand
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Info {
            file,
            json,
            lenient,
        } => info::run(file, config.parser_config(lenient), json),
        Commands::Convert {
            input,
            output,
            lenient,
            compression_level,
            row_group_size,
        } => {
            let mut writer = config.writer.clone();
            if let Some(level) = compression_level {
                writer.compression_level = level;
            }
            if let Some(size) = row_group_size {
                writer.row_group_size = size;
            }
            convert::run(input, output, config.parser_config(lenient), writer)
        }
    }
}
