//! TOML configuration file support.
//!
//! ```toml
//! # votable.toml
//! [parser]
//! data_errors = "lenient"
//! coosys_paths = ["VOTABLE/COOSYS", "VOTABLE/DEFINITIONS/COOSYS", "VOTABLE/RESOURCE/COOSYS"]
//!
//! [writer]
//! compression_level = 9
//! row_group_size = 50000
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use votable::votable::{DataErrorPolicy, ParserConfig};
use votable::writer::WriterConfig;

/// Root configuration structure for votable.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Parser settings.
    #[serde(default)]
    pub parser: ParserConfig,

    /// Parquet writer settings.
    #[serde(default)]
    pub writer: WriterConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Parser configuration, with `--lenient` taking precedence over the file
    pub fn parser_config(&self, lenient: bool) -> ParserConfig {
        let config = self.parser.clone();
        if lenient {
            config.with_data_errors(DataErrorPolicy::Lenient)
        } else {
            config
        }
    }
}
