//! Parser configuration
//!
//! Loadable from the `[parser]` section of a TOML file:
//!
//! ```toml
//! [parser]
//! data_errors = "lenient"
//! coosys_paths = ["VOTABLE/COOSYS", "VOTABLE/DEFINITIONS/COOSYS", "VOTABLE/RESOURCE/COOSYS"]
//! input_buffer_size = 131072
//! ```

use serde::{Deserialize, Serialize};

/// Default read buffer for file input (64 KiB)
pub const DEFAULT_INPUT_BUFFER_SIZE: usize = 64 * 1024;

/// Element paths at which a COOSYS declares the document's coordinate system
pub const DEFAULT_COOSYS_PATHS: [&str; 2] = ["VOTABLE/COOSYS", "VOTABLE/DEFINITIONS/COOSYS"];

/// How cell conversion and row arity errors are handled
///
/// A bad cell is always reported as a [`DataError`](super::DataError) for that
/// cell, never as a malformed-document failure. `Strict` surfaces the first
/// one as the parse result; `Lenient` keeps every well-formed document
/// readable and collects the errors in
/// [`VOTable::data_errors`](super::VOTable::data_errors). The CLI exposes
/// `Lenient` as `--lenient`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataErrorPolicy {
    /// Abort the parse on the first data error
    #[default]
    Strict,
    /// Record the error, store null for the affected cells and continue
    Lenient,
}

/// Configuration for [`VOTableParser`](super::VOTableParser)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Policy for cells that do not convert and rows with the wrong cell count
    pub data_errors: DataErrorPolicy,

    /// Path patterns (see [`crate::path`]) that accept a COOSYS element
    pub coosys_paths: Vec<String>,

    /// Read buffer capacity for file input
    pub input_buffer_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            data_errors: DataErrorPolicy::default(),
            coosys_paths: DEFAULT_COOSYS_PATHS.iter().map(|p| p.to_string()).collect(),
            input_buffer_size: DEFAULT_INPUT_BUFFER_SIZE,
        }
    }
}

impl ParserConfig {
    /// Default configuration with the lenient data error policy
    pub fn lenient() -> Self {
        Self::default().with_data_errors(DataErrorPolicy::Lenient)
    }

    /// Set the data error policy
    pub fn with_data_errors(mut self, policy: DataErrorPolicy) -> Self {
        self.data_errors = policy;
        self
    }

    /// Replace the COOSYS path patterns
    pub fn with_coosys_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.coosys_paths = paths.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.data_errors, DataErrorPolicy::Strict);
        assert_eq!(config.coosys_paths, DEFAULT_COOSYS_PATHS);
        assert_eq!(config.input_buffer_size, DEFAULT_INPUT_BUFFER_SIZE);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: ParserConfig = toml::from_str(r#"data_errors = "lenient""#).unwrap();
        assert_eq!(config.data_errors, DataErrorPolicy::Lenient);
        assert_eq!(config.coosys_paths.len(), 2);
    }

    #[test]
    fn test_builders() {
        let config = ParserConfig::lenient().with_coosys_paths(["*/COOSYS"]);
        assert_eq!(config.data_errors, DataErrorPolicy::Lenient);
        assert_eq!(config.coosys_paths, vec!["*/COOSYS".to_string()]);
    }
}
