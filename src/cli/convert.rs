use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

use votable::votable::{ParserConfig, VOTableParser};
use votable::writer::{write_parquet_file, WriterConfig};

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("parquet")
}

/// Convert a VOTable file to Parquet
pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    parser_config: ParserConfig,
    writer_config: WriterConfig,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let output = output.unwrap_or_else(|| default_output(&input));

    info!("VOTable to Parquet");
    info!("==================");
    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());
    info!("Data errors: {:?}", parser_config.data_errors);
    info!("Compression level: {}", writer_config.compression_level);
    info!("Row group size: {}", writer_config.row_group_size);

    let table = VOTableParser::new(parser_config)
        .parse_file(&input)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    if !table.data_errors().is_empty() {
        warn!(
            "{} data errors recovered; affected cells are null",
            table.data_errors().len()
        );
    }
    if let Some(encoding) = table.binary_encoding() {
        warn!(
            "Table data is binary-serialized (encoding={}); only the schema is converted",
            encoding
        );
    }

    let stats = write_parquet_file(&table, &output, &writer_config)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!("Conversion complete!");
    info!("  {}", stats);

    let file_size = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
    info!(
        "  Output file size: {} bytes ({:.2} MB)",
        file_size,
        file_size as f64 / 1024.0 / 1024.0
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("data/catalog.vot")),
            PathBuf::from("data/catalog.parquet")
        );
        assert_eq!(
            default_output(Path::new("catalog.xml")),
            PathBuf::from("catalog.parquet")
        );
    }

    #[test]
    fn test_convert_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("stars.vot");
        std::fs::write(
            &input,
            r#"<VOTABLE><RESOURCE><TABLE>
                <FIELD name="id" datatype="int"/>
                <DATA><TABLEDATA><TR><TD>7</TD></TR><TR><TD>x</TD></TR></TABLEDATA></DATA>
            </TABLE></RESOURCE></VOTABLE>"#,
        )
        .unwrap();

        let strict = run(
            input.clone(),
            None,
            ParserConfig::default(),
            WriterConfig::default(),
        );
        assert!(strict.is_err());

        run(input.clone(), None, ParserConfig::lenient(), WriterConfig::default()).unwrap();
        assert!(dir.path().join("stars.parquet").exists());
    }
}
