//! # Parquet Export Module
//!
//! Writes the data table of a parsed [`VOTable`] to a Parquet file. Column
//! descriptors survive twice: as Arrow field metadata on every column
//! (`votable:ucd`, `votable:unit`, ...) and as JSON in the file footer,
//! together with the coordinate system, document description and INFO entries.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use log::{debug, info};
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use serde::{Deserialize, Serialize};

use crate::schema::{
    KEY_CONVERSION_TIMESTAMP, KEY_COORDINATE_SYSTEM, KEY_FIELDS, KEY_INFOS, KEY_TABLE_DESCRIPTION,
};
use crate::votable::VOTable;

/// Errors that can occur during Parquet export
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// I/O error creating or writing the output
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Footer metadata could not be serialized
    #[error("Metadata error: {0}")]
    MetadataError(#[from] serde_json::Error),

    /// The table cannot be represented as a Parquet file
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Parquet writer settings, loadable from the `[writer]` TOML section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// ZSTD compression level
    pub compression_level: i32,

    /// Maximum rows per row group
    pub row_group_size: usize,

    /// Whether to write column chunk statistics
    pub write_statistics: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression_level: 3,
            row_group_size: 100_000,
            write_statistics: true,
        }
    }
}

impl WriterConfig {
    fn to_writer_properties(&self, metadata: &HashMap<String, String>) -> WriterProperties {
        let compression = Compression::ZSTD(
            ZstdLevel::try_new(self.compression_level).unwrap_or_default(),
        );

        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let mut kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();
        kv_metadata.sort_by(|a, b| a.key.cmp(&b.key));

        WriterProperties::builder()
            .set_compression(compression)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size.max(1))
            .set_key_value_metadata(Some(kv_metadata))
            .build()
    }
}

/// Footer key-value metadata describing `table`
pub fn table_key_value_metadata(table: &VOTable) -> Result<HashMap<String, String>, WriterError> {
    let mut metadata = HashMap::new();

    metadata.insert(KEY_FIELDS.to_string(), serde_json::to_string(table.fields())?);

    if let Some(description) = table.description() {
        metadata.insert(KEY_TABLE_DESCRIPTION.to_string(), description.to_string());
    }
    if let Some(coosys) = table.coordinate_system() {
        metadata.insert(
            KEY_COORDINATE_SYSTEM.to_string(),
            serde_json::to_string(coosys)?,
        );
    }
    if !table.infos().is_empty() {
        metadata.insert(KEY_INFOS.to_string(), serde_json::to_string(table.infos())?);
    }

    metadata.insert(KEY_CONVERSION_TIMESTAMP.to_string(), Utc::now().to_rfc3339());

    Ok(metadata)
}

/// Statistics from a completed export
#[derive(Debug, Clone)]
pub struct WriterStats {
    /// Data rows written
    pub rows_written: usize,
    /// Columns written
    pub columns_written: usize,
    /// Row groups in the file
    pub row_groups_written: usize,
}

impl std::fmt::Display for WriterStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wrote {} rows x {} columns in {} row groups",
            self.rows_written, self.columns_written, self.row_groups_written
        )
    }
}

/// Write the data table of `table` as Parquet to any writer
pub fn write_parquet<W: Write + Send>(
    table: &VOTable,
    writer: W,
    config: &WriterConfig,
) -> Result<WriterStats, WriterError> {
    let data = table.data();
    if data.num_columns() == 0 {
        return Err(WriterError::InvalidData(
            "table declares no FIELDs; Parquet requires at least one column".to_string(),
        ));
    }

    let metadata = table_key_value_metadata(table)?;
    let props = config.to_writer_properties(&metadata);

    let mut arrow_writer = ArrowWriter::try_new(writer, data.schema(), Some(props))?;
    arrow_writer.write(data)?;
    let file_metadata = arrow_writer.close()?;

    let stats = WriterStats {
        rows_written: data.num_rows(),
        columns_written: data.num_columns(),
        row_groups_written: file_metadata.row_groups.len(),
    };
    debug!("{}", stats);
    Ok(stats)
}

/// Write the data table of `table` to a Parquet file at `path`
pub fn write_parquet_file<P: AsRef<Path>>(
    table: &VOTable,
    path: P,
    config: &WriterConfig,
) -> Result<WriterStats, WriterError> {
    let path = path.as_ref();
    info!("Writing {}", path.display());
    let file = File::create(path)?;
    write_parquet(table, file, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::votable::parse;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    const DOC: &str = r#"<VOTABLE>
        <DESCRIPTION>Export test</DESCRIPTION>
        <COOSYS ID="sys" system="ICRS"/>
        <RESOURCE><TABLE>
            <FIELD name="ra" datatype="double" unit="deg" ucd="pos.eq.ra" ref="sys"/>
            <FIELD name="mag" datatype="float"/>
            <FIELD name="label" datatype="char"/>
            <DATA><TABLEDATA>
                <TR><TD>1.5</TD><TD>12.25</TD><TD>a</TD></TR>
                <TR><TD>2.5</TD><TD></TD><TD>b</TD></TR>
            </TABLEDATA></DATA>
        </TABLE></RESOURCE>
    </VOTABLE>"#;

    #[test]
    fn test_write_and_read_back() -> Result<(), WriterError> {
        let table = parse(DOC.as_bytes()).unwrap();

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("export.parquet");
        let stats = write_parquet_file(&table, &path, &WriterConfig::default())?;
        assert_eq!(stats.rows_written, 2);
        assert_eq!(stats.columns_written, 3);
        assert_eq!(stats.row_groups_written, 1);

        let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(&path)?)?;

        let kv = builder
            .metadata()
            .file_metadata()
            .key_value_metadata()
            .cloned()
            .unwrap_or_default();
        let lookup = |key: &str| {
            kv.iter()
                .find(|entry| entry.key == key)
                .and_then(|entry| entry.value.clone())
        };
        assert_eq!(lookup(KEY_TABLE_DESCRIPTION).as_deref(), Some("Export test"));
        assert!(lookup(KEY_COORDINATE_SYSTEM).unwrap().contains("ICRS"));
        assert!(lookup(KEY_FIELDS).unwrap().contains("pos.eq.ra"));
        assert!(lookup(KEY_CONVERSION_TIMESTAMP).is_some());
        assert!(lookup(KEY_INFOS).is_none());

        let field = builder.schema().field(0).clone();
        assert_eq!(
            field.metadata().get(crate::schema::KEY_REF).map(String::as_str),
            Some("sys")
        );

        let batches: Vec<_> = builder.build()?.collect::<Result<_, _>>()?;
        let total: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total, 2);
        assert_eq!(batches[0].column(1).null_count(), 1);

        Ok(())
    }

    #[test]
    fn test_rejects_table_without_columns() {
        let table = parse(b"<VOTABLE/>").unwrap();
        let result = write_parquet(&table, Vec::new(), &WriterConfig::default());
        assert!(matches!(result, Err(WriterError::InvalidData(_))));
    }

    #[test]
    fn test_config_from_toml() {
        let config: WriterConfig = toml::from_str("compression_level = 9").unwrap();
        assert_eq!(config.compression_level, 9);
        assert_eq!(config.row_group_size, WriterConfig::default().row_group_size);
    }
}
