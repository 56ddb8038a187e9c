//! Per-document parsing state
//!
//! [`ParseContext`] consumes [`XmlEvent`]s in document order and assembles a
//! [`VOTable`] at the end. It owns every piece of mutable state of one parse
//! (element path, text buffer, in-progress FIELD and row, accumulated results),
//! so independent documents can be parsed concurrently with independent
//! contexts.
//!
//! Element handling:
//!
//! | Element | Start | End |
//! |---------|-------|-----|
//! | FIELD | open a column descriptor | append it to the field list |
//! | DESCRIPTION | reset text | route text by enclosing path |
//! | COOSYS | build coordinate system if the path is accepted | - |
//! | INFO | record under VOTABLE/RESOURCE | - |
//! | TABLEDATA | freeze the field list | - |
//! | TR | open an empty row | convert and append the row |
//! | TD | reset text | push trimmed text as the next cell |
//! | STREAM | record `encoding` | - |
//!
//! Every start pushes the element name onto the path and every end pops it
//! after the decisions above, whether or not the element is recognized.

use std::sync::Arc;

use arrow::array::{ArrayRef, StringBuilder};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use log::{debug, warn};

use super::columns::TableColumns;
use super::config::{DataErrorPolicy, ParserConfig};
use super::error::{DataError, VOTableError};
use super::events::{Attributes, XmlEvent};
use super::models::{ColumnMetadata, CoordinateSystem, InfoEntry, VOTable, DEFAULT_DATATYPE};
use crate::epoch::parse_epoch_string;
use crate::path::{ElementPath, PathPattern};
use crate::schema::{create_data_schema_arc, create_metadata_schema_arc};
use crate::vocabulary::{ReferenceFrame, ReferencePosition};

/// Element names with special handling
pub mod elements {
    /// Document root
    pub const VOTABLE: &str = "VOTABLE";
    /// Container of resources and tables
    pub const RESOURCE: &str = "RESOURCE";
    /// Table element
    pub const TABLE: &str = "TABLE";
    /// Column declaration
    pub const FIELD: &str = "FIELD";
    /// Free-text description
    pub const DESCRIPTION: &str = "DESCRIPTION";
    /// Coordinate system declaration
    pub const COOSYS: &str = "COOSYS";
    /// Name/value annotation
    pub const INFO: &str = "INFO";
    /// Inline XML table data
    pub const TABLEDATA: &str = "TABLEDATA";
    /// Table row
    pub const TR: &str = "TR";
    /// Table cell
    pub const TD: &str = "TD";
    /// Binary stream
    pub const STREAM: &str = "STREAM";
    /// Binary serializations that are recognized but not decoded
    pub const BINARY_FORMATS: [&str; 3] = ["BINARY", "BINARY2", "FITS"];
}

use elements::*;

/// Value of STREAM `encoding` when the attribute is absent
const DEFAULT_STREAM_ENCODING: &str = "none";

/// State machine for one VOTable document
pub struct ParseContext {
    policy: DataErrorPolicy,
    coosys_patterns: Vec<PathPattern>,

    path: ElementPath,
    text: String,
    /// Path depth of the TD or DESCRIPTION collecting character data
    text_depth: Option<usize>,
    seen_root: bool,
    tables_seen: usize,
    /// Path depth of a TABLE whose content is being skipped
    skip_depth: Option<usize>,

    current_field: Option<ColumnMetadata>,
    current_row: Option<Vec<String>>,
    in_tabledata: bool,

    fields: Vec<ColumnMetadata>,
    table: Option<TableColumns>,
    coordinate_system: Option<CoordinateSystem>,
    description: Option<String>,
    infos: Vec<InfoEntry>,
    data_errors: Vec<DataError>,
    binary_encoding: Option<String>,
}

impl ParseContext {
    /// Create a fresh context for one document
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            policy: config.data_errors,
            coosys_patterns: config
                .coosys_paths
                .iter()
                .map(|p| PathPattern::new(p))
                .collect(),
            path: ElementPath::new(),
            text: String::new(),
            text_depth: None,
            seen_root: false,
            tables_seen: 0,
            skip_depth: None,
            current_field: None,
            current_row: None,
            in_tabledata: false,
            fields: Vec::new(),
            table: None,
            coordinate_system: None,
            description: None,
            infos: Vec::new(),
            data_errors: Vec::new(),
            binary_encoding: None,
        }
    }

    /// Current element path, root first
    pub fn path(&self) -> &ElementPath {
        &self.path
    }

    /// Feed one event
    pub fn handle(&mut self, event: XmlEvent) -> Result<(), VOTableError> {
        match event {
            XmlEvent::Start { name, attributes } => self.start_element(name, &attributes),
            XmlEvent::End { name } => self.end_element(&name),
            XmlEvent::Text(text) => {
                self.characters(&text);
                Ok(())
            }
        }
    }

    fn skipping(&self) -> bool {
        self.skip_depth.is_some()
    }

    fn start_element(&mut self, name: String, attributes: &Attributes) -> Result<(), VOTableError> {
        if self.path.is_empty() {
            if self.seen_root {
                return Err(VOTableError::MultipleRoots { name });
            }
            if name != VOTABLE {
                warn!("Root element is <{}>, expected <{}>", name, VOTABLE);
            }
            self.seen_root = true;
        }
        self.path.push(name.clone());

        if self.skipping() {
            return Ok(());
        }

        match name.as_str() {
            TABLE => {
                self.tables_seen += 1;
                if self.tables_seen > 1 {
                    warn!(
                        "Skipping TABLE #{} at {}: only the first table is read",
                        self.tables_seen, self.path
                    );
                    self.skip_depth = Some(self.path.depth());
                }
            }
            FIELD => {
                if self.current_field.is_some() {
                    warn!("Nested FIELD at {}, discarding the enclosing one", self.path);
                }
                self.current_field = Some(column_from_attributes(attributes));
            }
            DESCRIPTION | TD if self.text_depth.is_none() => {
                self.text.clear();
                self.text_depth = Some(self.path.depth());
            }
            COOSYS => self.start_coosys(attributes),
            INFO => {
                if matches!(self.path.parent(), Some(VOTABLE) | Some(RESOURCE)) {
                    self.infos.push(InfoEntry {
                        id: attributes.get("ID").map(str::to_string),
                        name: attributes.get("name").unwrap_or_default().to_string(),
                        value: attributes.get("value").unwrap_or_default().to_string(),
                    });
                }
            }
            TABLEDATA => {
                self.in_tabledata = true;
                self.ensure_table();
            }
            TR => {
                if !self.in_tabledata {
                    debug!("TR outside TABLEDATA at {}", self.path);
                }
                self.current_row = Some(Vec::with_capacity(self.fields.len()));
            }
            STREAM => {
                let encoding = attributes
                    .get("encoding")
                    .unwrap_or(DEFAULT_STREAM_ENCODING)
                    .to_string();
                debug!("STREAM encoding={} at {}", encoding, self.path);
                self.binary_encoding = Some(encoding);
            }
            other if BINARY_FORMATS.contains(&other) => {
                warn!(
                    "{} serialization at {} is not decoded; the data table will have no rows",
                    other, self.path
                );
            }
            _ => {}
        }
        Ok(())
    }

    fn start_coosys(&mut self, attributes: &Attributes) {
        if !self.coosys_patterns.iter().any(|p| self.path.matches(p)) {
            warn!("Ignoring COOSYS at {}", self.path);
            return;
        }

        let coosys = coordinate_system_from_attributes(attributes);
        if let Some(previous) = self.coordinate_system.replace(coosys) {
            debug!(
                "COOSYS at {} replaces earlier declaration {:?}",
                self.path, previous.id
            );
        }
    }

    fn characters(&mut self, text: &str) {
        if self.skipping() {
            return;
        }
        // Includes text inside children of the collecting element
        if matches!(self.text_depth, Some(depth) if self.path.depth() >= depth) {
            self.text.push_str(text);
        }
    }

    fn end_element(&mut self, name: &str) -> Result<(), VOTableError> {
        match self.path.current() {
            Some(current) if current == name => {}
            Some(current) => {
                return Err(VOTableError::MismatchedEnd {
                    expected: current.to_string(),
                    found: name.to_string(),
                })
            }
            None => {
                return Err(VOTableError::MismatchedEnd {
                    expected: String::new(),
                    found: name.to_string(),
                })
            }
        }

        if let Some(depth) = self.skip_depth {
            if self.path.depth() == depth {
                self.skip_depth = None;
            }
            self.path.pop();
            return Ok(());
        }

        match name {
            FIELD => {
                if let Some(field) = self.current_field.take() {
                    if self.table.is_some() {
                        warn!(
                            "FIELD {:?} declared after table data started; ignored",
                            field.name
                        );
                    } else {
                        self.fields.push(field);
                    }
                }
            }
            DESCRIPTION | TD if self.text_depth != Some(self.path.depth()) => {
                debug!("Ignoring nested <{}> at {}", name, self.path);
            }
            DESCRIPTION => {
                self.text_depth = None;
                self.end_description();
            }
            TD => {
                self.text_depth = None;
                if let Some(row) = self.current_row.as_mut() {
                    row.push(self.text.trim().to_string());
                }
                self.text.clear();
            }
            TR => {
                if let Some(cells) = self.current_row.take() {
                    self.finish_row(&cells)?;
                }
            }
            TABLEDATA => self.in_tabledata = false,
            _ => {}
        }

        self.path.pop();
        Ok(())
    }

    fn end_description(&mut self) {
        let text = self.text.trim().to_string();
        self.text.clear();

        if self.path.parent() == Some(VOTABLE) {
            self.description = Some(text);
        } else if let Some(field) = self.current_field.as_mut() {
            field.description = Some(text);
        } else {
            debug!("Discarding DESCRIPTION at {}", self.path);
        }
    }

    fn ensure_table(&mut self) -> &mut TableColumns {
        let fields = &self.fields;
        self.table.get_or_insert_with(|| TableColumns::new(fields))
    }

    fn finish_row(&mut self, cells: &[String]) -> Result<(), VOTableError> {
        let errors = self.ensure_table().append_row(cells);
        for error in errors {
            match self.policy {
                DataErrorPolicy::Strict => return Err(error.into()),
                DataErrorPolicy::Lenient => {
                    warn!("{}", error);
                    self.data_errors.push(error);
                }
            }
        }
        Ok(())
    }

    /// Assemble the result once the input is exhausted
    pub fn finish(mut self) -> Result<VOTable, VOTableError> {
        if !self.path.is_empty() {
            return Err(VOTableError::Truncated {
                path: self.path.to_string(),
            });
        }
        if !self.seen_root {
            return Err(VOTableError::EmptyDocument);
        }

        let metadata = metadata_batch(&self.fields)?;

        let mut table = self
            .table
            .take()
            .unwrap_or_else(|| TableColumns::new(&self.fields));
        let num_rows = table.num_rows();
        let data = RecordBatch::try_new_with_options(
            create_data_schema_arc(&self.fields),
            table.finish(),
            &RecordBatchOptions::new().with_row_count(Some(num_rows)),
        )?;

        debug!(
            "Assembled VOTable: {} fields, {} rows, coosys={}, {} data errors",
            self.fields.len(),
            num_rows,
            self.coordinate_system.is_some(),
            self.data_errors.len()
        );

        Ok(VOTable {
            fields: self.fields,
            metadata,
            data,
            coordinate_system: self.coordinate_system,
            description: self.description,
            infos: self.infos,
            data_errors: self.data_errors,
            binary_encoding: self.binary_encoding,
        })
    }
}

fn column_from_attributes(attributes: &Attributes) -> ColumnMetadata {
    let owned = |key: &str| attributes.get(key).map(str::to_string);

    ColumnMetadata {
        name: attributes.get("name").unwrap_or_default().to_string(),
        datatype: attributes
            .get("datatype")
            .unwrap_or(DEFAULT_DATATYPE)
            .to_string(),
        ucd: owned("ucd"),
        unit: owned("unit"),
        description: None,
        id: owned("ID"),
        arraysize: owned("arraysize"),
        reference: owned("ref"),
        precision: owned("precision"),
        width: owned("width"),
    }
}

/// Malformed epochs are dropped rather than failing the parse
fn epoch_attribute(attributes: &Attributes, key: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let raw = attributes.get(key)?;
    match parse_epoch_string(raw) {
        Ok(instant) => Some(instant),
        Err(e) => {
            warn!("COOSYS {}: {}", key, e);
            None
        }
    }
}

fn coordinate_system_from_attributes(attributes: &Attributes) -> CoordinateSystem {
    let frame = attributes.get("system").map(|raw| {
        let frame = ReferenceFrame::from_tag(raw);
        if frame == ReferenceFrame::Unknown && raw != ReferenceFrame::Unknown.as_str() {
            warn!("Unrecognized COOSYS system {:?}, using UNKNOWN", raw);
        }
        frame
    });

    let reference_position = attributes.get("refposition").map(|raw| {
        let position = ReferencePosition::from_tag(raw);
        if position == ReferencePosition::Unknown && raw != ReferencePosition::Unknown.as_str() {
            warn!("Unrecognized COOSYS refposition {:?}, using UNKNOWN", raw);
        }
        position
    });

    CoordinateSystem {
        id: attributes.get("ID").map(str::to_string),
        frame,
        equinox: epoch_attribute(attributes, "equinox"),
        epoch: epoch_attribute(attributes, "epoch"),
        reference_position,
    }
}

fn metadata_batch(fields: &[ColumnMetadata]) -> Result<RecordBatch, VOTableError> {
    let mut name = StringBuilder::new();
    let mut datatype = StringBuilder::new();
    let mut ucd = StringBuilder::new();
    let mut unit = StringBuilder::new();
    let mut description = StringBuilder::new();

    for field in fields {
        name.append_value(&field.name);
        datatype.append_value(&field.datatype);
        ucd.append_option(field.ucd.as_deref());
        unit.append_option(field.unit.as_deref());
        description.append_option(field.description.as_deref());
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(name.finish()),
        Arc::new(datatype.finish()),
        Arc::new(ucd.finish()),
        Arc::new(unit.finish()),
        Arc::new(description.finish()),
    ];

    Ok(RecordBatch::try_new(create_metadata_schema_arc(), columns)?)
}
