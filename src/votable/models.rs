//! Data models for parsed VOTable documents

use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::datatype::{is_array, Datatype};
use super::error::DataError;
use crate::epoch::parse_epoch_string;
use crate::vocabulary::{ReferenceFrame, ReferencePosition};

/// Datatype assumed when a FIELD omits `datatype`
pub const DEFAULT_DATATYPE: &str = "char";

/// Descriptor of one table column, built from a FIELD element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name (`name` attribute, empty when absent)
    pub name: String,

    /// Raw declared datatype tag (`datatype` attribute, `char` when absent)
    pub datatype: String,

    /// Unified Content Descriptor
    pub ucd: Option<String>,

    /// Unit string
    pub unit: Option<String>,

    /// Text of the nested DESCRIPTION element
    pub description: Option<String>,

    /// `ID` attribute
    pub id: Option<String>,

    /// `arraysize` attribute
    pub arraysize: Option<String>,

    /// `ref` attribute, usually pointing at a COOSYS `ID`
    pub reference: Option<String>,

    /// `precision` attribute
    pub precision: Option<String>,

    /// `width` attribute
    pub width: Option<String>,
}

impl ColumnMetadata {
    /// Create a descriptor with a name and datatype tag
    pub fn new(name: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datatype: datatype.into(),
            ..Default::default()
        }
    }

    /// Resolved datatype
    pub fn kind(&self) -> Datatype {
        Datatype::from_tag(&self.datatype)
    }

    /// Whether cells hold several values (non-character `arraysize`)
    pub fn is_array(&self) -> bool {
        !self.kind().is_text() && is_array(self.arraysize.as_deref())
    }

    /// Arrow type of this column in the data table
    ///
    /// Array-valued numeric columns keep their raw cell text.
    pub fn arrow_type(&self) -> DataType {
        if self.is_array() {
            DataType::Utf8
        } else {
            self.kind().arrow_type()
        }
    }
}

/// Celestial coordinate system declared by a COOSYS element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    /// `ID` attribute, referenced by FIELD `ref`
    pub id: Option<String>,

    /// Reference frame (`system` attribute)
    pub frame: Option<ReferenceFrame>,

    /// Equinox instant (`equinox` attribute)
    pub equinox: Option<DateTime<Utc>>,

    /// Epoch of observation (`epoch` attribute)
    pub epoch: Option<DateTime<Utc>>,

    /// Reference position (`refposition` attribute)
    pub reference_position: Option<ReferencePosition>,
}

impl CoordinateSystem {
    /// Equinox, falling back to the frame's conventional one (B1950 for FK4, J2000 for FK5)
    pub fn effective_equinox(&self) -> Option<DateTime<Utc>> {
        self.equinox.or_else(|| {
            self.frame
                .and_then(|frame| frame.default_equinox())
                .and_then(|raw| parse_epoch_string(raw).ok())
        })
    }
}

/// A document-level INFO element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoEntry {
    /// `ID` attribute
    pub id: Option<String>,

    /// `name` attribute
    pub name: String,

    /// `value` attribute
    pub value: String,
}

/// Fully assembled result of parsing one VOTable document
#[derive(Debug, Clone)]
pub struct VOTable {
    pub(super) fields: Vec<ColumnMetadata>,
    pub(super) metadata: RecordBatch,
    pub(super) data: RecordBatch,
    pub(super) coordinate_system: Option<CoordinateSystem>,
    pub(super) description: Option<String>,
    pub(super) infos: Vec<InfoEntry>,
    pub(super) data_errors: Vec<DataError>,
    pub(super) binary_encoding: Option<String>,
}

impl VOTable {
    /// Field metadata table (`name, datatype, ucd, unit, description`), one row per FIELD
    pub fn metadata(&self) -> &RecordBatch {
        &self.metadata
    }

    /// Data table, one typed column per FIELD and one row per TR
    pub fn data(&self) -> &RecordBatch {
        &self.data
    }

    /// Column descriptors, in declaration order
    pub fn fields(&self) -> &[ColumnMetadata] {
        &self.fields
    }

    /// Coordinate system from the last matching COOSYS
    pub fn coordinate_system(&self) -> Option<&CoordinateSystem> {
        self.coordinate_system.as_ref()
    }

    /// Document-level DESCRIPTION text
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Document-level INFO elements
    pub fn infos(&self) -> &[InfoEntry] {
        &self.infos
    }

    /// Cell and row errors recovered under the lenient policy
    pub fn data_errors(&self) -> &[DataError] {
        &self.data_errors
    }

    /// `encoding` of a STREAM element, when the data was binary-serialized
    pub fn binary_encoding(&self) -> Option<&str> {
        self.binary_encoding.as_deref()
    }

    /// Number of data rows
    pub fn num_rows(&self) -> usize {
        self.data.num_rows()
    }

    /// Split into `(metadata table, data table, coordinate system, description)`
    pub fn into_parts(
        self,
    ) -> (
        RecordBatch,
        RecordBatch,
        Option<CoordinateSystem>,
        Option<String>,
    ) {
        (
            self.metadata,
            self.data,
            self.coordinate_system,
            self.description,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epoch::{from_besselian_epoch, from_julian_epoch};

    #[test]
    fn test_column_arrow_type() {
        assert_eq!(ColumnMetadata::new("ra", "double").arrow_type(), DataType::Float64);
        assert_eq!(ColumnMetadata::new("x", "mystery").arrow_type(), DataType::Utf8);

        let mut vector = ColumnMetadata::new("pm", "double");
        vector.arraysize = Some("2".to_string());
        assert!(vector.is_array());
        assert_eq!(vector.arrow_type(), DataType::Utf8);

        let mut name = ColumnMetadata::new("name", "char");
        name.arraysize = Some("*".to_string());
        assert!(!name.is_array());
        assert_eq!(name.arrow_type(), DataType::Utf8);
    }

    #[test]
    fn test_effective_equinox() {
        let fk4 = CoordinateSystem {
            frame: Some(ReferenceFrame::Fk4),
            ..Default::default()
        };
        assert_eq!(fk4.effective_equinox(), from_besselian_epoch(1950.0).ok());

        let explicit = CoordinateSystem {
            frame: Some(ReferenceFrame::Fk4),
            equinox: from_julian_epoch(2000.0).ok(),
            ..Default::default()
        };
        assert_eq!(explicit.effective_equinox(), explicit.equinox);

        let icrs = CoordinateSystem {
            frame: Some(ReferenceFrame::Icrs),
            ..Default::default()
        };
        assert_eq!(icrs.effective_equinox(), None);
    }

    #[test]
    fn test_coordinate_system_serializes() {
        let coosys = CoordinateSystem {
            id: Some("J2000".to_string()),
            frame: Some(ReferenceFrame::Fk5),
            reference_position: Some(ReferencePosition::Barycenter),
            ..Default::default()
        };
        let json = serde_json::to_value(&coosys).unwrap();
        assert_eq!(json["frame"], "FK5");
        assert_eq!(json["reference_position"], "BARYCENTER");
        assert!(json["equinox"].is_null());
    }
}
