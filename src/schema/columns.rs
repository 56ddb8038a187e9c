//! Column names of the field metadata table

/// FIELD `name` attribute
pub const NAME: &str = "name";
/// FIELD `datatype` attribute (raw VOTable tag)
pub const DATATYPE: &str = "datatype";
/// FIELD `ucd` attribute (Unified Content Descriptor)
pub const UCD: &str = "ucd";
/// FIELD `unit` attribute
pub const UNIT: &str = "unit";
/// Text of the FIELD's nested `DESCRIPTION`
pub const DESCRIPTION: &str = "description";

/// All metadata table columns, in schema order
pub const ALL: [&str; 5] = [NAME, DATATYPE, UCD, UNIT, DESCRIPTION];
