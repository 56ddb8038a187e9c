/// Field metadata key: raw VOTable datatype tag
pub const KEY_DATATYPE: &str = "votable:datatype";

/// Field metadata key: Unified Content Descriptor
pub const KEY_UCD: &str = "votable:ucd";

/// Field metadata key: unit string
pub const KEY_UNIT: &str = "votable:unit";

/// Field metadata key: FIELD description text
pub const KEY_DESCRIPTION: &str = "votable:description";

/// Field metadata key: FIELD `ID` attribute
pub const KEY_ID: &str = "votable:id";

/// Field metadata key: FIELD `arraysize` attribute
pub const KEY_ARRAYSIZE: &str = "votable:arraysize";

/// Field metadata key: FIELD `ref` attribute (usually a COOSYS `ID`)
pub const KEY_REF: &str = "votable:ref";

/// Field metadata key: FIELD `precision` attribute
pub const KEY_PRECISION: &str = "votable:precision";

/// Field metadata key: FIELD `width` attribute
pub const KEY_WIDTH: &str = "votable:width";

/// Parquet footer key: document-level description
pub const KEY_TABLE_DESCRIPTION: &str = "votable:table_description";

/// Parquet footer key: coordinate system as JSON
pub const KEY_COORDINATE_SYSTEM: &str = "votable:coordinate_system";

/// Parquet footer key: field descriptors as JSON
pub const KEY_FIELDS: &str = "votable:fields";

/// Parquet footer key: document-level INFO entries as JSON
pub const KEY_INFOS: &str = "votable:infos";

/// Parquet footer key: conversion timestamp (RFC 3339)
pub const KEY_CONVERSION_TIMESTAMP: &str = "votable:conversion_timestamp";
