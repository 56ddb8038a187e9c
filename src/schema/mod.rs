//! # Table Schemas
//!
//! Apache Arrow schemas for the two tables a parsed VOTable yields.
//!
//! ## Field metadata table
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | name | Utf8 | FIELD `name` (empty when absent) |
//! | datatype | Utf8 | FIELD `datatype` (`char` when absent) |
//! | ucd | Utf8 (nullable) | Unified Content Descriptor |
//! | unit | Utf8 (nullable) | Unit string |
//! | description | Utf8 (nullable) | Nested `DESCRIPTION` text |
//!
//! ## Data table
//!
//! One nullable column per FIELD, typed by its datatype:
//!
//! | VOTable datatype | Arrow type |
//! |------------------|------------|
//! | boolean | Boolean |
//! | unsignedByte | UInt8 |
//! | short | Int16 |
//! | int | Int32 |
//! | long | Int64 |
//! | float | Float32 |
//! | double | Float64 |
//! | char, unicodeChar | Utf8 |
//! | bit, complex types, arrays, unknown | Utf8 (raw cell text) |
//!
//! Each data field carries its VOTable attributes as `votable:*` metadata.

mod builders;
/// Field metadata table column name constants.
pub mod columns;
mod constants;

#[cfg(test)]
mod tests;

pub use builders::{
    create_data_schema, create_data_schema_arc, create_metadata_schema,
    create_metadata_schema_arc, data_field,
};
pub use constants::*;
