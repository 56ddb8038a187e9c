use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaBuilder};

use super::columns;
use super::constants::{
    KEY_ARRAYSIZE, KEY_DATATYPE, KEY_DESCRIPTION, KEY_ID, KEY_PRECISION, KEY_REF, KEY_UCD,
    KEY_UNIT, KEY_WIDTH,
};
use crate::votable::ColumnMetadata;

/// Creates the schema of the field metadata table.
///
/// One row per FIELD, in declaration order. `name` and `datatype` are always
/// present (FIELD defaults fill them in); the rest are nullable.
///
/// # Example
///
/// ```
/// use votable::schema::{columns, create_metadata_schema};
///
/// let schema = create_metadata_schema();
/// assert_eq!(schema.fields().len(), 5);
/// assert_eq!(schema.field(0).name(), columns::NAME);
/// ```
pub fn create_metadata_schema() -> Schema {
    let mut builder = SchemaBuilder::new();

    builder.push(Field::new(columns::NAME, DataType::Utf8, false));
    builder.push(Field::new(columns::DATATYPE, DataType::Utf8, false));
    builder.push(Field::new(columns::UCD, DataType::Utf8, true));
    builder.push(Field::new(columns::UNIT, DataType::Utf8, true));
    builder.push(Field::new(columns::DESCRIPTION, DataType::Utf8, true));

    builder.finish()
}

/// Creates the field metadata table schema wrapped in an Arc
pub fn create_metadata_schema_arc() -> Arc<Schema> {
    Arc::new(create_metadata_schema())
}

/// Creates the Arrow field for one VOTable column.
///
/// The column is always nullable; the VOTable attributes are attached as
/// field metadata under `votable:*` keys.
pub fn data_field(column: &ColumnMetadata) -> Field {
    let mut metadata = HashMap::new();
    metadata.insert(KEY_DATATYPE.to_string(), column.datatype.clone());

    let optional = [
        (KEY_UCD, &column.ucd),
        (KEY_UNIT, &column.unit),
        (KEY_DESCRIPTION, &column.description),
        (KEY_ID, &column.id),
        (KEY_ARRAYSIZE, &column.arraysize),
        (KEY_REF, &column.reference),
        (KEY_PRECISION, &column.precision),
        (KEY_WIDTH, &column.width),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            metadata.insert(key.to_string(), value.clone());
        }
    }

    Field::new(&column.name, column.arrow_type(), true).with_metadata(metadata)
}

/// Creates the data table schema: one field per column, in declaration order
pub fn create_data_schema(columns: &[ColumnMetadata]) -> Schema {
    Schema::new(columns.iter().map(data_field).collect::<Vec<_>>())
}

/// Creates the data table schema wrapped in an Arc
pub fn create_data_schema_arc(columns: &[ColumnMetadata]) -> Arc<Schema> {
    Arc::new(create_data_schema(columns))
}
