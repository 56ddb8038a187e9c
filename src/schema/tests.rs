use super::*;
use crate::votable::ColumnMetadata;
use arrow::datatypes::DataType;

#[test]
fn test_metadata_schema_creation() {
    let schema = create_metadata_schema();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(names, columns::ALL);

    assert!(!schema.field_with_name(columns::NAME).unwrap().is_nullable());
    assert!(!schema.field_with_name(columns::DATATYPE).unwrap().is_nullable());
    assert!(schema.field_with_name(columns::UCD).unwrap().is_nullable());
    assert!(schema
        .fields()
        .iter()
        .all(|f| f.data_type() == &DataType::Utf8));
}

#[test]
fn test_data_schema_follows_declaration_order() {
    let fields = vec![
        ColumnMetadata::new("ra", "double"),
        ColumnMetadata::new("id", "long"),
        ColumnMetadata::new("name", "char"),
    ];
    let schema = create_data_schema(&fields);

    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(names, ["ra", "id", "name"]);
    assert_eq!(schema.field(0).data_type(), &DataType::Float64);
    assert_eq!(schema.field(1).data_type(), &DataType::Int64);
    assert_eq!(schema.field(2).data_type(), &DataType::Utf8);
}

#[test]
fn test_data_field_metadata() {
    let mut column = ColumnMetadata::new("ra", "double");
    column.ucd = Some("pos.eq.ra;meta.main".to_string());
    column.unit = Some("deg".to_string());
    column.reference = Some("J2000".to_string());

    let field = data_field(&column);
    let metadata = field.metadata();
    assert_eq!(metadata.get(KEY_DATATYPE).unwrap(), "double");
    assert_eq!(metadata.get(KEY_UCD).unwrap(), "pos.eq.ra;meta.main");
    assert_eq!(metadata.get(KEY_UNIT).unwrap(), "deg");
    assert_eq!(metadata.get(KEY_REF).unwrap(), "J2000");
    assert!(metadata.get(KEY_DESCRIPTION).is_none());
    assert!(field.is_nullable());
}
