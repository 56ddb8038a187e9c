//! Typed Arrow column builders fed with raw TABLEDATA cell text

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanBuilder, Float32Builder, Float64Builder, Int16Builder, Int32Builder,
    Int64Builder, StringBuilder, UInt8Builder,
};
use arrow::datatypes::DataType;

use super::error::DataError;
use super::models::ColumnMetadata;

/// Cell text that does not parse as the column's type
#[derive(Debug)]
struct InvalidCell;

fn parse_bool(raw: &str) -> Result<Option<bool>, InvalidCell> {
    match raw {
        "" | "?" => Ok(None),
        "1" => Ok(Some(true)),
        "0" => Ok(Some(false)),
        _ if raw.eq_ignore_ascii_case("t") || raw.eq_ignore_ascii_case("true") => Ok(Some(true)),
        _ if raw.eq_ignore_ascii_case("f") || raw.eq_ignore_ascii_case("false") => Ok(Some(false)),
        _ => Err(InvalidCell),
    }
}

/// Integers are decimal with an optional sign, or `0x`-prefixed hexadecimal
fn parse_int<T>(raw: &str) -> Result<Option<T>, InvalidCell>
where
    T: TryFrom<i128>,
{
    if raw.is_empty() {
        return Ok(None);
    }

    let (negative, digits) = match raw.as_bytes()[0] {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };

    let (radix, body) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, digits),
    };
    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return Err(InvalidCell);
    }
    let magnitude = i128::from_str_radix(body, radix).map_err(|_| InvalidCell)?;

    let value = if negative { -magnitude } else { magnitude };
    T::try_from(value).map(Some).map_err(|_| InvalidCell)
}

/// Floats accept Rust syntax, which covers `NaN`, `Inf`, `+Inf` and `-Inf`
fn parse_float<T: std::str::FromStr>(raw: &str) -> Result<Option<T>, InvalidCell> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| InvalidCell)
}

enum ColumnBuilder {
    Boolean(BooleanBuilder),
    UInt8(UInt8Builder),
    Int16(Int16Builder),
    Int32(Int32Builder),
    Int64(Int64Builder),
    Float32(Float32Builder),
    Float64(Float64Builder),
    Utf8(StringBuilder),
}

impl ColumnBuilder {
    fn for_type(data_type: &DataType) -> Self {
        match data_type {
            DataType::Boolean => ColumnBuilder::Boolean(BooleanBuilder::new()),
            DataType::UInt8 => ColumnBuilder::UInt8(UInt8Builder::new()),
            DataType::Int16 => ColumnBuilder::Int16(Int16Builder::new()),
            DataType::Int32 => ColumnBuilder::Int32(Int32Builder::new()),
            DataType::Int64 => ColumnBuilder::Int64(Int64Builder::new()),
            DataType::Float32 => ColumnBuilder::Float32(Float32Builder::new()),
            DataType::Float64 => ColumnBuilder::Float64(Float64Builder::new()),
            _ => ColumnBuilder::Utf8(StringBuilder::new()),
        }
    }

    /// Parse before appending so a rejected cell leaves the builder untouched
    fn append(&mut self, raw: &str) -> Result<(), InvalidCell> {
        match self {
            ColumnBuilder::Boolean(b) => b.append_option(parse_bool(raw)?),
            ColumnBuilder::UInt8(b) => b.append_option(parse_int::<u8>(raw)?),
            ColumnBuilder::Int16(b) => b.append_option(parse_int::<i16>(raw)?),
            ColumnBuilder::Int32(b) => b.append_option(parse_int::<i32>(raw)?),
            ColumnBuilder::Int64(b) => b.append_option(parse_int::<i64>(raw)?),
            ColumnBuilder::Float32(b) => b.append_option(parse_float::<f32>(raw)?),
            ColumnBuilder::Float64(b) => b.append_option(parse_float::<f64>(raw)?),
            ColumnBuilder::Utf8(b) => b.append_value(raw),
        }
        Ok(())
    }

    fn append_null(&mut self) {
        match self {
            ColumnBuilder::Boolean(b) => b.append_null(),
            ColumnBuilder::UInt8(b) => b.append_null(),
            ColumnBuilder::Int16(b) => b.append_null(),
            ColumnBuilder::Int32(b) => b.append_null(),
            ColumnBuilder::Int64(b) => b.append_null(),
            ColumnBuilder::Float32(b) => b.append_null(),
            ColumnBuilder::Float64(b) => b.append_null(),
            ColumnBuilder::Utf8(b) => b.append_null(),
        }
    }

    fn finish(&mut self) -> ArrayRef {
        match self {
            ColumnBuilder::Boolean(b) => Arc::new(b.finish()),
            ColumnBuilder::UInt8(b) => Arc::new(b.finish()),
            ColumnBuilder::Int16(b) => Arc::new(b.finish()),
            ColumnBuilder::Int32(b) => Arc::new(b.finish()),
            ColumnBuilder::Int64(b) => Arc::new(b.finish()),
            ColumnBuilder::Float32(b) => Arc::new(b.finish()),
            ColumnBuilder::Float64(b) => Arc::new(b.finish()),
            ColumnBuilder::Utf8(b) => Arc::new(b.finish()),
        }
    }
}

struct TypedColumn {
    name: String,
    datatype: String,
    builder: ColumnBuilder,
}

/// Column builders for the data table, one per FIELD in declaration order
pub(crate) struct TableColumns {
    columns: Vec<TypedColumn>,
    rows: usize,
}

impl TableColumns {
    pub(crate) fn new(fields: &[ColumnMetadata]) -> Self {
        let columns = fields
            .iter()
            .map(|field| TypedColumn {
                name: field.name.clone(),
                datatype: field.datatype.clone(),
                builder: ColumnBuilder::for_type(&field.arrow_type()),
            })
            .collect();

        Self { columns, rows: 0 }
    }

    /// Number of rows appended so far
    pub(crate) fn num_rows(&self) -> usize {
        self.rows
    }

    /// Append one row of trimmed cell text.
    ///
    /// Every column receives exactly one value: unconvertible and missing
    /// cells become null, surplus cells are dropped. The returned errors
    /// describe each such substitution.
    pub(crate) fn append_row(&mut self, cells: &[String]) -> Vec<DataError> {
        let row = self.rows;
        let mut errors = Vec::new();

        if cells.len() != self.columns.len() {
            errors.push(DataError::RowArity {
                row,
                expected: self.columns.len(),
                found: cells.len(),
            });
        }

        for (i, column) in self.columns.iter_mut().enumerate() {
            match cells.get(i) {
                Some(raw) => {
                    if column.builder.append(raw).is_err() {
                        column.builder.append_null();
                        errors.push(DataError::InvalidCell {
                            row,
                            column: column.name.clone(),
                            datatype: column.datatype.clone(),
                            value: raw.clone(),
                        });
                    }
                }
                None => column.builder.append_null(),
            }
        }

        self.rows += 1;
        errors
    }

    /// Finish every builder into an Arrow array
    pub(crate) fn finish(&mut self) -> Vec<ArrayRef> {
        self.columns.iter_mut().map(|c| c.builder.finish()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, AsArray};
    use arrow::datatypes::{Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, UInt8Type};

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_parse_bool() {
        for raw in ["T", "t", "true", "TRUE", "1"] {
            assert_eq!(parse_bool(raw).unwrap(), Some(true), "{raw}");
        }
        for raw in ["F", "f", "false", "False", "0"] {
            assert_eq!(parse_bool(raw).unwrap(), Some(false), "{raw}");
        }
        assert_eq!(parse_bool("?").unwrap(), None);
        assert_eq!(parse_bool("").unwrap(), None);
        assert!(parse_bool("yes").is_err());
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int::<i32>("42").unwrap(), Some(42));
        assert_eq!(parse_int::<i32>("-42").unwrap(), Some(-42));
        assert_eq!(parse_int::<i32>("+7").unwrap(), Some(7));
        assert_eq!(parse_int::<i16>("0x7FFF").unwrap(), Some(i16::MAX));
        assert_eq!(parse_int::<i64>("-0x10").unwrap(), Some(-16));
        assert_eq!(parse_int::<u8>("255").unwrap(), Some(255));
        assert_eq!(parse_int::<u8>("").unwrap(), None);
        assert!(parse_int::<u8>("256").is_err());
        assert!(parse_int::<u8>("-1").is_err());
        assert!(parse_int::<i16>("40000").is_err());
        assert!(parse_int::<i32>("1.5").is_err());
        assert!(parse_int::<i32>("--1").is_err());
        assert!(parse_int::<i32>("+-1").is_err());
        assert!(parse_int::<i32>("abc").is_err());
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float::<f64>("1.5e3").unwrap(), Some(1500.0));
        assert!(parse_float::<f64>("NaN").unwrap().unwrap().is_nan());
        assert_eq!(parse_float::<f32>("-Inf").unwrap(), Some(f32::NEG_INFINITY));
        assert_eq!(parse_float::<f32>("+Inf").unwrap(), Some(f32::INFINITY));
        assert_eq!(parse_float::<f64>("").unwrap(), None);
        assert!(parse_float::<f64>("12,5").is_err());
    }

    #[test]
    fn test_typed_columns() {
        let fields = vec![
            ColumnMetadata::new("flag", "boolean"),
            ColumnMetadata::new("b", "unsignedByte"),
            ColumnMetadata::new("s", "short"),
            ColumnMetadata::new("i", "int"),
            ColumnMetadata::new("l", "long"),
            ColumnMetadata::new("f", "float"),
            ColumnMetadata::new("d", "double"),
            ColumnMetadata::new("name", "char"),
        ];
        let mut table = TableColumns::new(&fields);
        assert!(table
            .append_row(&row(&["T", "7", "-3", "100", "9000000000", "1.5", "2.25", "Vega"]))
            .is_empty());
        assert!(table.append_row(&row(&["", "", "", "", "", "", "", ""])).is_empty());
        assert_eq!(table.num_rows(), 2);

        let arrays = table.finish();
        assert_eq!(arrays.len(), 8);
        assert!(arrays[0].as_boolean().value(0));
        assert_eq!(arrays[1].as_primitive::<UInt8Type>().value(0), 7);
        assert_eq!(arrays[2].as_primitive::<Int16Type>().value(0), -3);
        assert_eq!(arrays[3].as_primitive::<Int32Type>().value(0), 100);
        assert_eq!(arrays[4].as_primitive::<Int64Type>().value(0), 9_000_000_000);
        assert_eq!(arrays[5].as_primitive::<Float32Type>().value(0), 1.5);
        assert_eq!(arrays[6].as_primitive::<Float64Type>().value(0), 2.25);
        assert_eq!(arrays[7].as_string::<i32>().value(0), "Vega");

        for array in &arrays[..7] {
            assert!(array.is_null(1));
        }
        assert!(arrays[7].is_valid(1));
        assert_eq!(arrays[7].as_string::<i32>().value(1), "");
    }

    #[test]
    fn test_invalid_cell_becomes_null() {
        let fields = vec![ColumnMetadata::new("n", "int"), ColumnMetadata::new("x", "double")];
        let mut table = TableColumns::new(&fields);

        let errors = table.append_row(&row(&["twelve", "1.0"]));
        assert_eq!(
            errors,
            vec![DataError::InvalidCell {
                row: 0,
                column: "n".to_string(),
                datatype: "int".to_string(),
                value: "twelve".to_string(),
            }]
        );

        let arrays = table.finish();
        assert!(arrays[0].is_null(0));
        assert_eq!(arrays[1].as_primitive::<Float64Type>().value(0), 1.0);
    }

    #[test]
    fn test_arity_mismatch_keeps_columns_aligned() {
        let fields = vec![ColumnMetadata::new("a", "int"), ColumnMetadata::new("b", "int")];
        let mut table = TableColumns::new(&fields);

        let short = table.append_row(&row(&["1"]));
        assert_eq!(
            short,
            vec![DataError::RowArity {
                row: 0,
                expected: 2,
                found: 1
            }]
        );
        let long = table.append_row(&row(&["2", "3", "4"]));
        assert_eq!(long[0].row(), 1);

        let arrays = table.finish();
        assert_eq!(arrays[0].len(), 2);
        assert_eq!(arrays[1].len(), 2);
        assert!(arrays[1].is_null(0));
        assert_eq!(arrays[1].as_primitive::<Int32Type>().value(1), 3);
    }
}
