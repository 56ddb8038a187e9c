//! VOTable datatypes and their native Arrow representation

use std::fmt;

use arrow::datatypes::DataType;
use serde::{Deserialize, Serialize};

/// Primitive datatype declared by a FIELD's `datatype` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Datatype {
    /// `boolean`
    Boolean,
    /// `bit`
    Bit,
    /// `unsignedByte`
    UnsignedByte,
    /// `short` (16-bit signed)
    Short,
    /// `int` (32-bit signed)
    Int,
    /// `long` (64-bit signed)
    Long,
    /// `char` (ASCII)
    Char,
    /// `unicodeChar`
    UnicodeChar,
    /// `float` (32-bit IEEE)
    Float,
    /// `double` (64-bit IEEE)
    Double,
    /// `floatComplex`
    FloatComplex,
    /// `doubleComplex`
    DoubleComplex,
    /// Any tag outside the VOTable vocabulary
    Unknown,
}

impl Datatype {
    /// Resolve a raw `datatype` attribute value
    pub fn from_tag(raw: &str) -> Self {
        match raw {
            "boolean" => Datatype::Boolean,
            "bit" => Datatype::Bit,
            "unsignedByte" => Datatype::UnsignedByte,
            "short" => Datatype::Short,
            "int" => Datatype::Int,
            "long" => Datatype::Long,
            "char" => Datatype::Char,
            "unicodeChar" => Datatype::UnicodeChar,
            "float" => Datatype::Float,
            "double" => Datatype::Double,
            "floatComplex" => Datatype::FloatComplex,
            "doubleComplex" => Datatype::DoubleComplex,
            _ => Datatype::Unknown,
        }
    }

    /// Canonical VOTable tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Datatype::Boolean => "boolean",
            Datatype::Bit => "bit",
            Datatype::UnsignedByte => "unsignedByte",
            Datatype::Short => "short",
            Datatype::Int => "int",
            Datatype::Long => "long",
            Datatype::Char => "char",
            Datatype::UnicodeChar => "unicodeChar",
            Datatype::Float => "float",
            Datatype::Double => "double",
            Datatype::FloatComplex => "floatComplex",
            Datatype::DoubleComplex => "doubleComplex",
            Datatype::Unknown => "unknown",
        }
    }

    /// Whether cells are character strings
    pub fn is_text(&self) -> bool {
        matches!(self, Datatype::Char | Datatype::UnicodeChar)
    }

    /// Arrow type of a scalar cell of this datatype
    ///
    /// Types without a native scalar mapping (bit strings, complex numbers,
    /// unknown tags) keep the raw cell text.
    pub fn arrow_type(&self) -> DataType {
        match self {
            Datatype::Boolean => DataType::Boolean,
            Datatype::UnsignedByte => DataType::UInt8,
            Datatype::Short => DataType::Int16,
            Datatype::Int => DataType::Int32,
            Datatype::Long => DataType::Int64,
            Datatype::Float => DataType::Float32,
            Datatype::Double => DataType::Float64,
            Datatype::Char
            | Datatype::UnicodeChar
            | Datatype::Bit
            | Datatype::FloatComplex
            | Datatype::DoubleComplex
            | Datatype::Unknown => DataType::Utf8,
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an `arraysize` attribute describes more than one value per cell
pub(crate) fn is_array(arraysize: Option<&str>) -> bool {
    match arraysize.map(str::trim) {
        None | Some("") | Some("1") => false,
        Some(_) => true,
    }
}
