use serde::Serialize;

/// Errors that can occur during VOTable parsing
#[derive(Debug, thiserror::Error)]
pub enum VOTableError {
    /// The tokenizer rejected the document as malformed XML
    #[error("XML parsing failed: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// Input ended while elements were still open
    #[error("XML parsing failed: document ended inside <{path}>")]
    Truncated {
        /// Path of the innermost open element
        path: String,
    },

    /// An end tag does not close the innermost open element
    #[error("XML parsing failed: expected </{expected}>, found </{found}>")]
    MismatchedEnd {
        /// Name of the innermost open element
        expected: String,
        /// Name carried by the end event
        found: String,
    },

    /// Input contained no root element
    #[error("XML parsing failed: document has no root element")]
    EmptyDocument,

    /// I/O error while reading the input
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Bytes not valid in the document encoding (names, attribute keys, CDATA)
    #[error("XML parsing failed: {0}")]
    EncodingError(#[from] quick_xml::encoding::EncodingError),

    /// A second root element follows the first one
    #[error("XML parsing failed: second root element <{name}>")]
    MultipleRoots {
        /// Name of the extra root element
        name: String,
    },

    /// A cell or row did not fit the declared columns (strict policy)
    #[error("Table data error: {0}")]
    DataError(#[from] DataError),

    /// Arrow rejected the assembled table
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),
}

impl VOTableError {
    /// Whether the document itself could not be read as well-formed XML
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            VOTableError::XmlError(_)
                | VOTableError::Truncated { .. }
                | VOTableError::MismatchedEnd { .. }
                | VOTableError::EmptyDocument
                | VOTableError::EncodingError(_)
                | VOTableError::MultipleRoots { .. }
        )
    }
}

/// A TABLEDATA cell or row that does not fit the declared FIELDs
///
/// Row indices are 0-based and count TR elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum DataError {
    /// Cell text cannot be converted to the column's datatype
    #[error("row {row}, column {column:?}: cannot convert {value:?} to {datatype}")]
    InvalidCell {
        /// Row index
        row: usize,
        /// Column name
        column: String,
        /// Declared datatype tag
        datatype: String,
        /// Raw (trimmed) cell text
        value: String,
    },

    /// Row has a different number of cells than there are FIELDs
    #[error("row {row}: expected {expected} cells, found {found}")]
    RowArity {
        /// Row index
        row: usize,
        /// Number of FIELDs
        expected: usize,
        /// Number of TD cells
        found: usize,
    },
}

impl DataError {
    /// Row the error occurred in
    pub fn row(&self) -> usize {
        match self {
            DataError::InvalidCell { row, .. } | DataError::RowArity { row, .. } => *row,
        }
    }
}
