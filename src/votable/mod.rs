//! # VOTable Parser Module
//!
//! Event-driven parsing of VOTable documents, the IVOA XML format for
//! tabular astronomical data, into a column-metadata table, a typed data
//! table, and the document's coordinate system and description.
//!
//! ## VOTable Structure
//!
//! ```text
//! VOTABLE
//! ├── DESCRIPTION (document description)
//! ├── COOSYS (coordinate system, accepted here)
//! ├── DEFINITIONS (deprecated)
//! │   └── COOSYS (accepted here)
//! ├── INFO*
//! └── RESOURCE
//!     ├── INFO*
//!     └── TABLE (only the first is read)
//!         ├── FIELD*
//!         │   └── DESCRIPTION (column description)
//!         └── DATA
//!             ├── TABLEDATA
//!             │   └── TR*
//!             │       └── TD*
//!             └── BINARY | BINARY2 | FITS
//!                 └── STREAM (encoding recorded, content not decoded)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use votable::votable::{ParserConfig, VOTableParser};
//!
//! let parser = VOTableParser::new(ParserConfig::lenient());
//! let table = parser.parse_file("catalog.vot")?;
//!
//! for field in table.fields() {
//!     println!("{} ({})", field.name, field.datatype);
//! }
//! println!("{} rows", table.num_rows());
//! # Ok::<(), votable::votable::VOTableError>(())
//! ```
//!
//! The state machine is exposed as [`ParseContext`] so that callers with
//! their own tokenizer can drive it with [`XmlEvent`]s directly.

mod columns;
mod config;
mod context;
mod datatype;
mod error;
mod events;
mod models;
mod parser;


pub use config::{DataErrorPolicy, ParserConfig, DEFAULT_COOSYS_PATHS, DEFAULT_INPUT_BUFFER_SIZE};
pub use context::{elements, ParseContext};
pub use datatype::Datatype;
pub use error::{DataError, VOTableError};
pub use events::{Attributes, XmlEvent};
pub use models::{ColumnMetadata, CoordinateSystem, InfoEntry, VOTable, DEFAULT_DATATYPE};
pub use parser::{parse, VOTableParser};
