//! # votable - VOTable parsing for Rust
//!
//! `votable` reads VOTable documents, the IVOA XML interchange format for
//! tabular astronomical data, into Apache Arrow tables.
//!
//! ## Key Features
//!
//! - **Single pass**: one sequential pull-parse with quick-xml, driving an
//!   explicit per-document [`votable::ParseContext`] state machine.
//!
//! - **Typed columns**: every FIELD becomes an Arrow column of the native type
//!   for its `datatype` (`int` → Int32, `double` → Float64, `char` → Utf8, ...).
//!
//! - **Coordinate systems**: COOSYS declarations resolve to a
//!   [`vocabulary::ReferenceFrame`], a [`vocabulary::ReferencePosition`] and
//!   equinox/epoch instants (see [`epoch`]).
//!
//! - **Explicit data error policy**: unconvertible cells and ragged rows either
//!   abort the parse or are recorded and nulled, never silently misaligned.
//!
//! - **Parquet export**: [`writer`] stores the data table with its column and
//!   coordinate metadata in the file footer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use votable::votable::parse;
//!
//! let bytes = std::fs::read("catalog.vot")?;
//! let table = parse(&bytes)?;
//!
//! println!("{} columns, {} rows", table.fields().len(), table.num_rows());
//! if let Some(coosys) = table.coordinate_system() {
//!     println!("frame: {:?}", coosys.frame);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Result Tables
//!
//! ### Metadata table (one row per FIELD)
//!
//! | Column | Type | Required | Description |
//! |--------|------|----------|-------------|
//! | name | Utf8 | Yes | FIELD `name` (empty when absent) |
//! | datatype | Utf8 | Yes | FIELD `datatype` (`char` when absent) |
//! | ucd | Utf8 | No | Unified Content Descriptor |
//! | unit | Utf8 | No | Unit string |
//! | description | Utf8 | No | Nested DESCRIPTION text |
//!
//! ### Data table
//!
//! One nullable column per FIELD, in declaration order, one row per TR.
//! Column descriptors are attached as Arrow field metadata under `votable:*`
//! keys (see [`schema`]).

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod epoch;
pub mod path;
pub mod schema;
pub mod vocabulary;
pub mod votable;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::epoch::{parse_epoch_string, EpochError};
    pub use crate::path::{path_matches, ElementPath, PathPattern};
    pub use crate::vocabulary::{ReferenceFrame, ReferencePosition};
    pub use crate::votable::{
        parse, ColumnMetadata, CoordinateSystem, DataError, DataErrorPolicy, Datatype, InfoEntry,
        ParseContext, ParserConfig, VOTable, VOTableError, VOTableParser, XmlEvent,
    };
    pub use crate::writer::{write_parquet, write_parquet_file, WriterConfig, WriterError};
}
