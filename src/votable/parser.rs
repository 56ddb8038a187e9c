//! quick-xml driver for [`ParseContext`]

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};
use quick_xml::events::Event;
use quick_xml::Reader;

use super::config::ParserConfig;
use super::context::ParseContext;
use super::events::XmlEvent;
use super::models::VOTable;
use super::VOTableError;

/// Parser for VOTable documents
///
/// Each call to a `parse*` method uses a fresh [`ParseContext`], so one parser
/// can be reused (or shared across threads) for any number of documents.
#[derive(Debug, Clone, Default)]
pub struct VOTableParser {
    config: ParserConfig,
}

impl VOTableParser {
    /// Create a parser with the given configuration
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a complete in-memory document
    pub fn parse(&self, data: &[u8]) -> Result<VOTable, VOTableError> {
        self.parse_reader(data)
    }

    /// Parse a VOTable file
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<VOTable, VOTableError> {
        let path = path.as_ref();
        info!("Parsing VOTable {}", path.display());
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(self.config.input_buffer_size, file);
        self.parse_reader(reader)
    }

    /// Parse a document from any buffered reader
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<VOTable, VOTableError> {
        let mut reader = Reader::from_reader(reader);
        reader.config_mut().trim_text(false);

        let mut context = ParseContext::new(&self.config);
        let mut buf = Vec::new();
        let mut events = 0usize;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    context.handle(XmlEvent::from_start(e, reader.decoder())?)?;
                }
                Event::Empty(ref e) => {
                    let name = reader.decoder().decode(e.local_name().as_ref())?.into_owned();
                    context.handle(XmlEvent::from_start(e, reader.decoder())?)?;
                    context.handle(XmlEvent::End { name })?;
                }
                Event::End(ref e) => {
                    context.handle(XmlEvent::from_end(e, reader.decoder())?)?;
                }
                Event::Text(ref t) => {
                    context.handle(XmlEvent::Text(t.unescape()?.into_owned()))?;
                }
                Event::CData(ref c) => {
                    context.handle(XmlEvent::Text(reader.decoder().decode(c)?.into_owned()))?;
                }
                Event::Eof => break,
                _ => {}
            }
            events += 1;
            buf.clear();
        }

        debug!(
            "Tokenizer finished after {} events at byte {}",
            events,
            reader.buffer_position()
        );

        let table = context.finish()?;
        info!(
            "Parsed VOTable: {} fields, {} rows",
            table.fields().len(),
            table.num_rows()
        );
        Ok(table)
    }
}

/// Parse an in-memory document with the default configuration
pub fn parse(data: &[u8]) -> Result<VOTable, VOTableError> {
    VOTableParser::default().parse(data)
}
