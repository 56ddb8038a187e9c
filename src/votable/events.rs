//! Owned XML events consumed by [`ParseContext`](super::ParseContext)
//!
//! The parser converts quick-xml's borrowed events into these owned values,
//! which also lets tests drive the state machine with fabricated sequences.

use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesEnd, BytesStart};

use super::VOTableError;

/// Attributes of an element start, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Value of the first attribute with this (local) name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(name, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// One tokenizer event, with namespace prefixes stripped from names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    /// Element start (self-closing elements produce a start and an end)
    Start {
        /// Local element name
        name: String,
        /// Attributes with unescaped values
        attributes: Attributes,
    },
    /// Element end
    End {
        /// Local element name
        name: String,
    },
    /// Character data fragment (text or CDATA), unescaped
    Text(String),
}

impl XmlEvent {
    /// Build a start event
    pub fn start<'a>(name: &str, attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        XmlEvent::Start {
            name: name.to_string(),
            attributes: attributes.into_iter().collect(),
        }
    }

    /// Build an end event
    pub fn end(name: &str) -> Self {
        XmlEvent::End {
            name: name.to_string(),
        }
    }

    /// Build a character data event
    pub fn text(text: &str) -> Self {
        XmlEvent::Text(text.to_string())
    }

    /// Convert a quick-xml start tag
    pub(super) fn from_start(e: &BytesStart, decoder: Decoder) -> Result<Self, VOTableError> {
        let name = decoder.decode(e.local_name().as_ref())?.into_owned();

        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|e| VOTableError::XmlError(quick_xml::Error::from(e)))?;
            let key = decoder.decode(attr.key.local_name().as_ref())?.into_owned();
            let value = attr.decode_and_unescape_value(decoder)?.into_owned();
            attributes.push((key, value));
        }

        Ok(XmlEvent::Start {
            name,
            attributes: Attributes(attributes),
        })
    }

    /// Convert a quick-xml end tag
    pub(super) fn from_end(e: &BytesEnd, decoder: Decoder) -> Result<Self, VOTableError> {
        let name = decoder.decode(e.local_name().as_ref())?.into_owned();
        Ok(XmlEvent::End { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_lookup() {
        let attributes: Attributes = [("name", "ra"), ("datatype", "double"), ("name", "dup")]
            .into_iter()
            .collect();
        assert_eq!(attributes.get("name"), Some("ra"));
        assert_eq!(attributes.get("unit"), None);
        assert_eq!(attributes.len(), 3);
    }

    #[test]
    fn test_from_quick_xml_strips_prefixes() {
        let mut reader = quick_xml::Reader::from_str(
            r#"<vot:FIELD xmlns:vot="http://www.ivoa.net/xml/VOTable/v1.3" vot:name="a&amp;b" datatype="int"></vot:FIELD>"#,
        );
        let event = match reader.read_event().unwrap() {
            quick_xml::events::Event::Start(e) => {
                XmlEvent::from_start(&e, reader.decoder()).unwrap()
            }
            other => panic!("unexpected event {other:?}"),
        };

        match event {
            XmlEvent::Start { name, attributes } => {
                assert_eq!(name, "FIELD");
                assert_eq!(attributes.get("name"), Some("a&b"));
                assert_eq!(attributes.get("datatype"), Some("int"));
            }
            other => panic!("unexpected event {other:?}"),
        }

        let end = match reader.read_event().unwrap() {
            quick_xml::events::Event::End(e) => XmlEvent::from_end(&e, reader.decoder()).unwrap(),
            other => panic!("unexpected event {other:?}"),
        };
        assert_eq!(end, XmlEvent::end("FIELD"));
    }
}
