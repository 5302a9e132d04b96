//! Record extraction from BIS XML documents.
//!
//! BIS responses wrap their payload in a few layers of envelope elements
//! that vary between endpoints. Rather than modelling the envelopes, we
//! stream the document and pick out every element with the record tag
//! (`STATION`, `ARRIVE`) wherever it appears, collecting the text of its
//! direct children keyed by tag name.
//!
//! Documents are read as raw bytes. Text is decoded with the encoding named
//! in the XML declaration (BIS servers may answer in EUC-KR without saying
//! so in `Content-Type`), falling back to UTF-8.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::Event;

use super::error::BisError;

/// The direct child fields of one record element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlRecord {
    fields: HashMap<String, String>,
}

impl XmlRecord {
    /// Text of a child element, if present. Empty elements yield `Some("")`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Collect all `record_tag` elements from a document, in document order.
///
/// Fails if the document is not well-formed (mismatched tags, a truncated
/// body, no root element) or its text cannot be decoded.
pub fn extract_records(xml: &[u8], record_tag: &str) -> Result<Vec<XmlRecord>, BisError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut saw_root = false;
    // Element depth across the whole document
    let mut depth = 0usize;
    // Depth at which the current record element was opened
    let mut record_depth: Option<usize> = None;
    let mut current = XmlRecord::default();
    let mut field: Option<String> = None;
    let mut text = String::new();

    loop {
        let event = reader.read_event().map_err(|e| BisError::Xml {
            message: format!("at byte {}: {e}", reader.buffer_position()),
        })?;

        match event {
            Event::Start(e) => {
                saw_root = true;
                depth += 1;
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();

                match record_depth {
                    None if name == record_tag => {
                        record_depth = Some(depth);
                        current = XmlRecord::default();
                    }
                    Some(rd) if depth == rd + 1 => {
                        field = Some(name);
                        text.clear();
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => {
                saw_root = true;
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();

                match record_depth {
                    None if name == record_tag => records.push(XmlRecord::default()),
                    Some(rd) if depth == rd => {
                        current.fields.insert(name, String::new());
                    }
                    _ => {}
                }
            }
            Event::Text(e) => {
                if field.is_some() && record_depth.is_some_and(|rd| depth == rd + 1) {
                    let unescaped = e.unescape().map_err(|e| BisError::Xml {
                        message: e.to_string(),
                    })?;
                    text.push_str(&unescaped);
                }
            }
            Event::CData(e) => {
                if field.is_some() && record_depth.is_some_and(|rd| depth == rd + 1) {
                    let decoded = e.decode().map_err(|e| BisError::Xml {
                        message: e.to_string(),
                    })?;
                    text.push_str(&decoded);
                }
            }
            Event::End(_) => {
                match record_depth {
                    Some(rd) if depth == rd => {
                        records.push(std::mem::take(&mut current));
                        record_depth = None;
                    }
                    Some(rd) if depth == rd + 1 => {
                        if let Some(name) = field.take() {
                            current.fields.insert(name, text.trim().to_string());
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(BisError::Xml {
            message: "document has no root element".to_string(),
        });
    }

    if depth != 0 {
        return Err(BisError::Xml {
            message: format!("unexpected end of document ({depth} unclosed elements)"),
        });
    }

    Ok(records)
}
