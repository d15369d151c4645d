//! Minimal single-element XML attribute reader.
//!
//! Just enough XML to round-trip the frame descriptors at the head of each
//! `.trpx` record: scan a byte buffer for a named opening tag (skipping
//! comments and CDATA sections), capture its attributes up to the closing
//! `>` or `/>`, and for non-self-closing elements capture the body up to the
//! matching close tag. Everything after the element — typically binary
//! payload — is reachable through [`XmlElement::end_offset`].
//!
//! Robustness against arbitrary XML is explicitly not a goal.

use crate::error::{Result, TerseError};

/// A parsed XML element: tag, attributes and (possibly empty) body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    tag: String,
    attributes: Vec<(String, String)>,
    body: String,
    end: usize,
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b':' | b'.')
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if haystack.len() < needle.len() {
        return None;
    }
    (from..=haystack.len() - needle.len()).find(|&i| &haystack[i..i + needle.len()] == needle)
}

impl XmlElement {
    /// Scan `data` for the first element named `tag`.
    ///
    /// Returns `Ok(None)` when no such element occurs. Comments and CDATA
    /// sections are skipped; an opening tag that never closes is an error.
    pub fn scan(data: &[u8], tag: &str) -> Result<Option<XmlElement>> {
        let mut i = 0;
        while let Some(lt) = find(data, b"<", i) {
            if data[lt..].starts_with(b"<!--") {
                match find(data, b"-->", lt + 4) {
                    Some(end) => {
                        i = end + 3;
                        continue;
                    }
                    None => return Ok(None),
                }
            }
            if data[lt..].starts_with(b"<![CDATA[") {
                match find(data, b"]]>", lt + 9) {
                    Some(end) => {
                        i = end + 3;
                        continue;
                    }
                    None => return Ok(None),
                }
            }
            let name_start = lt + 1;
            let mut name_end = name_start;
            while name_end < data.len() && is_name_byte(data[name_end]) {
                name_end += 1;
            }
            let boundary_ok = name_end == data.len()
                || data[name_end].is_ascii_whitespace()
                || data[name_end] == b'/'
                || data[name_end] == b'>';
            if &data[name_start..name_end] != tag.as_bytes() || !boundary_ok {
                i = lt + 1;
                continue;
            }
            return Self::capture(data, tag, name_end).map(Some);
        }
        Ok(None)
    }

    /// Capture an element whose attribute list starts at `pos`.
    fn capture(data: &[u8], tag: &str, pos: usize) -> Result<XmlElement> {
        // Find the closing '>' of the opening tag, honouring quoted values.
        let mut k = pos;
        let mut quote: Option<u8> = None;
        loop {
            let b = *data
                .get(k)
                .ok_or_else(|| TerseError::BadDescriptor(format!("unterminated <{tag}> tag")))?;
            match quote {
                Some(q) => {
                    if b == q {
                        quote = None;
                    }
                }
                None => {
                    if b == b'"' || b == b'\'' {
                        quote = Some(b);
                    } else if b == b'>' {
                        break;
                    }
                }
            }
            k += 1;
        }
        let self_closing = k > pos && data[k - 1] == b'/';
        let attr_span = if self_closing {
            &data[pos..k - 1]
        } else {
            &data[pos..k]
        };
        let attributes = parse_attributes(attr_span)?;
        if self_closing {
            return Ok(XmlElement {
                tag: tag.to_string(),
                attributes,
                body: String::new(),
                end: k + 1,
            });
        }

        // Find the matching close tag and capture the body verbatim.
        let close = format!("</{tag}");
        let body_start = k + 1;
        let close_start = find(data, close.as_bytes(), body_start)
            .ok_or_else(|| TerseError::BadDescriptor(format!("missing </{tag}> close tag")))?;
        let mut close_end = close_start + close.len();
        while close_end < data.len() && data[close_end].is_ascii_whitespace() {
            close_end += 1;
        }
        if data.get(close_end) != Some(&b'>') {
            return Err(TerseError::BadDescriptor(format!(
                "malformed </{tag}> close tag"
            )));
        }
        Ok(XmlElement {
            tag: tag.to_string(),
            attributes,
            body: String::from_utf8_lossy(&data[body_start..close_start]).into_owned(),
            end: close_end + 1,
        })
    }

    /// The element's tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in document order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// The element body, empty for self-closing elements.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Offset just past the element in the scanned buffer.
    ///
    /// For a self-closing descriptor this is where binary payload begins.
    pub fn end_offset(&self) -> usize {
        self.end
    }
}

/// Parse `name="value"` pairs, tolerant of whitespace, ordering and the
/// occasional separating comma.
fn parse_attributes(span: &[u8]) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    let mut i = 0;
    loop {
        while i < span.len() && (span[i].is_ascii_whitespace() || span[i] == b',') {
            i += 1;
        }
        if i >= span.len() {
            return Ok(out);
        }
        let name_start = i;
        while i < span.len() && is_name_byte(span[i]) {
            i += 1;
        }
        if i == name_start {
            return Err(TerseError::BadDescriptor(format!(
                "invalid attribute syntax near byte {i}"
            )));
        }
        let name = String::from_utf8_lossy(&span[name_start..i]).into_owned();
        while i < span.len() && span[i].is_ascii_whitespace() {
            i += 1;
        }
        if span.get(i) != Some(&b'=') {
            return Err(TerseError::BadDescriptor(format!(
                "attribute {name} has no value"
            )));
        }
        i += 1;
        while i < span.len() && span[i].is_ascii_whitespace() {
            i += 1;
        }
        let quote = match span.get(i) {
            Some(&q @ (b'"' | b'\'')) => q,
            _ => {
                return Err(TerseError::BadDescriptor(format!(
                    "attribute {name} is not quoted"
                )))
            }
        };
        i += 1;
        let value_start = i;
        while i < span.len() && span[i] != quote {
            i += 1;
        }
        if i >= span.len() {
            return Err(TerseError::BadDescriptor(format!(
                "attribute {name} has an unterminated value"
            )));
        }
        out.push((
            name,
            String::from_utf8_lossy(&span[value_start..i]).into_owned(),
        ));
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_closing_with_attributes() {
        let xml = br#"<Terse prolix_bits="16" signed="0" block="12"/>PAYLOAD"#;
        let elem = XmlElement::scan(xml, "Terse").unwrap().unwrap();
        assert_eq!(elem.tag(), "Terse");
        assert_eq!(elem.attribute("prolix_bits"), Some("16"));
        assert_eq!(elem.attribute("signed"), Some("0"));
        assert_eq!(elem.attribute("block"), Some("12"));
        assert_eq!(elem.attribute("missing"), None);
        assert_eq!(&xml[elem.end_offset()..], b"PAYLOAD");
    }

    #[test]
    fn test_attribute_order_and_whitespace() {
        let xml = b"<Terse  block = \"8\" ,\n prolix_bits='32' />";
        let elem = XmlElement::scan(xml, "Terse").unwrap().unwrap();
        assert_eq!(elem.attribute("block"), Some("8"));
        assert_eq!(elem.attribute("prolix_bits"), Some("32"));
    }

    #[test]
    fn test_body_capture() {
        let xml = b"<Outer a=\"1\"><Inner/></Outer>";
        let elem = XmlElement::scan(xml, "Outer").unwrap().unwrap();
        assert_eq!(elem.body(), "<Inner/>");
        assert_eq!(elem.end_offset(), xml.len());

        let inner = XmlElement::scan(xml, "Inner").unwrap().unwrap();
        assert_eq!(inner.attributes().len(), 0);
    }

    #[test]
    fn test_comments_and_cdata_skipped() {
        let xml = b"<!-- <Terse fake=\"1\"/> --><![CDATA[<Terse fake=\"2\"/>]]><Terse real=\"3\"/>";
        let elem = XmlElement::scan(xml, "Terse").unwrap().unwrap();
        assert_eq!(elem.attribute("real"), Some("3"));
        assert_eq!(elem.attribute("fake"), None);
    }

    #[test]
    fn test_tag_name_must_match_exactly() {
        let xml = b"<TerseStack x=\"1\"/><Terse y=\"2\"/>";
        let elem = XmlElement::scan(xml, "Terse").unwrap().unwrap();
        assert_eq!(elem.attribute("y"), Some("2"));
    }

    #[test]
    fn test_missing_element() {
        assert_eq!(XmlElement::scan(b"no tags here", "Terse").unwrap(), None);
        assert_eq!(XmlElement::scan(b"<Other/>", "Terse").unwrap(), None);
    }

    #[test]
    fn test_quoted_gt_does_not_close_tag() {
        let xml = br#"<Terse note="a > b" n="5"/>"#;
        let elem = XmlElement::scan(xml, "Terse").unwrap().unwrap();
        assert_eq!(elem.attribute("note"), Some("a > b"));
        assert_eq!(elem.attribute("n"), Some("5"));
    }

    #[test]
    fn test_malformed_tags_error() {
        assert!(XmlElement::scan(b"<Terse a=\"1\"", "Terse").is_err());
        assert!(XmlElement::scan(b"<Terse a=1/>", "Terse").is_err());
        assert!(XmlElement::scan(b"<Terse a>...", "Terse").is_err());
    }
}
