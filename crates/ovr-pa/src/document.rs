//! Ordered XML element tree.
//!
//! The PA API trades XML documents wrapped in a JSON string envelope: replies
//! are a JSON-encoded string holding the XML, and a submission body is
//! `{"ApplicationData": "<xml…>"}`. The API is strict about document shape,
//! so the template is kept as an ordered tree and re-serialized with every
//! leaf present — filled or empty — in its original position.

use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesRef, BytesStart, BytesText, Event};

use ovr_model::{OvrError, Result};

/// One XML element: name, attributes, text content, ordered children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a complete document into its root element.
    ///
    /// Element text is edge-trimmed, so whitespace-only text between
    /// elements is dropped; entity references in text and attributes are
    /// resolved, with interior spacing around them kept.
    pub fn parse(input: &str) -> Result<Self> {
        let mut reader = Reader::from_str(input);

        // stack[0] is a synthetic holder for the root
        let mut stack = vec![Element::new("")];
        loop {
            match reader.read_event().map_err(malformed)? {
                Event::Start(start) => {
                    stack.push(element_from_start(&start)?);
                }
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    push_child(&mut stack, element)?;
                }
                Event::End(_) => {
                    let mut element = stack
                        .pop()
                        .ok_or_else(|| OvrError::Malformed("unbalanced end tag".into()))?;
                    trim_text(&mut element);
                    push_child(&mut stack, element)?;
                }
                Event::Text(text) => {
                    let content = text.xml_content().map_err(malformed)?;
                    if let Some(current) = stack.last_mut() {
                        match current.text.as_mut() {
                            Some(existing) => existing.push_str(&content),
                            None => current.text = Some(content.into_owned()),
                        }
                    }
                }
                Event::GeneralRef(reference) => {
                    let resolved = resolve_reference(&reference)?;
                    if let Some(current) = stack.last_mut() {
                        match current.text.as_mut() {
                            Some(existing) => existing.push(resolved),
                            None => current.text = Some(resolved.to_string()),
                        }
                    }
                }
                Event::Eof => break,
                // declarations, comments, processing instructions
                _ => {}
            }
        }

        let holder = stack
            .pop()
            .ok_or_else(|| OvrError::Malformed("empty document".into()))?;
        if !stack.is_empty() {
            return Err(OvrError::Malformed("unclosed element".into()));
        }
        holder
            .children
            .into_iter()
            .next()
            .ok_or_else(|| OvrError::Malformed("document has no root element".into()))
    }

    /// Serialize back to XML text. Childless elements without text render
    /// self-closed so every template leaf survives the round trip.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        write_element(&mut writer, self)?;
        String::from_utf8(writer.into_inner())
            .map_err(|e| OvrError::Malformed(format!("non-utf8 document: {e}")))
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Text of the first direct child with the given name, if non-empty.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .and_then(|c| c.text.as_deref())
            .filter(|t| !t.is_empty())
    }

    /// True when the element has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Fill a copy of `template`: every leaf whose name appears in `payload`
/// gets that value as text; all other leaves stay as they are. No leaf is
/// added, removed, or reordered.
pub fn fill_template(template: &Element, payload: &BTreeMap<String, String>) -> Element {
    let mut filled = template.clone();
    fill_in_place(&mut filled, payload);
    filled
}

fn fill_in_place(element: &mut Element, payload: &BTreeMap<String, String>) {
    if element.is_leaf() {
        if let Some(value) = payload.get(&element.name) {
            element.text = Some(value.clone());
        }
        return;
    }
    for child in &mut element.children {
        fill_in_place(child, payload);
    }
}

/// Wrap a serialized document in the JSON submission envelope.
pub fn wrap_submission(xml: &str) -> String {
    serde_json::json!({ "ApplicationData": xml }).to_string()
}

/// Decode a reply body: a JSON-encoded string holding the document text.
pub fn unwrap_reply(body: &str) -> Result<String> {
    serde_json::from_str::<String>(body)
        .map_err(|e| OvrError::Malformed(format!("reply is not a JSON string: {e}")))
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| OvrError::Malformed(format!("bad attribute: {e}")))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(malformed)?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

/// Drop the whitespace that pretty-printed documents shed between tags.
fn trim_text(element: &mut Element) {
    if let Some(text) = element.text.take() {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            element.text = Some(trimmed.to_string());
        }
    }
}

/// Resolve `&name;` and character references to the character they stand for.
fn resolve_reference(reference: &BytesRef<'_>) -> Result<char> {
    if let Some(resolved) = reference.resolve_char_ref().map_err(malformed)? {
        return Ok(resolved);
    }
    match &**reference {
        b"amp" => Ok('&'),
        b"lt" => Ok('<'),
        b"gt" => Ok('>'),
        b"apos" => Ok('\''),
        b"quot" => Ok('"'),
        other => Err(OvrError::Malformed(format!(
            "unknown entity reference: &{};",
            String::from_utf8_lossy(other)
        ))),
    }
}

fn push_child(stack: &mut Vec<Element>, element: Element) -> Result<()> {
    stack
        .last_mut()
        .ok_or_else(|| OvrError::Malformed("element outside document".into()))?
        .children
        .push(element);
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    let text = element.text.as_deref().unwrap_or("");
    if element.is_leaf() && text.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(write_err)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(write_err)?;
    if !text.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(write_err)?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(write_err)?;
    Ok(())
}

fn malformed(error: impl std::fmt::Display) -> OvrError {
    OvrError::Malformed(format!("invalid xml: {error}"))
}

fn write_err(error: std::io::Error) -> OvrError {
    OvrError::Malformed(format!("xml write failed: {error}"))
}

#[cfg(test)]
mod tests {
    use super::{Element, fill_template, unwrap_reply, wrap_submission};
    use std::collections::BTreeMap;

    #[test]
    fn parse_keeps_order_and_attributes() {
        let root =
            Element::parse("<r xmlns='ns'><a>1</a><b/><c>x &amp; y</c></r>").expect("parse");
        assert_eq!(root.name, "r");
        assert_eq!(root.attributes, vec![("xmlns".to_string(), "ns".to_string())]);
        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(root.child_text("c"), Some("x & y"));
        assert_eq!(root.child_text("b"), None);
    }

    #[test]
    fn entity_references_keep_their_surrounding_spaces() {
        let root = Element::parse("<t>a &amp; b &#38; c &#x26; d</t>").expect("parse");
        assert_eq!(root.text.as_deref(), Some("a & b & c & d"));
    }

    #[test]
    fn escaped_markup_in_leaf_text_is_restored() {
        let xml = "<d><Text>&lt;p&gt;I swear &amp; affirm&lt;/p&gt;</Text></d>";
        let root = Element::parse(xml).expect("parse");
        assert_eq!(root.child_text("Text"), Some("<p>I swear & affirm</p>"));
    }

    #[test]
    fn unknown_entity_is_malformed() {
        assert!(Element::parse("<t>&nope;</t>").is_err());
    }

    #[test]
    fn indentation_between_elements_is_dropped() {
        let root = Element::parse("<r>\n  <a> 1 </a>\n  <b/>\n</r>").expect("parse");
        assert_eq!(root.text, None);
        assert_eq!(root.child_text("a"), Some("1"));
    }

    #[test]
    fn fill_preserves_unfilled_leaves() {
        let template = Element::parse("<t><rec><x></x><y></y></rec></t>").expect("parse");
        let mut payload = BTreeMap::new();
        payload.insert("y".to_string(), "2".to_string());
        let filled = fill_template(&template, &payload);
        assert_eq!(filled.to_xml().expect("xml"), "<t><rec><x/><y>2</y></rec></t>");
    }

    #[test]
    fn envelope_round_trip() {
        let wrapped = wrap_submission("<a b=\"c\"/>");
        assert_eq!(wrapped, "{\"ApplicationData\":\"<a b=\\\"c\\\"/>\"}");
        assert_eq!(unwrap_reply("\"<RESPONSE/>\"").expect("unwrap"), "<RESPONSE/>");
        assert!(unwrap_reply("{}").is_err());
    }
}
