use crate::error::ProtocolError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Minimal owned XML element tree.
///
/// Element and attribute names are stored without their namespace prefix,
/// lookups are therefore namespace agnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|child| child.text.as_str())
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Depth-first search for the first descendant (or self) with the given name.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }
}

/// Parses an XML document and returns its root element.
///
/// Leaf text is kept verbatim. Whitespace between child elements is dropped.
pub fn parse_document(xml: &str) -> Result<XmlElement, ProtocolError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<XmlElement> = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(open_element(&start)?),
            Event::Empty(start) => {
                let element = open_element(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                let mut element = stack.pop().ok_or_else(|| {
                    ProtocolError::InvalidResponse("unbalanced XML document".to_string())
                })?;
                if !element.children.is_empty() && element.text.trim().is_empty() {
                    element.text.clear();
                }
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::Eof => {
                return Err(ProtocolError::InvalidResponse(
                    "unexpected end of XML document".to_string(),
                ))
            }
            _ => {}
        }
    }
}

fn open_element(start: &BytesStart) -> Result<XmlElement, ProtocolError> {
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        attributes,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_should_be_stripped_from_names() {
        let root = parse_document(
            r#"<?xml version="1.0"?><soap:Envelope xmlns:soap="urn:x"><soap:Body><tns:Ping xmlns:tns="urn:y" tns:mode="fast"/></soap:Body></soap:Envelope>"#,
        )
        .unwrap();
        assert_eq!(root.name, "Envelope");
        let ping = root.find("Ping").unwrap();
        assert_eq!(ping.attribute("mode"), Some("fast"));
    }

    #[test]
    fn text_should_be_unescaped() {
        let root = parse_document("<name>Tom &amp; Jerry &lt;3</name>").unwrap();
        assert_eq!(root.text, "Tom & Jerry <3");
    }

    #[test]
    fn nested_children_should_be_preserved_in_order() {
        let xml = "<users><user><id>1</id></user><user><id>2</id></user></users>";
        let root = parse_document(xml).unwrap();
        let ids: Vec<&str> = root
            .children_named("user")
            .filter_map(|user| user.child_text("id"))
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn leaf_text_whitespace_should_be_preserved() {
        let root = parse_document("<user>\n  <name>  Ann </name>\n  <email> </email>\n</user>")
            .unwrap();
        assert_eq!(root.text, "");
        assert_eq!(root.child_text("name"), Some("  Ann "));
        assert_eq!(root.child_text("email"), Some(" "));
    }

    #[test]
    fn indented_document_should_be_parsed() {
        let root = parse_document(
            "<?xml version=\"1.0\"?>\n<users>\n  <user>\n    <id>1</id>\n  </user>\n</users>\n",
        )
        .unwrap();
        assert_eq!(root.name, "users");
        assert_eq!(root.text, "");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].child_text("id"), Some("1"));
    }

    #[test]
    fn truncated_document_should_fail() {
        assert!(parse_document("<users><user>").is_err());
    }
}
