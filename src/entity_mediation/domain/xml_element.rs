use crate::shared::Result;
use anyhow::Context;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Minimal owned element tree for GMP response documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    /// Parses a complete document and returns its root element.
    pub fn parse(document: &str) -> Result<Self> {
        let mut reader = Reader::from_str(document);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = reader
                .read_event()
                .with_context(|| format!("Malformed XML at byte {}", reader.buffer_position()))?;

            match event {
                Event::Start(start) => stack.push(Self::from_start(&start)?),
                Event::Empty(start) => {
                    let element = Self::from_start(&start)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => root = Some(element),
                    }
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .context("Closing tag without matching opening tag")?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => root = Some(element),
                    }
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        let unescaped = text.unescape().context("Invalid character reference")?;
                        current.text.push_str(&unescaped);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current
                            .text
                            .push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }

            if root.is_some() && stack.is_empty() {
                break;
            }
        }

        if !stack.is_empty() {
            anyhow::bail!("Unexpected end of document inside <{}>", stack[stack.len() - 1].name);
        }
        root.context("Document has no root element")
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.with_context(|| format!("Invalid attribute on <{}>", name))?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .with_context(|| format!("Invalid value for attribute '{}'", key))?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct text content, excluding the text of child elements.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Text of the first child called `name`, `None` when absent or blank.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .map(XmlElement::text)
            .filter(|text| !text.is_empty())
    }
}
