use crate::shared::Result;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// One GMP request element, e.g. `<get_tasks filter="rows=10"/>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmpCommand {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<GmpCommand>,
}

impl GmpCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: GmpCommand) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn child(&self, name: &str) -> Option<&GmpCommand> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Serializes the command; attribute values and text are escaped.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_into(&mut writer)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }

    fn write_into(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        let start = BytesStart::new(self.name.as_str()).with_attributes(
            self.attributes
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );

        if self.text.is_none() && self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if let Some(text) = &self.text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            child.write_into(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}
