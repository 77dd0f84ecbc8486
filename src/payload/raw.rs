//! Raw notification payload: arbitrary key/value data under a `<root>` element.

use crate::xml::XmlMarkup;

/// A value in a raw notification. Maps nest without limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Scalar(String),
    Map(RawOptions),
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Scalar(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Scalar(value.to_string())
    }
}

impl From<RawOptions> for RawValue {
    fn from(value: RawOptions) -> Self {
        RawValue::Map(value)
    }
}

/// Ordered entries of a raw notification. Each key becomes an element name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOptions {
    entries: Vec<(String, RawValue)>,
}

impl RawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn entries(&self) -> &[(String, RawValue)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

pub(super) fn build(options: &RawOptions) -> String {
    let mut xml = XmlMarkup::new();
    xml.instruct();
    xml.tag("root", &[], |xml| write_entries(xml, options));
    xml.into_string()
}

fn write_entries(xml: &mut XmlMarkup, options: &RawOptions) {
    for (key, value) in &options.entries {
        match value {
            RawValue::Scalar(text) => xml.text_tag(key, text),
            RawValue::Map(nested) => xml.tag(key, &[], |xml| write_entries(xml, nested)),
        }
    }
}
