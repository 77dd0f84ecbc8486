//! Minimal XML markup writer used to build notification payloads.
//!
//! Output is compact (no indentation, no whitespace between elements). All
//! text and attribute values go through escaping; there is no raw write.

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, Default)]
pub struct XmlMarkup {
    target: String,
}

impl XmlMarkup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the `<?xml ...?>` declaration.
    pub fn instruct(&mut self) {
        self.target.push_str(DECLARATION);
    }

    /// Writes `<name attrs...>`, runs `body`, then writes `</name>`.
    ///
    /// The element is always written with an explicit closing tag, even when
    /// `body` writes nothing.
    pub fn tag<F>(&mut self, name: &str, attrs: &[(&str, &str)], body: F)
    where
        F: FnOnce(&mut Self),
    {
        self.target.push('<');
        self.target.push_str(name);
        for (key, value) in attrs {
            self.target.push(' ');
            self.target.push_str(key);
            self.target.push_str("=\"");
            escape_into(&mut self.target, value, true);
            self.target.push('"');
        }
        self.target.push('>');
        body(self);
        self.target.push_str("</");
        self.target.push_str(name);
        self.target.push('>');
    }

    /// Shorthand for an element holding only escaped text.
    pub fn text_tag(&mut self, name: &str, text: &str) {
        self.tag(name, &[], |xml| xml.text(text));
    }

    pub fn text(&mut self, text: &str) {
        escape_into(&mut self.target, text, false);
    }

    pub fn into_string(self) -> String {
        self.target
    }
}

fn escape_into(out: &mut String, value: &str, attribute: bool) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruct_and_nesting() {
        let mut xml = XmlMarkup::new();
        xml.instruct();
        xml.tag("a", &[("x", "1")], |xml| {
            xml.text_tag("b", "hi");
            xml.tag("c", &[], |_| {});
        });
        assert_eq!(
            xml.into_string(),
            r#"<?xml version="1.0" encoding="UTF-8"?><a x="1"><b>hi</b><c></c></a>"#
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let mut xml = XmlMarkup::new();
        xml.text_tag("t", r#"Tom & "Jerry" <3 >"#);
        assert_eq!(
            xml.into_string(),
            r#"<t>Tom &amp; "Jerry" &lt;3 &gt;</t>"#
        );
    }

    #[test]
    fn test_attribute_is_escaped() {
        let mut xml = XmlMarkup::new();
        xml.tag("t", &[("Id", r#"/Page.xaml?a=1&b="2""#)], |_| {});
        assert_eq!(
            xml.into_string(),
            r#"<t Id="/Page.xaml?a=1&amp;b=&quot;2&quot;"></t>"#
        );
    }

    #[test]
    fn test_unicode_passes_through() {
        let mut xml = XmlMarkup::new();
        xml.text("città ✓");
        assert_eq!(xml.into_string(), "città ✓");
    }
}
