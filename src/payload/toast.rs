//! Toast notification payload.

use super::WP_NAMESPACE;
use crate::xml::XmlMarkup;

/// Options for a toast.
///
/// `params` are appended to the application's launch page as a query string;
/// pairs are kept in insertion order and are not URL-encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastOptions {
    pub title: Option<String>,
    pub content: Option<String>,
    pub params: Vec<(String, String)>,
}

impl ToastOptions {
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

pub(super) fn build(options: &ToastOptions) -> String {
    let mut xml = XmlMarkup::new();
    xml.instruct();
    xml.tag("wp:Notification", &[("xmlns:wp", WP_NAMESPACE)], |xml| {
        xml.tag("wp:Toast", &[], |xml| {
            xml.text_tag("wp:Text1", options.title.as_deref().unwrap_or(""));
            xml.text_tag("wp:Text2", options.content.as_deref().unwrap_or(""));
            xml.text_tag("wp:Param", &format_params(&options.params));
        });
    });
    xml.into_string()
}

/// `?k1=v1&k2=v2`, or an empty string when there are no params.
fn format_params(params: &[(String, String)]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    format!("?{}", query)
}
