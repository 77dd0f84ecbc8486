//! Tile notification payload.

use super::WP_NAMESPACE;
use crate::xml::XmlMarkup;

/// Options for a tile update.
///
/// Every field is optional and is written as an empty element when absent.
/// Images may be app-local paths or HTTP URLs (.jpg or .png, 173x137px,
/// max 80kb); sizes are not checked here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileOptions {
    pub title: Option<String>,
    pub background_image: Option<String>,
    /// Rendered form of the badge count.
    pub count: Option<String>,
    pub back_title: Option<String>,
    pub back_background_image: Option<String>,
    pub back_content: Option<String>,
    /// Exact navigation URI of a secondary tile. Only needed to update a
    /// tile other than the application's primary one.
    pub navigation_uri: Option<String>,
}

impl TileOptions {
    pub fn with_count(mut self, count: impl ToString) -> Self {
        self.count = Some(count.to_string());
        self
    }
}

pub(super) fn build(options: &TileOptions) -> String {
    let mut xml = XmlMarkup::new();
    xml.instruct();
    xml.tag("wp:Notification", &[("xmlns:wp", WP_NAMESPACE)], |xml| {
        let id_attr = options.navigation_uri.as_deref().map(|uri| ("Id", uri));
        let attrs: Vec<(&str, &str)> = id_attr.into_iter().collect();
        xml.tag("wp:Tile", &attrs, |xml| {
            xml.text_tag("wp:BackgroundImage", text_or_empty(&options.background_image));
            xml.text_tag("wp:Count", text_or_empty(&options.count));
            xml.text_tag("wp:Title", text_or_empty(&options.title));
            xml.text_tag(
                "wp:BackBackgroundImage",
                text_or_empty(&options.back_background_image),
            );
            xml.text_tag("wp:BackTitle", text_or_empty(&options.back_title));
            xml.text_tag("wp:BackContent", text_or_empty(&options.back_content));
        });
    });
    xml.into_string()
}

fn text_or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}
