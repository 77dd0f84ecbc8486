//! XML payload builders, one per notification kind.
//!
//! Each builder is a pure function of its typed options. The resulting
//! [`Payload`] carries the document and the notification class code that
//! must accompany it on the wire.

mod raw;
mod tile;
mod toast;

pub use raw::{RawOptions, RawValue};
pub use tile::TileOptions;
pub use toast::ToastOptions;

use crate::kind::NotificationKind;

pub(crate) const WP_NAMESPACE: &str = "WPNotification";

/// A notification ready to be encoded, with the options of its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Tile(TileOptions),
    Toast(ToastOptions),
    Raw(RawOptions),
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Notification::Tile(_) => NotificationKind::Tile,
            Notification::Toast(_) => NotificationKind::Toast,
            Notification::Raw(_) => NotificationKind::Raw,
        }
    }

    pub fn build(&self) -> Payload {
        let xml = match self {
            Notification::Tile(options) => tile::build(options),
            Notification::Toast(options) => toast::build(options),
            Notification::Raw(options) => raw::build(options),
        };
        Payload {
            xml,
            kind: self.kind(),
        }
    }
}

/// An encoded notification document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    xml: String,
    kind: NotificationKind,
}

impl Payload {
    pub fn xml(&self) -> &str {
        &self.xml
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// `"1"`, `"2"` or `"3"` for tile, toast and raw respectively.
    pub fn notification_class(&self) -> &'static str {
        self.kind.notification_class()
    }

    /// Length of the document in bytes, as sent in `Content-Length`.
    pub fn content_length(&self) -> usize {
        self.xml.len()
    }

    pub fn into_xml(self) -> String {
        self.xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_class_follows_kind() {
        let tile = Notification::Tile(TileOptions::default()).build();
        let toast = Notification::Toast(ToastOptions::default()).build();
        let raw = Notification::Raw(RawOptions::default()).build();

        assert_eq!(tile.notification_class(), "1");
        assert_eq!(toast.notification_class(), "2");
        assert_eq!(raw.notification_class(), "3");
    }

    #[test]
    fn test_content_length_counts_bytes() {
        let payload = Notification::Toast(ToastOptions {
            title: Some("héllo".to_string()),
            ..Default::default()
        })
        .build();
        assert_eq!(payload.content_length(), payload.xml().as_bytes().len());
        assert!(payload.content_length() > payload.xml().chars().count());
    }
}
