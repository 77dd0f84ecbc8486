//! The loosely typed options bag accepted at the invocation boundary.
//!
//! Callers hand over a JSON object whose keys depend on the notification
//! kind, plus an optional `ssl` sub-mapping with TLS settings. This module
//! turns it into the typed per-kind options used by the payload builders.

use crate::kind::NotificationKind;
use crate::payload::{Notification, RawOptions, RawValue, TileOptions, ToastOptions};
use serde_json::{Map, Value};

/// Reserved key holding TLS settings. It never reaches a payload.
pub const SSL_KEY: &str = "ssl";

/// Insertion-ordered key/value options for a single delivery.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationOptions {
    values: Map<String, Value>,
}

impl NotificationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds options from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let values: Map<String, Value> = serde_json::from_value(value)?;
        Ok(Self { values })
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Removes and returns the `ssl` sub-mapping, if any.
    pub fn take_ssl(&mut self) -> Option<Value> {
        self.values.shift_remove(SSL_KEY).filter(|v| !v.is_null())
    }

    /// Converts the remaining options into the typed options of `kind`.
    ///
    /// Keys that mean nothing for the kind are ignored, except for raw
    /// notifications where every key becomes an element.
    pub fn into_notification(self, kind: NotificationKind) -> Notification {
        match kind {
            NotificationKind::Tile => Notification::Tile(self.tile_options()),
            NotificationKind::Toast => Notification::Toast(self.toast_options()),
            NotificationKind::Raw => Notification::Raw(raw_options(&self.values)),
        }
    }

    fn tile_options(&self) -> TileOptions {
        TileOptions {
            title: self.text("title"),
            background_image: self.text("background_image"),
            count: self.text("count"),
            back_title: self.text("back_title"),
            back_background_image: self.text("back_background_image"),
            back_content: self.text("back_content"),
            navigation_uri: self.text("navigation_uri"),
        }
    }

    fn toast_options(&self) -> ToastOptions {
        let params = match self.values.get("params") {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| (k.clone(), scalar_text(v)))
                .collect(),
            _ => Vec::new(),
        };
        ToastOptions {
            title: self.text("title"),
            content: self.text("content"),
            params,
        }
    }

    fn text(&self, key: &str) -> Option<String> {
        match self.values.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(scalar_text(value)),
        }
    }
}

impl From<Map<String, Value>> for NotificationOptions {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

fn raw_options(values: &Map<String, Value>) -> RawOptions {
    let mut options = RawOptions::new();
    for (key, value) in values {
        let value = match value {
            Value::Object(nested) => RawValue::Map(raw_options(nested)),
            other => RawValue::Scalar(scalar_text(other)),
        };
        options.push(key.clone(), value);
    }
    options
}

/// String form of a scalar: strings verbatim, `null` empty, everything else
/// in its JSON text form.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
