//! Microsoft Push Notification Service (MPNS) client.
//!
//! Encodes tile, toast and raw notifications into the XML MPNS expects and
//! posts them to a Windows Phone device channel URI, over plain HTTP or HTTPS
//! with optional client certificates.
//!
//! ```no_run
//! use mpns::{send_notification, NotificationOptions};
//!
//! let options = NotificationOptions::new()
//!     .with("title", "Hi")
//!     .with("content", "There");
//! let response = send_notification("https://db3.notify.live.net/abc", Some("toast"), options)?;
//! println!("{:?}", response.notification_status());
//! # Ok::<(), mpns::MpnsError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod kind;
pub mod options;
pub mod payload;
pub mod tls;
mod xml;

pub use client::{send_notification, HttpTransport, Notifier, PushRequest, PushResponse, Transport};
pub use error::{MpnsError, MpnsResult};
pub use kind::NotificationKind;
pub use options::NotificationOptions;
pub use payload::{Notification, Payload, RawOptions, RawValue, TileOptions, ToastOptions};
pub use tls::{TlsSettings, VerifyMode};
