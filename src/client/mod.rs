//! Delivery of notifications to a single device channel.

mod transport;

pub use transport::{
    parse_device_uri, HttpTransport, PushRequest, PushResponse, Transport,
    DEVICE_CONNECTION_STATUS_HEADER, NOTIFICATION_CLASS_HEADER, NOTIFICATION_STATUS_HEADER,
    SUBSCRIPTION_STATUS_HEADER, WINDOWSPHONE_TARGET_HEADER,
};

use crate::error::MpnsResult;
use crate::kind::NotificationKind;
use crate::options::NotificationOptions;
use crate::payload::Notification;
use crate::tls::TlsSettings;

/// A device that can receive push notifications through its channel URI.
///
/// Every call performs exactly one request. Nothing is retained between
/// calls except the URI and the transport.
#[derive(Debug, Clone)]
pub struct Notifier<T = HttpTransport> {
    device_uri: String,
    transport: T,
}

impl Notifier<HttpTransport> {
    pub fn new(device_uri: impl Into<String>) -> Self {
        Self::with_transport(device_uri, HttpTransport::new())
    }
}

impl<T: Transport> Notifier<T> {
    pub fn with_transport(device_uri: impl Into<String>, transport: T) -> Self {
        Self {
            device_uri: device_uri.into(),
            transport,
        }
    }

    pub fn device_uri(&self) -> &str {
        &self.device_uri
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends a notification described by a loosely typed options bag.
    ///
    /// `kind` is resolved with [`NotificationKind::resolve`], so unknown kinds
    /// are sent as raw notifications. The `ssl` entry of `options` is parsed
    /// only for `https` channels and is otherwise ignored.
    pub fn send_notification(
        &self,
        kind: Option<&str>,
        mut options: NotificationOptions,
    ) -> MpnsResult<PushResponse> {
        let kind = NotificationKind::resolve(kind);
        let url = parse_device_uri(&self.device_uri)?;

        let ssl = options.take_ssl();
        let tls = match ssl {
            Some(value) if url.scheme() == "https" => Some(TlsSettings::from_value(value)?),
            _ => None,
        };

        let payload = options.into_notification(kind).build();
        self.transport.send(&PushRequest::new(url, payload, tls))
    }

    /// Sends an already typed notification.
    pub fn send(
        &self,
        notification: &Notification,
        tls: Option<&TlsSettings>,
    ) -> MpnsResult<PushResponse> {
        let url = parse_device_uri(&self.device_uri)?;
        let request = PushRequest::new(url, notification.build(), tls.cloned());
        self.transport.send(&request)
    }
}

/// One-shot helper: sends a single notification to `device_uri` over HTTP(S).
pub fn send_notification(
    device_uri: &str,
    kind: Option<&str>,
    options: NotificationOptions,
) -> MpnsResult<PushResponse> {
    Notifier::new(device_uri).send_notification(kind, options)
}
