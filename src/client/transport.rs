//! Outgoing request/response types and the blocking HTTP transport.

use crate::error::{MpnsError, MpnsResult};
use crate::payload::Payload;
use crate::tls::TlsSettings;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::debug;

pub const NOTIFICATION_CLASS_HEADER: &str = "X-NotificationClass";
pub const WINDOWSPHONE_TARGET_HEADER: &str = "X-WindowsPhone-Target";
pub const NOTIFICATION_STATUS_HEADER: &str = "X-NotificationStatus";
pub const SUBSCRIPTION_STATUS_HEADER: &str = "X-SubscriptionStatus";
pub const DEVICE_CONNECTION_STATUS_HEADER: &str = "X-DeviceConnectionStatus";

const USER_AGENT: &str = concat!("mpns/", env!("CARGO_PKG_VERSION"));

/// Parses and checks a device channel URI.
///
/// The URI must be absolute, use `http` or `https`, and name a host.
pub fn parse_device_uri(uri: &str) -> MpnsResult<Url> {
    let url = Url::parse(uri).map_err(|e| MpnsError::invalid_uri(uri, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(MpnsError::invalid_uri(
                uri,
                format!("unsupported scheme '{}'", other),
            ))
        }
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(MpnsError::invalid_uri(uri, "missing host"));
    }
    Ok(url)
}

/// A fully prepared POST to a device channel.
#[derive(Debug, Clone)]
pub struct PushRequest {
    url: Url,
    payload: Payload,
    tls: Option<TlsSettings>,
}

impl PushRequest {
    /// TLS settings are kept only for `https` URLs and dropped otherwise.
    pub fn new(url: Url, payload: Payload, tls: Option<TlsSettings>) -> Self {
        let tls = tls.filter(|_| url.scheme() == "https");
        Self { url, payload, tls }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn body(&self) -> &str {
        self.payload.xml()
    }

    pub fn tls(&self) -> Option<&TlsSettings> {
        self.tls.as_ref()
    }

    pub fn is_secure(&self) -> bool {
        self.url.scheme() == "https"
    }

    /// Headers MPNS requires. `X-WindowsPhone-Target` is left out for raw
    /// notifications.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/xml"));
        headers.insert(CONTENT_LENGTH, HeaderValue::from(self.payload.content_length()));
        headers.insert(
            HeaderName::from_static("x-notificationclass"),
            HeaderValue::from_static(self.payload.notification_class()),
        );
        if let Some(target) = self.payload.kind().windowsphone_target() {
            headers.insert(
                HeaderName::from_static("x-windowsphone-target"),
                HeaderValue::from_static(target),
            );
        }
        headers
    }
}

/// What came back from the push service. The body is not interpreted.
#[derive(Debug, Clone)]
pub struct PushResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl PushResponse {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// `X-NotificationStatus`, e.g. `Received`, `Dropped`, `QueueFull`.
    pub fn notification_status(&self) -> Option<&str> {
        self.header(NOTIFICATION_STATUS_HEADER)
    }

    /// `X-SubscriptionStatus`, e.g. `Active`, `Expired`.
    pub fn subscription_status(&self) -> Option<&str> {
        self.header(SUBSCRIPTION_STATUS_HEADER)
    }

    /// `X-DeviceConnectionStatus`, e.g. `Connected`, `TempDisconnected`.
    pub fn device_connection_status(&self) -> Option<&str> {
        self.header(DEVICE_CONNECTION_STATUS_HEADER)
    }
}

/// Performs a single request/response exchange.
pub trait Transport {
    fn send(&self, request: &PushRequest) -> MpnsResult<PushResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &PushRequest) -> MpnsResult<PushResponse> {
        (**self).send(request)
    }
}

/// Blocking HTTP(S) transport.
///
/// A new client is built per request, so TLS material from one delivery is
/// never visible to another and connections are not pooled across devices.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the transport's default request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn build_client(&self, request: &PushRequest) -> MpnsResult<reqwest::blocking::Client> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        match request.tls() {
            Some(settings) => settings
                .configure(builder)?
                .build()
                .map_err(|e| MpnsError::tls(None, format!("failed to build TLS client: {}", e))),
            None => Ok(builder.build()?),
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &PushRequest) -> MpnsResult<PushResponse> {
        let client = self.build_client(request)?;

        debug!(
            url = %request.url(),
            kind = %request.payload().kind(),
            secure = request.is_secure(),
            class = request.payload().notification_class(),
            windowsphone_target = ?request.payload().kind().windowsphone_target(),
            content_length = request.payload().content_length(),
            "Sending push notification"
        );

        let response = client
            .post(request.url().clone())
            .headers(request.headers())
            .body(request.body().to_string())
            .send()?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text()?;

        debug!(status = %status, "Push service responded");

        Ok(PushResponse {
            status,
            headers,
            body,
        })
    }
}
