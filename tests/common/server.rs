//! Capture server standing in for the MPNS endpoint.
//!
//! Runs an axum app on its own thread and tokio runtime so tests can use the
//! blocking client from a plain `#[test]`. Every request is recorded. The TLS
//! variant serves `server.pem`, which is signed by the fixture CA.

#![allow(dead_code)]

use super::constants::*;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use rustls::server::WebPkiClientVerifier;
use rustls::{RootCertStore, ServerConfig};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

/// A request as seen by the capture server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

type Captured = Arc<Mutex<Vec<CapturedRequest>>>;

async fn capture(
    State(captured): State<Captured>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let path = uri.path().to_string();
    captured.lock().unwrap().push(CapturedRequest {
        method,
        path: path.clone(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    if path == EXPIRED_CHANNEL_PATH {
        (
            StatusCode::NOT_FOUND,
            [
                ("X-NotificationStatus", "Dropped"),
                ("X-SubscriptionStatus", "Expired"),
                ("X-DeviceConnectionStatus", "Connected"),
            ],
        )
    } else {
        (
            StatusCode::OK,
            [
                ("X-NotificationStatus", "Received"),
                ("X-SubscriptionStatus", "Active"),
                ("X-DeviceConnectionStatus", "Connected"),
            ],
        )
    }
}

/// Test server instance bound to a random local port.
///
/// When dropped, the server gracefully shuts down and its thread is joined.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    requests: Captured,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

fn fixture_reader(name: &str) -> BufReader<File> {
    let path = PathBuf::from(FIXTURES_DIR).join(name);
    BufReader::new(File::open(&path).unwrap_or_else(|e| panic!("Failed to open {:?}: {}", path, e)))
}

/// rustls config for the TLS capture server. With `require_client_cert`, the
/// handshake fails unless the client presents a certificate signed by the
/// fixture CA.
fn server_tls_config(require_client_cert: bool) -> ServerConfig {
    let provider = Arc::new(rustls::crypto::ring::default_provider());

    let certs = rustls_pemfile::certs(&mut fixture_reader("server.pem"))
        .collect::<Result<Vec<_>, _>>()
        .expect("Failed to parse server certificate");
    let key = rustls_pemfile::private_key(&mut fixture_reader("server.key"))
        .expect("Failed to read server key")
        .expect("No server key found");

    let builder = ServerConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()
        .expect("Failed to select TLS versions");

    let builder = if require_client_cert {
        let mut roots = RootCertStore::empty();
        for ca in rustls_pemfile::certs(&mut fixture_reader("ca.pem")) {
            roots
                .add(ca.expect("Failed to parse CA certificate"))
                .expect("Failed to add CA certificate");
        }
        let verifier = WebPkiClientVerifier::builder_with_provider(Arc::new(roots), provider)
            .build()
            .expect("Failed to build client verifier");
        builder.with_client_cert_verifier(verifier)
    } else {
        builder.with_no_client_auth()
    };

    builder
        .with_single_cert(certs, key)
        .expect("Failed to load server certificate")
}

impl TestServer {
    /// Spawns a new plain HTTP capture server on a random port.
    ///
    /// The socket is bound before this returns, so connections made right
    /// away wait in the backlog instead of being refused.
    pub fn spawn() -> Self {
        Self::spawn_with(None)
    }

    /// Spawns a capture server speaking HTTPS with the fixture server
    /// certificate.
    pub fn spawn_tls() -> Self {
        Self::spawn_with(Some(server_tls_config(false)))
    }

    /// Like [`TestServer::spawn_tls`], but the handshake requires a client
    /// certificate signed by the fixture CA.
    pub fn spawn_tls_requiring_client_cert() -> Self {
        Self::spawn_with(Some(server_tls_config(true)))
    }

    fn spawn_with(tls: Option<ServerConfig>) -> Self {
        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind to random port");
        listener
            .set_nonblocking(true)
            .expect("Failed to set listener non-blocking");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let requests: Captured = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().fallback(capture).with_state(requests.clone());

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        let scheme = if tls.is_some() { "https" } else { "http" };

        let thread = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to build tokio runtime");
            runtime.block_on(async move {
                match tls {
                    Some(config) => {
                        let handle = axum_server::Handle::new();
                        let shutdown = handle.clone();
                        tokio::spawn(async move {
                            shutdown_rx.await.ok();
                            shutdown.graceful_shutdown(Some(Duration::from_secs(1)));
                        });
                        let config = RustlsConfig::from_config(Arc::new(config));
                        axum_server::from_tcp_rustls(listener, config)
                            .handle(handle)
                            .serve(app.into_make_service())
                            .await
                            .expect("Server failed");
                    }
                    None => {
                        let listener = tokio::net::TcpListener::from_std(listener)
                            .expect("Failed to adopt listener");
                        axum::serve(listener, app)
                            .with_graceful_shutdown(async {
                                shutdown_rx.await.ok();
                            })
                            .await
                            .expect("Server failed");
                    }
                }
            });
        });

        Self {
            base_url: format!("{}://127.0.0.1:{}", scheme, port),
            port,
            requests,
            shutdown_tx: Some(shutdown_tx),
            thread: Some(thread),
        }
    }

    pub fn channel_uri(&self) -> String {
        format!("{}{}", self.base_url, ACTIVE_CHANNEL_PATH)
    }

    pub fn expired_channel_uri(&self) -> String {
        format!("{}{}", self.base_url, EXPIRED_CHANNEL_PATH)
    }

    /// Same host and port, but with an `https` scheme.
    pub fn https_channel_uri(&self) -> String {
        format!("https://127.0.0.1:{}{}", self.port, ACTIVE_CHANNEL_PATH)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> CapturedRequest {
        self.requests()
            .pop()
            .expect("Server did not receive any request")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// A local port with nothing listening on it.
pub fn unused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    listener.local_addr().expect("Failed to get local address").port()
}
