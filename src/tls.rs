//! TLS settings for HTTPS deliveries.
//!
//! Settings are loaded from disk and applied to a fresh client builder on
//! every delivery. Nothing is cached between calls.

use crate::error::{MpnsError, MpnsResult};
use clap::ValueEnum;
use reqwest::blocking::ClientBuilder;
use reqwest::{Certificate, Identity};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Peer verification mode, mirroring OpenSSL's `VERIFY_NONE` (0) and
/// `VERIFY_PEER` (1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VerifyMode {
    None,
    Peer,
}

impl VerifyMode {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(VerifyMode::None),
            1 => Some(VerifyMode::Peer),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VerifyModeRepr {
    Code(i64),
    Name(String),
}

impl<'de> Deserialize<'de> for VerifyMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match VerifyModeRepr::deserialize(deserializer)? {
            VerifyModeRepr::Code(code) => VerifyMode::from_code(code)
                .ok_or_else(|| de::Error::custom(format!("unknown verify_mode {}", code))),
            VerifyModeRepr::Name(name) => <VerifyMode as ValueEnum>::from_str(&name, true)
                .map_err(|_| de::Error::custom(format!("unknown verify_mode '{}'", name))),
        }
    }
}

/// Optional TLS material for a delivery. An absent field keeps the transport
/// default; it never disables anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TlsSettings {
    /// PEM client certificate. May also contain the private key.
    #[serde(rename = "server_crt_file", alias = "client_cert_file")]
    pub client_cert_file: Option<PathBuf>,
    /// PEM bundle used as the only trusted roots.
    pub ca_file: Option<PathBuf>,
    /// PEM private key matching the client certificate.
    pub key_file: Option<PathBuf>,
    pub verify_mode: Option<VerifyMode>,
}

impl TlsSettings {
    /// Parses the reserved `ssl` sub-mapping of an options bag.
    pub fn from_value(value: Value) -> MpnsResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| MpnsError::tls(None, format!("invalid ssl settings: {}", e)))
    }

    pub fn is_empty(&self) -> bool {
        self == &TlsSettings::default()
    }

    /// Loads the referenced files and applies them to `builder`.
    ///
    /// Any missing or unparsable file fails the whole configuration; the
    /// builder is consumed either way, so a partial setup can't be used.
    /// A certificate without a key (or a key without a certificate) is
    /// loaded and checked but no client identity is presented.
    pub fn configure(&self, mut builder: ClientBuilder) -> MpnsResult<ClientBuilder> {
        builder = builder.use_rustls_tls();

        if let Some(identity) = self.load_identity()? {
            builder = builder.identity(identity);
        }

        if let Some(ca_file) = &self.ca_file {
            let roots = load_ca_bundle(ca_file)?;
            builder = builder.tls_built_in_root_certs(false);
            for root in roots {
                builder = builder.add_root_certificate(root);
            }
        }

        if self.verify_mode == Some(VerifyMode::None) {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(builder)
    }

    /// Each file is parsed on its own so a bad one is reported by its own
    /// path. The identity is only installed when both a certificate and a
    /// key are available, either from two files or one combined PEM.
    fn load_identity(&self) -> MpnsResult<Option<Identity>> {
        let cert = match &self.client_cert_file {
            Some(path) => Some((path, load_client_certificate(path)?)),
            None => None,
        };
        let key = match &self.key_file {
            Some(path) => Some(load_private_key(path)?),
            None => None,
        };

        let (cert_path, pem) = match (cert, key) {
            (Some((path, mut pem)), Some(key)) => {
                pem.push(b'\n');
                pem.extend(key);
                (path, pem)
            }
            (Some((path, pem)), None) if has_private_key(&pem) => (path, pem),
            _ => return Ok(None),
        };

        Identity::from_pem(&pem).map(Some).map_err(|e| {
            MpnsError::tls(
                Some(cert_path.clone()),
                format!("client certificate does not match its private key: {}", e),
            )
        })
    }
}

fn read_file(path: &Path) -> MpnsResult<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| MpnsError::tls(Some(path.to_path_buf()), format!("failed to read: {}", e)))
}

fn load_client_certificate(path: &Path) -> MpnsResult<Vec<u8>> {
    let pem = read_file(path)?;
    let certs = Certificate::from_pem_bundle(&pem).map_err(|e| {
        MpnsError::tls(Some(path.to_path_buf()), format!("invalid client certificate: {}", e))
    })?;
    if certs.is_empty() {
        return Err(MpnsError::tls(
            Some(path.to_path_buf()),
            "no certificate found in client certificate file",
        ));
    }
    Ok(pem)
}

fn load_private_key(path: &Path) -> MpnsResult<Vec<u8>> {
    let pem = read_file(path)?;
    if !has_private_key(&pem) {
        return Err(MpnsError::tls(
            Some(path.to_path_buf()),
            "no private key found in key file",
        ));
    }
    Ok(pem)
}

fn has_private_key(pem: &[u8]) -> bool {
    matches!(rustls_pemfile::private_key(&mut &pem[..]), Ok(Some(_)))
}

fn load_ca_bundle(path: &Path) -> MpnsResult<Vec<Certificate>> {
    let pem = read_file(path)?;
    let certs = Certificate::from_pem_bundle(&pem)
        .map_err(|e| MpnsError::tls(Some(path.to_path_buf()), format!("invalid CA bundle: {}", e)))?;
    if certs.is_empty() {
        return Err(MpnsError::tls(
            Some(path.to_path_buf()),
            "no certificates found in CA bundle",
        ));
    }
    Ok(certs)
}
