use anyhow::{bail, Context, Result};
use clap::Parser;
use mpns::client::parse_device_uri;
use mpns::config::{AppConfig, CliConfig, FileConfig};
use mpns::{
    HttpTransport, NotificationKind, NotificationOptions, Notifier, PushRequest, TlsSettings,
    VerifyMode,
};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

fn parse_key_value(s: &str) -> Result<(String, String)> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => bail!("Expected key=value, got '{}'", s),
    }
}

/// Sends one push notification to a Windows Phone device channel.
#[derive(Parser, Debug)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), "-", env!("GIT_HASH")))]
struct CliArgs {
    /// Channel URI obtained by the device from MPNS.
    pub device_uri: String,

    /// Notification kind: "tile", "toast"; anything else is sent as raw.
    #[clap(short, long)]
    pub kind: Option<String>,

    /// Notification option as key=value. Can be repeated.
    #[clap(short = 'o', long = "option", value_parser = parse_key_value)]
    pub options: Vec<(String, String)>,

    /// Notification options as a JSON object. --option values are applied on top.
    #[clap(long)]
    pub options_json: Option<String>,

    /// Toast launch parameter as key=value. Can be repeated.
    #[clap(long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// PEM client certificate (may also hold the private key).
    #[clap(long, value_parser = parse_path)]
    pub ssl_cert: Option<PathBuf>,

    /// PEM private key for the client certificate.
    #[clap(long, value_parser = parse_path)]
    pub ssl_key: Option<PathBuf>,

    /// PEM bundle used as the only trusted CA roots.
    #[clap(long, value_parser = parse_path)]
    pub ca_file: Option<PathBuf>,

    /// Peer verification mode for HTTPS channels.
    #[clap(long)]
    pub verify_mode: Option<VerifyMode>,

    /// Request timeout in seconds.
    #[clap(long)]
    pub timeout_sec: Option<u64>,

    /// Path to a TOML config file. Its values override the flags above.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Print the request that would be sent and exit.
    #[clap(long)]
    pub dry_run: bool,
}

impl CliArgs {
    fn cli_config(&self) -> CliConfig {
        CliConfig {
            timeout_sec: self.timeout_sec,
            ssl_cert: self.ssl_cert.clone(),
            ssl_key: self.ssl_key.clone(),
            ca_file: self.ca_file.clone(),
            verify_mode: self.verify_mode,
        }
    }

    fn notification_options(&self) -> Result<NotificationOptions> {
        let mut options = match &self.options_json {
            Some(json) => {
                let value: Value =
                    serde_json::from_str(json).context("Failed to parse --options-json")?;
                NotificationOptions::from_value(value)
                    .context("--options-json must be a JSON object")?
            }
            None => NotificationOptions::new(),
        };

        for (key, value) in &self.options {
            options.insert(key.clone(), value.clone());
        }

        if !self.params.is_empty() {
            let params: Map<String, Value> = self
                .params
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            options.insert("params", Value::Object(params));
        }

        Ok(options)
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.cli_config(), file_config);

    let url = parse_device_uri(&cli_args.device_uri)?;
    let kind = NotificationKind::resolve(cli_args.kind.as_deref());
    let mut options = cli_args.notification_options()?;

    // An ssl entry in the options takes precedence over flags and config file
    let tls = match options.take_ssl() {
        Some(value) if url.scheme() == "https" => Some(TlsSettings::from_value(value)?),
        _ => config.tls,
    };

    let notification = options.into_notification(kind);

    if cli_args.dry_run {
        let request = PushRequest::new(url, notification.build(), tls);
        println!("POST {}", request.url());
        for (name, value) in request.headers().iter() {
            println!("{}: {}", name, value.to_str().unwrap_or_default());
        }
        if let Some(tls) = request.tls() {
            println!("# tls: {:?}", tls);
        }
        println!();
        println!("{}", request.body());
        return Ok(());
    }

    let transport = match config.timeout {
        Some(timeout) => HttpTransport::with_timeout(timeout),
        None => HttpTransport::new(),
    };
    let notifier = Notifier::with_transport(cli_args.device_uri.clone(), transport);

    info!("Sending {} notification to {}", kind, notifier.device_uri());
    let response = notifier
        .send(&notification, tls.as_ref())
        .with_context(|| format!("Failed to deliver notification to {}", url))?;

    println!("Status: {}", response.status);
    for (label, value) in [
        ("Notification", response.notification_status()),
        ("Subscription", response.subscription_status()),
        ("Device connection", response.device_connection_status()),
    ] {
        if let Some(value) = value {
            println!("{}: {}", label, value);
        }
    }
    if !response.body.is_empty() {
        println!("{}", response.body);
    }

    Ok(())
}
