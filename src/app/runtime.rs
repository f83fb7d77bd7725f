//! Runtime configuration - the compiled artifact
//!
//! Everything in here is produced by `Config::build` and handed to the
//! runtime unchanged:
//! - Inbound handler managers open one listener per `InboundConfig`
//! - Outbound handler managers register each `OutboundConfig` under its tag
//! - Protocol runtimes decode their `TypedMessage` settings verbatim

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::common::{Address, PortList, TypedMessage};

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub log: LogSettings,
    pub inbounds: Vec<InboundConfig>,
    pub outbounds: Vec<OutboundConfig>,
}

impl RuntimeConfig {
    /// Inbound by tag
    pub fn inbound(&self, tag: &str) -> Option<&InboundConfig> {
        self.inbounds.iter().find(|i| i.tag == tag)
    }

    /// Outbound by tag
    pub fn outbound(&self, tag: &str) -> Option<&OutboundConfig> {
        self.outbounds.iter().find(|o| o.tag == tag)
    }

    /// First declared outbound, used when routing has no opinion
    pub fn default_outbound(&self) -> Option<&OutboundConfig> {
        self.outbounds.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundConfig {
    pub tag: String,
    pub protocol: String,
    pub listen: Address,
    pub ports: PortList,
    pub settings: TypedMessage,
    pub stream: Option<StreamSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundConfig {
    pub tag: String,
    pub protocol: String,
    /// Local source address for outgoing connections
    pub send_through: Option<Address>,
    pub settings: TypedMessage,
    pub stream: Option<StreamSettings>,
}

/// Transport network kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Tcp,
    Kcp,
    WebSocket,
    Http,
    Grpc,
    HttpUpgrade,
    SplitHttp,
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Network::Tcp => "tcp",
            Network::Kcp => "kcp",
            Network::WebSocket => "ws",
            Network::Http => "http",
            Network::Grpc => "grpc",
            Network::HttpUpgrade => "httpupgrade",
            Network::SplitHttp => "splithttp",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Security {
    #[default]
    None,
    Tls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamSettings {
    pub network: Network,
    pub security: Security,
    /// Present iff `security` is `Tls`
    pub tls: Option<TlsSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsSettings {
    pub server_name: Option<String>,
    pub allow_insecure: bool,
    pub alpn: Vec<String>,
    pub certificates: Vec<Certificate>,
}

/// Certificate/key file pair (server mode)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub certificate_file: PathBuf,
    pub key_file: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warning,
    Error,
    None,
}

impl LogLevel {
    /// Maximum tracing level, `None` when logging is off
    pub fn max_level(&self) -> Option<Level> {
        match self {
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Warning => Some(Level::WARN),
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::None => None,
        }
    }
}

/// Where a log stream goes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    #[default]
    None,
    Console,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    pub access: LogTarget,
    pub error: LogTarget,
    pub level: LogLevel,
    pub dns_log: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            access: LogTarget::None,
            error: LogTarget::Console,
            level: LogLevel::Warning,
            dns_log: false,
        }
    }
}
