//! Stream settings (JSON side)

use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

use crate::app::{Certificate, Network, Security, StreamSettings, TlsSettings};
use crate::common::{Error, Result};

/// `streamSettings`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamConfig {
    /// Network kind, "tcp" when absent
    pub network: Option<String>,
    /// "none", "" or "tls"
    #[serde(default)]
    pub security: String,
    pub tls_settings: Option<TlsConfig>,
}

/// `tlsSettings`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsConfig {
    pub server_name: Option<String>,
    #[serde(default)]
    pub allow_insecure: bool,
    #[serde(default)]
    pub alpn: Vec<String>,
    #[serde(default)]
    pub certificates: Vec<CertificateConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateConfig {
    pub certificate_file: PathBuf,
    pub key_file: PathBuf,
}

impl StreamConfig {
    pub fn build(&self) -> Result<StreamSettings> {
        let network = match self.network.as_deref() {
            None => Network::Tcp,
            Some(name) => parse_network(name)?,
        };

        let security = match self.security.to_ascii_lowercase().as_str() {
            "" | "none" => Security::None,
            "tls" => Security::Tls,
            other => {
                return Err(Error::Validation(format!(
                    "unknown security type: {}",
                    other
                )))
            }
        };

        let tls = match security {
            Security::Tls => Some(
                self.tls_settings
                    .as_ref()
                    .map(TlsConfig::build)
                    .unwrap_or_default(),
            ),
            Security::None => {
                if self.tls_settings.is_some() {
                    warn!("tlsSettings ignored because security is not tls");
                }
                None
            }
        };

        Ok(StreamSettings {
            network,
            security,
            tls,
        })
    }
}

impl TlsConfig {
    pub fn build(&self) -> TlsSettings {
        TlsSettings {
            server_name: self.server_name.clone().filter(|s| !s.is_empty()),
            allow_insecure: self.allow_insecure,
            alpn: self.alpn.clone(),
            certificates: self
                .certificates
                .iter()
                .map(|c| Certificate {
                    certificate_file: c.certificate_file.clone(),
                    key_file: c.key_file.clone(),
                })
                .collect(),
        }
    }
}

fn parse_network(name: &str) -> Result<Network> {
    let network = match name.to_ascii_lowercase().as_str() {
        "tcp" | "raw" => Network::Tcp,
        "kcp" | "mkcp" => Network::Kcp,
        "ws" | "websocket" => Network::WebSocket,
        "http" | "h2" => Network::Http,
        "grpc" | "gun" => Network::Grpc,
        "httpupgrade" => Network::HttpUpgrade,
        "splithttp" | "xhttp" => Network::SplitHttp,
        _ => {
            return Err(Error::Validation(format!(
                "unknown transport protocol: {}",
                name
            )))
        }
    };
    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(json: &str) -> Result<StreamSettings> {
        serde_json::from_str::<StreamConfig>(json)?.build()
    }

    #[test]
    fn test_defaults() {
        let settings = build("{}").unwrap();
        assert_eq!(settings, StreamSettings::default());
    }

    #[test]
    fn test_network_aliases() {
        for (alias, expected) in [
            ("raw", Network::Tcp),
            ("mkcp", Network::Kcp),
            ("WebSocket", Network::WebSocket),
            ("h2", Network::Http),
            ("gun", Network::Grpc),
            ("xhttp", Network::SplitHttp),
        ] {
            let settings = build(&format!(r#"{{"network": "{}"}}"#, alias)).unwrap();
            assert_eq!(settings.network, expected, "alias {}", alias);
        }
        assert!(matches!(
            build(r#"{"network": "quic2"}"#),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_tls() {
        let settings = build(
            r#"{
                "network": "tcp",
                "security": "tls",
                "tlsSettings": {
                    "serverName": "go.x.one",
                    "allowInsecure": true,
                    "alpn": ["h2", "http/1.1"],
                    "certificates": [{"certificateFile": "/c.pem", "keyFile": "/k.pem"}]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(settings.security, Security::Tls);
        let tls = settings.tls.unwrap();
        assert_eq!(tls.server_name.as_deref(), Some("go.x.one"));
        assert!(tls.allow_insecure);
        assert_eq!(tls.alpn, vec!["h2", "http/1.1"]);
        assert_eq!(tls.certificates[0].key_file, PathBuf::from("/k.pem"));
    }

    #[test]
    fn test_tls_without_settings_gets_defaults() {
        let settings = build(r#"{"security": "tls"}"#).unwrap();
        assert_eq!(settings.tls, Some(TlsSettings::default()));
    }

    #[test]
    fn test_tls_settings_ignored_without_tls() {
        let settings = build(r#"{"security": "none", "tlsSettings": {"serverName": "a"}}"#).unwrap();
        assert_eq!(settings.security, Security::None);
        assert!(settings.tls.is_none());
    }

    #[test]
    fn test_unknown_security() {
        assert!(matches!(
            build(r#"{"security": "reality"}"#),
            Err(Error::Validation(_))
        ));
    }
}
