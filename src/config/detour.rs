//! Inbound and outbound detours
//!
//! A detour pairs a protocol tag with raw settings. The settings stay
//! undecoded until the registry resolves the tag, so this module never needs
//! to know any protocol's settings shape.

use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::debug;

use crate::app::{InboundConfig, OutboundConfig};
use crate::common::{Address, Error, PortList, Result};

use super::loader::ConfigLoader;
use super::transport::StreamConfig;

/// One inbound listener
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundDetourConfig {
    #[serde(default)]
    pub tag: String,
    pub protocol: String,
    /// Listen address, `0.0.0.0` when absent
    pub listen: Option<Address>,
    pub port: Option<PortList>,
    pub settings: Option<Box<RawValue>>,
    pub stream_settings: Option<StreamConfig>,
}

impl InboundDetourConfig {
    pub fn build(&self, loader: &ConfigLoader) -> Result<InboundConfig> {
        let ports = self
            .port
            .clone()
            .ok_or_else(|| Error::Validation("port is not specified".into()))?;

        let listen = match &self.listen {
            Some(addr) if addr.is_domain() => {
                return Err(Error::Validation(format!(
                    "unable to listen on domain address: {}",
                    addr
                )))
            }
            Some(addr) => addr.clone(),
            None => Address::any(),
        };

        let stream = self
            .stream_settings
            .as_ref()
            .map(StreamConfig::build)
            .transpose()?;

        let settings = loader
            .load(&self.protocol, self.settings.as_deref())?
            .build()?;

        debug!(
            "Inbound [{}]: protocol={}, listen={}:{}",
            self.tag, self.protocol, listen, ports
        );

        Ok(InboundConfig {
            tag: self.tag.clone(),
            protocol: self.protocol.to_ascii_lowercase(),
            listen,
            ports,
            settings,
            stream,
        })
    }
}

/// One outbound handler
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundDetourConfig {
    #[serde(default)]
    pub tag: String,
    pub protocol: String,
    /// Local address to send from
    pub send_through: Option<Address>,
    pub settings: Option<Box<RawValue>>,
    pub stream_settings: Option<StreamConfig>,
}

impl OutboundDetourConfig {
    pub fn build(&self, loader: &ConfigLoader) -> Result<OutboundConfig> {
        if let Some(addr) = &self.send_through {
            if addr.is_domain() {
                return Err(Error::Validation(format!(
                    "sendThrough must be an IP address: {}",
                    addr
                )));
            }
        }

        let stream = self
            .stream_settings
            .as_ref()
            .map(StreamConfig::build)
            .transpose()?;

        let settings = loader
            .load(&self.protocol, self.settings.as_deref())?
            .build()?;

        debug!(
            "Outbound [{}]: protocol={}, stream={:?}",
            self.tag,
            self.protocol,
            stream.as_ref().map(|s| s.network)
        );

        Ok(OutboundConfig {
            tag: self.tag.clone(),
            protocol: self.protocol.to_ascii_lowercase(),
            send_through: self.send_through.clone(),
            settings,
            stream,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Network;
    use crate::config::loader::default_registry;
    use crate::protocol::{freedom, hto};

    fn inbound(json: &str) -> Result<InboundConfig> {
        serde_json::from_str::<InboundDetourConfig>(json)?.build(&default_registry().inbound)
    }

    fn outbound(json: &str) -> Result<OutboundConfig> {
        serde_json::from_str::<OutboundDetourConfig>(json)?.build(&default_registry().outbound)
    }

    #[test]
    fn test_inbound() {
        let config = inbound(
            r#"{
                "tag": "hto-in",
                "protocol": "HTO",
                "listen": "127.0.0.1",
                "port": "1091-1092",
                "settings": {"accounts": [{"user": "a", "pass": "b"}]}
            }"#,
        )
        .unwrap();
        assert_eq!(config.tag, "hto-in");
        assert_eq!(config.protocol, "hto");
        assert_eq!(config.listen.to_string(), "127.0.0.1");
        assert!(config.ports.contains(1092));
        let settings: hto::ServerConfig = config.settings.decode().unwrap();
        assert!(settings.has_account("a", "b"));
    }

    #[test]
    fn test_inbound_defaults() {
        let config = inbound(r#"{"protocol": "socks", "port": 1080}"#).unwrap();
        assert_eq!(config.listen, Address::any());
        assert!(config.stream.is_none());
    }

    #[test]
    fn test_inbound_requires_port() {
        assert!(matches!(
            inbound(r#"{"protocol": "http"}"#),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_inbound_rejects_domain_listen() {
        assert!(matches!(
            inbound(r#"{"protocol": "http", "listen": "example.com", "port": 80}"#),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_inbound_unknown_protocol() {
        assert!(matches!(
            inbound(r#"{"protocol": "freedom", "port": 80}"#),
            Err(Error::UnsupportedProtocol(_))
        ));
    }

    #[test]
    fn test_outbound_without_settings() {
        let config = outbound(r#"{"protocol": "freedom", "tag": "direct"}"#).unwrap();
        assert_eq!(config.tag, "direct");
        let settings: freedom::Config = config.settings.decode().unwrap();
        assert_eq!(settings, freedom::Config::default());
    }

    #[test]
    fn test_outbound_stream_and_send_through() {
        let config = outbound(
            r#"{
                "protocol": "hto",
                "tag": "proxy",
                "sendThrough": "10.0.0.2",
                "settings": {"servers": [{"address": "example.com", "port": 443}]},
                "streamSettings": {"network": "ws", "security": "tls"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.send_through.unwrap().to_string(), "10.0.0.2");
        assert_eq!(config.stream.unwrap().network, Network::WebSocket);
    }

    #[test]
    fn test_outbound_send_through_domain() {
        assert!(matches!(
            outbound(r#"{"protocol": "freedom", "sendThrough": "example.com"}"#),
            Err(Error::Validation(_))
        ));
    }
}
