//! Configuration module for Conflux
//!
//! Supports JSON configuration similar to V2Ray. A `Config` is the parsed
//! document; `Config::build` compiles it into a `RuntimeConfig`.

pub mod blackhole;
pub mod detour;
pub mod freedom;
pub mod hto;
pub mod http;
pub mod loader;
pub mod log;
pub mod socks;
pub mod transport;
pub mod user;

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::app::RuntimeConfig;
use crate::error::{Direction, Error, Result};

pub use detour::{InboundDetourConfig, OutboundDetourConfig};
pub use loader::{default_registry, Buildable, ConfigLoader, Registry};
pub use log::LogConfig;
pub use transport::StreamConfig;

/// Main configuration structure
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Log configuration
    pub log: Option<LogConfig>,

    /// Inbound configurations
    #[serde(default)]
    pub inbounds: Vec<InboundDetourConfig>,

    /// Outbound configurations
    #[serde(default)]
    pub outbounds: Vec<OutboundDetourConfig>,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Compile against the default protocol registry
    pub fn build(&self) -> Result<RuntimeConfig> {
        self.build_with(default_registry())
    }

    /// Compile against a caller-supplied registry
    ///
    /// Inbounds are compiled before outbounds, each in declaration order.
    /// The first failure aborts the whole compile.
    pub fn build_with(&self, registry: &Registry) -> Result<RuntimeConfig> {
        let log = self
            .log
            .as_ref()
            .map(LogConfig::build)
            .unwrap_or_default();

        let inbounds = self
            .inbounds
            .iter()
            .enumerate()
            .map(|(index, detour)| {
                detour
                    .build(&registry.inbound)
                    .map_err(|e| wrap(Direction::Inbound, index, e))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut seen = HashSet::new();
        let outbounds = self
            .outbounds
            .iter()
            .enumerate()
            .map(|(index, detour)| {
                let outbound = detour
                    .build(&registry.outbound)
                    .map_err(|e| wrap(Direction::Outbound, index, e))?;
                if !outbound.tag.is_empty() && !seen.insert(outbound.tag.clone()) {
                    return Err(wrap(
                        Direction::Outbound,
                        index,
                        Error::Validation(format!("duplicate outbound tag: {}", outbound.tag)),
                    ));
                }
                Ok(outbound)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Log settings: {:?}", log);
        info!(
            "Compiled {} inbound(s) and {} outbound(s)",
            inbounds.len(),
            outbounds.len()
        );

        Ok(RuntimeConfig {
            log,
            inbounds,
            outbounds,
        })
    }
}

fn wrap(direction: Direction, index: usize, source: Error) -> Error {
    Error::AggregateBuild {
        direction,
        index,
        source: Box::new(source),
    }
}
