//! Application Layer
//!
//! This module contains the compiled runtime configuration: the immutable
//! tree consumed by inbound/outbound handler managers at startup.

mod runtime;

pub use runtime::{
    Certificate, InboundConfig, LogLevel, LogSettings, LogTarget, Network, OutboundConfig,
    RuntimeConfig, Security, StreamSettings, TlsSettings,
};
