//! Conflux - configuration compiler for a multi-protocol proxy runtime
//!
//! # Architecture (Compile Pipeline)
//!
//! ```text
//! JSON document
//! → Config (detours with raw settings)
//! → Registry (protocol tag → settings decoder)
//! → Buildable (protocol-specific settings)
//! → RuntimeConfig (typed, immutable)
//! ```
//!
//! ## Core Principles
//!
//! - Settings stay raw until the protocol tag picks a decoder
//! - The aggregator never knows a protocol's settings shape
//! - First failure aborts the compile; no partial output
//! - No I/O beyond reading the input document
//!
//! ## Module Structure
//!
//! ```text
//! src/
//! ├── common/          # Core types: Address, PortList, TypedMessage
//! ├── protocol/        # Compiled settings and accounts per protocol
//! ├── config/          # JSON shapes, registry, detours, aggregator
//! └── app/             # RuntimeConfig handed to the runtime
//! ```

// Core types
pub mod common;
pub mod error;

pub mod protocol;
pub mod config;
pub mod app;

// Re-exports for convenience
pub use common::{parse_address, Address, PortList, PortRange, TypedMessage};
pub use error::{Error, Result};
pub use config::{Buildable, Config, Registry};
pub use app::RuntimeConfig;
pub use protocol::Account;

/// Parse and compile a JSON document with the default registry
pub fn compile(json: &str) -> Result<RuntimeConfig> {
    Config::from_json(json)?.build()
}
