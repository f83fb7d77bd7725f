//! Common types and abstractions
//!
//! This module defines the primitives shared by every builder:
//! - Address: IP or domain literal
//! - PortRange / PortList: listener port sets
//! - TypedMessage: self-describing envelope for compiled settings
//! - Error: unified error types

mod address;
mod message;
mod port;

pub use address::{parse_address, Address};
pub use message::{Message, TypedMessage};
pub use port::{PortList, PortRange};

// Re-export error types from crate root
pub use crate::error::{Error, Result};
