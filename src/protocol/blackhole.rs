//! Blackhole settings - drops all connections
//!
//! The response kind decides what the client sees before the connection is
//! closed: nothing, or a canned HTTP 403.

use serde::{Deserialize, Serialize};

use crate::common::Message;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    #[default]
    None,
    Http,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub response: Response,
}

impl Message for Config {
    const TYPE_NAME: &'static str = "conflux.proxy.blackhole.Config";
}
