//! Freedom settings - direct connection to the destination

use serde::{Deserialize, Serialize};

use crate::common::{Address, Message};

/// Domain resolution strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainStrategy {
    #[default]
    AsIs,
    UseIp,
    UseIpv4,
    UseIpv6,
}

/// Fixed destination overriding the requested one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub address: Address,
    pub port: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub domain_strategy: DomainStrategy,
    pub redirect: Option<Redirect>,
    pub user_level: u32,
}

impl Message for Config {
    const TYPE_NAME: &'static str = "conflux.proxy.freedom.Config";
}
