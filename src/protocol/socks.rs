//! SOCKS5 settings

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::common::{Address, Message};

use super::{lookup_account, ServerEndpoint};

/// SOCKS5 username/password credential (RFC 1929)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
}

impl Message for Account {
    const TYPE_NAME: &'static str = "conflux.proxy.socks.Account";
}

user_pass_account!(Account);

/// Authentication type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    #[default]
    NoAuth,
    Password,
}

/// SOCKS5 inbound settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub auth_type: AuthType,
    pub accounts: Option<HashMap<String, String>>,
    /// Address announced in UDP ASSOCIATE replies
    pub address: Option<Address>,
    pub udp_enabled: bool,
    pub user_level: u32,
}

impl Message for ServerConfig {
    const TYPE_NAME: &'static str = "conflux.proxy.socks.ServerConfig";
}

impl ServerConfig {
    pub fn has_account(&self, username: &str, password: &str) -> bool {
        lookup_account(self.accounts.as_ref(), username, password)
    }
}

/// SOCKS5 outbound settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub servers: Vec<ServerEndpoint>,
}

impl Message for ClientConfig {
    const TYPE_NAME: &'static str = "conflux.proxy.socks.ClientConfig";
}
