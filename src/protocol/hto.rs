//! HTO settings - HTTP-CONNECT variant with header overrides

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::common::Message;

use super::{lookup_account, Header, ServerEndpoint};

/// HTO credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
}

impl Message for Account {
    const TYPE_NAME: &'static str = "conflux.proxy.hto.Account";
}

user_pass_account!(Account);

/// HTO inbound settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// username -> password; `None` when no account was declared
    pub accounts: Option<HashMap<String, String>>,
    pub allow_transparent: bool,
    pub user_level: u32,
}

impl Message for ServerConfig {
    const TYPE_NAME: &'static str = "conflux.proxy.hto.ServerConfig";
}

impl ServerConfig {
    /// Credential check
    ///
    /// With no declared accounts this always returns false: authentication
    /// is required but cannot be satisfied.
    pub fn has_account(&self, username: &str, password: &str) -> bool {
        lookup_account(self.accounts.as_ref(), username, password)
    }
}

/// HTO outbound settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub servers: Vec<ServerEndpoint>,
    pub headers: Vec<Header>,
}

impl Message for ClientConfig {
    const TYPE_NAME: &'static str = "conflux.proxy.hto.ClientConfig";
}
