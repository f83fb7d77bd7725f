//! HTTP CONNECT settings

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::common::Message;

use super::{lookup_account, Header, ServerEndpoint};

/// HTTP proxy credential (Basic auth)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
}

impl Message for Account {
    const TYPE_NAME: &'static str = "conflux.proxy.http.Account";
}

user_pass_account!(Account);

/// HTTP inbound settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub accounts: Option<HashMap<String, String>>,
    pub allow_transparent: bool,
    pub user_level: u32,
}

impl Message for ServerConfig {
    const TYPE_NAME: &'static str = "conflux.proxy.http.ServerConfig";
}

impl ServerConfig {
    pub fn has_account(&self, username: &str, password: &str) -> bool {
        lookup_account(self.accounts.as_ref(), username, password)
    }
}

/// HTTP outbound settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub servers: Vec<ServerEndpoint>,
    pub headers: Vec<Header>,
}

impl Message for ClientConfig {
    const TYPE_NAME: &'static str = "conflux.proxy.http.ClientConfig";
}
