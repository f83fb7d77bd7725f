//! HTTP CONNECT settings (JSON side)

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::common::{Result, TypedMessage};
use crate::protocol::http;

use super::loader::Buildable;
use super::user::{
    build_account_map, build_endpoints, build_headers, AccountConfig, RemoteServerConfig,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpAccount {
    #[serde(rename = "user", default)]
    pub username: String,
    #[serde(rename = "pass", default)]
    pub password: String,
}

impl AccountConfig for HttpAccount {
    type Account = http::Account;

    fn build(&self) -> http::Account {
        http::Account {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    fn credentials(&self) -> (&str, &str) {
        (&self.username, &self.password)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpServerConfig {
    #[serde(default)]
    pub accounts: Vec<HttpAccount>,
    #[serde(rename = "allowTransparent", default)]
    pub transparent: bool,
    #[serde(default)]
    pub user_level: u32,
}

impl Buildable for HttpServerConfig {
    fn build(&self) -> Result<TypedMessage> {
        TypedMessage::new(&http::ServerConfig {
            accounts: build_account_map(&self.accounts),
            allow_transparent: self.transparent,
            user_level: self.user_level,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HttpClientConfig {
    #[serde(default)]
    pub servers: Vec<RemoteServerConfig>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Buildable for HttpClientConfig {
    fn build(&self) -> Result<TypedMessage> {
        TypedMessage::new(&http::ClientConfig {
            servers: build_endpoints::<HttpAccount>(&self.servers)?,
            headers: build_headers(&self.headers),
        })
    }
}
