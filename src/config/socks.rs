//! SOCKS5 settings (JSON side)

use serde::Deserialize;

use crate::common::{Address, Error, Result, TypedMessage};
use crate::protocol::socks::{self, AuthType};

use super::loader::Buildable;
use super::user::{build_account_map, build_endpoints, AccountConfig, RemoteServerConfig};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocksAccount {
    #[serde(rename = "user", default)]
    pub username: String,
    #[serde(rename = "pass", default)]
    pub password: String,
}

impl AccountConfig for SocksAccount {
    type Account = socks::Account;

    fn build(&self) -> socks::Account {
        socks::Account {
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
pub struct SocksServerConfig {
    /// "noauth" or "password"
    #[serde(rename = "auth", default)]
    pub auth_method: String,
    #[serde(default)]
    pub accounts: Vec<SocksAccount>,
    #[serde(default)]
    pub udp: bool,
    /// UDP reply address
    #[serde(rename = "ip")]
    pub host: Option<Address>,
    #[serde(default)]
    pub user_level: u32,
}

impl Buildable for SocksServerConfig {
    fn build(&self) -> Result<TypedMessage> {
        let auth_type = match self.auth_method.to_ascii_lowercase().as_str() {
            "" | "noauth" => AuthType::NoAuth,
            "password" => AuthType::Password,
            other => {
                return Err(Error::Validation(format!(
                    "unknown socks auth method: {}",
                    other
                )))
            }
        };

        TypedMessage::new(&socks::ServerConfig {
            auth_type,
            accounts: build_account_map(&self.accounts),
            address: self.host.clone(),
            udp_enabled: self.udp,
            user_level: self.user_level,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SocksClientConfig {
    #[serde(default)]
    pub servers: Vec<RemoteServerConfig>,
}

impl Buildable for SocksClientConfig {
    fn build(&self) -> Result<TypedMessage> {
        TypedMessage::new(&socks::ClientConfig {
            servers: build_endpoints::<SocksAccount>(&self.servers)?,
        })
    }
}
