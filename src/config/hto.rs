//! HTO settings (JSON side)

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::common::{Result, TypedMessage};
use crate::protocol::hto;

use super::loader::Buildable;
use super::user::{
    build_account_map, build_endpoints, build_headers, AccountConfig, RemoteServerConfig,
};

/// `{"user": ..., "pass": ...}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HtoAccount {
    #[serde(rename = "user", default)]
    pub username: String,
    #[serde(rename = "pass", default)]
    pub password: String,
}

impl AccountConfig for HtoAccount {
    type Account = hto::Account;

    fn build(&self) -> hto::Account {
        hto::Account {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    fn credentials(&self) -> (&str, &str) {
        (&self.username, &self.password)
    }
}

/// Inbound settings
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtoServerConfig {
    #[serde(default)]
    pub accounts: Vec<HtoAccount>,
    #[serde(rename = "allowTransparent", default)]
    pub transparent: bool,
    #[serde(default)]
    pub user_level: u32,
}

impl Buildable for HtoServerConfig {
    fn build(&self) -> Result<TypedMessage> {
        TypedMessage::new(&hto::ServerConfig {
            accounts: build_account_map(&self.accounts),
            allow_transparent: self.transparent,
            user_level: self.user_level,
        })
    }
}

/// Outbound settings
#[derive(Debug, Default, Deserialize)]
pub struct HtoClientConfig {
    #[serde(default)]
    pub servers: Vec<RemoteServerConfig>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Buildable for HtoClientConfig {
    fn build(&self) -> Result<TypedMessage> {
        TypedMessage::new(&hto::ClientConfig {
            servers: build_endpoints::<HtoAccount>(&self.servers)?,
            headers: build_headers(&self.headers),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::common::Error;
    use crate::config::loader::create;

    fn build_server(json: &str) -> hto::ServerConfig {
        create::<HtoServerConfig>(json)
            .unwrap()
            .build()
            .unwrap()
            .decode()
            .unwrap()
    }

    fn build_client(json: &str) -> Result<hto::ClientConfig> {
        create::<HtoClientConfig>(json)?.build()?.decode()
    }

    #[test]
    fn test_server_config() {
        let config = build_server(
            r#"{
                "accounts": [
                    {
                        "user": "my-username",
                        "pass": "my-password"
                    }
                ],
                "allowTransparent": true,
                "userLevel": 1
            }"#,
        );
        assert_eq!(
            config,
            hto::ServerConfig {
                accounts: Some(HashMap::from([(
                    "my-username".to_string(),
                    "my-password".to_string()
                )])),
                allow_transparent: true,
                user_level: 1,
            }
        );
        assert!(config.has_account("my-username", "my-password"));
        assert!(!config.has_account("my-username", "wrong"));
    }

    #[test]
    fn test_server_config_every_declared_pair() {
        let pairs: Vec<(String, String)> =
            (0..16).map(|i| (format!("user{}", i), format!("pass{}", i))).collect();
        let accounts: Vec<_> = pairs
            .iter()
            .map(|(u, p)| serde_json::json!({"user": u, "pass": p}))
            .collect();
        let config = build_server(&serde_json::json!({ "accounts": accounts }).to_string());

        for (i, (u, p)) in pairs.iter().enumerate() {
            assert!(config.has_account(u, p));
            let (_, other) = &pairs[(i + 1) % pairs.len()];
            assert!(!config.has_account(u, other));
        }
    }

    #[test]
    fn test_server_config_empty_accounts_denies() {
        for json in ["{}", r#"{"accounts": []}"#] {
            let config = build_server(json);
            assert_eq!(config.accounts, None);
            assert!(!config.has_account("", ""));
            assert!(!config.has_account("anyone", "anything"));
        }
    }

    #[test]
    fn test_server_config_duplicate_user_last_wins() {
        let config = build_server(
            r#"{"accounts": [{"user":"a","pass":"old"},{"user":"a","pass":"new"}]}"#,
        );
        assert!(config.has_account("a", "new"));
        assert!(!config.has_account("a", "old"));
    }

    #[test]
    fn test_server_config_accepts_empty_credentials() {
        let config = build_server(r#"{"accounts": [{}]}"#);
        assert!(config.has_account("", ""));
    }

    #[test]
    fn test_client_config() {
        let config = build_client(
            r#"{
                "servers": [{
                    "address": "127.0.0.1",
                    "port": 8080,
                    "users": [{"user":"u","pass":"pw","level":5,"email":"x"}]
                }],
                "headers": {"X-b": "d", "X-a": "b"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.servers.len(), 1);
        let server = &config.servers[0];
        assert_eq!(server.address.to_string(), "127.0.0.1");
        assert_eq!(server.port, 8080);
        assert_eq!(server.users.len(), 1);

        let user = &server.users[0];
        assert_eq!(user.level, 5);
        assert_eq!(user.email, "x");
        let account: hto::Account = user.account.as_ref().unwrap().decode().unwrap();
        assert_eq!(account.username, "u");
        assert_eq!(account.password, "pw");

        let keys: Vec<&str> = config.headers.iter().map(|h| h.key.as_str()).collect();
        assert_eq!(keys, vec!["X-a", "X-b"]);
    }

    #[test]
    fn test_client_config_bad_user_fails_whole_config() {
        let err = build_client(
            r#"{
                "servers": [{
                    "address": "example.com",
                    "port": 443,
                    "users": [{"user":"ok","pass":"ok"}, {"user": 42}]
                }]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UserParse { server: 0, user: 1, .. }));
    }

    #[test]
    fn test_client_config_bad_address() {
        let err = build_client(r#"{"servers": [{"address": "not a host", "port": 1}]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
