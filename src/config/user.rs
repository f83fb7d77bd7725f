//! Client-side users and remote servers
//!
//! A per-user JSON record mixes protocol-agnostic fields (`level`, `email`)
//! with protocol-specific credentials (`user`, `pass`, ...). The record is
//! decoded twice, once into the generic envelope and once into the
//! protocol's account shape, and the two results are merged into a `User`.
//! Neither decode knows about the other's fields.

use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::debug;

use crate::common::{Address, Error, Result};
use crate::protocol::{Account, Header, ServerEndpoint, User};

/// JSON-facing account shape of one protocol
pub trait AccountConfig: DeserializeOwned {
    type Account: Account;

    /// Structural conversion only; empty fields are accepted as-is
    fn build(&self) -> Self::Account;

    /// `(username, password)` for server-side credential stores
    fn credentials(&self) -> (&str, &str);
}

/// Protocol-agnostic part of a user record
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserEnvelope {
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub email: String,
}

/// First decode pass: envelope fields only
pub fn decode_envelope(raw: &RawValue) -> serde_json::Result<UserEnvelope> {
    serde_json::from_str(raw.get())
}

/// Second decode pass: protocol account fields only
pub fn decode_account<A: AccountConfig>(raw: &RawValue) -> serde_json::Result<A> {
    serde_json::from_str(raw.get())
}

/// Inject the typed account into the envelope
pub fn merge_user(envelope: UserEnvelope, account: &dyn Account) -> Result<User> {
    Ok(User {
        level: envelope.level,
        email: envelope.email,
        account: Some(account.to_proto()?),
    })
}

/// One remote server as declared in client settings
#[derive(Debug, Default, Deserialize)]
pub struct RemoteServerConfig {
    pub address: Option<Address>,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub users: Vec<Box<RawValue>>,
}

/// Compile every declared server into an endpoint with merged users
///
/// Any user failing either decode pass fails the whole list.
pub fn build_endpoints<A: AccountConfig>(
    servers: &[RemoteServerConfig],
) -> Result<Vec<ServerEndpoint>> {
    let mut endpoints = Vec::with_capacity(servers.len());

    for (server_idx, server) in servers.iter().enumerate() {
        let address = server.address.clone().ok_or_else(|| {
            Error::Validation(format!("server #{}: address is not specified", server_idx))
        })?;
        if server.port == 0 {
            return Err(Error::Validation(format!(
                "server #{}: invalid port 0",
                server_idx
            )));
        }

        let mut users = Vec::with_capacity(server.users.len());
        for (user_idx, raw) in server.users.iter().enumerate() {
            let user_parse = |source: serde_json::Error| Error::UserParse {
                server: server_idx,
                user: user_idx,
                source,
            };
            let envelope = decode_envelope(raw).map_err(user_parse)?;
            let account = decode_account::<A>(raw).map_err(user_parse)?;
            users.push(merge_user(envelope, &account.build())?);
        }

        debug!(
            "Server #{} {}:{} with {} user(s)",
            server_idx,
            address,
            server.port,
            users.len()
        );
        endpoints.push(ServerEndpoint {
            address,
            port: server.port,
            users,
        });
    }

    Ok(endpoints)
}

/// Compile a declared account list into a credential map
///
/// Later duplicates overwrite earlier ones. An empty list yields `None`,
/// which denies every credential check.
pub fn build_account_map<A: AccountConfig>(accounts: &[A]) -> Option<HashMap<String, String>> {
    if accounts.is_empty() {
        return None;
    }
    let map = accounts
        .iter()
        .map(|a| {
            let (user, pass) = a.credentials();
            (user.to_string(), pass.to_string())
        })
        .collect();
    Some(map)
}

/// Header overrides in key order
pub fn build_headers(headers: &BTreeMap<String, String>) -> Vec<Header> {
    headers
        .iter()
        .map(|(key, value)| Header {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}
