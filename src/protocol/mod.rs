//! Proxy Protocol Layer (compiled settings)
//!
//! Responsibilities:
//! - Runtime settings messages, one set per protocol
//! - Credential model (Account) shared across protocols
//! - Endpoint and user records consumed by outbound handlers
//!
//! Nothing here does I/O. Protocol runtimes receive these messages already
//! decoded and never parse JSON themselves.

/// Shared implementation for username/password accounts
macro_rules! user_pass_account {
    ($ty:ty) => {
        impl $crate::protocol::Account for $ty {
            fn equals(&self, other: &dyn $crate::protocol::Account) -> bool {
                other
                    .as_any()
                    .downcast_ref::<$ty>()
                    .map_or(false, |other| other.username == self.username)
            }

            fn to_proto(&self) -> $crate::common::Result<$crate::common::TypedMessage> {
                $crate::common::TypedMessage::new(self)
            }

            fn as_account(&self) -> $crate::common::Result<Box<dyn $crate::protocol::Account>> {
                Ok(Box::new(self.clone()))
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    };
}

pub mod blackhole;
pub mod freedom;
pub mod hto;
pub mod http;
pub mod socks;

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::{Address, Error, Result, TypedMessage};

/// Credential capability implemented once per protocol
///
/// `equals` is an identity check on the username only. Verifying a password
/// is the job of the server config (`has_account`), not of the account.
pub trait Account: fmt::Debug + Send + Sync {
    /// Same concrete type and same username
    fn equals(&self, other: &dyn Account) -> bool;

    /// Serialized runtime representation
    fn to_proto(&self) -> Result<TypedMessage>;

    /// Owned trait object for this account
    fn as_account(&self) -> Result<Box<dyn Account>>;

    /// Downcast support for `equals`
    fn as_any(&self) -> &dyn Any;
}

/// Turn a stored account message back into a live account
pub fn decode_account(message: &TypedMessage) -> Result<Box<dyn Account>> {
    if message.is::<hto::Account>() {
        message.decode::<hto::Account>()?.as_account()
    } else if message.is::<http::Account>() {
        message.decode::<http::Account>()?.as_account()
    } else if message.is::<socks::Account>() {
        message.decode::<socks::Account>()?.as_account()
    } else {
        Err(Error::UnsupportedProtocol(format!(
            "unknown account type: {}",
            message.type_name
        )))
    }
}

/// Generic user envelope
///
/// Level and email are protocol-agnostic; the credential itself is an opaque
/// typed account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub level: u32,
    pub email: String,
    pub account: Option<TypedMessage>,
}

impl User {
    /// Materialize the embedded account
    pub fn to_memory_user(&self) -> Result<MemoryUser> {
        let account = match &self.account {
            Some(message) => decode_account(message)?,
            None => return Err(Error::Validation("user has no account".into())),
        };
        Ok(MemoryUser {
            level: self.level,
            email: self.email.clone(),
            account,
        })
    }
}

/// User with a decoded account, as held by a running handler
#[derive(Debug)]
pub struct MemoryUser {
    pub level: u32,
    pub email: String,
    pub account: Box<dyn Account>,
}

/// One remote server of a client config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerEndpoint {
    pub address: Address,
    pub port: u16,
    pub users: Vec<User>,
}

/// Header override sent by HTTP-style clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

/// Look up a username/password pair in an optional account map
///
/// A missing map denies everyone.
pub(crate) fn lookup_account(
    accounts: Option<&std::collections::HashMap<String, String>>,
    username: &str,
    password: &str,
) -> bool {
    accounts
        .and_then(|map| map.get(username))
        .map_or(false, |stored| stored == password)
}
