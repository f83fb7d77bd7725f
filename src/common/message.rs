//! TypedMessage - self-describing envelope for compiled settings
//!
//! Every compiled settings object and every account travels through the
//! runtime config as a `TypedMessage`: the concrete type name plus its
//! serialized value. Consumers decode it back into the concrete type they
//! expect; a mismatched type name is an error, never a silent reinterpretation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A type that can be carried inside a [`TypedMessage`]
pub trait Message: Serialize + DeserializeOwned {
    /// Globally unique type name, e.g. `conflux.proxy.hto.Account`
    const TYPE_NAME: &'static str;
}

/// Type name + serialized value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedMessage {
    #[serde(rename = "type")]
    pub type_name: String,
    pub value: serde_json::Value,
}

impl TypedMessage {
    /// Wrap a message
    pub fn new<M: Message>(message: &M) -> Result<Self> {
        Ok(Self {
            type_name: M::TYPE_NAME.to_string(),
            value: serde_json::to_value(message)?,
        })
    }

    /// Check whether this envelope holds an `M`
    pub fn is<M: Message>(&self) -> bool {
        self.type_name == M::TYPE_NAME
    }

    /// Decode back into the concrete type
    pub fn decode<M: Message>(&self) -> Result<M> {
        if !self.is::<M>() {
            return Err(Error::Parse(format!(
                "type mismatch: expected {}, found {}",
                M::TYPE_NAME,
                self.type_name
            )));
        }
        Ok(M::deserialize(&self.value)?)
    }
}
