//! Protocol registry
//!
//! Maps protocol tags to settings constructors. The aggregator only ever asks
//! a `ConfigLoader` to turn `(tag, raw settings)` into a `Buildable`, so adding
//! a protocol means registering one constructor here and nothing else.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use tracing::trace;

use crate::common::{Error, Result, TypedMessage};

use super::{blackhole, freedom, hto, http, socks};

/// A JSON-facing settings shape that compiles into its runtime message
pub trait Buildable {
    fn build(&self) -> Result<TypedMessage>;
}

/// Decodes raw settings into a concrete `Buildable`
pub type ConfigCreator = fn(&str) -> Result<Box<dyn Buildable>>;

/// Constructor for any deserializable `Buildable`
pub fn create<T>(raw: &str) -> Result<Box<dyn Buildable>>
where
    T: Buildable + DeserializeOwned + 'static,
{
    let config: T = serde_json::from_str(raw)?;
    Ok(Box::new(config))
}

/// Tag -> constructor table for one detour direction
pub struct ConfigLoader {
    kind: &'static str,
    creators: HashMap<String, ConfigCreator>,
}

impl ConfigLoader {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            creators: HashMap::new(),
        }
    }

    /// Register a protocol; tags are case-insensitive and must be unique
    pub fn register(&mut self, protocol: &str, creator: ConfigCreator) -> Result<()> {
        let key = protocol.to_ascii_lowercase();
        if self.creators.contains_key(&key) {
            return Err(Error::Validation(format!(
                "{} protocol {} is already registered",
                self.kind, protocol
            )));
        }
        self.creators.insert(key, creator);
        Ok(())
    }

    pub fn contains(&self, protocol: &str) -> bool {
        self.creators.contains_key(&protocol.to_ascii_lowercase())
    }

    /// Registered tags, sorted
    pub fn protocols(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.creators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve the tag and decode its settings; absent settings decode as `{}`
    pub fn load(&self, protocol: &str, settings: Option<&RawValue>) -> Result<Box<dyn Buildable>> {
        let creator = self
            .creators
            .get(&protocol.to_ascii_lowercase())
            .ok_or_else(|| {
                Error::UnsupportedProtocol(format!("unknown {} protocol: {}", self.kind, protocol))
            })?;
        let raw = settings.map_or("{}", RawValue::get);
        trace!("Decoding {} settings for {}: {}", self.kind, protocol, raw);
        creator(raw)
    }
}

/// Inbound and outbound tables
pub struct Registry {
    pub inbound: ConfigLoader,
    pub outbound: ConfigLoader,
}

impl Registry {
    /// Registry with no protocols
    pub fn empty() -> Self {
        Self {
            inbound: ConfigLoader::new("inbound"),
            outbound: ConfigLoader::new("outbound"),
        }
    }

    /// Registry with every protocol shipped in this crate
    pub fn with_builtin() -> Result<Self> {
        let mut registry = Self::empty();

        registry.inbound.register("hto", create::<hto::HtoServerConfig>)?;
        registry.inbound.register("http", create::<http::HttpServerConfig>)?;
        registry.inbound.register("socks", create::<socks::SocksServerConfig>)?;

        registry.outbound.register("hto", create::<hto::HtoClientConfig>)?;
        registry.outbound.register("http", create::<http::HttpClientConfig>)?;
        registry.outbound.register("socks", create::<socks::SocksClientConfig>)?;
        registry.outbound.register("freedom", create::<freedom::FreedomConfig>)?;
        registry.outbound.register("blackhole", create::<blackhole::BlackholeConfig>)?;

        Ok(registry)
    }
}

lazy_static! {
    /// Process-wide registry, populated on first use and read-only afterwards
    static ref DEFAULT_REGISTRY: Registry =
        Registry::with_builtin().expect("builtin protocol tags are unique");
}

pub fn default_registry() -> &'static Registry {
    &DEFAULT_REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl Buildable for Echo {
        fn build(&self) -> Result<TypedMessage> {
            Ok(TypedMessage {
                type_name: "test.Echo".into(),
                value: serde_json::Value::Null,
            })
        }
    }

    fn echo(_raw: &str) -> Result<Box<dyn Buildable>> {
        Ok(Box::new(Echo))
    }

    #[test]
    fn test_builtin_protocols() {
        let registry = default_registry();
        assert_eq!(registry.inbound.protocols(), vec!["hto", "http", "socks"]);
        assert_eq!(
            registry.outbound.protocols(),
            vec!["blackhole", "freedom", "hto", "http", "socks"]
        );
        assert!(!registry.inbound.contains("freedom"));
    }

    #[test]
    fn test_unknown_protocol() {
        let err = default_registry().inbound.load("vless", None).err().unwrap();
        assert!(matches!(err, Error::UnsupportedProtocol(_)));
    }

    #[test]
    fn test_tag_is_case_insensitive() {
        let mut loader = ConfigLoader::new("outbound");
        loader.register("Echo", echo).unwrap();
        assert!(loader.contains("ECHO"));
        let built = loader.load("echo", None).unwrap().build().unwrap();
        assert_eq!(built.type_name, "test.Echo");
    }

    #[test]
    fn test_duplicate_registration() {
        let mut loader = ConfigLoader::new("inbound");
        loader.register("echo", echo).unwrap();
        assert!(matches!(
            loader.register("ECHO", echo),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_malformed_settings() {
        let raw = RawValue::from_string("\"nope\"".to_string()).unwrap();
        let err = default_registry()
            .inbound
            .load("hto", Some(&*raw))
            .err()
            .unwrap();
        assert!(matches!(err, Error::Parse(_)));
    }
}
