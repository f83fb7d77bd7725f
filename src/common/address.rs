//! Address type for endpoint literals

use std::net::{IpAddr, Ipv4Addr};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

lazy_static! {
    /// One DNS label: 1-63 chars, no leading/trailing hyphen
    static ref DOMAIN_LABEL: Regex =
        Regex::new(r"^[A-Za-z0-9_](?:[A-Za-z0-9_-]{0,61}[A-Za-z0-9_])?$").unwrap();
}

const MAX_DOMAIN_LEN: usize = 253;

/// IP literal or domain name
///
/// IP literals carry their resolved form; domains are kept verbatim and
/// resolved later by the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Address {
    /// IPv4 or IPv6 literal
    Ip(IpAddr),
    /// Domain name
    Domain(String),
}

impl Address {
    /// `0.0.0.0`
    pub fn any() -> Self {
        Address::Ip(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
    }

    /// Check if this is a domain address
    pub fn is_domain(&self) -> bool {
        matches!(self, Address::Domain(_))
    }

    /// Resolved IP, if this is an IP literal
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            Address::Ip(ip) => Some(*ip),
            Address::Domain(_) => None,
        }
    }

    /// Domain, if this is a domain address
    pub fn domain(&self) -> Option<&str> {
        match self {
            Address::Domain(domain) => Some(domain),
            Address::Ip(_) => None,
        }
    }
}

/// Parse an IP or domain literal
///
/// IPv6 literals may be wrapped in brackets; IPv4-mapped IPv6 literals
/// resolve to the IPv4 address. Anything that is not an IP must
/// be syntactically a domain name, otherwise `Error::Parse` is returned.
pub fn parse_address(literal: &str) -> Result<Address> {
    let s = literal.trim();
    if s.is_empty() {
        return Err(Error::Parse("empty address".into()));
    }

    let unbracketed = s
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(s);
    if let Ok(ip) = unbracketed.parse::<IpAddr>() {
        return Ok(Address::Ip(ip.to_canonical()));
    }

    if is_valid_domain(s) {
        return Ok(Address::Domain(s.to_string()));
    }

    Err(Error::Parse(format!("invalid address: {}", literal)))
}

fn is_valid_domain(s: &str) -> bool {
    // A single trailing dot marks a fully-qualified name
    let name = s.strip_suffix('.').unwrap_or(s);
    if name.is_empty() || name.len() > MAX_DOMAIN_LEN {
        return false;
    }
    name.split('.').all(|label| DOMAIN_LABEL.is_match(label))
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Address::Ip(ip) => write!(f, "{}", ip),
            Address::Domain(domain) => write!(f, "{}", domain),
        }
    }
}

impl std::str::FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_address(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse_address(&value).map_err(serde::de::Error::custom)
    }
}
