//! Freedom settings (JSON side)

use serde::Deserialize;

use crate::common::{parse_address, Error, Result, TypedMessage};
use crate::protocol::freedom::{self, DomainStrategy, Redirect};

use super::loader::Buildable;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreedomConfig {
    #[serde(default)]
    pub domain_strategy: String,
    /// "host:port"
    #[serde(default)]
    pub redirect: String,
    #[serde(default)]
    pub user_level: u32,
}

impl Buildable for FreedomConfig {
    fn build(&self) -> Result<TypedMessage> {
        let domain_strategy = match self.domain_strategy.to_ascii_lowercase().as_str() {
            "" | "asis" => DomainStrategy::AsIs,
            "useip" => DomainStrategy::UseIp,
            "useipv4" => DomainStrategy::UseIpv4,
            "useipv6" => DomainStrategy::UseIpv6,
            _ => {
                return Err(Error::Validation(format!(
                    "unsupported domain strategy: {}",
                    self.domain_strategy
                )))
            }
        };

        let redirect = if self.redirect.is_empty() {
            None
        } else {
            Some(parse_redirect(&self.redirect)?)
        };

        TypedMessage::new(&freedom::Config {
            domain_strategy,
            redirect,
            user_level: self.user_level,
        })
    }
}

/// Parse "host:port" (IPv6 hosts in brackets)
fn parse_redirect(s: &str) -> Result<Redirect> {
    let (host, port) = s
        .rsplit_once(':')
        .ok_or_else(|| Error::Parse(format!("redirect without port: {}", s)))?;
    let port: u16 = port
        .parse()
        .map_err(|_| Error::Parse(format!("invalid port in redirect: {}", s)))?;
    if port == 0 {
        return Err(Error::Validation(format!("invalid port in redirect: {}", s)));
    }
    Ok(Redirect {
        address: parse_address(host)?,
        port,
    })
}
