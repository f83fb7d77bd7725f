//! Blackhole settings (JSON side)

use serde::Deserialize;

use crate::common::{Error, Result, TypedMessage};
use crate::protocol::blackhole::{self, Response};

use super::loader::Buildable;

#[derive(Debug, Default, Deserialize)]
pub struct ResponseConfig {
    #[serde(rename = "type", default)]
    pub response_type: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BlackholeConfig {
    pub response: Option<ResponseConfig>,
}

impl Buildable for BlackholeConfig {
    fn build(&self) -> Result<TypedMessage> {
        let response = match &self.response {
            None => Response::None,
            Some(r) => match r.response_type.to_ascii_lowercase().as_str() {
                "" | "none" => Response::None,
                "http" => Response::Http,
                other => {
                    return Err(Error::Validation(format!(
                        "unknown blackhole response type: {}",
                        other
                    )))
                }
            },
        };
        TypedMessage::new(&blackhole::Config { response })
    }
}
