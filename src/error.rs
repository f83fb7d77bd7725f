//! Error types for Conflux

use thiserror::Error;

/// Which detour list a failing entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Inbound => write!(f, "inbound"),
            Direction::Outbound => write!(f, "outbound"),
        }
    }
}

/// Main error type for Conflux
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed literal or JSON document
    #[error("Parse error: {0}")]
    Parse(String),

    /// Required field absent or value out of range
    #[error("Validation error: {0}")]
    Validation(String),

    /// Protocol tag (or account type) not present in the registry
    #[error("Unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    /// A per-user record of a client server entry failed to decode
    #[error("Failed to parse user #{user} of server #{server}: {source}")]
    UserParse {
        server: usize,
        user: usize,
        #[source]
        source: serde_json::Error,
    },

    /// First failing detour of a compile, with its position
    #[error("Failed to build {direction} #{index}: {source}")]
    AggregateBuild {
        direction: Direction,
        index: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Strip aggregate wrappers and return the error that actually failed
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::AggregateBuild { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

/// Result type alias for Conflux
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_unwraps_nested_aggregates() {
        let err = Error::AggregateBuild {
            direction: Direction::Outbound,
            index: 2,
            source: Box::new(Error::UnsupportedProtocol("vless".into())),
        };
        assert!(matches!(err.root_cause(), Error::UnsupportedProtocol(tag) if tag == "vless"));
        assert_eq!(
            err.to_string(),
            "Failed to build outbound #2: Unsupported protocol: vless"
        );
    }

    #[test]
    fn test_json_error_becomes_parse() {
        let err: Error = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, Error::Parse(_)));
    }
}
