//! Port ranges and port lists

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Inclusive port range, `1 <= from <= to <= 65535`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRange {
    from: u16,
    to: u16,
}

impl PortRange {
    pub fn new(from: u16, to: u16) -> Result<Self> {
        if from == 0 {
            return Err(Error::Parse("port 0 is not allowed".into()));
        }
        if from > to {
            return Err(Error::Parse(format!(
                "invalid port range (start > end): {}-{}",
                from, to
            )));
        }
        Ok(Self { from, to })
    }

    pub fn single(port: u16) -> Result<Self> {
        Self::new(port, port)
    }

    pub fn contains(&self, port: u16) -> bool {
        port >= self.from && port <= self.to
    }
}

impl std::fmt::Display for PortRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.from == self.to {
            write!(f, "{}", self.from)
        } else {
            write!(f, "{}-{}", self.from, self.to)
        }
    }
}

/// Ordered list of port ranges
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortList {
    ranges: Vec<PortRange>,
}

impl PortList {
    pub fn new(ranges: Vec<PortRange>) -> Result<Self> {
        if ranges.is_empty() {
            return Err(Error::Parse("empty port list".into()));
        }
        Ok(Self { ranges })
    }

    /// Parse a port pattern (e.g., "80", "80,443", "1000-2000")
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut ranges = Vec::new();
        for part in pattern.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                ranges.push(PortRange::new(parse_port(start)?, parse_port(end)?)?);
            } else {
                ranges.push(PortRange::single(parse_port(part)?)?);
            }
        }
        Self::new(ranges)
    }

    pub fn ranges(&self) -> &[PortRange] {
        &self.ranges
    }

    /// True if any range covers the port
    pub fn contains(&self, port: u16) -> bool {
        self.ranges.iter().any(|r| r.contains(port))
    }
}

fn parse_port(s: &str) -> Result<u16> {
    s.trim()
        .parse::<u16>()
        .map_err(|e| Error::Parse(format!("invalid port number {:?}: {}", s, e)))
}

impl From<PortRange> for PortList {
    fn from(range: PortRange) -> Self {
        Self {
            ranges: vec![range],
        }
    }
}

impl std::fmt::Display for PortList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", range)?;
        }
        Ok(())
    }
}

impl Serialize for PortList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// JSON accepts either a bare number or a pattern string
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPortList {
    Number(u64),
    Pattern(String),
}

impl<'de> Deserialize<'de> for PortList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let parsed = match RawPortList::deserialize(deserializer)? {
            RawPortList::Number(n) => u16::try_from(n)
                .map_err(|_| Error::Parse(format!("port out of range: {}", n)))
                .and_then(PortRange::single)
                .map(PortList::from),
            RawPortList::Pattern(s) => PortList::parse(&s),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_range_bounds() {
        let range = PortRange::new(1000, 2000).unwrap();
        assert!(range.contains(1000));
        assert!(range.contains(2000));
        assert!(!range.contains(999));
        assert!(!range.contains(2001));
        assert!(PortRange::new(0, 10).is_err());
        assert!(PortRange::new(20, 10).is_err());
        assert!(PortRange::single(65535).is_ok());
    }

    #[test]
    fn test_port_list_contains() {
        let list = PortList::parse("80,443,1000-2000").unwrap();
        assert_eq!(list.ranges().len(), 3);
        assert!(list.contains(80));
        assert!(list.contains(443));
        assert!(list.contains(1500));
        assert!(!list.contains(81));
        assert!(!list.contains(2001));
        assert_eq!(list.to_string(), "80,443,1000-2000");
    }

    #[test]
    fn test_port_list_rejects_malformed() {
        for bad in ["", "x", "0", "2000-1000", "70000", "1-2-3", "80,"] {
            assert!(PortList::parse(bad).is_err(), "{:?} should not parse", bad);
        }
    }

    #[test]
    fn test_port_list_json_forms() {
        let n: PortList = serde_json::from_str("1080").unwrap();
        assert_eq!(n, PortList::from(PortRange::single(1080).unwrap()));

        let s: PortList = serde_json::from_str("\"1080\"").unwrap();
        assert_eq!(s, n);

        let r: PortList = serde_json::from_str("\"10-20, 30\"").unwrap();
        assert!(r.contains(15));
        assert!(r.contains(30));

        assert!(serde_json::from_str::<PortList>("0").is_err());
        assert!(serde_json::from_str::<PortList>("65536").is_err());
        assert_eq!(serde_json::to_string(&r).unwrap(), "\"10-20,30\"");
    }
}
