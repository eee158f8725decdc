//! Station identifier type.

use std::fmt;

use serde::Serialize;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// An opaque, unique station identifier.
///
/// Schedules identify stations by arbitrary non-empty tokens (the sample
/// data uses numeric strings such as `"1929"`). Equal identifiers denote
/// the same station. This type guarantees the identifier is non-empty and
/// free of whitespace by construction.
///
/// # Examples
///
/// ```
/// use rail_router::domain::StationId;
///
/// let station = StationId::parse("1929").unwrap();
/// assert_eq!(station.as_str(), "1929");
///
/// // Empty and whitespace-containing identifiers are rejected
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("19 29").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StationId(String);

impl StationId {
    /// Parse a station identifier from a string.
    ///
    /// The input must be non-empty and must not contain whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(InvalidStationId {
                reason: "must not contain whitespace",
            });
        }

        Ok(StationId(s.to_owned()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert!(StationId::parse("1929").is_ok());
        assert!(StationId::parse("A").is_ok());
        assert!(StationId::parse("central-north").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(StationId::parse("").is_err());
    }

    #[test]
    fn reject_whitespace() {
        assert!(StationId::parse("19 29").is_err());
        assert!(StationId::parse(" 1929").is_err());
        assert!(StationId::parse("1929\t").is_err());
        assert!(StationId::parse("19\n29").is_err());
    }

    #[test]
    fn as_str_roundtrip() {
        let id = StationId::parse("1902").unwrap();
        assert_eq!(id.as_str(), "1902");
    }

    #[test]
    fn display() {
        let id = StationId::parse("1902").unwrap();
        assert_eq!(format!("{}", id), "1902");
    }

    #[test]
    fn debug() {
        let id = StationId::parse("1902").unwrap();
        assert_eq!(format!("{:?}", id), "StationId(1902)");
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = StationId::parse("100").unwrap();
        let b = StationId::parse("99").unwrap();
        // Lexicographic, not numeric
        assert!(a < b);
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(StationId::parse("1929").unwrap());
        assert!(set.contains(&StationId::parse("1929").unwrap()));
        assert!(!set.contains(&StationId::parse("1921").unwrap()));
    }
}
