//! SL site identifier type.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Number;

/// Error returned when parsing an invalid site ID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid site ID: {reason}")]
pub struct InvalidSiteId {
    reason: &'static str,
}

impl InvalidSiteId {
    /// Why the input was rejected.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// A numeric SL site identifier, as taken from a request path.
///
/// Any finite number is accepted, integer or decimal, with no range check;
/// the upstream API decides whether the site exists. The value serializes
/// as a JSON number.
///
/// # Examples
///
/// ```
/// use transit_gateway::domain::SiteId;
///
/// let id = SiteId::parse("1002").unwrap();
/// assert_eq!(id.to_string(), "1002");
///
/// assert!(SiteId::parse("abc").is_err());
/// assert!(SiteId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SiteId(Number);

impl SiteId {
    /// Parse a site ID from a string.
    ///
    /// Integers are kept exact; anything else must parse as a finite float,
    /// and a float with no fractional part is stored as an integer.
    pub fn parse(s: &str) -> Result<Self, InvalidSiteId> {
        if s.is_empty() {
            return Err(InvalidSiteId {
                reason: "must not be empty",
            });
        }

        if let Ok(n) = s.parse::<i64>() {
            return Ok(SiteId(n.into()));
        }
        if let Ok(n) = s.parse::<u64>() {
            return Ok(SiteId(n.into()));
        }

        let value = s.parse::<f64>().map_err(|_| InvalidSiteId {
            reason: "expected a numeric string",
        })?;

        // "1e3" and "1002.0" name the same site as "1002"
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
            return Ok(SiteId((value as i64).into()));
        }

        Number::from_f64(value).map(SiteId).ok_or(InvalidSiteId {
            reason: "must be a finite number",
        })
    }
}

impl fmt::Debug for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SiteId({})", self.0)
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for SiteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
