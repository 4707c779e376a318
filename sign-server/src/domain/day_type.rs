//! Schedule day buckets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The schedule bucket a departure belongs to.
///
/// Historical data only distinguishes weekdays, Saturdays and Sundays.
/// Anything else found in a dataset is kept verbatim as [`DayType::Other`]
/// so that newer data files still load; such records simply never match a
/// classified day.
///
/// # Examples
///
/// ```
/// use sign_server::domain::DayType;
///
/// assert_eq!(DayType::from_code("w"), DayType::Weekday);
/// assert_eq!(DayType::from_code("u"), DayType::Sunday);
/// assert_eq!(DayType::from_code("h"), DayType::Other("h".to_string()));
///
/// let parsed: DayType = "SATURDAY".parse().unwrap();
/// assert_eq!(parsed, DayType::Saturday);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DayType {
    Weekday,
    Saturday,
    Sunday,
    /// Unrecognized value, passed through untouched.
    Other(String),
}

impl DayType {
    /// Decode a single-character day code from the compacted data form.
    ///
    /// `w` = weekday, `s` = Saturday, `u` = Sunday.
    pub fn from_code(code: &str) -> Self {
        match code {
            "w" => DayType::Weekday,
            "s" => DayType::Saturday,
            "u" => DayType::Sunday,
            other => DayType::Other(other.to_string()),
        }
    }

    /// Decode a full day-type name (`WEEKDAY`, `SATURDAY`, `SUNDAY`).
    pub fn from_name(name: &str) -> Self {
        match name {
            "WEEKDAY" => DayType::Weekday,
            "SATURDAY" => DayType::Saturday,
            "SUNDAY" => DayType::Sunday,
            other => DayType::Other(other.to_string()),
        }
    }

    /// The canonical upper-case name.
    pub fn as_str(&self) -> &str {
        match self {
            DayType::Weekday => "WEEKDAY",
            DayType::Saturday => "SATURDAY",
            DayType::Sunday => "SUNDAY",
            DayType::Other(raw) => raw,
        }
    }
}

impl FromStr for DayType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DayType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DayType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_name(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(DayType::from_code("w"), DayType::Weekday);
        assert_eq!(DayType::from_code("s"), DayType::Saturday);
        assert_eq!(DayType::from_code("u"), DayType::Sunday);
    }

    #[test]
    fn unknown_code_passes_through() {
        assert_eq!(DayType::from_code("x"), DayType::Other("x".into()));
        assert_eq!(DayType::from_code("W"), DayType::Other("W".into()));
        assert_eq!(DayType::from_code(""), DayType::Other(String::new()));
    }

    #[test]
    fn names_parse() {
        assert_eq!("WEEKDAY".parse::<DayType>().unwrap(), DayType::Weekday);
        assert_eq!("SUNDAY".parse::<DayType>().unwrap(), DayType::Sunday);
        assert_eq!(
            "HOLIDAY".parse::<DayType>().unwrap(),
            DayType::Other("HOLIDAY".into())
        );
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&DayType::Saturday).unwrap();
        assert_eq!(json, "\"SATURDAY\"");

        let back: DayType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DayType::Saturday);

        let other: DayType = serde_json::from_str("\"HOLIDAY\"").unwrap();
        assert_eq!(other.to_string(), "HOLIDAY");
    }
}
