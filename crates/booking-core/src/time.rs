//! Time-of-day values used as booking bounds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A wall-clock time with minute precision, written as "HH:MM".
///
/// Ordering is chronological, which matches lexicographic ordering of the
/// zero-padded text form stored in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// Implied start of a booking with no `from` bound.
    pub const START_OF_DAY: TimeOfDay = TimeOfDay { minutes: 0 };
    /// Implied end of a booking with no `to` bound.
    pub const END_OF_DAY: TimeOfDay = TimeOfDay { minutes: 23 * 60 + 59 };

    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self {
            minutes: u16::from(hour) * 60 + u16::from(minute),
        })
    }

    pub fn hour(&self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.minutes % 60) as u8
    }

    /// Parse an optional form value, treating blank input as absent.
    pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>, ValidationError> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => text.parse().map(Some),
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime(s.to_string());
        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        if hour.len() != 2 || minute.len() != 2 {
            return Err(invalid());
        }
        if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        TimeOfDay::new(hour, minute).ok_or_else(invalid)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zero_padded_times() {
        let t: TimeOfDay = "09:30".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (9, 30));
        assert_eq!(t.to_string(), "09:30");
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["9:30", "24:00", "12:60", "noon", "12-30", "12:3", "+1:30", ""] {
            assert!(bad.parse::<TimeOfDay>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn ordering_matches_text_ordering() {
        let times = ["00:00", "09:05", "09:30", "10:00", "23:59"];
        for pair in times.windows(2) {
            let a: TimeOfDay = pair[0].parse().unwrap();
            let b: TimeOfDay = pair[1].parse().unwrap();
            assert!(a < b);
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn blank_form_value_is_absent() {
        assert_eq!(TimeOfDay::parse_optional(None).unwrap(), None);
        assert_eq!(TimeOfDay::parse_optional(Some("  ")).unwrap(), None);
        assert_eq!(
            TimeOfDay::parse_optional(Some("12:00")).unwrap(),
            TimeOfDay::new(12, 0)
        );
    }

    #[test]
    fn serializes_as_text() {
        let t = TimeOfDay::new(7, 5).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"07:05\"");
        let back: TimeOfDay = serde_json::from_str("\"07:05\"").unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<TimeOfDay>("\"7am\"").is_err());
    }
}
