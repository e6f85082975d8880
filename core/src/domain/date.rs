//! Creation Date
//!
//! Calendar date stored as `DD-MM-YYYY`.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::entity::DomainError;

/// Wire format of creation dates
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Accepted on read only
const ISO_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CreationDate(NaiveDate);

impl CreationDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl Default for CreationDate {
    fn default() -> Self {
        Self::today()
    }
}

impl fmt::Display for CreationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for CreationDate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(s, ISO_FORMAT))
            .map(Self)
            .map_err(|_| DomainError::InvalidInput(format!("unrecognized date '{}'", s)))
    }
}

impl Serialize for CreationDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CreationDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_day_month_year() {
        let date = CreationDate::from_ymd(2024, 3, 7).unwrap();
        assert_eq!(date.to_string(), "07-03-2024");
    }

    #[test]
    fn test_parse_accepts_unpadded_and_iso() {
        let expected = CreationDate::from_ymd(2024, 3, 7).unwrap();
        assert_eq!("07-03-2024".parse::<CreationDate>().unwrap(), expected);
        assert_eq!("7-3-2024".parse::<CreationDate>().unwrap(), expected);
        assert_eq!("2024-03-07".parse::<CreationDate>().unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("yesterday".parse::<CreationDate>().is_err());
        assert!("31-02-2024".parse::<CreationDate>().is_err());
    }

    #[test]
    fn test_serde_uses_string_form() {
        let date = CreationDate::from_ymd(2023, 12, 25).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"25-12-2023\"");
        let back: CreationDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }
}
