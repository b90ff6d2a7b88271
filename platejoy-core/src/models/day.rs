use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A day column of the weekly planner. Weeks start on Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub(crate) fn index(self) -> usize {
        self.weekday().num_days_from_monday() as usize
    }

    pub fn weekday(self) -> Weekday {
        match self {
            Day::Monday => Weekday::Mon,
            Day::Tuesday => Weekday::Tue,
            Day::Wednesday => Weekday::Wed,
            Day::Thursday => Weekday::Thu,
            Day::Friday => Weekday::Fri,
            Day::Saturday => Weekday::Sat,
            Day::Sunday => Weekday::Sun,
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        Day::ALL[weekday.num_days_from_monday() as usize]
    }

    /// The planner day a calendar date falls on.
    pub fn of(date: NaiveDate) -> Self {
        Self::from_weekday(date.weekday())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        };
        f.pad(name)
    }
}

impl FromStr for Day {
    type Err = String;

    /// Accepts full names and three-letter abbreviations, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Day::ALL
            .into_iter()
            .find(|day| {
                let name = day.to_string().to_lowercase();
                lower == name || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| {
                format!(
                    "Invalid day '{}'. Valid options: monday..sunday (or mon..sun)",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_display() {
        assert_eq!(Day::Monday.to_string(), "Monday");
        assert_eq!(Day::Sunday.to_string(), "Sunday");
    }

    #[test]
    fn test_day_from_str() {
        assert_eq!(Day::from_str("monday").unwrap(), Day::Monday);
        assert_eq!(Day::from_str("WED").unwrap(), Day::Wednesday);
        assert_eq!(Day::from_str("Sun").unwrap(), Day::Sunday);
    }

    #[test]
    fn test_day_from_str_invalid() {
        assert!(Day::from_str("mo").is_err());
        assert!(Day::from_str("funday").is_err());
        assert!(Day::from_str("").is_err());
    }

    #[test]
    fn test_day_of_date() {
        // 2025-01-01 was a Wednesday
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(Day::of(date), Day::Wednesday);
    }

    #[test]
    fn test_index_matches_position() {
        for (i, day) in Day::ALL.iter().enumerate() {
            assert_eq!(day.index(), i);
            assert_eq!(Day::from_weekday(day.weekday()), *day);
        }
    }
}
