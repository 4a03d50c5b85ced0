//! Timetable times, journey durations and days of operation.
//!
//! The catalog stores departure and arrival times as "HH:MM" strings,
//! durations as "<h>h <m>m" strings and operating days as weekday
//! abbreviations. This module provides validated types for all three.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid time, duration or weekday.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day on the 24-hour clock, as printed in the timetable.
///
/// # Examples
///
/// ```
/// use train_booking::domain::ClockTime;
///
/// let time = ClockTime::parse_hhmm("16:35").unwrap();
/// assert_eq!(time.hour(), 16);
/// assert_eq!(time.to_string(), "16:35");
///
/// assert!(ClockTime::parse_hhmm("1635").is_err());
/// assert!(ClockTime::parse_hhmm("24:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Parse a time from "HH:MM" format.
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(Self(time))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Returns this time on the given date.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.0)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// Journey running time, printed as "15h 40m".
///
/// # Examples
///
/// ```
/// use train_booking::domain::TravelDuration;
///
/// let d = TravelDuration::parse("26h 15m").unwrap();
/// assert_eq!(d.total_minutes(), 26 * 60 + 15);
/// assert_eq!(d.to_string(), "26h 15m");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TravelDuration {
    minutes: u32,
}

impl TravelDuration {
    /// Create a duration from hours and minutes.
    ///
    /// Saturates at `u32::MAX` minutes.
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self {
            minutes: hours.saturating_mul(60).saturating_add(minutes),
        }
    }

    /// Parse a duration from "<h>h <m>m" format.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let (hours, rest) = s
            .split_once('h')
            .ok_or_else(|| TimeError::new("expected hours followed by 'h'"))?;
        let minutes = rest
            .trim()
            .strip_suffix('m')
            .ok_or_else(|| TimeError::new("expected minutes followed by 'm'"))?;

        let hours: u32 = hours
            .trim()
            .parse()
            .map_err(|_| TimeError::new("invalid hour count"))?;
        let minutes: u32 = minutes
            .trim()
            .parse()
            .map_err(|_| TimeError::new("invalid minute count"))?;
        if minutes > 59 {
            return Err(TimeError::new("minute count must be 0-59"));
        }

        let minutes = hours
            .checked_mul(60)
            .and_then(|m| m.checked_add(minutes))
            .ok_or_else(|| TimeError::new("hour count too large"))?;

        Ok(Self { minutes })
    }

    /// Total running time in minutes.
    pub fn total_minutes(&self) -> u32 {
        self.minutes
    }

    /// Returns the duration as a chrono Duration.
    pub fn as_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.minutes))
    }
}

impl fmt::Debug for TravelDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TravelDuration({})", self)
    }
}

impl fmt::Display for TravelDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.minutes / 60, self.minutes % 60)
    }
}

/// Weekday abbreviations indexed by days from Sunday.
const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Returns the timetable abbreviation for the weekday of `date`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use train_booking::domain::weekday_abbrev;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
/// assert_eq!(weekday_abbrev(monday), "Mon");
/// ```
pub fn weekday_abbrev(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}

fn parse_weekday(s: &str) -> Result<Weekday, TimeError> {
    WEEKDAY_NAMES
        .iter()
        .position(|name| *name == s)
        .map(|idx| WEEKDAYS[idx])
        .ok_or_else(|| TimeError::new("weekday must be one of Sun, Mon, Tue, Wed, Thu, Fri, Sat"))
}

/// The set of weekdays on which a train runs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DaysOfOperation(u8);

impl DaysOfOperation {
    /// Parse a list of abbreviations such as `["Mon", "Wed", "Fri"]`.
    pub fn parse<S: AsRef<str>>(days: &[S]) -> Result<Self, TimeError> {
        days.iter()
            .map(|d| parse_weekday(d.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(|days| days.into_iter().collect())
    }

    /// Add a weekday to the set.
    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_sunday();
    }

    /// Whether the train runs on this weekday.
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_sunday()) != 0
    }

    /// Whether the train runs on the weekday of `date`.
    pub fn runs_on(&self, date: NaiveDate) -> bool {
        self.contains(date.weekday())
    }

    /// Returns true if the train never runs.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Weekday abbreviations in Sunday-first order.
    pub fn abbreviations(&self) -> Vec<&'static str> {
        WEEKDAY_NAMES
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.0 & (1 << idx) != 0)
            .map(|(_, name)| *name)
            .collect()
    }
}

impl FromIterator<Weekday> for DaysOfOperation {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut days = Self::default();
        for day in iter {
            days.insert(day);
        }
        days
    }
}

impl fmt::Debug for DaysOfOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DaysOfOperation({})", self.abbreviations().join(","))
    }
}

impl Serialize for DaysOfOperation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.abbreviations())
    }
}

impl<'de> Deserialize<'de> for DaysOfOperation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let days = Vec::<String>::deserialize(deserializer)?;
        DaysOfOperation::parse(days.as_slice()).map_err(serde::de::Error::custom)
    }
}

macro_rules! serde_via_display {
    ($ty:ty, $parse:path) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                $parse(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

serde_via_display!(ClockTime, ClockTime::parse_hhmm);
serde_via_display!(TravelDuration, TravelDuration::parse);

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        assert!(ClockTime::parse_hhmm("00:00").is_ok());
        assert!(ClockTime::parse_hhmm("23:59").is_ok());
        assert_eq!(ClockTime::parse_hhmm("05:50").unwrap().hour(), 5);
        assert_eq!(ClockTime::parse_hhmm("05:50").unwrap().minute(), 50);
    }

    #[test]
    fn reject_invalid_times() {
        assert!(ClockTime::parse_hhmm("").is_err());
        assert!(ClockTime::parse_hhmm("5:50").is_err());
        assert!(ClockTime::parse_hhmm("05-50").is_err());
        assert!(ClockTime::parse_hhmm("24:00").is_err());
        assert!(ClockTime::parse_hhmm("12:60").is_err());
        assert!(ClockTime::parse_hhmm("ab:cd").is_err());
    }

    #[test]
    fn time_ordering() {
        let early = ClockTime::parse_hhmm("06:05").unwrap();
        let late = ClockTime::parse_hhmm("23:40").unwrap();
        assert!(early < late);
    }

    #[test]
    fn parse_durations() {
        assert_eq!(
            TravelDuration::parse("15h 40m").unwrap().total_minutes(),
            940
        );
        assert_eq!(TravelDuration::parse("4h 35m").unwrap().total_minutes(), 275);
        assert_eq!(TravelDuration::parse("0h 5m").unwrap().to_string(), "0h 5m");
    }

    #[test]
    fn reject_invalid_durations() {
        assert!(TravelDuration::parse("").is_err());
        assert!(TravelDuration::parse("15h").is_err());
        assert!(TravelDuration::parse("40m").is_err());
        assert!(TravelDuration::parse("15h 75m").is_err());
        assert!(TravelDuration::parse("xh 5m").is_err());
    }

    #[test]
    fn huge_hour_counts_are_rejected() {
        let err = TravelDuration::parse("99999999h 0m").unwrap_err();
        assert_eq!(err.to_string(), "invalid time: hour count too large");
        // 71582788h 15m is exactly u32::MAX minutes
        assert_eq!(
            TravelDuration::parse("71582788h 15m").unwrap().total_minutes(),
            u32::MAX
        );
        assert_eq!(TravelDuration::new(u32::MAX, 59).total_minutes(), u32::MAX);
    }

    #[test]
    fn weekday_abbreviations() {
        // 2024-03-17 is a Sunday
        assert_eq!(weekday_abbrev(date(2024, 3, 17)), "Sun");
        assert_eq!(weekday_abbrev(date(2024, 3, 18)), "Mon");
        assert_eq!(weekday_abbrev(date(2024, 3, 23)), "Sat");
    }

    #[test]
    fn days_of_operation_membership() {
        let days = DaysOfOperation::parse(&["Mon", "Wed", "Fri"]).unwrap();
        assert!(days.contains(Weekday::Mon));
        assert!(!days.contains(Weekday::Tue));
        assert!(days.runs_on(date(2024, 3, 18)));
        assert!(!days.runs_on(date(2024, 3, 17)));
        assert_eq!(days.abbreviations(), vec!["Mon", "Wed", "Fri"]);
    }

    #[test]
    fn days_of_operation_rejects_unknown_names() {
        assert!(DaysOfOperation::parse(&["Monday"]).is_err());
        assert!(DaysOfOperation::parse(&["mon"]).is_err());
    }

    #[test]
    fn daily_runs_every_day() {
        let days: DaysOfOperation = WEEKDAYS.into_iter().collect();
        for offset in 0..7 {
            assert!(days.runs_on(date(2024, 3, 17) + Duration::days(offset)));
        }
        assert_eq!(days.abbreviations().len(), 7);
    }

    #[test]
    fn days_serialize_sunday_first() {
        let days = DaysOfOperation::parse(&["Sat", "Sun"]).unwrap();
        assert_eq!(serde_json::to_string(&days).unwrap(), r#"["Sun","Sat"]"#);
    }

    #[test]
    fn times_serialize_as_strings() {
        let time = ClockTime::parse_hhmm("08:10").unwrap();
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"08:10\"");
        let dur: TravelDuration = serde_json::from_str("\"7h 40m\"").unwrap();
        assert_eq!(dur, TravelDuration::new(7, 40));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every valid clock time survives a display roundtrip
        #[test]
        fn clock_roundtrip(h in 0u32..24, m in 0u32..60) {
            let s = format!("{:02}:{:02}", h, m);
            let time = ClockTime::parse_hhmm(&s).unwrap();
            prop_assert_eq!(time.hour(), h);
            prop_assert_eq!(time.to_string(), s);
        }

        /// Durations survive a display roundtrip
        #[test]
        fn duration_roundtrip(h in 0u32..100, m in 0u32..60) {
            let d = TravelDuration::new(h, m);
            prop_assert_eq!(TravelDuration::parse(&d.to_string()).unwrap(), d);
        }

        /// A set built from weekdays contains exactly those weekdays
        #[test]
        fn days_membership(mask in 0u8..128) {
            let chosen: Vec<Weekday> = (0..7)
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| WEEKDAYS[i])
                .collect();
            let days: DaysOfOperation = chosen.iter().copied().collect();
            for day in WEEKDAYS {
                prop_assert_eq!(days.contains(day), chosen.contains(&day));
            }
        }
    }
}
