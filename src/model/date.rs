// File: ./src/model/date.rs
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::fmt;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H%M",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %H%M",
];

const DATA_DATE: &str = "%Y-%m-%d";
const DATA_DATE_TIME: &str = "%Y-%m-%dT%H:%M";

const DISPLAY_DATE: &str = "%b %d %Y";
const DISPLAY_DATE_TIME: &str = "%b %d %Y %H:%M";

/// A point in time attached to a task: either a whole day or a wall-clock time.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum DateType {
    AllDay(NaiveDate),
    Specific(NaiveDateTime),
}

impl DateType {
    /// Parses user input against the fixed set of accepted formats.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        for fmt in DATE_TIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
                return Some(DateType::Specific(dt));
            }
        }
        for fmt in DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(input, fmt) {
                return Some(DateType::AllDay(d));
            }
        }
        None
    }

    /// Storage form. `AllDay` and `Specific` stay distinguishable so a reload is exact.
    pub fn to_data(&self) -> String {
        match self {
            DateType::AllDay(d) => d.format(DATA_DATE).to_string(),
            DateType::Specific(dt) => dt.format(DATA_DATE_TIME).to_string(),
        }
    }

    pub fn from_data(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATA_DATE_TIME) {
            return Some(DateType::Specific(dt));
        }
        NaiveDate::parse_from_str(s, DATA_DATE)
            .ok()
            .map(DateType::AllDay)
    }

    pub fn to_date_naive(&self) -> NaiveDate {
        match self {
            DateType::AllDay(d) => *d,
            DateType::Specific(dt) => dt.date(),
        }
    }

    /// Moves the value forward by `by`.
    ///
    /// Whole-day shifts keep an all-day value all-day; anything finer pins it
    /// to midnight first. Returns `None` when the result leaves chrono's range.
    pub fn shift(&self, by: Duration) -> Option<Self> {
        match self {
            DateType::AllDay(d) if by.num_seconds() % 86_400 == 0 => {
                d.checked_add_signed(by).map(DateType::AllDay)
            }
            DateType::AllDay(d) => d
                .and_hms_opt(0, 0, 0)?
                .checked_add_signed(by)
                .map(DateType::Specific),
            DateType::Specific(dt) => dt.checked_add_signed(by).map(DateType::Specific),
        }
    }

    /// Offset from `self` to `other`, measured between the start of each value.
    pub fn offset_to(&self, other: &DateType) -> Duration {
        other.start_time() - self.start_time()
    }

    fn start_time(&self) -> NaiveDateTime {
        match self {
            DateType::AllDay(d) => d.and_time(Default::default()),
            DateType::Specific(dt) => *dt,
        }
    }
}

impl fmt::Display for DateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateType::AllDay(d) => write!(f, "{}", d.format(DISPLAY_DATE)),
            DateType::Specific(dt) => write!(f, "{}", dt.format(DISPLAY_DATE_TIME)),
        }
    }
}

impl PartialOrd for DateType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateType {
    fn cmp(&self, other: &Self) -> Ordering {
        let d1 = self.to_date_naive();
        let d2 = other.to_date_naive();
        match d1.cmp(&d2) {
            Ordering::Equal => match (self, other) {
                // Same day: Specific time comes BEFORE All Day
                (DateType::Specific(t1), DateType::Specific(t2)) => t1.cmp(t2),
                (DateType::Specific(_), DateType::AllDay(_)) => Ordering::Less,
                (DateType::AllDay(_), DateType::Specific(_)) => Ordering::Greater,
                (DateType::AllDay(_), DateType::AllDay(_)) => Ordering::Equal,
            },
            ord => ord,
        }
    }
}

/// Parses a snooze amount such as `30m`, `2h`, `3d`, `1w` or `3 days`.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let lower = input.trim().to_lowercase();
    let idx = lower.find(|c: char| !c.is_ascii_digit())?;
    let (amt_str, unit_str) = lower.split_at(idx);
    let amount = amt_str.parse::<i64>().ok()?;
    if amount == 0 {
        return None;
    }
    match unit_str.trim() {
        "m" | "min" | "mins" | "minute" | "minutes" => Duration::try_minutes(amount),
        "h" | "hr" | "hrs" | "hour" | "hours" => Duration::try_hours(amount),
        "d" | "day" | "days" => Duration::try_days(amount),
        "w" | "wk" | "week" | "weeks" => Duration::try_weeks(amount),
        _ => None,
    }
}
