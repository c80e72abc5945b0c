use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single day of the booking schedule as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Calendar date of this entry (day granularity, local calendar)
    pub date: NaiveDate,
    /// Whether every bookable slot on this day is already taken
    #[serde(rename = "isFull")]
    pub is_full: bool,
    /// Backend-specific fields (slot counts, labels, ...) carried through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DayRecord {
    /// Build a bare record with no extra payload
    pub fn new(date: NaiveDate, is_full: bool) -> Self {
        Self {
            date,
            is_full,
            extra: serde_json::Map::new(),
        }
    }
}

/// One month of day records, ordered by day of month (index 0 = day 1).
///
/// The backend keys records by their position in the list, so the list must
/// hold exactly one entry per day of the month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSchedule {
    pub year: i32,
    /// 1-based month number (1 = January)
    pub month: u32,
    pub days: Vec<DayRecord>,
}

/// Wire envelope returned by `GET /date-schedule` (the payload nests twice)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEnvelope {
    pub data: ScheduleBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBody {
    pub data: Vec<DayRecord>,
}

/// Month token used for calendar navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FocusMonth {
    pub year: i32,
    /// 1-based month number (1 = January)
    pub month: u32,
}

impl FocusMonth {
    /// Create a month token; `month` must be in 1..=12
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month a given date falls in
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The previous calendar month
    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The following calendar month
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First day of this month
    pub fn first_day(self) -> NaiveDate {
        // A month token always holds a valid 1..=12 month
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("valid first of month")
    }

    /// Whether a date falls within this month
    pub fn contains(self, date: NaiveDate) -> bool {
        FocusMonth::of(date) == self
    }
}

impl Default for FocusMonth {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }
}

impl fmt::Display for FocusMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", month_name(self.month), self.year)
    }
}

/// Get the human-readable name for a month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Invalid Month",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_month_rollover() {
        // Previous month
        assert_eq!(FocusMonth::new(2025, 6).prev(), FocusMonth::new(2025, 5));
        assert_eq!(FocusMonth::new(2025, 1).prev(), FocusMonth::new(2024, 12));

        // Next month
        assert_eq!(FocusMonth::new(2025, 6).next(), FocusMonth::new(2025, 7));
        assert_eq!(FocusMonth::new(2025, 12).next(), FocusMonth::new(2026, 1));
    }

    #[test]
    fn test_focus_month_of_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let month = FocusMonth::of(date);
        assert_eq!(month, FocusMonth::new(2024, 3));
        assert!(month.contains(date));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_focus_month_display() {
        assert_eq!(FocusMonth::new(2024, 3).to_string(), "March 2024");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "Invalid Month");
    }

    #[test]
    fn test_day_record_wire_format() {
        let json = r#"{"date":"2024-03-15","isFull":true,"slotsTotal":8,"slotsTaken":8}"#;
        let record: DayRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert!(record.is_full);
        // Unknown backend fields survive the round trip
        assert_eq!(record.extra.get("slotsTotal"), Some(&serde_json::json!(8)));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["isFull"], serde_json::json!(true));
        assert_eq!(back["slotsTaken"], serde_json::json!(8));
    }

    #[test]
    fn test_schedule_envelope_decoding() {
        let json = r#"{"data":{"data":[
            {"date":"2024-03-01","isFull":false},
            {"date":"2024-03-02","isFull":true}
        ]}}"#;
        let envelope: ScheduleEnvelope = serde_json::from_str(json).unwrap();

        assert_eq!(envelope.data.data.len(), 2);
        assert!(!envelope.data.data[0].is_full);
        assert!(envelope.data.data[1].is_full);
    }
}
