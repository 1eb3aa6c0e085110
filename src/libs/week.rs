//! Splitting a report's date range into week column groups.
//!
//! A bucket opens at the first date of the range and at every Monday after
//! that, so only the first and the last bucket can hold fewer than seven dates.
//! Week numbers are a running 1-based counter, not ISO weeks, which keeps the
//! column numbering stable across a year boundary.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// One contiguous group of dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekBucket {
    pub week_number: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub dates: Vec<NaiveDate>,
}

impl WeekBucket {
    fn open(week_number: u32, date: NaiveDate) -> Self {
        WeekBucket {
            week_number,
            start_date: date,
            end_date: date,
            dates: vec![date],
        }
    }

    fn push(&mut self, date: NaiveDate) {
        self.end_date = date;
        self.dates.push(date);
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Partitions an ascending sequence of dates into week buckets.
///
/// The input is not sorted here; it is walked once in the given order.
pub fn segment(dates: &[NaiveDate]) -> Vec<WeekBucket> {
    let mut weeks: Vec<WeekBucket> = Vec::new();

    for (index, &date) in dates.iter().enumerate() {
        let starts_week = index == 0 || date.weekday() == Weekday::Mon;
        match weeks.last_mut() {
            Some(current) if !starts_week => current.push(date),
            _ => {
                let week_number = weeks.len() as u32 + 1;
                weeks.push(WeekBucket::open(week_number, date));
            }
        }
    }

    weeks
}

/// Every date from `start` to `end`, both inclusive. Empty when `start > end`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|date| *date <= end).collect()
}
