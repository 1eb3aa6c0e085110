//! Raw attendance input: employees and their per-day facts.
//!
//! Everything here is produced by the reporting service and consumed
//! read-only by the engine.

use crate::libs::error::MatrixError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

pub type EmployeeId = i64;

/// Calendar nature of a day, independent of punches and permissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    #[default]
    #[serde(alias = "workday", alias = "laborable")]
    Ordinary,
    #[serde(alias = "feriado")]
    Holiday,
    #[serde(alias = "descanso")]
    Rest,
}

/// What the reporting service recorded for one employee on one date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyFact {
    pub day_type: DayType,
    pub permission_code: Option<String>,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub expected_check_in: Option<String>,
    pub expected_check_out: Option<String>,
}

impl DailyFact {
    /// The permission code, ignoring blank values.
    pub fn permission(&self) -> Option<&str> {
        self.permission_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

/// Whether a fact came from the service or stands in for a missing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Recorded,
    Missing,
}

/// Identity fields of a roster entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(default)]
    pub document_number: String,
    pub name: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub cost_center: Option<String>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
}

/// Lookup of facts by employee and date.
///
/// Every insert stamps the table with a fresh process-wide generation, so two
/// tables share a generation only when one is an unmodified clone of the other.
#[derive(Debug, Clone, Default)]
pub struct FactTable {
    facts: BTreeMap<(EmployeeId, NaiveDate), DailyFact>,
    generation: u64,
}

impl FactTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, employee_id: EmployeeId, date: NaiveDate, fact: DailyFact) {
        self.facts.insert((employee_id, date), fact);
        self.generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
    }

    /// Changes whenever the contents change. Zero for a table never written to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Inserts a fact keyed the way the reporting service keys dates.
    pub fn insert_keyed(&mut self, employee_id: EmployeeId, key: &str, fact: DailyFact) -> Result<(), MatrixError> {
        let date = parse_date_key(key)?;
        self.insert(employee_id, date, fact);
        Ok(())
    }

    pub fn get(&self, employee_id: EmployeeId, date: NaiveDate) -> Option<&DailyFact> {
        self.facts.get(&(employee_id, date))
    }

    /// The recorded fact, or an empty stand-in flagged as missing.
    pub fn resolve(&self, employee_id: EmployeeId, date: NaiveDate) -> (DailyFact, Presence) {
        match self.get(employee_id, date) {
            Some(fact) => (fact.clone(), Presence::Recorded),
            None => (DailyFact::default(), Presence::Missing),
        }
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

const DATE_KEY_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a fact date key.
///
/// The service keys by `YYYY-MM-DDT00:00:00`; any time component is dropped
/// and a bare `YYYY-MM-DD` is accepted as well.
pub fn parse_date_key(key: &str) -> Result<NaiveDate, MatrixError> {
    let key = key.trim();
    DATE_KEY_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(key, format).ok())
        .map(|datetime| datetime.date())
        .or_else(|| NaiveDate::parse_from_str(key, "%Y-%m-%d").ok())
        .ok_or_else(|| MatrixError::InvalidDateKey(key.to_string()))
}

/// Renders a date the way the service keys it.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%dT00:00:00").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_keys() {
        assert_eq!(parse_date_key("2024-01-05T00:00:00").unwrap(), ymd(2024, 1, 5));
        assert_eq!(parse_date_key("2024-01-05T13:45:00.000").unwrap(), ymd(2024, 1, 5));
        assert_eq!(parse_date_key("2024-01-05").unwrap(), ymd(2024, 1, 5));
        assert!(matches!(parse_date_key("05/01/2024"), Err(MatrixError::InvalidDateKey(_))));
        assert_eq!(date_key(ymd(2024, 1, 5)), "2024-01-05T00:00:00");
    }

    #[test]
    fn blank_permission_is_none() {
        let fact = DailyFact {
            permission_code: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(fact.permission(), None);
    }

    #[test]
    fn missing_entries_resolve_to_default() {
        let mut table = FactTable::new();
        table.insert_keyed(7, "2024-01-02T00:00:00", DailyFact::default()).unwrap();

        assert_eq!(table.resolve(7, ymd(2024, 1, 2)).1, Presence::Recorded);
        assert_eq!(table.resolve(7, ymd(2024, 1, 3)).1, Presence::Missing);
        assert_eq!(table.resolve(8, ymd(2024, 1, 2)).1, Presence::Missing);
    }

    #[test]
    fn fact_json_uses_service_field_names() {
        let fact: DailyFact = serde_json::from_str(
            r#"{"dayType":"holiday","permissionCode":"VAC","checkInTime":"08:00","expectedCheckOut":"17:00"}"#,
        )
        .unwrap();
        assert_eq!(fact.day_type, DayType::Holiday);
        assert_eq!(fact.permission(), Some("VAC"));
        assert_eq!(fact.check_out_time, None);
        assert_eq!(fact.expected_check_out.as_deref(), Some("17:00"));
    }
}
