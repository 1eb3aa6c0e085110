//! The reporting service payload.
//!
//! A payload carries the requested date range, the opaque filters that scoped
//! the request, the employee roster and the facts keyed by employee id and
//! date key:
//!
//! ```json
//! {
//!   "start": "2024-01-01",
//!   "end": "2024-01-14",
//!   "filters": { "area": "Operaciones" },
//!   "employees": [{ "id": 1, "documentNumber": "40112233", "name": "Ana Quispe" }],
//!   "facts": {
//!     "1": { "2024-01-02T00:00:00": { "checkInTime": "08:00", "checkOutTime": "17:00" } }
//!   }
//! }
//! ```

use crate::libs::{
    error::MatrixError,
    fact::{DailyFact, Employee, EmployeeId, FactTable},
    week::date_range,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// Filter identifiers used to scope the request. Not interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportFilters {
    pub employee: Option<String>,
    pub area: Option<String>,
    pub site: Option<String>,
    pub cost_center: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub filters: ReportFilters,
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub facts: BTreeMap<String, BTreeMap<String, DailyFact>>,
}

/// What the matrix builder needs from a payload.
#[derive(Debug, Clone)]
pub struct MatrixInput {
    pub employees: Vec<Employee>,
    pub dates: Vec<NaiveDate>,
    pub facts: FactTable,
}

impl ReportResponse {
    pub fn from_path(path: &Path) -> Result<Self, MatrixError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, MatrixError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Validates the payload and turns it into builder input.
    ///
    /// Facts for employees that are not on the roster are dropped with a
    /// warning, or rejected when `strict_roster` is set.
    pub fn into_input(self, strict_roster: bool) -> Result<MatrixInput, MatrixError> {
        if self.start > self.end {
            return Err(MatrixError::InvalidDateRange {
                start: self.start,
                end: self.end,
            });
        }

        let roster: HashSet<EmployeeId> = self.employees.iter().map(|e| e.id).collect();
        let mut facts = FactTable::new();

        for (employee_key, by_date) in self.facts {
            let employee_id: EmployeeId = employee_key
                .trim()
                .parse()
                .map_err(|_| MatrixError::InvalidEmployeeId(employee_key.clone()))?;

            if !roster.contains(&employee_id) {
                if strict_roster {
                    return Err(MatrixError::UnknownEmployee(employee_key));
                }
                tracing::warn!(employee = employee_id, "facts for employee not in roster ignored");
                continue;
            }

            for (key, fact) in by_date {
                facts.insert_keyed(employee_id, &key, fact)?;
            }
        }

        Ok(MatrixInput {
            employees: self.employees,
            dates: date_range(self.start, self.end),
            facts,
        })
    }
}
