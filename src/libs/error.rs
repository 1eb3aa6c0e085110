//! Errors raised at the boundary with the reporting service.
//!
//! The engine itself never fails; these only come out of loading and
//! exporting.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("Invalid date key: {0}")]
    InvalidDateKey(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Facts reference an employee missing from the roster: {0}")]
    UnknownEmployee(String),

    #[error("Invalid employee id: {0}")]
    InvalidEmployeeId(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
