//! Core library modules for tareo.
//!
//! The engine is split into small pieces that are composed by
//! [`matrix::MatrixBuilder`]:
//!
//! - **Input**: [`source`] loads the reporting payload, [`fact`] holds the
//!   per-employee, per-date facts
//! - **Engine**: [`time`], [`week`], [`permission`], [`classifier`],
//!   [`aggregator`], [`cache`] and [`matrix`]
//! - **Output**: [`report`] views, [`export`] to CSV/JSON, [`view`] tables
//! - **Infrastructure**: [`config`], [`data_storage`], [`error`], [`logging`],
//!   [`messages`], [`formatter`]
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tareo::libs::fact::{DailyFact, Employee, FactTable};
//! use tareo::libs::matrix::build;
//! use tareo::libs::week::date_range;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//! let employees = vec![Employee { id: 1, name: "Ana".into(), ..Default::default() }];
//! let mut facts = FactTable::new();
//! facts.insert(1, day, DailyFact {
//!     check_in_time: Some("08:00".into()),
//!     check_out_time: Some("17:00".into()),
//!     ..Default::default()
//! });
//!
//! let matrix = build(&employees, &date_range(day, day), &facts);
//! assert_eq!(matrix.rows[0].totals.total_hours, 9.0);
//! ```

pub mod aggregator;
pub mod cache;
pub mod classifier;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod fact;
pub mod formatter;
pub mod logging;
pub mod matrix;
pub mod messages;
pub mod permission;
pub mod report;
pub mod source;
pub mod time;
pub mod view;
pub mod week;
