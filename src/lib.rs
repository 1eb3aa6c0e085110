//! # Tareo - weekly attendance matrix
//!
//! Turns per-employee, per-day attendance facts (punches, day type,
//! permission codes) into a pivoted matrix: one row per employee, an
//! entry/exit pair per date, and worked plus overtime hours per week and for
//! the whole period.
//!
//! ## Features
//!
//! - **Classification**: holiday, rest, permission, worked and absent days
//!   with a fixed priority order
//! - **Week Segmentation**: Monday-started buckets numbered from the first
//!   date of the range
//! - **Totals**: per-week hours and overtime, rounded per week
//! - **Reports**: weekly, cost-center and markings detail views
//! - **Data Export**: CSV and JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tareo::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod libs;
