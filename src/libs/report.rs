//! Report views derived from a built [`Matrix`].
//!
//! Every screen reads the same classified cells and weekly totals, so the
//! weekly report, the cost-center report and the markings detail can never
//! disagree with the general matrix about a day.

use crate::libs::{
    aggregator::WeekTotals,
    classifier::CellType,
    fact::{EmployeeId, FactTable},
    formatter::{clock_after, display_time, format_hours, hours_decimal, hours_f64},
    matrix::Matrix,
    time::{minutes_of_day, parse_optional},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NO_COST_CENTER: &str = "Sin Centro de Costo";
const NO_VALUE: &str = "-";

/// One employee's hours for one week, or for the whole period when
/// `week_number` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReportLine {
    pub employee_id: EmployeeId,
    pub name: String,
    pub week_number: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_hours: f64,
    pub overtime_hours: f64,
    pub total_display: String,
    pub overtime_display: String,
}

pub fn weekly_report(matrix: &Matrix) -> Vec<WeeklyReportLine> {
    let mut lines = Vec::new();

    for row in &matrix.rows {
        for week in &matrix.weeks {
            let totals = row.totals.week(week.week_number);
            lines.push(WeeklyReportLine {
                employee_id: row.id,
                name: row.name.clone(),
                week_number: Some(week.week_number),
                start_date: Some(week.start_date),
                end_date: Some(week.end_date),
                total_hours: totals.total_hours,
                overtime_hours: totals.overtime_hours,
                total_display: format_hours(totals.total_hours),
                overtime_display: format_hours(totals.overtime_hours),
            });
        }
        lines.push(WeeklyReportLine {
            employee_id: row.id,
            name: row.name.clone(),
            week_number: None,
            start_date: matrix.dates.first().copied(),
            end_date: matrix.dates.last().copied(),
            total_hours: row.totals.total_hours,
            overtime_hours: row.totals.overtime_hours,
            total_display: format_hours(row.totals.total_hours),
            overtime_display: format_hours(row.totals.overtime_hours),
        });
    }

    lines
}

/// Hours and day counts of every employee sharing a cost center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostCenterSummary {
    pub cost_center: String,
    pub employees: usize,
    pub weeks: BTreeMap<u32, WeekTotals>,
    pub total_hours: f64,
    pub overtime_hours: f64,
    pub type_counts: BTreeMap<CellType, usize>,
}

/// Groups matrix rows by cost center, in order of first appearance.
pub fn cost_center_report(matrix: &Matrix) -> Vec<CostCenterSummary> {
    let mut summaries: Vec<CostCenterSummary> = Vec::new();

    for row in &matrix.rows {
        let name = row.cost_center.clone().unwrap_or_else(|| NO_COST_CENTER.to_string());
        let index = match summaries.iter().position(|s| s.cost_center == name) {
            Some(index) => index,
            None => {
                summaries.push(CostCenterSummary {
                    cost_center: name,
                    employees: 0,
                    weeks: BTreeMap::new(),
                    total_hours: 0.0,
                    overtime_hours: 0.0,
                    type_counts: BTreeMap::new(),
                });
                summaries.len() - 1
            }
        };

        let summary = &mut summaries[index];
        summary.employees += 1;
        for (week_number, totals) in &row.totals.weeks {
            let entry = summary.weeks.entry(*week_number).or_default();
            entry.total_hours = hours_f64(hours_decimal(entry.total_hours) + hours_decimal(totals.total_hours));
            entry.overtime_hours = hours_f64(hours_decimal(entry.overtime_hours) + hours_decimal(totals.overtime_hours));
        }
        for (cell_type, count) in &row.type_counts {
            *summary.type_counts.entry(*cell_type).or_insert(0) += count;
        }
    }

    for summary in &mut summaries {
        let total: Decimal = summary.weeks.values().map(|w| hours_decimal(w.total_hours)).sum();
        let overtime: Decimal = summary.weeks.values().map(|w| hours_decimal(w.overtime_hours)).sum();
        summary.total_hours = hours_f64(total);
        summary.overtime_hours = hours_f64(overtime);
    }

    summaries
}

/// Raw punches next to the classified outcome of one employee/date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkingLine {
    pub employee_id: EmployeeId,
    pub name: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub cell_type: CellType,
    pub check_in: String,
    pub check_out: String,
    pub expected_check_in: String,
    pub expected_check_out: String,
    pub worked: String,
    /// Minutes the check-in came after the expected check-in, worked days only.
    pub late_minutes: Option<i64>,
}

/// One line per employee/date of the matrix, optionally for one employee.
///
/// When a shift declares an expected check-in but no expected check-out, the
/// check-out is derived as check-in plus `standard_workday_hours` and shown
/// as a clock time.
pub fn markings_detail(
    matrix: &Matrix,
    facts: &FactTable,
    standard_workday_hours: f64,
    employee: Option<EmployeeId>,
) -> Vec<MarkingLine> {
    let workday_minutes = (standard_workday_hours * 60.0).round() as i64;
    let shown = |raw: Option<&str>| raw.and_then(display_time).unwrap_or_else(|| NO_VALUE.to_string());

    matrix
        .rows
        .iter()
        .filter(|row| employee.map_or(true, |id| id == row.id))
        .flat_map(|row| {
            matrix.dates.iter().zip(&row.days).map(move |(date, cell)| (row, *date, cell))
        })
        .map(|(row, date, cell)| {
            let fact = facts.get(row.id, date);
            let check_in = fact.and_then(|f| f.check_in_time.as_deref());
            let check_out = fact.and_then(|f| f.check_out_time.as_deref());
            let expected_in = fact.and_then(|f| f.expected_check_in.as_deref());
            let expected_out = match fact.and_then(|f| f.expected_check_out.as_deref()).and_then(display_time) {
                Some(out) => out,
                None => expected_in
                    .and_then(|entry| clock_after(entry, workday_minutes))
                    .unwrap_or_else(|| NO_VALUE.to_string()),
            };

            let late_minutes = match (cell.is_worked(), parse_optional(check_in), parse_optional(expected_in)) {
                (true, Some(actual), Some(expected)) => Some((minutes_of_day(actual) - minutes_of_day(expected)).max(0)),
                _ => None,
            };

            MarkingLine {
                employee_id: row.id,
                name: row.name.clone(),
                date,
                cell_type: cell.cell_type,
                check_in: shown(check_in),
                check_out: shown(check_out),
                expected_check_in: shown(expected_in),
                expected_check_out: expected_out,
                worked: if cell.is_worked() {
                    format_hours(cell.worked_hours)
                } else {
                    NO_VALUE.to_string()
                },
                late_minutes,
            }
        })
        .collect()
}
