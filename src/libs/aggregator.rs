//! Weekly and period worked/overtime hours.
//!
//! Only cells classified as worked contribute. Overtime is computed per day
//! against the standard workday and summed per week. Each week is rounded to
//! two decimals once; the period totals are sums of the rounded weeks, never
//! re-derived from the raw days, so the two always agree.

use crate::libs::{
    classifier::{Classifier, DayCellResult},
    fact::{DailyFact, Presence},
    formatter::{hours_f64, hours_from_seconds, round2},
    week::WeekBucket,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const STANDARD_WORKDAY_HOURS: f64 = 8.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekTotals {
    pub total_hours: f64,
    pub overtime_hours: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWeeklyTotals {
    pub weeks: BTreeMap<u32, WeekTotals>,
    pub total_hours: f64,
    pub overtime_hours: f64,
}

impl EmployeeWeeklyTotals {
    pub fn week(&self, week_number: u32) -> WeekTotals {
        self.weeks.get(&week_number).copied().unwrap_or_default()
    }
}

/// Hours beyond the standard workday, never negative.
pub fn daily_overtime(worked_hours: f64, standard_workday_hours: f64) -> f64 {
    (worked_hours - standard_workday_hours).max(0.0)
}

/// Seconds beyond the standard workday, never negative.
pub fn overtime_seconds(worked_seconds: i64, standard_workday_seconds: i64) -> i64 {
    worked_seconds.saturating_sub(standard_workday_seconds).max(0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregator {
    standard_workday_hours: f64,
}

impl Default for Aggregator {
    fn default() -> Self {
        Aggregator::new(STANDARD_WORKDAY_HOURS)
    }
}

impl Aggregator {
    pub fn new(standard_workday_hours: f64) -> Self {
        Aggregator { standard_workday_hours }
    }

    pub fn standard_workday_hours(&self) -> f64 {
        self.standard_workday_hours
    }

    fn standard_workday_seconds(&self) -> i64 {
        (self.standard_workday_hours * 3600.0).round() as i64
    }

    /// Totals from already classified cells. Dates without a cell count as zero.
    ///
    /// Worked time is summed in whole seconds and each week is rounded half-up
    /// to two decimals once. The period totals are the exact sums of the
    /// rounded weeks.
    pub fn aggregate_cells(&self, cells: &BTreeMap<NaiveDate, DayCellResult>, weeks: &[WeekBucket]) -> EmployeeWeeklyTotals {
        let standard_seconds = self.standard_workday_seconds();
        let mut totals = EmployeeWeeklyTotals::default();
        let mut period_total = Decimal::ZERO;
        let mut period_overtime = Decimal::ZERO;

        for week in weeks {
            let (worked, overtime) = week
                .dates
                .iter()
                .filter_map(|date| cells.get(date))
                .filter(|cell| cell.is_worked())
                .map(|cell| cell.worked_seconds())
                .fold((0i64, 0i64), |(worked, overtime), seconds| {
                    (
                        worked.saturating_add(seconds),
                        overtime.saturating_add(overtime_seconds(seconds, standard_seconds)),
                    )
                });

            let week_total = round2(hours_from_seconds(worked));
            let week_overtime = round2(hours_from_seconds(overtime));
            period_total += week_total;
            period_overtime += week_overtime;
            totals.weeks.insert(
                week.week_number,
                WeekTotals {
                    total_hours: hours_f64(week_total),
                    overtime_hours: hours_f64(week_overtime),
                },
            );
        }

        totals.total_hours = hours_f64(period_total);
        totals.overtime_hours = hours_f64(period_overtime);
        totals
    }

    /// Classifies every bucketed date of one employee and totals the result.
    pub fn aggregate(
        &self,
        classifier: &Classifier,
        per_day_facts: &BTreeMap<NaiveDate, DailyFact>,
        weeks: &[WeekBucket],
    ) -> EmployeeWeeklyTotals {
        let cells = weeks
            .iter()
            .flat_map(|week| week.dates.iter())
            .map(|date| {
                let cell = match per_day_facts.get(date) {
                    Some(fact) => classifier.classify(fact, Presence::Recorded),
                    None => classifier.classify(&DailyFact::default(), Presence::Missing),
                };
                (*date, cell)
            })
            .collect();
        self.aggregate_cells(&cells, weeks)
    }
}
