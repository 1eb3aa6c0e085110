//! Builds the employee × date attendance matrix.
//!
//! One build segments the date range into weeks once, classifies every
//! employee/date cell, totals each employee per week and attaches the roster
//! identity fields. Rows keep the roster order and cells keep the date order,
//! so the same input always yields the same matrix.
//!
//! A missing fact is not an error: the cell is classified as absent with the
//! `Sin Información` marker.
//!
//! ```rust
//! use tareo::libs::fact::{DailyFact, Employee, FactTable};
//! use tareo::libs::matrix::MatrixBuilder;
//! use tareo::libs::week::date_range;
//! use chrono::NaiveDate;
//!
//! let employees = vec![Employee {
//!     id: 1,
//!     document_number: "40112233".into(),
//!     name: "Ana Quispe".into(),
//!     area: None,
//!     cost_center: None,
//!     hire_date: None,
//! }];
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let dates = date_range(start, NaiveDate::from_ymd_opt(2024, 1, 14).unwrap());
//!
//! let matrix = MatrixBuilder::default().build(&employees, &dates, &FactTable::new());
//! assert_eq!(matrix.weeks.len(), 2);
//! assert_eq!(matrix.rows[0].days.len(), 14);
//! ```

use crate::libs::{
    aggregator::{Aggregator, EmployeeWeeklyTotals},
    cache::PivotCache,
    classifier::{CellField, CellType, Classifier, DayCellResult},
    config::{Config, MatrixConfig},
    fact::{Employee, EmployeeId, FactTable},
    permission::PermissionCatalog,
    week::{segment, WeekBucket},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One employee's flattened matrix row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotRow {
    pub id: EmployeeId,
    pub document_number: String,
    pub name: String,
    pub area: Option<String>,
    pub cost_center: Option<String>,
    pub hire_date: Option<NaiveDate>,
    /// One cell per date of [`Matrix::dates`], same order.
    pub days: Vec<DayCellResult>,
    pub totals: EmployeeWeeklyTotals,
    pub type_counts: BTreeMap<CellType, usize>,
}

impl PivotRow {
    pub fn count(&self, cell_type: CellType) -> usize {
        self.type_counts.get(&cell_type).copied().unwrap_or(0)
    }
}

/// The classified matrix plus the week grouping used for its column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matrix {
    pub dates: Vec<NaiveDate>,
    pub weeks: Vec<WeekBucket>,
    pub rows: Vec<PivotRow>,
}

impl Matrix {
    pub fn row(&self, employee_id: EmployeeId) -> Option<&PivotRow> {
        self.rows.iter().find(|row| row.id == employee_id)
    }

    pub fn cell(&self, employee_id: EmployeeId, date: NaiveDate) -> Option<&DayCellResult> {
        let index = self.dates.iter().position(|d| *d == date)?;
        self.row(employee_id)?.days.get(index)
    }
}

/// Builds matrices, keeping rendered display strings cached between builds.
///
/// Cell type and hours are resolved on every build; only the display text
/// comes from the cache. The cache is dropped automatically when a build sees
/// a fact table other than the one the cached strings were rendered from.
#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    classifier: Classifier,
    aggregator: Aggregator,
    cache: Option<PivotCache>,
    facts_generation: Option<u64>,
}

impl Default for MatrixBuilder {
    fn default() -> Self {
        MatrixBuilder::new(Classifier::default(), Aggregator::default(), Some(PivotCache::default()))
    }
}

impl MatrixBuilder {
    pub fn new(classifier: Classifier, aggregator: Aggregator, cache: Option<PivotCache>) -> Self {
        MatrixBuilder {
            classifier,
            aggregator,
            cache,
            facts_generation: None,
        }
    }

    /// A builder set up from the matrix and permission sections of `config`.
    pub fn from_config(config: &Config) -> Self {
        let matrix = config.matrix.clone().unwrap_or_default();
        let catalog = match &config.permissions {
            Some(permissions) => PermissionCatalog::with_overrides(&permissions.labels),
            None => PermissionCatalog::default(),
        };
        Self::from_matrix_config(&matrix, catalog)
    }

    pub fn from_matrix_config(matrix: &MatrixConfig, catalog: PermissionCatalog) -> Self {
        let cache = matrix.cache_enabled.then(|| PivotCache::new(matrix.cache_capacity));
        MatrixBuilder::new(
            Classifier::new(catalog, matrix.allow_overnight),
            Aggregator::new(matrix.standard_workday_hours),
            cache,
        )
    }

    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn cache(&self) -> Option<&PivotCache> {
        self.cache.as_ref()
    }

    /// Drops every memoized display string. Builds do this on their own when
    /// the fact table changes.
    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }

    pub fn build(&mut self, employees: &[Employee], dates: &[NaiveDate], facts: &FactTable) -> Matrix {
        if self.facts_generation != Some(facts.generation()) {
            if self.facts_generation.is_some() {
                tracing::debug!("fact table changed, dropping cached display strings");
            }
            self.clear_cache();
            self.facts_generation = Some(facts.generation());
        }

        let weeks = segment(dates);
        let rows = employees
            .iter()
            .map(|employee| self.build_row(employee, dates, &weeks, facts))
            .collect::<Vec<_>>();

        if let Some(cache) = &self.cache {
            let (hits, misses) = cache.stats();
            tracing::debug!(cached = cache.len(), hits, misses, "pivot cache after build");
        }
        tracing::debug!(
            employees = rows.len(),
            dates = dates.len(),
            weeks = weeks.len(),
            "attendance matrix built"
        );

        Matrix {
            dates: dates.to_vec(),
            weeks,
            rows,
        }
    }

    fn build_row(&mut self, employee: &Employee, dates: &[NaiveDate], weeks: &[WeekBucket], facts: &FactTable) -> PivotRow {
        let mut by_date = BTreeMap::new();
        let mut days = Vec::with_capacity(dates.len());
        let mut type_counts = BTreeMap::new();

        for &date in dates {
            let cell = self.classify_cell(employee.id, date, facts);
            *type_counts.entry(cell.cell_type).or_insert(0) += 1;
            by_date.insert(date, cell.clone());
            days.push(cell);
        }

        PivotRow {
            id: employee.id,
            document_number: employee.document_number.clone(),
            name: employee.name.clone(),
            area: employee.area.clone(),
            cost_center: employee.cost_center.clone(),
            hire_date: employee.hire_date,
            days,
            totals: self.aggregator.aggregate_cells(&by_date, weeks),
            type_counts,
        }
    }

    fn classify_cell(&mut self, employee_id: EmployeeId, date: NaiveDate, facts: &FactTable) -> DayCellResult {
        let (fact, presence) = facts.resolve(employee_id, date);
        let outcome = self.classifier.resolve(&fact);
        let classifier = &self.classifier;
        let render = |field| classifier.render(&fact, presence, outcome.cell_type, field);

        let (display_entry, display_salida) = match self.cache.as_mut() {
            Some(cache) => (
                cache.get_or_insert_with(employee_id, date, CellField::Entrada, || render(CellField::Entrada)),
                cache.get_or_insert_with(employee_id, date, CellField::Salida, || render(CellField::Salida)),
            ),
            None => (render(CellField::Entrada), render(CellField::Salida)),
        };

        DayCellResult {
            cell_type: outcome.cell_type,
            display_entry,
            display_salida,
            worked_hours: outcome.worked_hours,
        }
    }
}

/// Builds a matrix with default rules and a fresh cache.
pub fn build(employees: &[Employee], dates: &[NaiveDate], facts: &FactTable) -> Matrix {
    MatrixBuilder::default().build(employees, dates, facts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::fact::{DailyFact, DayType};
    use crate::libs::week::date_range;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(id: EmployeeId, cost_center: &str) -> Employee {
        Employee {
            id,
            document_number: format!("DOC{}", id),
            name: format!("Employee {}", id),
            area: Some("Operaciones".to_string()),
            cost_center: Some(cost_center.to_string()),
            hire_date: Some(ymd(2020, 3, 1)),
        }
    }

    fn worked(check_in: &str, check_out: &str) -> DailyFact {
        DailyFact {
            check_in_time: Some(check_in.to_string()),
            check_out_time: Some(check_out.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn rows_follow_roster_and_dates() {
        let employees = vec![employee(3, "CC1"), employee(1, "CC2"), employee(2, "CC1")];
        let dates = date_range(ymd(2024, 1, 1), ymd(2024, 1, 14));
        let mut facts = FactTable::new();
        facts.insert(1, ymd(2024, 1, 2), worked("08:00", "17:30"));
        facts.insert(
            1,
            ymd(2024, 1, 7),
            DailyFact {
                day_type: DayType::Rest,
                ..Default::default()
            },
        );

        let matrix = MatrixBuilder::default().build(&employees, &dates, &facts);

        let ids: Vec<EmployeeId> = matrix.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        for row in &matrix.rows {
            assert_eq!(row.days.len(), 14);
            assert_eq!(row.totals.weeks.len(), 2);
        }

        let row = matrix.row(1).unwrap();
        assert_eq!(row.days[1].cell_type, CellType::Worked);
        assert_eq!(row.days[6].cell_type, CellType::Rest);
        assert_eq!(row.count(CellType::Absent), 12);
        assert_eq!(row.totals.total_hours, 9.5);
        assert_eq!(row.totals.overtime_hours, 1.5);
        assert_eq!(row.cost_center.as_deref(), Some("CC2"));
    }

    #[test]
    fn missing_fact_is_sin_informacion() {
        let matrix = build(&[employee(1, "CC1")], &[ymd(2024, 1, 1)], &FactTable::new());
        let cell = matrix.cell(1, ymd(2024, 1, 1)).unwrap();
        assert_eq!(cell.cell_type, CellType::Absent);
        assert_eq!(cell.display_entry, "Sin Información");
    }

    #[test]
    fn cache_is_transparent() {
        let employees = vec![employee(1, "CC1"), employee(2, "CC1")];
        let dates = date_range(ymd(2024, 1, 1), ymd(2024, 1, 10));
        let mut facts = FactTable::new();
        facts.insert(1, ymd(2024, 1, 3), worked("07:45", "18:00"));
        facts.insert(
            2,
            ymd(2024, 1, 4),
            DailyFact {
                permission_code: Some("DM".to_string()),
                ..Default::default()
            },
        );

        let mut cached = MatrixBuilder::default();
        let first = cached.build(&employees, &dates, &facts);
        let warm = cached.build(&employees, &dates, &facts);
        let uncached = MatrixBuilder::default().without_cache().build(&employees, &dates, &facts);

        assert_eq!(first, warm);
        assert_eq!(first, uncached);
        assert_eq!(cached.cache().unwrap().len(), 2 * 10 * 2);
    }

    #[test]
    fn warm_build_renders_nothing() {
        let employees = vec![employee(1, "CC1"), employee(2, "CC1")];
        let dates = date_range(ymd(2024, 1, 1), ymd(2024, 1, 7));
        let mut facts = FactTable::new();
        facts.insert(1, ymd(2024, 1, 2), worked("08:00", "17:00"));
        let strings = 2 * 7 * 2;

        let mut builder = MatrixBuilder::default();
        builder.build(&employees, &dates, &facts);
        assert_eq!(builder.cache().unwrap().stats(), (0, strings));

        builder.build(&employees, &dates, &facts);
        assert_eq!(builder.cache().unwrap().stats(), (strings, strings));
    }

    #[test]
    fn changed_facts_drop_cached_strings() {
        let employees = vec![employee(1, "CC1")];
        let dates = vec![ymd(2024, 1, 2)];
        let mut facts = FactTable::new();
        facts.insert(1, ymd(2024, 1, 2), worked("08:00", "17:00"));

        let mut builder = MatrixBuilder::default();
        builder.build(&employees, &dates, &facts);

        facts.insert(
            1,
            ymd(2024, 1, 2),
            DailyFact {
                permission_code: Some("VAC".to_string()),
                ..Default::default()
            },
        );
        let matrix = builder.build(&employees, &dates, &facts);
        let cell = matrix.cell(1, ymd(2024, 1, 2)).unwrap();

        assert_eq!(cell.cell_type, CellType::Permission);
        assert_eq!(cell.display_entry, "Vacaciones");
        assert_eq!(cell.display_salida, "Vacaciones");
        assert_eq!(builder.cache().unwrap().stats(), (0, 2));
    }

    #[test]
    fn tiny_cache_still_correct() {
        let config = MatrixConfig {
            cache_capacity: 3,
            ..MatrixConfig::default()
        };
        let employees = vec![employee(1, "CC1")];
        let dates = date_range(ymd(2024, 1, 1), ymd(2024, 1, 7));
        let mut facts = FactTable::new();
        facts.insert(1, ymd(2024, 1, 5), worked("09:00", "18:00"));

        let mut builder = MatrixBuilder::from_matrix_config(&config, PermissionCatalog::default());
        let matrix = builder.build(&employees, &dates, &facts);

        assert_eq!(builder.cache().unwrap().len(), 3);
        assert_eq!(matrix, build(&employees, &dates, &facts));
    }

    #[test]
    fn empty_inputs() {
        let matrix = build(&[], &[], &FactTable::new());
        assert!(matrix.rows.is_empty());
        assert!(matrix.weeks.is_empty());

        let matrix = build(&[employee(1, "CC1")], &[], &FactTable::new());
        assert_eq!(matrix.rows.len(), 1);
        assert!(matrix.rows[0].days.is_empty());
        assert_eq!(matrix.rows[0].totals.total_hours, 0.0);
    }
}
