//! Per-day classification of an attendance cell.
//!
//! Rules are checked in this order and the first match wins:
//!
//! 1. holiday: punches are shown if present, otherwise `FER`
//! 2. scheduled rest: `Día de Descanso`, punches ignored
//! 3. permission: the permission label, punches ignored
//! 4. both punches valid and `0 < hours < 24`: worked
//! 5. anything else: absent (`Falta`, or `Sin Información` for a missing record)
//!
//! A declared holiday or rest day overrides any punch or permission and a
//! permission overrides a punch pair. Reordering the rules changes what the
//! reports say.

use crate::libs::{
    fact::{DailyFact, DayType, Presence},
    formatter::display_time,
    permission::PermissionCatalog,
    time::{parse_optional, shift_hours},
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const HOLIDAY_MARKER: &str = "FER";
pub const REST_MARKER: &str = "Día de Descanso";
pub const ABSENT_MARKER: &str = "Falta";
pub const NO_RECORD_MARKER: &str = "Sin Información";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Holiday,
    Rest,
    Permission,
    Worked,
    Absent,
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellType::Holiday => "holiday",
            CellType::Rest => "rest",
            CellType::Permission => "permission",
            CellType::Worked => "worked",
            CellType::Absent => "absent",
        };
        write!(f, "{}", name)
    }
}

/// Outcome for one employee on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCellResult {
    #[serde(rename = "type")]
    pub cell_type: CellType,
    pub display_entry: String,
    pub display_salida: String,
    /// Zero unless `cell_type` is [`CellType::Worked`].
    pub worked_hours: f64,
}

impl DayCellResult {
    pub fn is_worked(&self) -> bool {
        self.cell_type == CellType::Worked
    }

    /// Worked time in whole seconds; punches carry second precision.
    pub fn worked_seconds(&self) -> i64 {
        (self.worked_hours * 3600.0).round() as i64
    }
}

/// Which of the two sub-columns of a day a display string belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellField {
    Entrada,
    Salida,
}

impl fmt::Display for CellField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellField::Entrada => write!(f, "entrada"),
            CellField::Salida => write!(f, "salida"),
        }
    }
}

/// Type and hours of a cell, decided before any display text is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub cell_type: CellType,
    pub worked_hours: f64,
}

impl Outcome {
    fn marked(cell_type: CellType) -> Self {
        Outcome {
            cell_type,
            worked_hours: 0.0,
        }
    }
}

/// Applies the priority rules with a given permission table.
///
/// Classification is split in two steps: [`Classifier::resolve`] decides the
/// type and worked hours, [`Classifier::render`] produces the text of one
/// sub-column. The matrix builder memoizes the second step.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    catalog: PermissionCatalog,
    allow_overnight: bool,
}

impl Classifier {
    pub fn new(catalog: PermissionCatalog, allow_overnight: bool) -> Self {
        Classifier { catalog, allow_overnight }
    }

    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    pub fn classify(&self, fact: &DailyFact, presence: Presence) -> DayCellResult {
        let outcome = self.resolve(fact);
        DayCellResult {
            cell_type: outcome.cell_type,
            display_entry: self.render(fact, presence, outcome.cell_type, CellField::Entrada),
            display_salida: self.render(fact, presence, outcome.cell_type, CellField::Salida),
            worked_hours: outcome.worked_hours,
        }
    }

    /// First matching rule wins.
    pub fn resolve(&self, fact: &DailyFact) -> Outcome {
        match fact.day_type {
            DayType::Holiday => return Outcome::marked(CellType::Holiday),
            DayType::Rest => return Outcome::marked(CellType::Rest),
            DayType::Ordinary => {}
        }

        if fact.permission().is_some() {
            return Outcome::marked(CellType::Permission);
        }

        match self.worked_hours(fact) {
            Some(hours) => Outcome {
                cell_type: CellType::Worked,
                worked_hours: hours,
            },
            None => Outcome::marked(CellType::Absent),
        }
    }

    /// Display text of one sub-column for a cell already resolved to `cell_type`.
    pub fn render(&self, fact: &DailyFact, presence: Presence, cell_type: CellType, field: CellField) -> String {
        let raw = match field {
            CellField::Entrada => fact.check_in_time.as_deref(),
            CellField::Salida => fact.check_out_time.as_deref(),
        };

        match cell_type {
            CellType::Holiday => raw
                .and_then(display_time)
                .unwrap_or_else(|| HOLIDAY_MARKER.to_string()),
            CellType::Rest => REST_MARKER.to_string(),
            CellType::Permission => match fact.permission() {
                Some(code) => self.catalog.label(code),
                None => ABSENT_MARKER.to_string(),
            },
            CellType::Worked => raw.and_then(display_time).unwrap_or_default(),
            CellType::Absent => match presence {
                Presence::Recorded => ABSENT_MARKER.to_string(),
                Presence::Missing => NO_RECORD_MARKER.to_string(),
            },
        }
    }

    fn worked_hours(&self, fact: &DailyFact) -> Option<f64> {
        let check_in = parse_optional(fact.check_in_time.as_deref())?;
        let check_out = parse_optional(fact.check_out_time.as_deref())?;
        shift_hours(check_in, check_out, self.allow_overnight)
    }
}

/// Classifies with the built-in permission table and no overnight rollover.
pub fn classify(fact: &DailyFact, presence: Presence) -> DayCellResult {
    Classifier::default().classify(fact, presence)
}
