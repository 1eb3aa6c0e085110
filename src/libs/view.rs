//! Terminal tables for the matrix and the report views.
//!
//! Each function prints one `prettytable` table to stdout. Column headers are
//! in Spanish to match the payroll sheets the numbers are checked against.
//! Hours are shown as `H:MM` durations via [`format_hours`]; the values
//! themselves are never re-rounded here.

use super::{
    classifier::CellType,
    formatter::format_hours,
    matrix::Matrix,
    report::{CostCenterSummary, MarkingLine, WeeklyReportLine},
};
use anyhow::Result;
use chrono::{Datelike, NaiveDate, Weekday};
use prettytable::{format, row, Attr, Cell, Row, Table};

/// Namespace for the table printers. Holds no state.
pub struct View {}

impl View {
    /// Prints the matrix with a week header row grouping the date columns.
    ///
    /// Each day cell shows the entry text over the exit text. The trailing
    /// columns hold one `hours / overtime` pair per week and one for the
    /// whole period.
    pub fn matrix(matrix: &Matrix) -> Result<()> {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let mut groups = vec![Cell::new("").with_hspan(3)];
        for week in &matrix.weeks {
            groups.push(
                Cell::new(&format!("Semana {}", week.week_number))
                    .with_style(Attr::Bold)
                    .with_hspan(week.len()),
            );
        }
        groups.push(Cell::new("Horas / Extra").with_style(Attr::Bold).with_hspan(matrix.weeks.len() + 1));
        table.add_row(Row::new(groups));

        let mut header = vec![Cell::new("ID"), Cell::new("NOMBRE"), Cell::new("C. COSTO")];
        header.extend(matrix.dates.iter().map(|date| Cell::new(&day_label(*date))));
        header.extend(matrix.weeks.iter().map(|week| Cell::new(&format!("S{}", week.week_number))));
        header.push(Cell::new("TOTAL"));
        table.add_row(Row::new(header));

        for row in &matrix.rows {
            let mut cells = vec![
                Cell::new(&row.id.to_string()),
                Cell::new(&row.name),
                Cell::new(row.cost_center.as_deref().unwrap_or("")),
            ];
            for day in &row.days {
                cells.push(Cell::new(&format!("{}\n{}", day.display_entry, day.display_salida)));
            }
            for week in &matrix.weeks {
                let totals = row.totals.week(week.week_number);
                cells.push(Cell::new(&format!(
                    "{}\n{}",
                    format_hours(totals.total_hours),
                    format_hours(totals.overtime_hours)
                )));
            }
            cells.push(Cell::new(&format!(
                "{}\n{}",
                format_hours(row.totals.total_hours),
                format_hours(row.totals.overtime_hours)
            )));
            table.add_row(Row::new(cells));
        }
        table.printstd();

        Ok(())
    }

    /// One row per employee and week; the period line shows `TOTAL` as its week.
    pub fn weekly(lines: &[WeeklyReportLine]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NOMBRE", "SEMANA", "DESDE", "HASTA", "HORAS", "EXTRA"]);
        for line in lines {
            let week = match line.week_number {
                Some(number) => number.to_string(),
                None => "TOTAL".to_string(),
            };
            table.add_row(row![
                line.employee_id,
                line.name,
                week,
                short_date(line.start_date),
                short_date(line.end_date),
                line.total_display,
                line.overtime_display
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Period totals and day counts per cost center, in report order.
    pub fn cost_centers(summaries: &[CostCenterSummary]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["CENTRO DE COSTO", "EMPLEADOS", "HORAS", "EXTRA", "TRABAJADOS", "FALTAS", "PERMISOS"]);
        for summary in summaries {
            let count = |cell_type: CellType| summary.type_counts.get(&cell_type).copied().unwrap_or(0);
            table.add_row(row![
                summary.cost_center,
                summary.employees,
                format_hours(summary.total_hours),
                format_hours(summary.overtime_hours),
                count(CellType::Worked),
                count(CellType::Absent),
                count(CellType::Permission)
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Raw and expected punches next to the classified day.
    ///
    /// Lateness is blank (`-`) for days that were not worked or have no
    /// expected entry.
    pub fn markings(lines: &[MarkingLine]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row![
            "ID", "NOMBRE", "FECHA", "TIPO", "ENTRADA", "SALIDA", "PROG. ENTRADA", "PROG. SALIDA", "TRABAJADO", "TARDANZA"
        ]);
        for line in lines {
            table.add_row(row![
                line.employee_id,
                line.name,
                line.date.format("%d/%m/%Y"),
                line.cell_type,
                line.check_in,
                line.check_out,
                line.expected_check_in,
                line.expected_check_out,
                line.worked,
                line.late_minutes.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string())
            ]);
        }
        table.printstd();

        Ok(())
    }
}

/// Column header for a date, e.g. `Lun 01/01`.
fn day_label(date: NaiveDate) -> String {
    let name = match date.weekday() {
        Weekday::Mon => "Lun",
        Weekday::Tue => "Mar",
        Weekday::Wed => "Mié",
        Weekday::Thu => "Jue",
        Weekday::Fri => "Vie",
        Weekday::Sat => "Sáb",
        Weekday::Sun => "Dom",
    };
    format!("{} {}", name, date.format("%d/%m"))
}

fn short_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string()).unwrap_or_default()
}
