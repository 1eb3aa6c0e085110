//! Writes the matrix and its report views to files.
//!
//! Exporters are mechanical: every display string and total has already
//! been produced by the engine, so this module only lays values out as CSV
//! rows or pretty-printed JSON.
//!
//! ```rust,no_run
//! use tareo::libs::export::{ExportData, ExportFormat, ExportSource, Exporter};
//! # fn run(source: ExportSource) -> anyhow::Result<()> {
//! let exporter = Exporter::new(ExportFormat::Csv, None);
//! let path = exporter.export(ExportData::Matrix, &source)?;
//! println!("written to {}", path.display());
//! # Ok(())
//! # }
//! ```

use crate::libs::{
    error::MatrixError,
    fact::FactTable,
    matrix::Matrix,
    messages::Message,
    report::{cost_center_report, markings_detail, weekly_report},
};
use crate::msg_success;
use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportData {
    /// Identity columns, entry/exit per date, hours per week and period.
    Matrix,
    /// One line per employee and week plus a period line.
    Weekly,
    /// Totals grouped by cost center.
    CostCenter,
    /// Raw punches beside the classified outcome of each day.
    Markings,
}

impl ExportData {
    fn file_stem(&self) -> &'static str {
        match self {
            ExportData::Matrix => "matrix",
            ExportData::Weekly => "weekly",
            ExportData::CostCenter => "cost_center",
            ExportData::Markings => "markings",
        }
    }
}

/// Everything an export may draw from.
pub struct ExportSource<'a> {
    pub matrix: &'a Matrix,
    pub facts: &'a FactTable,
    pub standard_workday_hours: f64,
}

pub struct Exporter {
    format: ExportFormat,
    output_path: Option<PathBuf>,
}

impl Exporter {
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        Exporter { format, output_path }
    }

    /// Writes `data` and returns the path written to.
    pub fn export(&self, data: ExportData, source: &ExportSource) -> Result<PathBuf> {
        let path = self.output_path.clone().unwrap_or_else(|| self.default_path(data));

        match data {
            ExportData::Matrix => self.write_matrix(&path, source.matrix)?,
            ExportData::Weekly => self.write_records(&path, &weekly_report(source.matrix))?,
            ExportData::CostCenter => self.write_cost_centers(&path, source.matrix)?,
            ExportData::Markings => self.write_records(
                &path,
                &markings_detail(source.matrix, source.facts, source.standard_workday_hours, None),
            )?,
        }

        tracing::info!(path = %path.display(), ?data, format = ?self.format, "export written");
        msg_success!(Message::DataExported(path.display().to_string()));
        Ok(path)
    }

    fn default_path(&self, data: ExportData) -> PathBuf {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        PathBuf::from(format!("tareo_{}_{}.{}", data.file_stem(), timestamp, self.format.extension()))
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<(), MatrixError> {
        let mut file = File::create(path)?;
        serde_json::to_writer_pretty(&mut file, value)?;
        file.write_all(b"\n")?;
        Ok(())
    }

    fn write_records<T: Serialize>(&self, path: &Path, records: &[T]) -> Result<(), MatrixError> {
        match self.format {
            ExportFormat::Json => self.write_json(path, records),
            ExportFormat::Csv => {
                let mut writer = csv::Writer::from_path(path)?;
                for record in records {
                    writer.serialize(record)?;
                }
                writer.flush()?;
                Ok(())
            }
        }
    }

    fn write_cost_centers(&self, path: &Path, matrix: &Matrix) -> Result<(), MatrixError> {
        let report = cost_center_report(matrix);
        if self.format == ExportFormat::Json {
            return self.write_json(path, &report);
        }

        let mut writer = csv::Writer::from_path(path)?;
        let mut header = vec!["Centro de Costo".to_string(), "Empleados".to_string()];
        for week in &matrix.weeks {
            header.push(format!("S{} Horas", week.week_number));
            header.push(format!("S{} Extra", week.week_number));
        }
        header.extend(["Total Horas".to_string(), "Total Extra".to_string()]);
        writer.write_record(&header)?;

        for summary in &report {
            let mut record = vec![summary.cost_center.clone(), summary.employees.to_string()];
            for week in &matrix.weeks {
                let totals = summary.weeks.get(&week.week_number).copied().unwrap_or_default();
                record.push(format!("{:.2}", totals.total_hours));
                record.push(format!("{:.2}", totals.overtime_hours));
            }
            record.push(format!("{:.2}", summary.total_hours));
            record.push(format!("{:.2}", summary.overtime_hours));
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_matrix(&self, path: &Path, matrix: &Matrix) -> Result<(), MatrixError> {
        if self.format == ExportFormat::Json {
            return self.write_json(path, matrix);
        }

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(matrix_header(matrix))?;
        for record in matrix_records(matrix) {
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Column headers of the flat matrix table.
pub fn matrix_header(matrix: &Matrix) -> Vec<String> {
    let mut header: Vec<String> = ["ID", "Documento", "Nombre", "Área", "Centro de Costo", "Fecha Ingreso"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    for date in &matrix.dates {
        header.push(format!("{} Entrada", date.format("%Y-%m-%d")));
        header.push(format!("{} Salida", date.format("%Y-%m-%d")));
    }
    for week in &matrix.weeks {
        header.push(format!("S{} Horas", week.week_number));
        header.push(format!("S{} Extra", week.week_number));
    }
    header.push("Total Horas".to_string());
    header.push("Total Extra".to_string());
    header
}

/// One flat record per matrix row, aligned with [`matrix_header`].
pub fn matrix_records(matrix: &Matrix) -> Vec<Vec<String>> {
    matrix
        .rows
        .iter()
        .map(|row| {
            let mut record = vec![
                row.id.to_string(),
                row.document_number.clone(),
                row.name.clone(),
                row.area.clone().unwrap_or_default(),
                row.cost_center.clone().unwrap_or_default(),
                row.hire_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            ];
            for cell in &row.days {
                record.push(cell.display_entry.clone());
                record.push(cell.display_salida.clone());
            }
            for week in &matrix.weeks {
                let totals = row.totals.week(week.week_number);
                record.push(format!("{:.2}", totals.total_hours));
                record.push(format!("{:.2}", totals.overtime_hours));
            }
            record.push(format!("{:.2}", row.totals.total_hours));
            record.push(format!("{:.2}", row.totals.overtime_hours));
            record
        })
        .collect()
}
