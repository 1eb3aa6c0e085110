use super::{load_input, settings};
use crate::{
    libs::{
        fact::EmployeeId,
        matrix::MatrixBuilder,
        messages::Message,
        report::{cost_center_report, markings_detail, weekly_report},
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Hours and overtime per employee and week
    Weekly,
    /// Hours and day counts per cost center
    CostCenter,
    /// Punches next to the classified day
    Markings,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Reporting payload (JSON)
    input: PathBuf,

    #[arg(short, long, value_enum, default_value = "weekly")]
    kind: ReportKind,

    /// Limit the markings detail to one employee
    #[arg(short, long)]
    employee: Option<EmployeeId>,
}

pub fn cmd(args: ReportArgs) -> Result<()> {
    let config = settings();
    let matrix_config = config.matrix_or_default();
    let input = load_input(&args.input, &matrix_config)?;
    let matrix = MatrixBuilder::from_config(&config).build(&input.employees, &input.dates, &input.facts);

    if matrix.rows.is_empty() {
        msg_info!(Message::NoEmployees);
        return Ok(());
    }
    if let Some(id) = args.employee {
        if matrix.row(id).is_none() {
            msg_bail_anyhow!(Message::EmployeeNotFound(id));
        }
    }

    let start = input.dates.first().map(|d| d.to_string()).unwrap_or_default();
    let end = input.dates.last().map(|d| d.to_string()).unwrap_or_default();

    match args.kind {
        ReportKind::Weekly => {
            msg_print!(Message::WeeklyReportHeader(start, end), true);
            let lines: Vec<_> = weekly_report(&matrix)
                .into_iter()
                .filter(|line| args.employee.map_or(true, |id| id == line.employee_id))
                .collect();
            View::weekly(&lines)?;
        }
        ReportKind::CostCenter => {
            msg_print!(Message::CostCenterReportHeader(start, end), true);
            View::cost_centers(&cost_center_report(&matrix))?;
        }
        ReportKind::Markings => {
            msg_print!(Message::MarkingsHeader(start, end), true);
            let lines = markings_detail(&matrix, &input.facts, matrix_config.standard_workday_hours, args.employee);
            View::markings(&lines)?;
        }
    }

    Ok(())
}
