//! Export of the matrix and its report views.
//!
//! ```bash
//! # Flat matrix as CSV next to the payload's working directory
//! tareo export payload.json
//!
//! # Weekly report as JSON to a chosen file
//! tareo export payload.json --data weekly --format json --output weekly.json
//! ```

use super::{load_input, settings};
use crate::{
    libs::{
        export::{ExportData, ExportFormat, ExportSource, Exporter},
        matrix::MatrixBuilder,
        messages::Message,
    },
    msg_info,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Reporting payload (JSON)
    input: PathBuf,

    /// What to export
    #[arg(short, long, value_enum, default_value = "matrix")]
    data: ExportData,

    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Output file; defaults to `tareo_<data>_<timestamp>.<ext>`
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let config = settings();
    let matrix_config = config.matrix_or_default();
    let input = load_input(&args.input, &matrix_config)?;
    let matrix = MatrixBuilder::from_config(&config).build(&input.employees, &input.dates, &input.facts);

    msg_info!(Message::ExportingData(format!("{:?}", args.data), format!("{:?}", args.format)));

    let source = ExportSource {
        matrix: &matrix,
        facts: &input.facts,
        standard_workday_hours: matrix_config.standard_workday_hours,
    };
    Exporter::new(args.format, args.output).export(args.data, &source)?;

    Ok(())
}
