pub mod export;
pub mod init;
pub mod matrix;
pub mod report;

use crate::libs::{
    config::{Config, MatrixConfig},
    messages::Message,
    source::{MatrixInput, ReportResponse},
};
use crate::{msg_info, msg_warning};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::Path;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Build and print the attendance matrix", arg_required_else_help = true)]
    Matrix(matrix::MatrixArgs),
    #[command(about = "Print a report view of the matrix", arg_required_else_help = true)]
    Report(report::ReportArgs),
    #[command(about = "Export the matrix or a report view to a file", arg_required_else_help = true)]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Matrix(args) => matrix::cmd(args),
            Commands::Report(args) => report::cmd(args),
            Commands::Export(args) => export::cmd(args),
        }
    }
}

/// Effective settings: the saved file, or defaults when it cannot be read.
pub(crate) fn settings() -> Config {
    Config::read().unwrap_or_else(|e| {
        msg_warning!(Message::ConfigReadFailed(e.to_string()));
        Config::default()
    })
}

/// Loads a payload file and validates it against the roster rules.
pub(crate) fn load_input(path: &Path, matrix: &MatrixConfig) -> Result<MatrixInput> {
    msg_info!(Message::LoadingReport(path.display().to_string()));
    let response = ReportResponse::from_path(path)
        .with_context(|| Message::ReportLoadFailed(path.display().to_string()).to_string())?;
    Ok(response.into_input(matrix.strict_roster)?)
}
