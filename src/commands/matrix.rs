use super::{load_input, settings};
use crate::{
    libs::{matrix::MatrixBuilder, messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MatrixArgs {
    /// Reporting payload (JSON)
    input: PathBuf,

    /// Build without the pivot cache
    #[arg(long)]
    no_cache: bool,
}

pub fn cmd(args: MatrixArgs) -> Result<()> {
    let config = settings();
    let input = load_input(&args.input, &config.matrix_or_default())?;

    let mut builder = MatrixBuilder::from_config(&config);
    if args.no_cache {
        msg_info!(Message::CacheDisabled);
        builder = builder.without_cache();
    }
    let matrix = builder.build(&input.employees, &input.dates, &input.facts);

    if matrix.rows.is_empty() {
        msg_info!(Message::NoEmployees);
        return Ok(());
    }

    if let (Some(start), Some(end)) = (matrix.dates.first(), matrix.dates.last()) {
        msg_print!(Message::MatrixHeader(start.to_string(), end.to_string()), true);
    }
    View::matrix(&matrix)?;

    if let Some(cache) = builder.cache() {
        let (hits, misses) = cache.stats();
        tracing::debug!(hits, misses, entries = cache.len(), "pivot cache usage");
    }

    Ok(())
}
