//! Tracing subscriber setup.
//!
//! The level comes from `RUST_LOG` (e.g. `RUST_LOG=tareo=debug`) and defaults
//! to `warn`, so normal CLI runs only print the tables.

use tracing_subscriber::{fmt, EnvFilter};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .try_init();
}
