use tracing_subscriber::EnvFilter;

use crate::error::{DashboardError, Result};

/// Installs the global tracing subscriber. Verbosity follows `RUST_LOG` and
/// defaults to `warn`; output goes to stderr so stdout stays clean for
/// reports and JSON.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| DashboardError::Logging(err.to_string()))
}
