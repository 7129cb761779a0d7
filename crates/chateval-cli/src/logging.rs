//! Logging setup
//!
//! Logs always go to stderr; stdout is reserved for the outcome document.

use tracing_subscriber::EnvFilter;

use crate::args::LogFormat;

const QUIET_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "warn,chateval=info,chateval_core=info,chateval_eval=info";

/// Filter directives used when `RUST_LOG` is unset
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { QUIET_FILTER }
}

/// Initialize logging with environment-based filtering.
/// Set RUST_LOG=debug for verbose logging.
pub fn init(verbose: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
