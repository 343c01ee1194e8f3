//! Installation of the process-wide tracing subscriber.

use std::sync::Once;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "UISHELL_LOG";

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

static TRACING_INSTALLED: Once = Once::new();

/// Install a formatting subscriber filtered by [`LOG_ENV`] (idempotent).
///
/// Falls back to `info` when the variable is unset or unparsable. If another
/// subscriber is already installed it is left in place.
pub fn init_tracing() {
    TRACING_INSTALLED.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(DEFAULT_LOG_LEVEL.into())
            .with_env_var(LOG_ENV)
            .from_env_lossy();

        if tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
            .is_err()
        {
            tracing::debug!("a global subscriber is already installed");
        }
    });
}
