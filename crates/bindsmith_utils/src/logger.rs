use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "bindsmith=info";

/// Installs the stderr subscriber once per process. `verbose` lowers the
/// default level to `debug`; `RUST_LOG` still wins when set.
pub fn init_logging(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose {
            "bindsmith=debug,bindsmith_model=debug,bindsmith_synth=debug"
        } else {
            DEFAULT_FILTER
        };
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    });
}
