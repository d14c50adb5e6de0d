use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Installs the stderr subscriber. Safe to call more than once.
///
/// Levels come from `CAREERFIT_LOG` (e.g. `CAREERFIT_LOG=careerfit=debug`),
/// falling back to `careerfit=info`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("CAREERFIT_LOG")
            .unwrap_or_else(|_| EnvFilter::new("careerfit=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}
