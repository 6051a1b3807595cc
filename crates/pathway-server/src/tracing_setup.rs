//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding a full `EnvFilter` directive.
pub const LOG_ENV: &str = "PATHWAY_LOG";

/// Initialize the Pathway tracing subscriber.
///
/// `PATHWAY_LOG` (e.g. `pathway_model=debug,info`) wins over `level`.
/// Idempotent: later calls are no-ops.
pub fn init_tracing(level: &str, json: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_new(level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let registry = tracing_subscriber::registry().with(filter);
        if json {
            registry
                .with(fmt::layer().json().with_target(true).with_current_span(true))
                .init();
        } else {
            registry
                .with(fmt::layer().with_target(true).with_thread_ids(true))
                .init();
        }
    });
}
