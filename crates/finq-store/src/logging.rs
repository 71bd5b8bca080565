//! Process-wide tracing setup.
//!
//! Library code only emits `tracing` events; binaries call [`init`] once to
//! route them to stderr. The filter comes from `FINQ_LOG` (any `EnvFilter`
//! directive, e.g. `finq_store=debug`) and defaults to `warn`.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, EnvFilter};

use crate::env::{EnvReader, RealEnv};

pub const LOG_VAR: &str = "FINQ_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Installs the global subscriber. Later calls do nothing.
pub fn init() {
    init_with(&RealEnv);
}

/// Like [`init`], reading `FINQ_LOG` through `env`.
pub fn init_with(env: &dyn EnvReader) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let directive = filter_directive(env);
        let filter = EnvFilter::try_new(&directive)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let subscriber = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .finish();

        // Another subscriber may already be installed (tests, embedding apps).
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            tracing::debug!("global tracing subscriber already set");
        }
    });
}

fn filter_directive(env: &dyn EnvReader) -> String {
    env.var(LOG_VAR)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string())
}
