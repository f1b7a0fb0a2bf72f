//! Logging setup.
//!
//! `M3UGEN_LOG` takes precedence over `RUST_LOG`; both accept the usual
//! `tracing_subscriber::EnvFilter` directives. Defaults to `info`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "M3UGEN_LOG";
const DEFAULT_FILTER: &str = "info";

fn build_filter<F>(lookup: F) -> EnvFilter
where
    F: Fn(&str) -> Option<String>,
{
    [LOG_ENV, EnvFilter::DEFAULT_ENV]
        .into_iter()
        .filter_map(|key| lookup(key))
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let filter = build_filter(|key| std::env::var(key).ok());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        // logcat does not render ANSI escapes
        .with_ansi(cfg!(not(target_os = "android")))
        .try_init();
}
