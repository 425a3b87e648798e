//! Diagnostic logging setup.
//!
//! The library only emits `tracing` events; hosts that want them printed call
//! [`init`] once at startup.

use std::io::{self, IsTerminal};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ChatConfig;

pub const DEFAULT_LEVEL: &str = "info";

/// Install a stderr fmt subscriber. Returns `false` when a global subscriber
/// was already set, in which case the existing one stays in place.
pub fn init(config: &ChatConfig) -> bool {
    tracing_subscriber::registry()
        .with(env_filter(config.log_level.as_deref()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(false),
        )
        .try_init()
        .is_ok()
}

/// `RUST_LOG` wins; otherwise `level`, falling back to [`DEFAULT_LEVEL`] when
/// absent or unparsable.
pub fn env_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        level
            .and_then(|level| EnvFilter::try_new(level).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL))
    })
}
